//! Resolution strategies.
//!
//! Three deterministic heuristics (protect focus, hit deadlines, reschedule
//! later) plus replay of operation sets produced by a remote negotiation
//! service. Every strategy carries the operations, the resulting block list
//! and the change log, so callers can preview it and apply it in one step.

mod config;
mod engine;
mod heuristics;
mod score;


pub use config::{EngineRevision, StrategyConfig};
pub use engine::{generate_strategies, promote_preferred, StrategyEngine};
pub use score::{block_score, kind_weight, priority_weight};

use serde::{Deserialize, Serialize};

use crate::block::Block;
use crate::operation::{Change, Operation, OperationKind};

/// The built-in heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    ProtectFocus,
    HitDeadlines,
    RescheduleLater,
}

impl StrategyKind {
    /// Stable id callers may store to remember a choice
    pub fn id(&self) -> &'static str {
        match self {
            Self::ProtectFocus => "protect_focus",
            Self::HitDeadlines => "hit_deadlines",
            Self::RescheduleLater => "reschedule_later",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Self::ProtectFocus => "Protect focus time",
            Self::HitDeadlines => "Hit deadlines",
            Self::RescheduleLater => "Defer to later",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Self::ProtectFocus => "Keep deep-focus blocks intact and move what collides with them",
            Self::HitDeadlines => "Shorten lower-priority work so important blocks fit",
            Self::RescheduleLater => "Push lower-priority blocks to later in the day",
        }
    }
}

/// Where a strategy came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategySource {
    Local,
    Remote,
}

/// A named bundle of operations with its previewed result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Strategy {
    pub id: String,
    pub title: String,
    pub description: String,
    pub source: StrategySource,
    pub operations: Vec<Operation>,
    pub changes: Vec<Change>,
    pub blocks: Vec<Block>,
    pub trade_offs: Vec<String>,
    /// Conflicts still detected on `blocks`
    pub residual_conflicts: usize,
}

/// A strategy as described by the remote negotiation service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyDescriptor {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action: Option<OperationKind>,
    #[serde(default, alias = "severity", skip_serializing_if = "Option::is_none")]
    pub impact: Option<String>,
    #[serde(default)]
    pub operations: Vec<Operation>,
}
