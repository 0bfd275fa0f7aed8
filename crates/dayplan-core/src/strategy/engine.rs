//! Strategy generation and replay.

use super::config::{EngineRevision, StrategyConfig};
use super::heuristics::{self, Plan};
use super::{Strategy, StrategyDescriptor, StrategyKind, StrategySource};
use crate::block::Block;
use crate::conflict::{Conflict, ConflictDetector, DetectorOptions};
use crate::operation::{Operation, OperationApplier};

/// Builds ranked resolution strategies for a set of conflicts.
pub struct StrategyEngine {
    config: StrategyConfig,
    detector: DetectorOptions,
}

impl StrategyEngine {
    /// Create an engine with default config
    pub fn new() -> Self {
        Self {
            config: StrategyConfig::default(),
            detector: DetectorOptions::default(),
        }
    }

    /// Create with custom config
    pub fn with_config(config: StrategyConfig) -> Self {
        Self {
            config,
            detector: DetectorOptions::default(),
        }
    }

    /// Options used to count conflicts left after each strategy
    pub fn with_detector_options(mut self, detector: DetectorOptions) -> Self {
        self.detector = detector;
        self
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Generate local strategies. No conflicts means nothing to resolve.
    pub fn generate(&self, blocks: &[Block], conflicts: &[Conflict]) -> Vec<Strategy> {
        if conflicts.is_empty() {
            return Vec::new();
        }

        let config = &self.config;
        let plans = [
            (
                StrategyKind::ProtectFocus,
                heuristics::protect_focus(blocks, conflicts, config),
            ),
            (
                StrategyKind::HitDeadlines,
                heuristics::hit_deadlines(blocks, conflicts, config),
            ),
            (
                StrategyKind::RescheduleLater,
                heuristics::reschedule_later(blocks, conflicts, config),
            ),
        ];

        let strategies = plans
            .into_iter()
            .filter(|(_, plan)| !plan.operations.is_empty())
            .map(|(kind, plan)| self.build_local(kind, plan, blocks))
            .collect();

        self.rank(strategies)
    }

    /// Apply externally supplied strategy descriptors to `blocks`.
    ///
    /// Descriptors without operations are dropped; operations that miss
    /// their parameters become skipped changes.
    pub fn replay(&self, blocks: &[Block], descriptors: &[StrategyDescriptor]) -> Vec<Strategy> {
        let strategies = descriptors
            .iter()
            .filter(|d| !d.operations.is_empty())
            .map(|d| {
                let mut trade_offs = Vec::new();
                if let Some(impact) = d.impact.as_deref().filter(|s| !s.trim().is_empty()) {
                    trade_offs.push(format!("Impact: {impact}"));
                }
                if let Some(action) = d.action {
                    trade_offs.push(format!("Primary action: {}", action.as_str()));
                }
                self.build(
                    d.id.clone(),
                    d.title.clone(),
                    d.description.clone(),
                    StrategySource::Remote,
                    d.operations.clone(),
                    trade_offs,
                    blocks,
                )
            })
            .collect();

        self.rank(strategies)
    }

    fn build_local(&self, kind: StrategyKind, plan: Plan, blocks: &[Block]) -> Strategy {
        self.build(
            kind.id().to_string(),
            kind.title().to_string(),
            kind.description().to_string(),
            StrategySource::Local,
            plan.operations,
            plan.trade_offs,
            blocks,
        )
    }

    #[allow(clippy::too_many_arguments)]
    fn build(
        &self,
        id: String,
        title: String,
        description: String,
        source: StrategySource,
        operations: Vec<Operation>,
        trade_offs: Vec<String>,
        blocks: &[Block],
    ) -> Strategy {
        let outcome = OperationApplier::new()
            .with_fuzzy_targets(self.config.allow_fuzzy_targets)
            .apply(blocks, &operations);
        let residual_conflicts = ConflictDetector::with_options(self.detector.clone())
            .detect(&outcome.blocks)
            .len();

        Strategy {
            id,
            title,
            description,
            source,
            operations,
            changes: outcome.changes,
            blocks: outcome.blocks,
            trade_offs,
            residual_conflicts,
        }
    }

    fn rank(&self, mut strategies: Vec<Strategy>) -> Vec<Strategy> {
        if self.config.revision == EngineRevision::V2 {
            strategies.sort_by_key(|s| s.residual_conflicts);
        }
        tracing::info!(
            strategies = strategies.len(),
            best = strategies.first().map(|s| s.id.as_str()).unwrap_or("-"),
            "strategies ranked"
        );
        strategies
    }
}

impl Default for StrategyEngine {
    fn default() -> Self {
        Self::new()
    }
}

/// Generate strategies with the default engine.
pub fn generate_strategies(blocks: &[Block], conflicts: &[Conflict]) -> Vec<Strategy> {
    StrategyEngine::new().generate(blocks, conflicts)
}

/// Move the strategy a user picked last time to the front, keeping the
/// rest in order. Returns whether it was found.
pub fn promote_preferred(strategies: &mut [Strategy], preferred_id: &str) -> bool {
    match strategies.iter().position(|s| s.id == preferred_id) {
        Some(index) => {
            strategies[..=index].rotate_right(1);
            true
        }
        None => false,
    }
}
