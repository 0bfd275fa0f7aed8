//! Conflict detection over a day of blocks.
//!
//! Five independent passes run over the start-ordered list:
//! - Overlap between blocks
//! - Insufficient buffer between consecutive meetings
//! - Working-hours overruns
//! - Energy mismatches (optional)
//! - Oversized deep-focus blocks

mod detector;
mod options;

#[cfg(test)]
mod detector_tests;

pub use detector::{detect_conflicts, ConflictDetector};
pub use options::{DetectorOptions, OverlapScan, TimeWindow};

use serde::{Deserialize, Serialize};

/// Kind of scheduling problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConflictKind {
    Overlap,
    BufferInsufficient,
    WorkingHoursOverrun,
    EnergyMismatch,
    OversizedFocusBlock,
}

impl ConflictKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Overlap => "overlap",
            Self::BufferInsufficient => "buffer_insufficient",
            Self::WorkingHoursOverrun => "working_hours_overrun",
            Self::EnergyMismatch => "energy_mismatch",
            Self::OversizedFocusBlock => "oversized_focus_block",
        }
    }

    /// Conflicts resolved by shortening a block rather than moving one.
    pub fn is_overrun(&self) -> bool {
        matches!(self, Self::WorkingHoursOverrun | Self::OversizedFocusBlock)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

impl Severity {
    /// High above `high_above`, medium above `medium_above`, otherwise low.
    pub fn grade(minutes: i64, high_above: i64, medium_above: i64) -> Self {
        if minutes > high_above {
            Self::High
        } else if minutes > medium_above {
            Self::Medium
        } else {
            Self::Low
        }
    }
}

/// A detected problem affecting one or two blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Conflict {
    pub kind: ConflictKind,
    pub severity: Severity,
    /// Affected block ids, earliest first
    pub block_ids: Vec<String>,
    pub description: String,
    /// Minutes of slip this conflict represents; 0 when not time-quantifiable
    pub estimated_delay: i64,
}
