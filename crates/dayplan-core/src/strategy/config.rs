//! Strategy engine configuration.

use serde::{Deserialize, Serialize};

use crate::block::TimeOfDay;
use crate::operation::MIN_BLOCK_MINUTES;
use crate::timeline::DEFAULT_SEARCH_BOUNDARY;

/// Which generation of the engine to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EngineRevision {
    /// Fixed order: protect focus, hit deadlines, reschedule later
    V1,
    /// Stable-sorted by conflicts left after applying each strategy
    V2,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrategyConfig {
    #[serde(default = "default_revision")]
    pub revision: EngineRevision,
    /// Where protect-focus parks admin blocks when no focus conflict exists
    #[serde(default = "default_admin_fallback_start")]
    pub admin_fallback_start: TimeOfDay,
    #[serde(default = "default_admin_fallback_step")]
    pub admin_fallback_step_minutes: i64,
    /// Start time reschedule-later moves deferred blocks to
    #[serde(default = "default_reschedule_target")]
    pub reschedule_target: TimeOfDay,
    /// Fraction removed from the lowest-ranked block of an overlap
    #[serde(default = "default_overlap_compression")]
    pub overlap_compression: f64,
    /// Fraction removed from the last block of an overrun
    #[serde(default = "default_overrun_compression")]
    pub overrun_compression: f64,
    /// Fraction removed from admin blocks when nothing else applies
    #[serde(default = "default_overlap_compression")]
    pub fallback_compression: f64,
    #[serde(default = "default_min_block")]
    pub min_block_minutes: i64,
    /// Latest end for free-slot relocation
    #[serde(default = "default_search_boundary")]
    pub search_boundary: TimeOfDay,
    /// Allow substring title matching when replaying operations
    #[serde(default = "default_true")]
    pub allow_fuzzy_targets: bool,
}

fn default_revision() -> EngineRevision {
    EngineRevision::V2
}
fn default_admin_fallback_start() -> TimeOfDay {
    TimeOfDay::from_hm(16, 0)
}
fn default_admin_fallback_step() -> i64 {
    30
}
fn default_reschedule_target() -> TimeOfDay {
    TimeOfDay::from_hm(17, 0)
}
fn default_overlap_compression() -> f64 {
    0.25
}
fn default_overrun_compression() -> f64 {
    0.20
}
fn default_min_block() -> i64 {
    MIN_BLOCK_MINUTES
}
fn default_search_boundary() -> TimeOfDay {
    DEFAULT_SEARCH_BOUNDARY
}
fn default_true() -> bool {
    true
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            revision: default_revision(),
            admin_fallback_start: default_admin_fallback_start(),
            admin_fallback_step_minutes: default_admin_fallback_step(),
            reschedule_target: default_reschedule_target(),
            overlap_compression: default_overlap_compression(),
            overrun_compression: default_overrun_compression(),
            fallback_compression: default_overlap_compression(),
            min_block_minutes: default_min_block(),
            search_boundary: default_search_boundary(),
            allow_fuzzy_targets: true,
        }
    }
}

impl StrategyConfig {
    /// Duration after removing `fraction`, never below the floor.
    pub(crate) fn compressed(&self, duration: i64, fraction: f64) -> i64 {
        let kept = (duration as f64 * (1.0 - fraction.clamp(0.0, 1.0))).round() as i64;
        kept.max(self.min_block_minutes.max(MIN_BLOCK_MINUTES))
    }
}
