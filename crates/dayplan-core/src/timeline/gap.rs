//! Free gap listing between blocks.
//!
//! Finds every free stretch between existing blocks inside a day window,
//! so callers can show where a displaced block could land.

use serde::{Deserialize, Serialize};

use crate::block::{sorted_by_start, Block, TimeOfDay};

/// Size category of a time gap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GapSize {
    Small,  // under 30 minutes
    Medium, // 30-59 minutes
    Large,  // 60+ minutes
}

impl GapSize {
    /// Categorize a gap by its duration in minutes
    pub fn from_minutes(minutes: i64) -> Self {
        if minutes < 30 {
            Self::Small
        } else if minutes < 60 {
            Self::Medium
        } else {
            Self::Large
        }
    }
}

/// A free stretch between blocks
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeGap {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    pub size: GapSize,
}

impl TimeGap {
    fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self {
            start,
            end,
            size: GapSize::from_minutes(start.minutes_until(end)),
        }
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        self.start.minutes_until(self.end)
    }

    /// Check if this gap can fit a block of given duration
    pub fn can_fit(&self, minutes: i64) -> bool {
        self.duration_minutes() >= minutes
    }
}

/// Detector for finding gaps in a day
pub struct TimeGapDetector {
    /// Minimum gap duration to report (in minutes)
    min_gap_minutes: i64,
}

impl TimeGapDetector {
    /// Create a new detector with default settings (15 min minimum)
    pub fn new() -> Self {
        Self {
            min_gap_minutes: 15,
        }
    }

    /// Set the minimum gap duration
    pub fn with_min_gap(mut self, minutes: i64) -> Self {
        self.min_gap_minutes = minutes.max(1);
        self
    }

    /// Find gaps between blocks inside `[day_start, day_end)`, sorted by start.
    pub fn find_gaps(
        &self,
        blocks: &[Block],
        day_start: TimeOfDay,
        day_end: TimeOfDay,
    ) -> Vec<TimeGap> {
        if day_end <= day_start {
            return Vec::new();
        }

        let busy = sorted_by_start(blocks)
            .into_iter()
            .filter(|b| b.end > day_start && b.start < day_end)
            .map(|b| (b.start.max(day_start), b.end.min(day_end)));

        // A zero-length sentinel at `day_end` closes the trailing gap.
        let mut free_from = day_start;
        busy.chain(std::iter::once((day_end, day_end)))
            .filter_map(|(start, end)| {
                let gap = (start > free_from).then(|| TimeGap::new(free_from, start));
                free_from = free_from.max(end);
                gap
            })
            .filter(|gap| gap.can_fit(self.min_gap_minutes))
            .collect()
    }
}

impl Default for TimeGapDetector {
    fn default() -> Self {
        Self::new()
    }
}

/// Convenience function to find gaps with default settings
pub fn find_gaps(blocks: &[Block], day_start: TimeOfDay, day_end: TimeOfDay) -> Vec<TimeGap> {
    TimeGapDetector::new().find_gaps(blocks, day_start, day_end)
}
