//! Detector options.

use serde::{Deserialize, Serialize};

use crate::block::TimeOfDay;

/// A half-open `[start, end)` window within the day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeWindow {
    pub start: TimeOfDay,
    pub end: TimeOfDay,
}

impl TimeWindow {
    pub const fn new(start: TimeOfDay, end: TimeOfDay) -> Self {
        Self { start, end }
    }

    pub fn contains(&self, time: TimeOfDay) -> bool {
        self.start <= time && time < self.end
    }
}

/// How the overlap pass pairs blocks up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OverlapScan {
    /// Only neighbours in start order; a short block nested under a
    /// non-adjacent long block is missed.
    Adjacent,
    /// Every intersecting pair, via a sweep over start order.
    Sweep,
}

/// Options for a detection pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectorOptions {
    #[serde(default = "default_working_hours")]
    pub working_hours: TimeWindow,
    /// Minimum gap between consecutive meetings (minutes)
    #[serde(default = "default_min_meeting_buffer")]
    pub min_meeting_buffer_minutes: i64,
    /// Longest allowed deep-focus block (minutes)
    #[serde(default = "default_max_focus")]
    pub max_focus_minutes: i64,
    #[serde(default = "default_true")]
    pub check_energy: bool,
    /// Afternoon dip where high-energy focus work is discouraged
    #[serde(default = "default_low_energy_window")]
    pub low_energy_window: TimeWindow,
    /// Morning peak that admin work should not consume
    #[serde(default = "default_high_energy_window")]
    pub high_energy_window: TimeWindow,
    #[serde(default = "default_overlap_scan")]
    pub overlap_scan: OverlapScan,
}

fn default_working_hours() -> TimeWindow {
    TimeWindow::new(TimeOfDay::from_hm(8, 0), TimeOfDay::from_hm(18, 0))
}
fn default_min_meeting_buffer() -> i64 {
    10
}
fn default_max_focus() -> i64 {
    120
}
fn default_true() -> bool {
    true
}
fn default_low_energy_window() -> TimeWindow {
    TimeWindow::new(TimeOfDay::from_hm(13, 0), TimeOfDay::from_hm(15, 0))
}
fn default_high_energy_window() -> TimeWindow {
    TimeWindow::new(TimeOfDay::from_hm(9, 0), TimeOfDay::from_hm(11, 0))
}
fn default_overlap_scan() -> OverlapScan {
    OverlapScan::Sweep
}

impl Default for DetectorOptions {
    fn default() -> Self {
        Self {
            working_hours: default_working_hours(),
            min_meeting_buffer_minutes: default_min_meeting_buffer(),
            max_focus_minutes: default_max_focus(),
            check_energy: true,
            low_energy_window: default_low_energy_window(),
            high_energy_window: default_high_energy_window(),
            overlap_scan: default_overlap_scan(),
        }
    }
}

impl DetectorOptions {
    pub fn with_working_hours(mut self, start: TimeOfDay, end: TimeOfDay) -> Self {
        self.working_hours = TimeWindow::new(start, end);
        self
    }

    pub fn with_min_meeting_buffer(mut self, minutes: i64) -> Self {
        self.min_meeting_buffer_minutes = minutes;
        self
    }

    pub fn with_max_focus(mut self, minutes: i64) -> Self {
        self.max_focus_minutes = minutes;
        self
    }

    pub fn with_energy_checks(mut self, enabled: bool) -> Self {
        self.check_energy = enabled;
        self
    }

    pub fn with_overlap_scan(mut self, scan: OverlapScan) -> Self {
        self.overlap_scan = scan;
        self
    }
}
