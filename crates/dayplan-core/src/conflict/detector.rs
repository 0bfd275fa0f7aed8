//! The detection passes.

use super::{Conflict, ConflictKind, DetectorOptions, OverlapScan, Severity};
use crate::block::{sorted_by_start, Block, BlockKind, EnergyLevel};

/// Runs every detection pass with a fixed set of options.
pub struct ConflictDetector {
    options: DetectorOptions,
}

impl ConflictDetector {
    /// Create a detector with default options
    pub fn new() -> Self {
        Self {
            options: DetectorOptions::default(),
        }
    }

    /// Create with custom options
    pub fn with_options(options: DetectorOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &DetectorOptions {
        &self.options
    }

    /// Detect conflicts in `blocks` (any order).
    ///
    /// Output is grouped by pass (overlap, buffer, working hours, energy,
    /// oversized focus), each pass in start order.
    pub fn detect(&self, blocks: &[Block]) -> Vec<Conflict> {
        let sorted = sorted_by_start(blocks);
        let mut conflicts = Vec::new();

        match self.options.overlap_scan {
            OverlapScan::Adjacent => self.overlap_adjacent(&sorted, &mut conflicts),
            OverlapScan::Sweep => self.overlap_sweep(&sorted, &mut conflicts),
        }
        self.meeting_buffers(&sorted, &mut conflicts);
        self.working_hours(&sorted, &mut conflicts);
        if self.options.check_energy {
            self.energy_mismatches(&sorted, &mut conflicts);
        }
        self.oversized_focus(&sorted, &mut conflicts);

        tracing::debug!(
            blocks = blocks.len(),
            conflicts = conflicts.len(),
            "conflict detection finished"
        );
        conflicts
    }

    fn overlap_adjacent(&self, sorted: &[&Block], out: &mut Vec<Conflict>) {
        for pair in sorted.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            if prev.end > next.start {
                out.push(overlap_conflict(prev, next));
            }
        }
    }

    fn overlap_sweep(&self, sorted: &[&Block], out: &mut Vec<Conflict>) {
        let mut active: Vec<&Block> = Vec::new();
        for &block in sorted {
            active.retain(|open| open.end > block.start);
            for open in &active {
                out.push(overlap_conflict(open, block));
            }
            active.push(block);
        }
    }

    fn meeting_buffers(&self, sorted: &[&Block], out: &mut Vec<Conflict>) {
        let minimum = self.options.min_meeting_buffer_minutes;
        if minimum <= 0 {
            return;
        }

        let meetings: Vec<&Block> = sorted
            .iter()
            .copied()
            .filter(|b| b.kind.is_meeting())
            .collect();

        for pair in meetings.windows(2) {
            let (prev, next) = (pair[0], pair[1]);
            let gap = prev.end.minutes_until(next.start);
            // Negative gaps are overlaps, reported by the overlap pass.
            if gap < 0 || gap >= minimum {
                continue;
            }
            let missing = minimum - gap;
            out.push(Conflict {
                kind: ConflictKind::BufferInsufficient,
                severity: Severity::grade(missing, 15, 5),
                block_ids: vec![prev.id.clone(), next.id.clone()],
                description: format!(
                    "Only {gap} min between '{}' and '{}' ({minimum} min buffer needed)",
                    prev.title, next.title
                ),
                estimated_delay: missing,
            });
        }
    }

    fn working_hours(&self, sorted: &[&Block], out: &mut Vec<Conflict>) {
        let window = self.options.working_hours;
        for block in sorted {
            if block.start < window.start {
                let early = block.start.minutes_until(window.start);
                out.push(Conflict {
                    kind: ConflictKind::WorkingHoursOverrun,
                    severity: Severity::grade(early, 60, 30),
                    block_ids: vec![block.id.clone()],
                    description: format!(
                        "'{}' starts {early} min before the working day begins at {}",
                        block.title, window.start
                    ),
                    estimated_delay: early,
                });
            }
            if block.end > window.end {
                let late = window.end.minutes_until(block.end);
                out.push(Conflict {
                    kind: ConflictKind::WorkingHoursOverrun,
                    severity: Severity::grade(late, 60, 30),
                    block_ids: vec![block.id.clone()],
                    description: format!(
                        "'{}' runs {late} min past the working day end at {}",
                        block.title, window.end
                    ),
                    estimated_delay: late,
                });
            }
        }
    }

    fn energy_mismatches(&self, sorted: &[&Block], out: &mut Vec<Conflict>) {
        let low = self.options.low_energy_window;
        let high = self.options.high_energy_window;

        for block in sorted {
            if block.kind.is_focus()
                && block.energy == Some(EnergyLevel::High)
                && low.contains(block.start)
            {
                out.push(Conflict {
                    kind: ConflictKind::EnergyMismatch,
                    severity: Severity::Medium,
                    block_ids: vec![block.id.clone()],
                    description: format!(
                        "High-energy focus '{}' lands in the {}-{} energy dip",
                        block.title, low.start, low.end
                    ),
                    estimated_delay: 0,
                });
            } else if block.kind == BlockKind::Admin && high.contains(block.start) {
                out.push(Conflict {
                    kind: ConflictKind::EnergyMismatch,
                    severity: Severity::Low,
                    block_ids: vec![block.id.clone()],
                    description: format!(
                        "Admin work '{}' uses the {}-{} peak energy window",
                        block.title, high.start, high.end
                    ),
                    estimated_delay: 0,
                });
            }
        }
    }

    fn oversized_focus(&self, sorted: &[&Block], out: &mut Vec<Conflict>) {
        let max = self.options.max_focus_minutes;
        for block in sorted.iter().filter(|b| b.kind.is_focus()) {
            let excess = block.duration_minutes() - max;
            if excess <= 0 {
                continue;
            }
            out.push(Conflict {
                kind: ConflictKind::OversizedFocusBlock,
                severity: if excess > 60 {
                    Severity::High
                } else {
                    Severity::Medium
                },
                block_ids: vec![block.id.clone()],
                description: format!(
                    "Focus block '{}' runs {} min, {excess} min over the {max} min limit",
                    block.title,
                    block.duration_minutes()
                ),
                estimated_delay: excess,
            });
        }
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new()
    }
}

fn overlap_conflict(earlier: &Block, later: &Block) -> Conflict {
    let delay = earlier.intersection_minutes(later);
    Conflict {
        kind: ConflictKind::Overlap,
        severity: Severity::grade(delay, 30, 15),
        block_ids: vec![earlier.id.clone(), later.id.clone()],
        description: format!(
            "'{}' overlaps '{}' by {delay} min",
            earlier.title, later.title
        ),
        estimated_delay: delay,
    }
}

/// Detect conflicts with the given options.
pub fn detect_conflicts(blocks: &[Block], options: &DetectorOptions) -> Vec<Conflict> {
    ConflictDetector::with_options(options.clone()).detect(blocks)
}
