//! Greedy free-slot search.
//!
//! Walks forward from an anchor, jumping straight to the end of whichever
//! block is in the way, so the number of steps is bounded by the number of
//! blocks rather than the number of minutes.

use crate::block::{sorted_by_start, Block, TimeOfDay};

/// Latest end a slot may have unless the caller says otherwise (22:00).
pub const DEFAULT_SEARCH_BOUNDARY: TimeOfDay = TimeOfDay::from_hm(22, 0);

/// Finds the earliest gap of a given length at or after an anchor.
#[derive(Debug, Clone)]
pub struct FreeSlotFinder {
    boundary: TimeOfDay,
}

impl FreeSlotFinder {
    pub fn new() -> Self {
        Self {
            boundary: DEFAULT_SEARCH_BOUNDARY,
        }
    }

    /// Set the latest time a found slot may end at
    pub fn with_boundary(mut self, boundary: TimeOfDay) -> Self {
        self.boundary = boundary;
        self
    }

    /// Earliest start `>= anchor` such that `[start, start + duration)`
    /// touches no block and ends by the boundary.
    pub fn find(
        &self,
        blocks: &[Block],
        duration_minutes: i64,
        anchor: TimeOfDay,
    ) -> Option<TimeOfDay> {
        if duration_minutes <= 0 {
            return None;
        }

        let sorted = sorted_by_start(blocks);
        let mut candidate = anchor.minutes();

        loop {
            let end = candidate + duration_minutes;
            if end > self.boundary.minutes() {
                return None;
            }

            let blocking = sorted
                .iter()
                .find(|b| b.start.minutes() < end && b.end.minutes() > candidate);

            match blocking {
                None => return TimeOfDay::from_minutes(candidate).ok(),
                Some(block) => candidate = block.end.minutes(),
            }
        }
    }
}

impl Default for FreeSlotFinder {
    fn default() -> Self {
        Self::new()
    }
}

/// Earliest free start at or after `anchor`, searching up to 22:00.
pub fn find_free_slot(
    blocks: &[Block],
    duration_minutes: i64,
    anchor: TimeOfDay,
) -> Option<TimeOfDay> {
    FreeSlotFinder::new().find(blocks, duration_minutes, anchor)
}

/// Same as [`find_free_slot`] with an explicit day-end boundary.
pub fn find_free_slot_before(
    blocks: &[Block],
    duration_minutes: i64,
    anchor: TimeOfDay,
    boundary: TimeOfDay,
) -> Option<TimeOfDay> {
    FreeSlotFinder::new()
        .with_boundary(boundary)
        .find(blocks, duration_minutes, anchor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::BlockKind;

    fn block(id: &str, start: &str, end: &str) -> Block {
        Block::new(
            id,
            id,
            BlockKind::Meeting,
            TimeOfDay::parse(start).unwrap(),
            TimeOfDay::parse(end).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn anchor_itself_is_free() {
        let blocks = vec![block("a", "09:00", "10:00")];
        assert_eq!(
            find_free_slot(&blocks, 30, TimeOfDay::from_hm(8, 0)),
            Some(TimeOfDay::from_hm(8, 0))
        );
    }

    #[test]
    fn jumps_past_blocking_blocks() {
        let blocks = vec![
            block("a", "09:00", "10:00"),
            block("b", "10:00", "10:20"),
            block("c", "10:40", "12:00"),
        ];
        // 10:20-10:40 is too short for 30 minutes, so land after c.
        assert_eq!(
            find_free_slot(&blocks, 30, TimeOfDay::from_hm(9, 15)),
            Some(TimeOfDay::from_hm(12, 0))
        );
        assert_eq!(
            find_free_slot(&blocks, 20, TimeOfDay::from_hm(9, 15)),
            Some(TimeOfDay::from_hm(10, 20))
        );
    }

    #[test]
    fn gives_up_at_boundary() {
        let blocks = vec![block("a", "20:00", "21:45")];
        assert_eq!(find_free_slot(&blocks, 30, TimeOfDay::from_hm(20, 0)), None);
        assert_eq!(
            find_free_slot_before(&blocks, 30, TimeOfDay::from_hm(20, 0), TimeOfDay::END_OF_DAY),
            Some(TimeOfDay::from_hm(21, 45))
        );
        // Exactly touching the boundary is allowed.
        assert_eq!(
            find_free_slot(&[], 60, TimeOfDay::from_hm(21, 0)),
            Some(TimeOfDay::from_hm(21, 0))
        );
    }

    #[test]
    fn non_positive_duration_has_no_slot() {
        assert_eq!(find_free_slot(&[], 0, TimeOfDay::from_hm(8, 0)), None);
        assert_eq!(find_free_slot(&[], -5, TimeOfDay::from_hm(8, 0)), None);
    }
}
