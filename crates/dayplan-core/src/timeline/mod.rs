//! Timeline queries over a day of blocks.
//!
//! This module provides:
//! - Greedy free-slot search from an anchor time
//! - Free gap listing between blocks within a day window

mod gap;
mod slot;

pub use gap::{find_gaps, GapSize, TimeGap, TimeGapDetector};
pub use slot::{find_free_slot, find_free_slot_before, FreeSlotFinder, DEFAULT_SEARCH_BOUNDARY};
