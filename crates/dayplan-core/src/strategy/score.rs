//! Block ranking used by the deadline and defer heuristics.
//!
//! score = priority weight * 10 + kind weight. Lower scores are the first
//! to be compressed or deferred.

use std::cmp::Ordering;

use crate::block::{Block, BlockKind, Priority};

pub fn priority_weight(priority: Option<Priority>) -> i64 {
    match priority {
        Some(Priority::High) => 3,
        Some(Priority::Medium) => 2,
        Some(Priority::Low) => 1,
        None => 0,
    }
}

pub fn kind_weight(kind: BlockKind) -> i64 {
    match kind {
        BlockKind::DeepFocus => 3,
        BlockKind::Meeting | BlockKind::Calendar => 2,
        BlockKind::Admin | BlockKind::Travel => 1,
        BlockKind::Prep | BlockKind::Debrief => 1,
        BlockKind::Errand | BlockKind::Buffer | BlockKind::MicroBreak => 0,
    }
}

pub fn block_score(block: &Block) -> i64 {
    priority_weight(block.priority) * 10 + kind_weight(block.kind)
}

/// Order by score ascending; ties go to the later block, then the smaller id.
fn lowest_first(a: &Block, b: &Block) -> Ordering {
    block_score(a)
        .cmp(&block_score(b))
        .then(b.start.cmp(&a.start))
        .then_with(|| a.id.cmp(&b.id))
}

/// The block that should give way first.
pub(crate) fn lowest_scoring<'a>(blocks: &[&'a Block]) -> Option<&'a Block> {
    blocks.iter().copied().min_by(|a, b| lowest_first(a, b))
}

/// The block that starts last (ties: ends last, then larger id).
pub(crate) fn chronologically_last<'a>(blocks: &[&'a Block]) -> Option<&'a Block> {
    blocks
        .iter()
        .copied()
        .max_by(|a, b| a.start.cmp(&b.start).then(a.end.cmp(&b.end)).then_with(|| a.id.cmp(&b.id)))
}
