//! Sequential operation application.
//!
//! Operations run in order against one working copy, so operation `n`
//! sees the effects of everything before it. Nothing here fails the batch:
//! every operation yields exactly one [`Change`].

use super::resolve::resolve_target;
use super::types::{ApplyOutcome, Change, ChangeKind, MatchKind, Operation, OperationKind};
use crate::block::Block;

/// Shortest block any resize or split may produce (minutes).
pub const MIN_BLOCK_MINUTES: i64 = 15;

/// Applies operation batches to a block list.
#[derive(Debug, Clone)]
pub struct OperationApplier {
    allow_fuzzy: bool,
}

impl OperationApplier {
    /// Create an applier that falls back to substring title matching
    pub fn new() -> Self {
        Self { allow_fuzzy: true }
    }

    /// Enable or disable the substring fallback
    pub fn with_fuzzy_targets(mut self, allow: bool) -> Self {
        self.allow_fuzzy = allow;
        self
    }

    /// Apply `operations` to a copy of `blocks`.
    pub fn apply(&self, blocks: &[Block], operations: &[Operation]) -> ApplyOutcome {
        let mut working = blocks.to_vec();
        let mut changes = Vec::with_capacity(operations.len());

        for operation in operations {
            let change = match resolve_target(&working, operation, self.allow_fuzzy) {
                Some((index, matched_by)) => {
                    if matched_by == MatchKind::Fuzzy {
                        tracing::warn!(
                            requested = %operation.target,
                            block_id = %working[index].id,
                            "operation target resolved by substring match"
                        );
                    }
                    apply_one(&mut working, index, operation).matched(matched_by)
                }
                None => pending_change(operation),
            };
            changes.push(change);
        }

        tracing::debug!(
            operations = operations.len(),
            blocks_before = blocks.len(),
            blocks_after = working.len(),
            "operations applied"
        );

        ApplyOutcome {
            changes,
            blocks: working,
        }
    }
}

impl Default for OperationApplier {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_one(working: &mut Vec<Block>, index: usize, operation: &Operation) -> Change {
    let block = &working[index];

    if block.is_locked() {
        let why = if block.read_only { "read-only" } else { "pinned" };
        return Change::for_block(
            ChangeKind::Skipped,
            block,
            format!("'{}' is {why}; left unchanged", block.title),
        );
    }

    match operation.kind {
        OperationKind::Move => apply_move(working, index, operation),
        OperationKind::Resize => apply_resize(working, index, operation),
        OperationKind::Delete => {
            let removed = working.remove(index);
            let reason = operation
                .reason
                .clone()
                .unwrap_or_else(|| format!("Removed '{}'", removed.title));
            Change::for_block(ChangeKind::Removed, &removed, reason).after(None, None)
        }
        OperationKind::Split => apply_split(working, index, operation),
    }
}

fn apply_move(working: &mut [Block], index: usize, operation: &Operation) -> Change {
    let block = &mut working[index];
    let Some(shift) = operation.shift_minutes else {
        return Change::for_block(ChangeKind::Skipped, block, "Move without a shift; nothing to do");
    };

    let shifted = (block.start.checked_add(shift), block.end.checked_add(shift));
    let (Some(start), Some(end)) = shifted else {
        return Change::for_block(
            ChangeKind::Skipped,
            block,
            format!("Moving '{}' by {shift} min would leave the day", block.title),
        );
    };

    let reason = operation
        .reason
        .clone()
        .unwrap_or_else(|| describe_shift(&block.title, shift));
    let change = Change::for_block(ChangeKind::Moved, block, reason).after(Some(start), Some(end));
    block.start = start;
    block.end = end;
    change
}

fn apply_resize(working: &mut [Block], index: usize, operation: &Operation) -> Change {
    let block = &mut working[index];
    let Some(requested) = operation.duration_minutes else {
        return Change::for_block(
            ChangeKind::Skipped,
            block,
            "Resize without a duration; nothing to do",
        );
    };

    let duration = requested.max(MIN_BLOCK_MINUTES);
    let Some(end) = block.start.checked_add(duration) else {
        return Change::for_block(
            ChangeKind::Skipped,
            block,
            format!("Resizing '{}' to {duration} min would run past midnight", block.title),
        );
    };

    let mut reason = operation.reason.clone().unwrap_or_else(|| {
        format!(
            "Resized '{}' from {} to {duration} min",
            block.title,
            block.duration_minutes()
        )
    });
    if duration != requested {
        reason.push_str(&format!(" (raised to the {MIN_BLOCK_MINUTES} min minimum)"));
    }

    let change =
        Change::for_block(ChangeKind::Resized, block, reason).after(Some(block.start), Some(end));
    block.end = end;
    change
}

fn apply_split(working: &mut Vec<Block>, index: usize, operation: &Operation) -> Change {
    let original = working[index].clone();
    let duration = original.duration_minutes();
    let at = operation.split_at_minutes.unwrap_or(duration / 2);

    if at < MIN_BLOCK_MINUTES || duration - at < MIN_BLOCK_MINUTES {
        return Change::for_block(
            ChangeKind::Skipped,
            &original,
            format!(
                "Cannot split '{}' at {at} min; both parts need at least {MIN_BLOCK_MINUTES} min",
                original.title
            ),
        );
    }

    let Some(middle) = original.start.checked_add(at) else {
        return Change::for_block(
            ChangeKind::Skipped,
            &original,
            "Split point lies outside the day",
        );
    };
    let second_id = unique_split_id(working, &original.id);

    let mut second = original.clone();
    second.id = second_id.clone();
    second.title = format!("{} (cont.)", original.title);
    second.start = middle;

    working[index].end = middle;
    working.insert(index + 1, second);

    let reason = operation.reason.clone().unwrap_or_else(|| {
        format!(
            "Split '{}' at {middle} into {at} + {} min",
            original.title,
            duration - at
        )
    });
    let mut change = Change::for_block(ChangeKind::Split, &original, reason)
        .after(Some(original.start), Some(middle));
    change.created_block_id = Some(second_id);
    change
}

fn unique_split_id(working: &[Block], base: &str) -> String {
    (2..)
        .map(|n| format!("{base}-{n}"))
        .find(|candidate| working.iter().all(|b| &b.id != candidate))
        .unwrap_or_else(|| format!("{base}-split"))
}

fn pending_change(operation: &Operation) -> Change {
    let title = operation
        .target_title
        .clone()
        .unwrap_or_else(|| operation.target.chars().take(8).collect());

    let (before_start, before_end) = (operation.original_start, operation.original_end);
    let (after_start, after_end) = match (operation.kind, before_start, before_end) {
        (OperationKind::Move, Some(start), Some(end)) => match operation.shift_minutes {
            Some(shift) => (start.checked_add(shift), end.checked_add(shift)),
            None => (Some(start), Some(end)),
        },
        (OperationKind::Resize, Some(start), Some(end)) => match operation.duration_minutes {
            Some(duration) => (Some(start), start.checked_add(duration.max(MIN_BLOCK_MINUTES))),
            None => (Some(start), Some(end)),
        },
        _ => (None, None),
    };

    tracing::debug!(
        requested = %operation.target,
        kind = operation.kind.as_str(),
        "operation target not found"
    );

    Change {
        kind: ChangeKind::Pending,
        block_id: operation.target.clone(),
        title: title.clone(),
        before_start,
        before_end,
        after_start,
        after_end,
        reason: format!("Block '{title}' not found; will be rescheduled"),
        matched_by: None,
        created_block_id: None,
    }
}

fn describe_shift(title: &str, shift: i64) -> String {
    match shift {
        0 => format!("Kept '{title}' in place"),
        s if s > 0 => format!("Moved '{title}' {s} min later"),
        s => format!("Moved '{title}' {} min earlier", -s),
    }
}

/// Apply `operations` with the default applier.
pub fn apply_operations(blocks: &[Block], operations: &[Operation]) -> ApplyOutcome {
    OperationApplier::new().apply(blocks, operations)
}
