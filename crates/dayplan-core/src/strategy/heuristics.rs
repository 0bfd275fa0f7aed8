//! The three local resolution heuristics.
//!
//! Each heuristic only proposes operations; the engine applies them. Locked
//! blocks are never candidates, and every heuristic edits a block at most
//! once per pass.

use std::collections::{HashMap, HashSet};

use super::config::StrategyConfig;
use super::score::{chronologically_last, lowest_scoring};
use crate::block::{Block, BlockKind};
use crate::conflict::{Conflict, ConflictKind};
use crate::operation::Operation;
use crate::timeline::FreeSlotFinder;

/// Operations proposed by one heuristic plus what they cost the user.
#[derive(Debug, Default)]
pub(crate) struct Plan {
    pub operations: Vec<Operation>,
    pub trade_offs: Vec<String>,
}

struct Index<'a> {
    by_id: HashMap<&'a str, &'a Block>,
}

impl<'a> Index<'a> {
    fn new(blocks: &'a [Block]) -> Self {
        Self {
            by_id: blocks.iter().map(|b| (b.id.as_str(), b)).collect(),
        }
    }

    /// Unlocked blocks affected by a conflict.
    fn editable(&self, conflict: &Conflict) -> Vec<&'a Block> {
        conflict
            .block_ids
            .iter()
            .filter_map(|id| self.by_id.get(id.as_str()).copied())
            .filter(|b| !b.is_locked())
            .collect()
    }

    fn affected<'c>(&'c self, conflict: &'c Conflict) -> impl Iterator<Item = &'a Block> + 'c {
        conflict
            .block_ids
            .iter()
            .filter_map(|id| self.by_id.get(id.as_str()).copied())
    }
}

fn move_to(block: &Block, shift: i64, reason: String) -> Operation {
    Operation::move_by(block.id.clone(), shift)
        .with_hints(block.title.clone(), Some(block.start), Some(block.end))
        .with_reason(reason)
}

fn resize_to(block: &Block, duration: i64, reason: String) -> Operation {
    Operation::resize_to(block.id.clone(), duration)
        .with_hints(block.title.clone(), Some(block.start), Some(block.end))
        .with_reason(reason)
}

/// Keep focus blocks where they are and relocate whatever collides with them.
pub(crate) fn protect_focus(
    blocks: &[Block],
    conflicts: &[Conflict],
    config: &StrategyConfig,
) -> Plan {
    let index = Index::new(blocks);
    let finder = FreeSlotFinder::new().with_boundary(config.search_boundary);
    let mut working: Vec<Block> = blocks.to_vec();
    let mut processed: HashSet<&str> = HashSet::new();
    let mut plan = Plan::default();

    let focus_conflicts: Vec<&Conflict> = conflicts
        .iter()
        .filter(|c| index.affected(c).any(|b| b.kind.is_focus()))
        .collect();

    for conflict in &focus_conflicts {
        for block in index.editable(conflict) {
            if block.kind.is_focus() || !processed.insert(block.id.as_str()) {
                continue;
            }

            let Some(slot) = finder.find(&working, block.duration_minutes(), block.end) else {
                tracing::debug!(block_id = %block.id, "no free slot to relocate block");
                continue;
            };
            let shift = block.start.minutes_until(slot);
            if shift == 0 {
                continue;
            }

            if let Some(moved) = working.iter_mut().find(|b| b.id == block.id) {
                moved.start = slot;
                moved.end = slot.checked_add(block.duration_minutes()).unwrap_or(moved.end);
            }
            plan.operations.push(move_to(
                block,
                shift,
                format!("Moved '{}' to {slot} to keep focus time intact", block.title),
            ));
        }
    }

    if focus_conflicts.is_empty() {
        let mut admin: Vec<&Block> = blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Admin && !b.is_locked())
            .collect();
        admin.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

        for (i, block) in admin.into_iter().enumerate() {
            let offset = i as i64 * config.admin_fallback_step_minutes;
            let Some(target) = config.admin_fallback_start.checked_add(offset) else {
                break;
            };
            if target.checked_add(block.duration_minutes()).is_none() {
                break;
            }
            let shift = block.start.minutes_until(target);
            if shift != 0 {
                plan.operations.push(move_to(
                    block,
                    shift,
                    format!("Batched admin '{}' at {target}", block.title),
                ));
            }
        }
        if !plan.operations.is_empty() {
            plan.trade_offs.push(format!(
                "Admin work is batched from {} onward",
                config.admin_fallback_start
            ));
        }
    } else if !plan.operations.is_empty() {
        plan.trade_offs.push("Focus blocks keep their time and length".to_string());
        plan.trade_offs.push(format!(
            "{} other block(s) move later in the day",
            plan.operations.len()
        ));
    }

    plan
}

/// Shorten lower-ranked work so higher-ranked work fits.
pub(crate) fn hit_deadlines(
    blocks: &[Block],
    conflicts: &[Conflict],
    config: &StrategyConfig,
) -> Plan {
    let index = Index::new(blocks);
    let mut processed: HashSet<&str> = HashSet::new();
    let mut plan = Plan::default();
    let mut minutes_cut = 0;

    for conflict in conflicts {
        let candidates = index.editable(conflict);
        let (victim, fraction) = match conflict.kind {
            ConflictKind::Overlap => (lowest_scoring(&candidates), config.overlap_compression),
            kind if kind.is_overrun() => {
                (chronologically_last(&candidates), config.overrun_compression)
            }
            _ => continue,
        };
        let Some(block) = victim else { continue };
        if processed.contains(block.id.as_str()) {
            continue;
        }

        let current = block.duration_minutes();
        let target = config.compressed(current, fraction);
        if target >= current {
            continue;
        }
        processed.insert(block.id.as_str());
        minutes_cut += current - target;
        plan.operations.push(resize_to(
            block,
            target,
            format!(
                "Shortened '{}' from {current} to {target} min ({})",
                block.title,
                conflict.kind.as_str()
            ),
        ));
    }

    if plan.operations.is_empty() {
        let mut admin: Vec<&Block> = blocks
            .iter()
            .filter(|b| b.kind == BlockKind::Admin && !b.is_locked())
            .collect();
        admin.sort_by(|a, b| a.start.cmp(&b.start).then_with(|| a.id.cmp(&b.id)));

        for block in admin {
            let current = block.duration_minutes();
            let target = config.compressed(current, config.fallback_compression);
            if target < current {
                minutes_cut += current - target;
                plan.operations.push(resize_to(
                    block,
                    target,
                    format!("Trimmed admin '{}' to {target} min", block.title),
                ));
            }
        }
    }

    if !plan.operations.is_empty() {
        plan.trade_offs.push(format!("{minutes_cut} min cut from lower-priority work"));
        plan.trade_offs.push("Nothing moves; some blocks end early".to_string());
    }
    plan
}

/// Push the lowest-ranked block of each conflict to a later start.
pub(crate) fn reschedule_later(
    blocks: &[Block],
    conflicts: &[Conflict],
    config: &StrategyConfig,
) -> Plan {
    let index = Index::new(blocks);
    let target = config.reschedule_target;
    let mut processed: HashSet<&str> = HashSet::new();
    let mut plan = Plan::default();

    for conflict in conflicts {
        let candidates = index.editable(conflict);
        let Some(block) = lowest_scoring(&candidates) else { continue };
        if !processed.insert(block.id.as_str()) {
            continue;
        }
        if block.start >= target || target.checked_add(block.duration_minutes()).is_none() {
            continue;
        }

        plan.operations.push(move_to(
            block,
            block.start.minutes_until(target),
            format!("Deferred '{}' to {target}", block.title),
        ));
    }

    if !plan.operations.is_empty() {
        plan.trade_offs.push(format!(
            "{} block(s) deferred to {target}",
            plan.operations.len()
        ));
        plan.trade_offs.push("Deferred blocks may stack up late in the day".to_string());
    }
    plan
}
