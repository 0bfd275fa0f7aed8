//! Operation target resolution: id, then exact title, then substring.

use super::types::{MatchKind, Operation};
use crate::block::Block;

/// Index of the block an operation refers to, with how it was found.
pub(crate) fn resolve_target(
    blocks: &[Block],
    operation: &Operation,
    allow_fuzzy: bool,
) -> Option<(usize, MatchKind)> {
    let target = operation.target.as_str();
    let hint = operation.target_title.as_deref();

    if let Some(index) = blocks.iter().position(|b| b.id == target) {
        return Some((index, MatchKind::Id));
    }

    let titles: Vec<&str> = std::iter::once(target).chain(hint).collect();

    for title in &titles {
        if let Some(index) = blocks.iter().position(|b| b.title == *title) {
            return Some((index, MatchKind::Title));
        }
    }

    if !allow_fuzzy {
        return None;
    }

    for title in &titles {
        let needle = title.trim().to_lowercase();
        if needle.is_empty() {
            continue;
        }
        let found = blocks.iter().position(|b| {
            let hay = b.title.trim().to_lowercase();
            !hay.is_empty() && (hay.contains(&needle) || needle.contains(&hay))
        });
        if let Some(index) = found {
            return Some((index, MatchKind::Fuzzy));
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::block::{BlockKind, TimeOfDay};

    fn blocks() -> Vec<Block> {
        vec![
            Block::new(
                "b1",
                "Team sync",
                BlockKind::Meeting,
                TimeOfDay::from_hm(9, 0),
                TimeOfDay::from_hm(10, 0),
            )
            .unwrap(),
            Block::new(
                "b2",
                "Write report",
                BlockKind::DeepFocus,
                TimeOfDay::from_hm(10, 0),
                TimeOfDay::from_hm(12, 0),
            )
            .unwrap(),
        ]
    }

    #[test]
    fn id_wins_over_title() {
        let op = Operation::delete("b2");
        assert_eq!(resolve_target(&blocks(), &op, true), Some((1, MatchKind::Id)));
    }

    #[test]
    fn exact_title_then_hint() {
        let op = Operation::delete("Team sync");
        assert_eq!(resolve_target(&blocks(), &op, true), Some((0, MatchKind::Title)));

        let op = Operation::delete("gone-id").with_hints("Write report", None, None);
        assert_eq!(resolve_target(&blocks(), &op, true), Some((1, MatchKind::Title)));
    }

    #[test]
    fn substring_either_direction() {
        let op = Operation::delete("REPORT");
        assert_eq!(resolve_target(&blocks(), &op, true), Some((1, MatchKind::Fuzzy)));

        let op = Operation::delete("Weekly team sync call");
        assert_eq!(resolve_target(&blocks(), &op, true), Some((0, MatchKind::Fuzzy)));

        assert_eq!(resolve_target(&blocks(), &Operation::delete("report"), false), None);
    }

    #[test]
    fn blank_target_never_fuzzy_matches() {
        assert_eq!(resolve_target(&blocks(), &Operation::delete("  "), true), None);
    }
}
