//! Block model: the time-interval record every other component works on.

mod time;

pub use time::TimeOfDay;

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::error::ValidationError;

/// Kind of a scheduled block.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlockKind {
    DeepFocus,
    Meeting,
    Admin,
    Errand,
    Buffer,
    MicroBreak,
    /// Synced from an external calendar
    Calendar,
    Travel,
    Prep,
    Debrief,
}

impl BlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::DeepFocus => "deep_focus",
            Self::Meeting => "meeting",
            Self::Admin => "admin",
            Self::Errand => "errand",
            Self::Buffer => "buffer",
            Self::MicroBreak => "micro_break",
            Self::Calendar => "calendar",
            Self::Travel => "travel",
            Self::Prep => "prep",
            Self::Debrief => "debrief",
        }
    }

    pub fn is_focus(&self) -> bool {
        matches!(self, Self::DeepFocus)
    }

    pub fn is_meeting(&self) -> bool {
        matches!(self, Self::Meeting)
    }
}

/// Energy level a block demands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnergyLevel {
    High,
    Medium,
    Low,
}

/// User-assigned priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

/// A single scheduled interval `[start, end)`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub id: String,
    pub title: String,
    pub kind: BlockKind,
    pub start: TimeOfDay,
    pub end: TimeOfDay,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub energy: Option<EnergyLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    /// Excluded from automatic edits
    #[serde(default)]
    pub pinned: bool,
    /// Externally sourced; never mutated by the engine
    #[serde(default)]
    pub read_only: bool,
}

impl Block {
    /// Create a block, rejecting `start >= end`.
    ///
    /// # Errors
    /// Returns an error if the id is empty or the range is empty or inverted.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        kind: BlockKind,
        start: TimeOfDay,
        end: TimeOfDay,
    ) -> Result<Self, ValidationError> {
        let block = Self {
            id: id.into(),
            title: title.into(),
            kind,
            start,
            end,
            location: None,
            energy: None,
            priority: None,
            pinned: false,
            read_only: false,
        };
        block.validate()?;
        Ok(block)
    }

    pub fn with_energy(mut self, energy: EnergyLevel) -> Self {
        self.energy = Some(energy);
        self
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = Some(priority);
        self
    }

    pub fn with_pinned(mut self, pinned: bool) -> Self {
        self.pinned = pinned;
        self
    }

    pub fn with_read_only(mut self, read_only: bool) -> Self {
        self.read_only = read_only;
        self
    }

    /// Get duration in minutes
    pub fn duration_minutes(&self) -> i64 {
        self.start.minutes_until(self.end)
    }

    /// Pinned or read-only blocks are off limits to automatic edits.
    pub fn is_locked(&self) -> bool {
        self.pinned || self.read_only
    }

    /// Check if this block overlaps with another
    pub fn overlaps(&self, other: &Self) -> bool {
        self.overlaps_range(other.start, other.end)
    }

    /// Check if this block intersects `[start, end)`
    pub fn overlaps_range(&self, start: TimeOfDay, end: TimeOfDay) -> bool {
        self.start < end && self.end > start
    }

    /// Minutes shared with another block, 0 when disjoint.
    pub fn intersection_minutes(&self, other: &Self) -> i64 {
        let start = self.start.max(other.start);
        let end = self.end.min(other.end);
        start.minutes_until(end).max(0)
    }

    /// # Errors
    /// Returns an error if the id is empty or `start >= end`.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::EmptyId);
        }
        if self.end <= self.start {
            return Err(ValidationError::InvalidTimeRange {
                id: self.id.clone(),
                start: self.start.to_string(),
                end: self.end.to_string(),
            });
        }
        Ok(())
    }
}

/// Validate a whole block list before any pass runs.
///
/// # Errors
/// Returns the first malformed block or duplicated id found, in input order.
pub fn validate_blocks(blocks: &[Block]) -> Result<(), ValidationError> {
    let mut seen = HashSet::with_capacity(blocks.len());
    for block in blocks {
        block.validate()?;
        if !seen.insert(block.id.as_str()) {
            return Err(ValidationError::DuplicateId(block.id.clone()));
        }
    }
    Ok(())
}

/// Blocks ordered by start, then end, then id.
pub(crate) fn sorted_by_start(blocks: &[Block]) -> Vec<&Block> {
    let mut sorted: Vec<&Block> = blocks.iter().collect();
    sorted.sort_by(|a, b| {
        a.start
            .cmp(&b.start)
            .then(a.end.cmp(&b.end))
            .then_with(|| a.id.cmp(&b.id))
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    fn t(s: &str) -> TimeOfDay {
        TimeOfDay::parse(s).unwrap()
    }

    #[test]
    fn new_rejects_inverted_range() {
        let err = Block::new("a", "A", BlockKind::Admin, t("10:00"), t("09:00")).unwrap_err();
        assert!(matches!(err, ValidationError::InvalidTimeRange { .. }));
        assert!(Block::new("a", "A", BlockKind::Admin, t("10:00"), t("10:00")).is_err());
        assert!(Block::new(" ", "A", BlockKind::Admin, t("09:00"), t("10:00")).is_err());
    }

    #[test]
    fn overlap_is_half_open() {
        let a = Block::new("a", "A", BlockKind::Meeting, t("09:00"), t("10:00")).unwrap();
        let b = Block::new("b", "B", BlockKind::Meeting, t("10:00"), t("11:00")).unwrap();
        let c = Block::new("c", "C", BlockKind::Meeting, t("09:30"), t("10:15")).unwrap();
        assert!(!a.overlaps(&b));
        assert!(a.overlaps(&c));
        assert_eq!(a.intersection_minutes(&c), 30);
        assert_eq!(a.intersection_minutes(&b), 0);
    }

    #[test]
    fn validate_blocks_catches_duplicates() {
        let a = Block::new("a", "A", BlockKind::Admin, t("09:00"), t("10:00")).unwrap();
        let dup = Block::new("a", "Other", BlockKind::Admin, t("11:00"), t("12:00")).unwrap();
        assert_eq!(
            validate_blocks(&[a.clone(), dup]),
            Err(ValidationError::DuplicateId("a".into()))
        );
        assert!(validate_blocks(&[a]).is_ok());
        assert!(validate_blocks(&[]).is_ok());
    }

    #[test]
    fn deserialized_blocks_default_flags() {
        let json = r#"{"id":"x","title":"Standup","kind":"meeting","start":"09:00","end":"09:15"}"#;
        let block: Block = serde_json::from_str(json).unwrap();
        assert!(!block.pinned && !block.read_only);
        assert_eq!(block.duration_minutes(), 15);
        assert!(block.energy.is_none());
    }

    #[test]
    fn kind_names_match_serde() {
        for kind in [BlockKind::DeepFocus, BlockKind::MicroBreak, BlockKind::Calendar] {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.as_str()));
        }
    }
}
