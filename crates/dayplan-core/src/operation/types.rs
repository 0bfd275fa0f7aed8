//! Operation and change records.

use serde::{Deserialize, Serialize};

use crate::block::{Block, TimeOfDay};

/// Kind of primitive edit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Move,
    Resize,
    Delete,
    Split,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Resize => "resize",
            Self::Delete => "delete",
            Self::Split => "split",
        }
    }
}

/// A primitive edit request against one block.
///
/// Parameters are optional because externally produced operation sets may
/// omit them; an operation missing the parameter its kind needs is recorded
/// as skipped rather than rejected.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(alias = "type")]
    pub kind: OperationKind,
    /// Block id, or a title to fall back on
    #[serde(alias = "block_id")]
    pub target: String,
    /// Signed shift for `move`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub shift_minutes: Option<i64>,
    /// New length for `resize`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_minutes: Option<i64>,
    /// Offset from start for `split`; halves when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub split_at_minutes: Option<i64>,
    /// Display title used when the target cannot be resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_start: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_end: Option<TimeOfDay>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

impl Operation {
    fn new(kind: OperationKind, target: impl Into<String>) -> Self {
        Self {
            kind,
            target: target.into(),
            shift_minutes: None,
            duration_minutes: None,
            split_at_minutes: None,
            target_title: None,
            original_start: None,
            original_end: None,
            reason: None,
        }
    }

    pub fn move_by(target: impl Into<String>, shift_minutes: i64) -> Self {
        Self {
            shift_minutes: Some(shift_minutes),
            ..Self::new(OperationKind::Move, target)
        }
    }

    pub fn resize_to(target: impl Into<String>, duration_minutes: i64) -> Self {
        Self {
            duration_minutes: Some(duration_minutes),
            ..Self::new(OperationKind::Resize, target)
        }
    }

    pub fn delete(target: impl Into<String>) -> Self {
        Self::new(OperationKind::Delete, target)
    }

    pub fn split(target: impl Into<String>, split_at_minutes: Option<i64>) -> Self {
        Self {
            split_at_minutes,
            ..Self::new(OperationKind::Split, target)
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    /// Attach the title and times the caller last saw for the target.
    pub fn with_hints(
        mut self,
        title: impl Into<String>,
        original_start: Option<TimeOfDay>,
        original_end: Option<TimeOfDay>,
    ) -> Self {
        self.target_title = Some(title.into());
        self.original_start = original_start;
        self.original_end = original_end;
        self
    }
}

/// What happened to an operation's target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChangeKind {
    Moved,
    Resized,
    Removed,
    Split,
    /// Target found but left untouched (locked, missing parameter, out of day)
    Skipped,
    /// Target not found; informational only
    Pending,
}

/// How an operation's target was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchKind {
    Id,
    Title,
    /// Case-insensitive substring match; may be ambiguous
    Fuzzy,
}

/// Human-readable record of one applied or attempted operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Change {
    pub kind: ChangeKind,
    pub block_id: String,
    pub title: String,
    pub before_start: Option<TimeOfDay>,
    pub before_end: Option<TimeOfDay>,
    pub after_start: Option<TimeOfDay>,
    pub after_end: Option<TimeOfDay>,
    pub reason: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub matched_by: Option<MatchKind>,
    /// Id of the block a split created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_block_id: Option<String>,
}

impl Change {
    pub(crate) fn for_block(kind: ChangeKind, block: &Block, reason: impl Into<String>) -> Self {
        Self {
            kind,
            block_id: block.id.clone(),
            title: block.title.clone(),
            before_start: Some(block.start),
            before_end: Some(block.end),
            after_start: Some(block.start),
            after_end: Some(block.end),
            reason: reason.into(),
            matched_by: None,
            created_block_id: None,
        }
    }

    pub(crate) fn after(mut self, start: Option<TimeOfDay>, end: Option<TimeOfDay>) -> Self {
        self.after_start = start;
        self.after_end = end;
        self
    }

    pub(crate) fn matched(mut self, matched_by: MatchKind) -> Self {
        self.matched_by = Some(matched_by);
        self
    }

    /// True when the target was only found by substring matching.
    pub fn is_fuzzy(&self) -> bool {
        self.matched_by == Some(MatchKind::Fuzzy)
    }
}

/// Result of applying an operation batch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApplyOutcome {
    pub changes: Vec<Change>,
    pub blocks: Vec<Block>,
}
