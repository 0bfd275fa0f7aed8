//! Operation application: turns a list of primitive edits into a new block
//! list plus a human-readable change log.

mod applier;
mod resolve;
mod types;


pub use applier::{apply_operations, OperationApplier, MIN_BLOCK_MINUTES};
pub use types::{ApplyOutcome, Change, ChangeKind, MatchKind, Operation, OperationKind};
