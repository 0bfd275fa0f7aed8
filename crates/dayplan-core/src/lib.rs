//! # Dayplan Core Library
//!
//! This library provides the day-planning engine behind the `dayplan` CLI:
//! it inspects a single day of time blocks, finds what is wrong with it, and
//! proposes ranked ways to fix it. Every operation is a pure function over
//! borrowed block slices; the only I/O lives in configuration storage and the
//! optional remote negotiation client.
//!
//! ## Architecture
//!
//! - **Block model**: validated time intervals with kind, energy, priority
//!   and lock flags
//! - **Timeline**: free-slot search and gap listing
//! - **Layout**: side-by-side column packing for overlapping blocks
//! - **Conflicts**: overlap, buffer, working-hours, energy and focus-length checks
//! - **Operations**: move/resize/delete/split with tolerant target matching
//! - **Strategies**: three local heuristics plus replay of remote proposals
//! - **Negotiation**: async remote client with local fallback
//! - **Storage**: TOML-based configuration
//!
//! ## Key Components
//!
//! - [`ConflictDetector`]: Runs the detection passes
//! - [`OperationApplier`]: Applies edits and records changes
//! - [`StrategyEngine`]: Generates and ranks strategies
//! - [`Config`]: Application configuration management

pub mod block;
pub mod conflict;
pub mod error;
pub mod layout;
pub mod negotiation;
pub mod operation;
pub mod storage;
pub mod strategy;
pub mod timeline;

pub use block::{validate_blocks, Block, BlockKind, EnergyLevel, Priority, TimeOfDay};
pub use conflict::{
    detect_conflicts, Conflict, ConflictDetector, ConflictKind, DetectorOptions, OverlapScan,
    Severity, TimeWindow,
};
pub use error::{ConfigError, CoreError, NegotiationError, ValidationError};
pub use layout::{calculate_layout, LayoutSlot};
pub use negotiation::{
    negotiate_or_fallback, HttpNegotiator, NegotiationConfig, NegotiationRequest,
    NegotiationResponse, Resolution, StrategyNegotiator,
};
pub use operation::{
    apply_operations, ApplyOutcome, Change, ChangeKind, MatchKind, Operation, OperationApplier,
    OperationKind,
};
pub use storage::Config;
pub use strategy::{
    generate_strategies, EngineRevision, Strategy, StrategyConfig, StrategyDescriptor,
    StrategyEngine, StrategyKind, StrategySource,
};
pub use timeline::{find_free_slot, find_free_slot_before, find_gaps, FreeSlotFinder, TimeGap};
