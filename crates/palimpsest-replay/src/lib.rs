//! Reverse replay engine for palimpsest.
//!
//! Reconstructs the full line-sequence state of a versioned document as of
//! every past commit timestamp, given the *current* state and a
//! newest-first log of forward edits.
//!
//! # Design Philosophy
//!
//! Edit logs record forward deltas only, and a delete does not retain the
//! deleted content. The engine therefore walks the log backwards from the
//! known final state, undoing each commit's operations in reverse. A line
//! that a newer delete removed is restored as a *placeholder* (identity
//! known, content not yet recovered) and corrected in place once an older
//! update or insert for it is replayed.
//!
//! # Retroactive Correction
//!
//! Snapshots are emitted *before* a commit is undone and store handles into
//! a shared line arena, not copies. Mutating a placeholder's slot is
//! therefore observed by every snapshot already emitted for a newer
//! timestamp — content discovered further back in time flows forward into
//! history that was recorded earlier in the sweep. The flip side of the
//! same rule: undoing an update on *real* content allocates a fresh arena
//! entry, so newer snapshots never see older text.
//!
//! # Degradation
//!
//! The engine never fails on well-formed input. Log gaps (operations
//! referencing unknown lines) and placeholders the log was too short to
//! resolve are reported as [`Diagnostic`] data on the result while the
//! sweep continues.

mod arena;
mod diagnostics;
mod error;
mod history;
mod replay;

pub use diagnostics::Diagnostic;
pub use error::ReplayError;
pub use history::Reconstruction;
pub use replay::reconstruct;

/// Result type for reconstruction calls.
pub type Result<T> = std::result::Result<T, ReplayError>;
