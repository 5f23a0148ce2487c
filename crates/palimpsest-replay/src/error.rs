//! Error types for reconstruction.

use palimpsest_types::LineId;
use thiserror::Error;

/// Caller contract violations, detected before the sweep starts.
///
/// Degraded outcomes *during* a sweep (orphaned references, unresolved
/// placeholders) are reported as [`Diagnostic`](crate::Diagnostic) data,
/// never as errors.
#[derive(Error, Debug)]
pub enum ReplayError {
    /// Commit log is not sorted newest-first.
    #[error("commit log not sorted newest-first: ts {next} follows ts {prev}")]
    UnsortedLog { prev: u64, next: u64 },

    /// The caller-supplied current state holds the same line id twice.
    #[error("duplicate line id in current state: {0:?}")]
    DuplicateLine(LineId),

    /// A line or operation carries an empty id token.
    #[error("empty line id token")]
    EmptyLineId,
}
