//! Degraded-outcome reporting.
//!
//! The sweep never fails on structurally valid input; anomalies it can work
//! around are collected here and returned alongside the result, so callers
//! decide what to surface. Matching `tracing` events fire at the detection
//! sites.

use std::fmt;

use palimpsest_types::{LineId, OpKind};
use serde::Serialize;

/// A non-fatal anomaly observed during reconstruction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Diagnostic {
    /// An operation referenced a line id that was not in the working
    /// sequence at that point of the sweep (log gap). The operation was
    /// skipped.
    OrphanedReference {
        /// Timestamp of the commit carrying the operation.
        ts: u64,
        /// Which operation kind referenced the missing line.
        op: OpKind,
        /// The missing line id.
        line: LineId,
    },

    /// The log ended before the originating Insert of a restored line was
    /// found. Snapshots holding the line keep the unknown-content sentinel.
    UnresolvedPlaceholder {
        /// The line whose content was never recovered.
        line: LineId,
    },
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Diagnostic::OrphanedReference { ts, op, line } => {
                write!(f, "orphaned {op} at ts {ts}: line {line} not present")
            }
            Diagnostic::UnresolvedPlaceholder { line } => {
                write!(f, "unresolved placeholder: content of line {line} never recovered")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_orphaned_reference() {
        let diag = Diagnostic::OrphanedReference {
            ts: 2000,
            op: OpKind::Update,
            line: LineId::new("l9"),
        };
        assert_eq!(diag.to_string(), "orphaned update at ts 2000: line l9 not present");
    }

    #[test]
    fn test_display_unresolved_placeholder() {
        let diag = Diagnostic::UnresolvedPlaceholder { line: LineId::new("l1") };
        assert_eq!(
            diag.to_string(),
            "unresolved placeholder: content of line l1 never recovered"
        );
    }

    #[test]
    fn test_serialize_tagged() {
        let diag = Diagnostic::UnresolvedPlaceholder { line: LineId::new("l1") };
        let json = serde_json::to_string(&diag).unwrap();
        assert!(json.contains("\"kind\":\"unresolved_placeholder\""));
        assert!(json.contains("\"line\":\"l1\""));
    }
}
