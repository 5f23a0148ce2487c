//! Edit operations.
//!
//! All changes to a document are expressed as operations inside a commit.
//! Operations record *forward* deltas only: a delete does not retain the
//! deleted content, which is why reconstruction has to work backwards from
//! a known final state.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::EnumString;

use crate::line::LineId;

/// One forward edit to a document.
///
/// A closed sum type so that undo logic is a total mapping from variant to
/// inverse behavior — no field-presence sniffing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum EditOp {
    /// Insert a new line before an anchor line.
    ///
    /// If `before` is None, the line was appended at the end of the document.
    Insert {
        /// ID of the new line.
        id: LineId,
        /// Line the new line was inserted before (None = append at end).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        before: Option<LineId>,
        /// Initial content.
        text: String,
    },

    /// Replace a line's content.
    Update {
        /// Line to update.
        id: LineId,
        /// New content.
        text: String,
        /// Content being replaced. Always recorded by the event source.
        prev_text: String,
    },

    /// Remove a line. The deleted content is not recorded.
    Delete {
        /// Line to remove.
        id: LineId,
    },
}

impl EditOp {
    /// Get the line ID this operation targets.
    pub fn target(&self) -> &LineId {
        match self {
            EditOp::Insert { id, .. } => id,
            EditOp::Update { id, .. } => id,
            EditOp::Delete { id } => id,
        }
    }

    /// The operation kind, for diagnostics and dispatch.
    pub fn kind(&self) -> OpKind {
        match self {
            EditOp::Insert { .. } => OpKind::Insert,
            EditOp::Update { .. } => OpKind::Update,
            EditOp::Delete { .. } => OpKind::Delete,
        }
    }

    /// Check if this operation changes which lines exist (affects ordering).
    pub fn is_structural(&self) -> bool {
        matches!(self, EditOp::Insert { .. } | EditOp::Delete { .. })
    }
}

/// Operation kind — the discriminant of [`EditOp`] as plain data.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(ascii_case_insensitive)]
pub enum OpKind {
    Insert,
    Update,
    Delete,
}

impl OpKind {
    /// Parse from string (case-insensitive).
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        <Self as FromStr>::from_str(s).ok()
    }

    /// Convert to string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            OpKind::Insert => "insert",
            OpKind::Update => "update",
            OpKind::Delete => "delete",
        }
    }
}

impl std::fmt::Display for OpKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
