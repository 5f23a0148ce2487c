//! Line identity and line records.
//!
//! A `LineId` is an opaque stable token minted by whatever system produced
//! the document — the engine never inspects its contents, only compares it.
//! Stored as a `SmartString` so typical short tokens stay inline.

use std::fmt;

use serde::{Deserialize, Serialize};
use smartstring::alias::String as CompactString;

/// Display sentinel for a line whose content could not be recovered from the
/// portion of the edit log that was available.
pub const UNKNOWN_TEXT: &str = "(content unknown)";

/// An opaque stable line identifier.
///
/// Unique within one reconstructed sequence. The token is caller-supplied;
/// this type only guarantees cheap comparison, hashing, and display.
#[derive(Clone, Hash, Eq, PartialEq, Ord, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(CompactString);

impl LineId {
    /// Wrap a caller-supplied token.
    pub fn new(token: impl AsRef<str>) -> Self {
        Self(token.as_ref().into())
    }

    /// The raw token.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Check whether the token is empty (malformed input).
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for LineId {
    fn from(token: &str) -> Self {
        Self::new(token)
    }
}

impl From<String> for LineId {
    fn from(token: String) -> Self {
        Self(token.into())
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Debug for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LineId({})", self.0)
    }
}

/// One row of a reconstructed document.
///
/// Every non-identity field is optional: the reverse replay discovers text,
/// authorship, and timestamps incrementally as it walks the log backwards,
/// and a short log can leave any of them unresolved. `text: None` is the
/// placeholder state — the line is known to exist but its content has not
/// been recovered yet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Line {
    /// Opaque stable identity.
    pub id: LineId,
    /// Content, or `None` while unknown (pending restoration).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Who wrote the current content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Timestamp of original insertion.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<u64>,
    /// Timestamp of the most recent content change.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<u64>,
}

impl Line {
    /// Create a line with known content and nothing else resolved.
    pub fn new(id: impl Into<LineId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: Some(text.into()),
            author: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Create a placeholder line: identity known, content not recovered.
    pub fn unresolved(id: impl Into<LineId>) -> Self {
        Self {
            id: id.into(),
            text: None,
            author: None,
            created_at: None,
            updated_at: None,
        }
    }

    /// Set the author.
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Set the original insertion timestamp.
    pub fn with_created(mut self, ts: u64) -> Self {
        self.created_at = Some(ts);
        self
    }

    /// Set the last-modification timestamp.
    pub fn with_updated(mut self, ts: u64) -> Self {
        self.updated_at = Some(ts);
        self
    }

    /// Whether content has been resolved.
    pub fn has_text(&self) -> bool {
        self.text.is_some()
    }

    /// Whether this line is still a placeholder (content unknown).
    pub fn is_placeholder(&self) -> bool {
        self.text.is_none()
    }

    /// Content for display, substituting [`UNKNOWN_TEXT`] while unresolved.
    pub fn text_or_unknown(&self) -> &str {
        self.text.as_deref().unwrap_or(UNKNOWN_TEXT)
    }
}

// ============================================================================
// Tests
// ============================================================================
