//! Event model for palimpsest.
//!
//! This crate is the data foundation: line identity, line records, edit
//! operations, and commits. It has **no internal palimpsest dependencies**
//! — a pure leaf crate that the replay engine builds on.
//!
//! # Entity-Relationship Overview
//!
//! ```text
//! Commit (ts + author) ← one atomic batch of edits
//!     └── ops: [EditOp]      applied left-to-right at that timestamp
//!
//! EditOp ← closed sum type
//!     ├── Insert { id, before, text }   anchor = line inserted before, or end
//!     ├── Update { id, text, prev_text }
//!     └── Delete { id }                 carries no content
//!
//! Line (LineId) ← one row of the document
//!     ├── text       None = content unknown (placeholder sentinel)
//!     ├── author     None = authorship unknown
//!     ├── created_at None = original insertion not yet discovered
//!     └── updated_at most recent content change
//! ```
//!
//! Everything here is plain data plus small constructors and accessors. The
//! types are serde-serializable because the surrounding data-access layer
//! ships them over a wire; no wire format is mandated by this crate.

pub mod commit;
pub mod line;
pub mod op;

// Re-export primary types at crate root for convenience.
pub use commit::{Commit, sort_newest_first};
pub use line::{Line, LineId, UNKNOWN_TEXT};
pub use op::{EditOp, OpKind};
