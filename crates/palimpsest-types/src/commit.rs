//! Commits: atomic batches of edit operations.

use serde::{Deserialize, Serialize};

use crate::op::EditOp;

/// One atomic batch of operations recorded at a single logical timestamp
/// with one author.
///
/// The timestamp is a unique-enough logical clock. It is the key the
/// reconstruction result is addressed by; ties between commits are resolved
/// by processing order, not by this type.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commit {
    /// Logical timestamp of the batch.
    pub ts: u64,
    /// Participant that recorded the batch.
    pub author: String,
    /// Operations, applied left-to-right at `ts`.
    pub ops: Vec<EditOp>,
}

impl Commit {
    /// Create an empty commit.
    pub fn new(ts: u64, author: impl Into<String>) -> Self {
        Self {
            ts,
            author: author.into(),
            ops: Vec::new(),
        }
    }

    /// Create a commit with its full operation list.
    pub fn with_ops(ts: u64, author: impl Into<String>, ops: Vec<EditOp>) -> Self {
        Self {
            ts,
            author: author.into(),
            ops,
        }
    }

    /// Add an operation to the batch.
    pub fn push(&mut self, op: EditOp) {
        self.ops.push(op);
    }

    /// Check if the batch carries no operations.
    ///
    /// Empty commits are legal; reconstruction still emits a snapshot for
    /// them (equal to the unchanged running state).
    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Number of operations.
    pub fn len(&self) -> usize {
        self.ops.len()
    }
}

/// Sort a commit log into the newest-first order the replay engine expects.
///
/// Stable: commits sharing a timestamp keep their relative order.
pub fn sort_newest_first(commits: &mut [Commit]) {
    commits.sort_by(|a, b| b.ts.cmp(&a.ts));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::line::LineId;

    #[test]
    fn test_commit_push_and_len() {
        let mut commit = Commit::new(1000, "amy");
        assert!(commit.is_empty());

        commit.push(EditOp::Insert {
            id: LineId::new("l1"),
            before: None,
            text: "hello".to_string(),
        });
        commit.push(EditOp::Delete { id: LineId::new("l2") });

        assert!(!commit.is_empty());
        assert_eq!(commit.len(), 2);
        assert_eq!(commit.ts, 1000);
        assert_eq!(commit.author, "amy");
    }

    #[test]
    fn test_commit_serde_roundtrip() {
        let commit = Commit::with_ops(
            1000,
            "amy",
            vec![EditOp::Update {
                id: LineId::new("l1"),
                text: "b".to_string(),
                prev_text: "a".to_string(),
            }],
        );
        let json = serde_json::to_string(&commit).unwrap();
        let parsed: Commit = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, commit);
    }

    #[test]
    fn test_sort_newest_first() {
        let mut log = vec![
            Commit::new(1000, "amy"),
            Commit::new(3000, "bob"),
            Commit::new(2000, "amy"),
        ];
        sort_newest_first(&mut log);
        let ts: Vec<u64> = log.iter().map(|c| c.ts).collect();
        assert_eq!(ts, vec![3000, 2000, 1000]);
    }

    #[test]
    fn test_sort_newest_first_is_stable_for_ties() {
        let mut log = vec![
            Commit::new(1000, "first"),
            Commit::new(1000, "second"),
        ];
        sort_newest_first(&mut log);
        assert_eq!(log[0].author, "first");
        assert_eq!(log[1].author, "second");
    }
}
