//! The reconstructed history.
//!
//! An ephemeral result computed by one [`reconstruct`](crate::reconstruct)
//! call: a timestamp-keyed map of line-sequence snapshots over one shared
//! arena, plus the diagnostics gathered along the way. Immutable once
//! returned.

use indexmap::IndexMap;
use palimpsest_types::Line;

use crate::arena::{LineArena, LineHandle};
use crate::diagnostics::Diagnostic;

/// Document states as of every commit timestamp in the replayed log.
///
/// Snapshots store arena handles, not line copies; lookups materialize
/// owned [`Line`]s on demand. Unknown timestamps degrade to empty results
/// rather than erroring.
#[derive(Debug)]
pub struct Reconstruction {
    arena: LineArena,
    snapshots: IndexMap<u64, Vec<LineHandle>>,
    diagnostics: Vec<Diagnostic>,
}

impl Reconstruction {
    pub(crate) fn new(
        arena: LineArena,
        snapshots: IndexMap<u64, Vec<LineHandle>>,
        diagnostics: Vec<Diagnostic>,
    ) -> Self {
        Self {
            arena,
            snapshots,
            diagnostics,
        }
    }

    /// All snapshot timestamps, ascending. Drives discrete-position
    /// selectors (one slider stop per commit).
    pub fn timestamps(&self) -> Vec<u64> {
        let mut range: Vec<u64> = self.snapshots.keys().copied().collect();
        range.sort_unstable();
        range
    }

    /// Whether a snapshot exists for this timestamp.
    pub fn contains(&self, ts: u64) -> bool {
        self.snapshots.contains_key(&ts)
    }

    /// Number of distinct snapshots.
    pub fn snapshot_count(&self) -> usize {
        self.snapshots.len()
    }

    /// Whether the replayed log produced no snapshots.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The line sequence as of `ts`. Empty for unknown timestamps.
    pub fn lines_at(&self, ts: u64) -> Vec<Line> {
        self.snapshots
            .get(&ts)
            .map(|handles| {
                handles
                    .iter()
                    .map(|&h| self.arena.get(h).line.clone())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The document text as of `ts`, one line per row, placeholders shown
    /// with the unknown-content sentinel. Empty for unknown timestamps.
    pub fn text_at(&self, ts: u64) -> String {
        self.snapshots
            .get(&ts)
            .map(|handles| {
                handles
                    .iter()
                    .map(|&h| self.arena.get(h).line.text_or_unknown())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default()
    }

    /// Iterate snapshots in ascending timestamp order.
    pub fn iter(&self) -> impl Iterator<Item = (u64, Vec<Line>)> + '_ {
        self.timestamps()
            .into_iter()
            .map(move |ts| (ts, self.lines_at(ts)))
    }

    /// Anomalies observed during the sweep (log gaps, placeholders the log
    /// was too short to resolve).
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use palimpsest_types::{Commit, EditOp};

    fn sample() -> Reconstruction {
        let current = vec![Line::new("l1", "two")];
        let commits = vec![
            Commit::with_ops(
                2000,
                "bob",
                vec![EditOp::Update {
                    id: "l1".into(),
                    text: "two".to_string(),
                    prev_text: "one".to_string(),
                }],
            ),
            Commit::with_ops(
                1000,
                "amy",
                vec![EditOp::Insert {
                    id: "l1".into(),
                    before: None,
                    text: "one".to_string(),
                }],
            ),
        ];
        crate::reconstruct(current, &commits).unwrap()
    }

    #[test]
    fn test_timestamps_ascending() {
        let history = sample();
        assert_eq!(history.timestamps(), vec![1000, 2000]);
    }

    #[test]
    fn test_contains_and_count() {
        let history = sample();
        assert!(history.contains(1000));
        assert!(!history.contains(1500));
        assert_eq!(history.snapshot_count(), 2);
        assert!(!history.is_empty());
    }

    #[test]
    fn test_unknown_timestamp_degrades_to_empty() {
        let history = sample();
        assert!(history.lines_at(1500).is_empty());
        assert_eq!(history.text_at(1500), "");
    }

    #[test]
    fn test_text_at_joins_lines() {
        let current = vec![Line::new("a", "alpha"), Line::new("b", "beta")];
        let commits = vec![Commit::new(1000, "amy")];
        let history = crate::reconstruct(current, &commits).unwrap();
        assert_eq!(history.text_at(1000), "alpha\nbeta");
    }

    #[test]
    fn test_iter_ascending() {
        let history = sample();
        let collected: Vec<(u64, String)> = history
            .iter()
            .map(|(ts, lines)| (ts, lines[0].text.clone().unwrap()))
            .collect();
        assert_eq!(
            collected,
            vec![(1000, "one".to_string()), (2000, "two".to_string())]
        );
    }
}
