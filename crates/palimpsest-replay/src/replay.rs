//! The backward sweep.
//!
//! Edit logs record forward deltas only, and deletes carry no content, so
//! the sweep starts from the known final state and undoes commits newest to
//! oldest. A snapshot is emitted *before* each commit is undone; snapshots
//! hold arena handles, so content discovered further back in time (an older
//! Update or Insert for a line a newer Delete turned into a placeholder) is
//! patched into already-emitted snapshots by mutating the shared slot.

use std::collections::{HashMap, HashSet};

use indexmap::IndexMap;
use palimpsest_types::{Commit, EditOp, Line, LineId, OpKind};

use crate::Result;
use crate::arena::{LineArena, LineHandle};
use crate::diagnostics::Diagnostic;
use crate::error::ReplayError;
use crate::history::Reconstruction;

/// Reconstruct the document state as of every commit timestamp.
///
/// `current` is the present-day line sequence; `commits` must be sorted
/// newest-first. The engine takes ownership of `current` and mutates the
/// line records during the sweep — pass a copy if the original must stay
/// pristine.
///
/// One snapshot is recorded per commit, keyed by its timestamp; a commit
/// with no operations still emits the unchanged running state. The call
/// never fails on well-formed input: log gaps and placeholders the log was
/// too short to resolve degrade into [`Diagnostic`]s on the result.
///
/// # Errors
///
/// Returns a [`ReplayError`](crate::ReplayError) for caller contract
/// violations: an unsorted log, duplicate ids in `current`, or empty id
/// tokens.
///
/// # Example
///
/// ```
/// use palimpsest_types::{Commit, EditOp, Line};
/// use palimpsest_replay::reconstruct;
///
/// let current = vec![Line::new("l1", "hello")];
/// let commits = vec![Commit::with_ops(
///     2000,
///     "amy",
///     vec![EditOp::Insert { id: "l1".into(), before: None, text: "hello".into() }],
/// )];
///
/// let history = reconstruct(current, &commits)?;
/// assert_eq!(history.timestamps(), vec![2000]);
/// assert_eq!(history.text_at(2000), "hello");
/// # Ok::<(), palimpsest_replay::ReplayError>(())
/// ```
pub fn reconstruct(current: Vec<Line>, commits: &[Commit]) -> Result<Reconstruction> {
    validate(&current, commits)?;

    let mut sweep = Sweep::new(current);
    let mut snapshots: IndexMap<u64, Vec<LineHandle>> = IndexMap::with_capacity(commits.len());

    for commit in commits {
        // Emit first: the working sequence holds the state immediately
        // after this commit was applied.
        snapshots.insert(commit.ts, sweep.working.clone());

        // Ops were applied left-to-right; undo right-to-left.
        for op in commit.ops.iter().rev() {
            sweep.undo(commit, op);
        }
    }

    sweep.report_unresolved();

    let Sweep { arena, diagnostics, .. } = sweep;
    Ok(Reconstruction::new(arena, snapshots, diagnostics))
}

fn validate(current: &[Line], commits: &[Commit]) -> Result<()> {
    let mut seen: HashSet<&LineId> = HashSet::with_capacity(current.len());
    for line in current {
        if line.id.is_empty() {
            return Err(ReplayError::EmptyLineId);
        }
        if !seen.insert(&line.id) {
            return Err(ReplayError::DuplicateLine(line.id.clone()));
        }
    }
    for pair in commits.windows(2) {
        if pair[1].ts > pair[0].ts {
            return Err(ReplayError::UnsortedLog {
                prev: pair[0].ts,
                next: pair[1].ts,
            });
        }
    }
    for commit in commits {
        for op in &commit.ops {
            if op.target().is_empty() {
                return Err(ReplayError::EmptyLineId);
            }
        }
    }
    Ok(())
}

/// Mutable sweep state: the arena, the working sequence, and the per-id era
/// index used to resolve creation metadata across era splits.
struct Sweep {
    arena: LineArena,
    working: Vec<LineHandle>,
    /// Every arena entry minted for an id, in allocation order. An Update
    /// undone on real content splits a line into eras (one entry per
    /// distinct content window); the originating Insert later resolves
    /// `created_at` across all of them.
    eras: HashMap<LineId, Vec<LineHandle>>,
    diagnostics: Vec<Diagnostic>,
}

impl Sweep {
    fn new(current: Vec<Line>) -> Self {
        let mut arena = LineArena::new();
        let mut eras: HashMap<LineId, Vec<LineHandle>> = HashMap::new();
        let mut working = Vec::with_capacity(current.len());
        for line in current {
            let id = line.id.clone();
            let handle = arena.alloc(line, false);
            eras.entry(id).or_default().push(handle);
            working.push(handle);
        }
        Self {
            arena,
            working,
            eras,
            diagnostics: Vec::new(),
        }
    }

    fn alloc(&mut self, line: Line, restored: bool) -> LineHandle {
        let id = line.id.clone();
        let handle = self.arena.alloc(line, restored);
        self.eras.entry(id).or_default().push(handle);
        handle
    }

    /// Position of a line in the working sequence, by id.
    fn position(&self, id: &LineId) -> Option<usize> {
        self.working
            .iter()
            .position(|&h| self.arena.get(h).line.id == *id)
    }

    fn undo(&mut self, commit: &Commit, op: &EditOp) {
        match op {
            EditOp::Insert { id, text, .. } => self.undo_insert(commit, id, text),
            EditOp::Update { id, prev_text, .. } => self.undo_update(commit, id, prev_text),
            EditOp::Delete { id } => self.undo_delete(commit, id),
        }
    }

    /// Reverse of an Insert: the line did not exist before this commit.
    fn undo_insert(&mut self, commit: &Commit, id: &LineId, text: &str) {
        // The Insert is the authoritative origin event. Creation time is a
        // fact about the line's identity, not about one content window, so
        // resolve it on every era of the id that is still provisional —
        // including entries aliased by snapshots already emitted for newer
        // timestamps.
        if let Some(handles) = self.eras.get(id) {
            for &handle in handles {
                let slot = self.arena.get_mut(handle);
                if slot.line.created_at.is_none() {
                    slot.line.created_at = Some(commit.ts);
                }
            }
        }

        let Some(pos) = self.position(id) else {
            tracing::warn!("undo insert: line {id} not in working sequence at ts {}", commit.ts);
            self.diagnostics.push(Diagnostic::OrphanedReference {
                ts: commit.ts,
                op: OpKind::Insert,
                line: id.clone(),
            });
            return;
        };

        let handle = self.working[pos];
        let slot = self.arena.get_mut(handle);
        if slot.restored {
            // A newer Delete turned this line into a placeholder; the
            // Insert carries the original content and authorship. When no
            // Update filled the placeholder first, the last content change
            // was the insertion itself.
            let unfilled = slot.line.text.is_none();
            slot.line.text = Some(text.to_string());
            slot.line.author = Some(commit.author.clone());
            slot.line.created_at = Some(commit.ts);
            if unfilled {
                slot.line.updated_at = Some(commit.ts);
            }
            slot.restored = false;
        }
        // Either way, the line did not exist before its own insertion.
        self.working.remove(pos);
    }

    /// Reverse of an Update: restore the pre-update content.
    fn undo_update(&mut self, commit: &Commit, id: &LineId, prev_text: &str) {
        let Some(pos) = self.position(id) else {
            tracing::warn!("undo update: line {id} not in working sequence at ts {}", commit.ts);
            self.diagnostics.push(Diagnostic::OrphanedReference {
                ts: commit.ts,
                op: OpKind::Update,
                line: id.clone(),
            });
            return;
        };

        let handle = self.working[pos];
        if self.arena.get(handle).restored {
            // Placeholder: content is now known for the window this entry
            // spans. Mutate in place so snapshots already holding the entry
            // pick the content up retroactively. The entry stays restored —
            // only the originating Insert settles its creation time.
            let slot = self.arena.get_mut(handle);
            slot.line.text = Some(prev_text.to_string());
            slot.line.author = Some(commit.author.clone());
            slot.line.updated_at = Some(commit.ts);
        } else {
            // Real content: earlier timestamps saw different text than the
            // already-emitted snapshots, so this era gets its own entry and
            // the aliased one is never touched. The Update does not record
            // who authored the content it replaced.
            let old = &self.arena.get(handle).line;
            let fresh = Line {
                id: old.id.clone(),
                text: Some(prev_text.to_string()),
                author: None,
                created_at: old.created_at,
                updated_at: Some(commit.ts.saturating_sub(1)),
            };
            let fresh_handle = self.alloc(fresh, false);
            self.working[pos] = fresh_handle;
        }
    }

    /// Reverse of a Delete: the line existed before this commit, content
    /// unknown until an older Update or Insert for it is replayed.
    fn undo_delete(&mut self, commit: &Commit, id: &LineId) {
        if self.position(id).is_some() {
            // Logs can carry ops recorded after a delete; those already
            // re-established the line while sweeping, and the surviving
            // entry keeps representing it.
            tracing::debug!("undo delete: line {id} already present at ts {}, skipping restore", commit.ts);
            return;
        }

        // Original position is not recoverable from a Delete event; the
        // placeholder rides at the end of the sequence.
        let placeholder = Line {
            id: id.clone(),
            text: None,
            author: None,
            created_at: None,
            updated_at: Some(commit.ts.saturating_sub(1)),
        };
        let handle = self.alloc(placeholder, true);
        self.working.push(handle);
    }

    /// Report restored lines whose content was never recovered.
    fn report_unresolved(&mut self) {
        for (_, slot) in self.arena.iter() {
            if slot.restored && slot.line.text.is_none() {
                tracing::warn!("log ended before content of line {} was found", slot.line.id);
                self.diagnostics.push(Diagnostic::UnresolvedPlaceholder {
                    line: slot.line.id.clone(),
                });
            }
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
