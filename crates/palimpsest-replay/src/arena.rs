//! Arena storage for line records.
//!
//! The working sequence and every emitted snapshot hold [`LineHandle`]s
//! into one arena, so mutating a slot retroactively corrects all snapshots
//! that reference it. This is the ownership-safe rendering of the
//! shared-mutable-object aliasing the reconstruction algorithm depends on.

use palimpsest_types::Line;

/// Handle to a line slot. Cheap to copy, stable for the arena's lifetime.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub(crate) struct LineHandle(usize);

/// One arena slot: the line record plus engine-internal restoration state.
#[derive(Debug)]
pub(crate) struct Slot {
    pub line: Line,
    /// Set when this entry was materialized by undoing a Delete and its
    /// originating Insert has not been replayed yet. In-place content
    /// mutation is only legal while this is set.
    pub restored: bool,
}

/// Slot storage addressed by handle. Slots are never freed: entries removed
/// from the working sequence stay reachable through emitted snapshots.
#[derive(Debug, Default)]
pub(crate) struct LineArena {
    slots: Vec<Slot>,
}

impl LineArena {
    pub fn new() -> Self {
        Self { slots: Vec::new() }
    }

    /// Move a line into the arena and return its handle.
    pub fn alloc(&mut self, line: Line, restored: bool) -> LineHandle {
        let handle = LineHandle(self.slots.len());
        self.slots.push(Slot { line, restored });
        handle
    }

    pub fn get(&self, handle: LineHandle) -> &Slot {
        &self.slots[handle.0]
    }

    pub fn get_mut(&mut self, handle: LineHandle) -> &mut Slot {
        &mut self.slots[handle.0]
    }

    pub fn iter(&self) -> impl Iterator<Item = (LineHandle, &Slot)> {
        self.slots
            .iter()
            .enumerate()
            .map(|(i, slot)| (LineHandle(i), slot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_and_get() {
        let mut arena = LineArena::new();
        let a = arena.alloc(Line::new("l1", "one"), false);
        let b = arena.alloc(Line::unresolved("l2"), true);

        assert_ne!(a, b);
        assert_eq!(arena.iter().count(), 2);
        assert_eq!(arena.get(a).line.text.as_deref(), Some("one"));
        assert!(!arena.get(a).restored);
        assert!(arena.get(b).restored);
        assert!(arena.get(b).line.is_placeholder());
    }

    #[test]
    fn test_mutation_is_visible_through_all_handle_copies() {
        let mut arena = LineArena::new();
        let handle = arena.alloc(Line::unresolved("l1"), true);
        let aliased = handle; // snapshots store copies like this

        arena.get_mut(handle).line.text = Some("recovered".to_string());
        assert_eq!(arena.get(aliased).line.text.as_deref(), Some("recovered"));
    }

    #[test]
    fn test_iter_walks_all_slots() {
        let mut arena = LineArena::new();
        arena.alloc(Line::new("l1", "one"), false);
        arena.alloc(Line::new("l2", "two"), false);

        let ids: Vec<String> = arena
            .iter()
            .map(|(_, slot)| slot.line.id.to_string())
            .collect();
        assert_eq!(ids, vec!["l1", "l2"]);
    }
}
