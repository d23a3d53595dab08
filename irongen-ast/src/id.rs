//! Node identifiers.
//!
//! Every node owns an [`IdSlot`]. Slots start empty and receive a number from an
//! [`IdGenerator`] the first time someone asks for the node's id. Once set, a slot
//! never changes; cloning a node copies its slot, which is how a rebuilt node keeps
//! the identity of the node it replaces.

use std::cell::Cell;
use std::fmt;

use crate::error::{AstError, Result};

/// Identifier of a node within one tree generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(u64);

impl NodeId {
    /// Wraps a raw id value.
    #[must_use]
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Returns the raw id value.
    #[must_use]
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "@{}", self.0)
    }
}

/// Lazily filled id storage embedded in every node.
#[derive(Debug, Clone, Default)]
pub struct IdSlot(Cell<Option<NodeId>>);

impl IdSlot {
    /// Creates an empty slot.
    #[must_use]
    pub const fn new() -> Self {
        Self(Cell::new(None))
    }

    /// Returns the id if one was assigned.
    #[must_use]
    pub fn get(&self) -> Option<NodeId> {
        self.0.get()
    }

    /// Assigns an id.
    ///
    /// # Errors
    /// Returns `AstError::IdReassigned` if the slot already holds a different id.
    pub fn set(&self, id: NodeId) -> Result<()> {
        match self.0.get() {
            Some(current) if current != id => Err(AstError::IdReassigned {
                current,
                requested: id,
            }),
            _ => {
                self.0.set(Some(id));
                Ok(())
            }
        }
    }

    /// Copies the id of another slot onto this one.
    ///
    /// # Errors
    /// Returns `AstError::IdReassigned` if this slot already holds a different id.
    pub fn copy_from(&self, other: &IdSlot) -> Result<()> {
        match other.get() {
            Some(id) => self.set(id),
            None => Ok(()),
        }
    }
}

/// Source of fresh node ids, owned by the tree root.
#[derive(Debug)]
pub struct IdGenerator {
    next: Cell<u64>,
}

impl Default for IdGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdGenerator {
    /// Creates a generator starting at 1.
    #[must_use]
    pub const fn new() -> Self {
        Self { next: Cell::new(1) }
    }

    /// Returns a fresh id.
    pub fn next_id(&self) -> NodeId {
        let id = self.next.get();
        self.next.set(id + 1);
        NodeId(id)
    }

    /// Returns the id of a slot, assigning a fresh one on first access.
    pub fn id_of(&self, slot: &IdSlot) -> NodeId {
        if let Some(id) = slot.get() {
            return id;
        }
        let id = self.next_id();
        slot.0.set(Some(id));
        id
    }

    /// Restarts numbering for an independent generation run.
    pub fn reset(&self) {
        self.next.set(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lazy_assignment_is_stable() {
        let ids = IdGenerator::new();
        let slot = IdSlot::new();
        assert!(slot.get().is_none());

        let first = ids.id_of(&slot);
        let second = ids.id_of(&slot);
        assert_eq!(first, second);
        assert_eq!(slot.get(), Some(first));
    }

    #[test]
    fn test_ids_increase() {
        let ids = IdGenerator::new();
        let a = ids.id_of(&IdSlot::new());
        let b = ids.id_of(&IdSlot::new());
        assert!(b > a);
    }

    #[test]
    fn test_reassign_different_id_fails() {
        let slot = IdSlot::new();
        slot.set(NodeId::new(4)).expect("first set");
        slot.set(NodeId::new(4)).expect("same id is fine");
        let err = slot.set(NodeId::new(5)).expect_err("different id must fail");
        assert!(matches!(err, AstError::IdReassigned { .. }));
    }

    #[test]
    fn test_clone_carries_id() {
        let ids = IdGenerator::new();
        let slot = IdSlot::new();
        let id = ids.id_of(&slot);
        assert_eq!(slot.clone().get(), Some(id));
    }

    #[test]
    fn test_reset_restarts_numbering() {
        let ids = IdGenerator::new();
        let first = ids.next_id();
        ids.next_id();
        ids.reset();
        assert_eq!(ids.next_id(), first);
    }
}
