//! Entity identification system.
//!
//! Every card instance in a match (creature or trainer) has a unique
//! `EntityId`. Two copies of the same species share a catalog name but
//! never an id, so actions capture targets by id and re-resolve them at
//! execution time.
//!
//! ## Usage
//!
//! ```
//! use pocket_engine::core::{EntityAllocator, EntityId};
//!
//! let mut ids = EntityAllocator::default();
//! let ralts = ids.alloc();
//! let other_ralts = ids.alloc();
//!
//! assert_ne!(ralts, other_ralts);
//! assert_eq!(ralts, EntityId(0));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for a card instance.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }
}

impl From<u32> for EntityId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl std::fmt::Display for EntityId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Entity({})", self.0)
    }
}

/// Monotonic id source shared by both players' decks.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityAllocator {
    next: u32,
}

impl EntityAllocator {
    /// Allocate the next unused id.
    pub fn alloc(&mut self) -> EntityId {
        let id = EntityId(self.next);
        self.next += 1;
        id
    }

    /// Number of ids handed out so far.
    #[must_use]
    pub fn allocated(&self) -> u32 {
        self.next
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_alloc_is_sequential() {
        let mut ids = EntityAllocator::default();
        assert_eq!(ids.alloc(), EntityId(0));
        assert_eq!(ids.alloc(), EntityId(1));
        assert_eq!(ids.alloc(), EntityId(2));
        assert_eq!(ids.allocated(), 3);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", EntityId(42)), "Entity(42)");
    }

    #[test]
    fn test_serialization() {
        let id = EntityId(123);
        let json = serde_json::to_string(&id).unwrap();
        let deserialized: EntityId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }
}
