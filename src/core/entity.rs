//! Entity identification and grid positions.
//!
//! Every instance placed on a grid has a unique `EntityId`. Two instances of
//! the same object kind on the same cell are still distinct entities, which
//! is what lets a cell hold duplicates.
//!
//! ## ID Layout
//!
//! IDs are allocated by the owning `Grid`, starting at 1. `EntityId::UNPLACED`
//! (0) marks an instance fresh out of the registry that no grid has adopted yet.
//!
//! ```
//! use baba_sim::core::{EntityId, Position};
//!
//! let id = EntityId(7);
//! assert!(id.is_placed());
//! assert!(!EntityId::UNPLACED.is_placed());
//!
//! let pos = Position::new(2, 3);
//! assert_eq!(pos.offset(1, 0), Position::new(3, 3));
//! ```

use serde::{Deserialize, Serialize};

/// Unique identifier for an instance living on a grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct EntityId(pub u32);

impl EntityId {
    /// Identifier carried by instances that are not on any grid.
    pub const UNPLACED: EntityId = EntityId(0);

    /// First identifier handed out by a grid.
    #[must_use]
    pub const fn first() -> Self {
        Self(1)
    }

    /// Check whether a grid has assigned this identifier.
    #[must_use]
    pub const fn is_placed(self) -> bool {
        self.0 != 0
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u32 {
        self.0
    }

    /// The identifier following this one, or `None` once `u32` runs out.
    #[must_use]
    pub const fn next(self) -> Option<Self> {
        match self.0.checked_add(1) {
            Some(raw) => Some(Self(raw)),
            None => None,
        }
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

/// A cell coordinate.
///
/// Signed so that a target one step past the border (`x = -1`) is
/// representable; the grid rejects it as out of bounds instead of wrapping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    /// Create a position.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// The position displaced by `(dx, dy)`.
    #[must_use]
    pub const fn offset(self, dx: i32, dy: i32) -> Self {
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }

    /// Manhattan distance to another position.
    #[must_use]
    pub fn manhattan(self, other: Position) -> u32 {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }
}

impl From<(i32, i32)> for Position {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

impl std::fmt::Display for Position {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}
