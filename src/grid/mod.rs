//! The board and the turn engine.
//!
//! ## Key Types
//!
//! - `Grid`: Cells, rule tables and progress; runs `step`
//! - `Cell`: Instances stacked on one square
//! - `ObjectFilter`: Selector for `Grid::find_objects`
//! - `Snapshot`: Serializable save state
//!
//! Push resolution lives in `movement` and never mutates the grid itself.

pub mod cell;
#[allow(clippy::module_inception)]
pub mod grid;
pub mod movement;
pub mod snapshot;

pub use cell::Cell;
pub use grid::{Grid, ObjectFilter, MAX_CELLS};
pub use movement::{plan_move, MovePlan, PlannedMove};
pub use snapshot::{Snapshot, SnapshotObject};
