//! Save states.
//!
//! A `Snapshot` records a grid by kind name and position, not by type id or
//! entity id, so it can be restored against any registry that knows the
//! same names. Rules are not stored; they are re-read from the text on
//! restore.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::core::Result;
use crate::objects::Registry;

use super::grid::Grid;

/// One instance in a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotObject {
    pub x: i32,
    pub y: i32,
    pub name: String,
    pub is_text: bool,
}

/// Serializable grid contents and progress.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub width: usize,
    pub height: usize,
    pub steps: u32,
    pub won: bool,
    pub lost: bool,
    pub objects: Vec<SnapshotObject>,
}

impl Snapshot {
    /// Encode with bincode.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(bincode::serialize(self)?)
    }

    /// Decode bytes produced by `to_bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(bincode::deserialize(bytes)?)
    }
}

impl Grid {
    /// Record the board, step count and terminal flags.
    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        let objects = self
            .instances()
            .map(|(position, instance)| SnapshotObject {
                x: position.x,
                y: position.y,
                name: instance.name.clone(),
                is_text: instance.is_text(),
            })
            .collect();

        Snapshot {
            width: self.width(),
            height: self.height(),
            steps: self.steps(),
            won: self.won(),
            lost: self.lost(),
            objects,
        }
    }

    /// Rebuild a grid from a snapshot and recompute its rules.
    ///
    /// Kinds the registry does not know are skipped. Fails when the
    /// recorded dimensions exceed `MAX_CELLS` squares.
    pub fn from_snapshot(snapshot: &Snapshot, registry: Arc<Registry>) -> Result<Self> {
        let mut grid = Grid::try_new(snapshot.width, snapshot.height, registry)?;
        for object in &snapshot.objects {
            if grid
                .spawn(&object.name, object.is_text, object.x, object.y)
                .is_none()
            {
                warn!(name = %object.name, x = object.x, y = object.y, "Skipping snapshot object");
            }
        }
        grid.set_progress(snapshot.steps, snapshot.won, snapshot.lost);
        grid.update_rules();
        Ok(grid)
    }
}
