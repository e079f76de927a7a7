//! Push resolution.
//!
//! Moves are resolved in two phases. `plan_move` walks the push chain in
//! front of a mover without touching the grid and returns every relocation
//! the move needs; the grid then commits the whole plan, or nothing when
//! planning fails. A chain blocked anywhere leaves every instance in place.
//!
//! Entry into a square fails when the square is off the board or when any
//! instance in it holds STOP. Instances holding PUSH, and all text blocks,
//! are shoved one square further in the same direction, recursively. Each
//! entity appears in a plan at most once.

use rustc_hash::FxHashSet;
use smallvec::SmallVec;

use crate::core::{EntityId, Position, Property};

use super::grid::Grid;

/// One relocation inside a committed move.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PlannedMove {
    pub entity: EntityId,
    pub from: Position,
    pub to: Position,
}

/// Relocations for one move, pushed instances first, the mover last.
pub type MovePlan = SmallVec<[PlannedMove; 4]>;

/// Plan moving `entity` from `from` by `(dx, dy)`.
///
/// Returns `None` when the move is blocked.
#[must_use]
pub fn plan_move(
    grid: &Grid,
    entity: EntityId,
    from: Position,
    (dx, dy): (i32, i32),
) -> Option<MovePlan> {
    let mut plan = MovePlan::new();
    let mut visited = FxHashSet::default();
    visited.insert(entity);

    if visit(grid, entity, from, (dx, dy), &mut visited, &mut plan) {
        Some(plan)
    } else {
        None
    }
}

fn visit(
    grid: &Grid,
    entity: EntityId,
    from: Position,
    (dx, dy): (i32, i32),
    visited: &mut FxHashSet<EntityId>,
    plan: &mut MovePlan,
) -> bool {
    let to = from.offset(dx, dy);
    if !grid.in_bounds(to.x, to.y) {
        return false;
    }

    let rules = grid.rule_manager();
    let occupants = grid.get_objects_at(to.x, to.y);

    if occupants
        .iter()
        .any(|other| rules.has_property(&other.name, Property::Stop))
    {
        return false;
    }

    for other in occupants {
        let pushable = other.is_text() || rules.has_property(&other.name, Property::Push);
        if !pushable || !visited.insert(other.id) {
            continue;
        }
        if !visit(grid, other.id, to, (dx, dy), visited, plan) {
            return false;
        }
    }

    plan.push(PlannedMove { entity, from, to });
    true
}
