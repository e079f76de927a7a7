//! The simulation board and the step pipeline.
//!
//! `Grid` owns every live instance. Cells are kept in an `im::Vector` and
//! the entity -> position index in an `im::HashMap`, so cloning a grid for
//! lookahead or save states is O(1) and later mutation copies only what
//! changes.
//!
//! ## Step Pipeline
//!
//! `step` runs five phases in a fixed order:
//!
//! 1. **Move**: every YOU instance tries to move, pushing what it can
//! 2. **Rules**: sentences are re-read from the board
//! 3. **Transform**: `X IS Y` replaces non-text `X` instances with fresh `Y`s
//! 4. **Win/Lose**: lose without a YOU subject, win when YOU meets WIN
//! 5. **Sink**: squares holding a SINK instance are emptied
//!
//! Nothing in the pipeline fails. Off-board targets and blocked pushes are
//! ignored and `won`/`lost` stay set once raised.

use std::sync::Arc;

use im::{HashMap as ImHashMap, Vector};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::{debug, trace, warn};

use crate::core::{Action, EntityId, Position, Property, Result, SimError};
use crate::objects::{Instance, Registry, TypeId};
use crate::rules::{extract_rules, CellSource, RuleManager};

use super::cell::Cell;
use super::movement::{plan_move, MovePlan};

/// Selects instances for `Grid::find_objects`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ObjectFilter<'a> {
    /// Every instance.
    All,
    /// Instances whose kind name matches, ignoring ASCII case.
    Name(&'a str),
    /// Instances of one template.
    Type(TypeId),
}

impl ObjectFilter<'_> {
    fn matches(&self, instance: &Instance) -> bool {
        match self {
            ObjectFilter::All => true,
            ObjectFilter::Name(name) => instance.is_named(name),
            ObjectFilter::Type(type_id) => instance.type_id == *type_id,
        }
    }
}

/// Rectangular board of stacked instances plus rule and game state.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use baba_sim::core::{Action, Property};
/// use baba_sim::grid::Grid;
/// use baba_sim::objects::Registry;
///
/// let mut grid = Grid::new(5, 5, Arc::new(Registry::with_defaults()));
/// grid.spawn("baba", true, 1, 1);
/// grid.spawn("is", true, 2, 1);
/// grid.spawn("you", true, 3, 1);
/// grid.spawn("baba", false, 0, 0);
/// grid.update_rules();
///
/// assert!(grid.rule_manager().has_property("baba", Property::You));
///
/// let (won, lost) = grid.step(Action::Down);
/// assert!(!won && !lost);
/// assert_eq!(grid.get_objects_at(0, 1)[0].name, "baba");
/// ```
#[derive(Clone, Debug)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vector<Cell>,
    positions: ImHashMap<EntityId, Position>,
    rules: RuleManager,
    registry: Arc<Registry>,
    next_entity: EntityId,
    steps: u32,
    won: bool,
    lost: bool,
}

/// Largest board, in squares, that `Grid::try_new` accepts.
pub const MAX_CELLS: usize = 1 << 20;

impl Grid {
    /// Create an empty board.
    ///
    /// # Panics
    ///
    /// Panics if `width * height` overflows. Use `try_new` for untrusted
    /// dimensions.
    #[must_use]
    pub fn new(width: usize, height: usize, registry: Arc<Registry>) -> Self {
        Self {
            width,
            height,
            cells: std::iter::repeat(Cell::new()).take(width * height).collect(),
            positions: ImHashMap::new(),
            rules: RuleManager::new(),
            registry,
            next_entity: EntityId::first(),
            steps: 0,
            won: false,
            lost: false,
        }
    }

    /// Create an empty board, rejecting boards larger than `MAX_CELLS`.
    pub fn try_new(width: usize, height: usize, registry: Arc<Registry>) -> Result<Self> {
        match width.checked_mul(height) {
            Some(cells) if cells <= MAX_CELLS => Ok(Self::new(width, height, registry)),
            _ => Err(SimError::InvalidDimensions { width, height }),
        }
    }

    // === Accessors ===

    #[must_use]
    pub fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub fn registry(&self) -> &Arc<Registry> {
        &self.registry
    }

    #[must_use]
    pub fn rule_manager(&self) -> &RuleManager {
        &self.rules
    }

    /// Direct access to the rule tables, for drivers that install rules
    /// without text on the board. The next `update_rules` overwrites them.
    pub fn rule_manager_mut(&mut self) -> &mut RuleManager {
        &mut self.rules
    }

    /// Number of `step` calls since creation or the last `reset`.
    #[must_use]
    pub fn steps(&self) -> u32 {
        self.steps
    }

    #[must_use]
    pub fn won(&self) -> bool {
        self.won
    }

    #[must_use]
    pub fn lost(&self) -> bool {
        self.lost
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.won || self.lost
    }

    #[must_use]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as usize) < self.width && (y as usize) < self.height
    }

    fn index(&self, x: i32, y: i32) -> Option<usize> {
        self.in_bounds(x, y)
            .then(|| y as usize * self.width + x as usize)
    }

    fn position_at(&self, index: usize) -> Position {
        Position::new((index % self.width) as i32, (index / self.width) as i32)
    }

    // === Placement ===

    /// Adopt `instance` into the square at `(x, y)`.
    ///
    /// The instance gets a fresh entity id. Returns false, dropping the
    /// instance, when the square is off the board or the grid has handed
    /// out its last id (`u32::MAX - 1` placements over its lifetime).
    pub fn place_object(&mut self, instance: Instance, x: i32, y: i32) -> bool {
        self.adopt(instance, x, y).is_some()
    }

    fn adopt(&mut self, mut instance: Instance, x: i32, y: i32) -> Option<EntityId> {
        let index = self.index(x, y)?;
        let id = self.next_entity;
        let Some(next) = id.next() else {
            warn!(name = %instance.name, "Entity ids exhausted");
            return None;
        };
        self.next_entity = next;

        instance.id = id;
        self.cells.get_mut(index)?.push(instance);
        self.positions.insert(id, Position::new(x, y));
        Some(id)
    }

    /// Create an instance of the named kind from the registry and place it.
    ///
    /// Returns the new entity id, or `None` for unknown kinds and off-board
    /// squares.
    pub fn spawn(&mut self, name: &str, is_text: bool, x: i32, y: i32) -> Option<EntityId> {
        let instance = self.registry.create_instance(name, is_text)?;
        self.adopt(instance, x, y)
    }

    /// Take an instance off the board.
    pub fn remove_object(&mut self, id: EntityId) -> Option<Instance> {
        let position = self.positions.remove(&id)?;
        let index = self.index(position.x, position.y)?;
        self.cells.get_mut(index)?.remove(id)
    }

    /// Relocate an instance directly, ignoring STOP and PUSH.
    ///
    /// Returns false when the instance is unknown or the target is off the
    /// board.
    pub fn move_object(&mut self, id: EntityId, x: i32, y: i32) -> bool {
        let Some(from) = self.positions.get(&id).copied() else {
            return false;
        };
        self.relocate(id, from, Position::new(x, y))
    }

    fn relocate(&mut self, id: EntityId, from: Position, to: Position) -> bool {
        let (Some(from_index), Some(to_index)) =
            (self.index(from.x, from.y), self.index(to.x, to.y))
        else {
            return false;
        };
        let Some(instance) = self.cells.get_mut(from_index).and_then(|cell| cell.remove(id)) else {
            return false;
        };
        if let Some(cell) = self.cells.get_mut(to_index) {
            cell.push(instance);
            self.positions.insert(id, to);
            true
        } else {
            false
        }
    }

    // === Queries ===

    /// Instances in the square at `(x, y)`; empty when off the board.
    #[must_use]
    pub fn get_objects_at(&self, x: i32, y: i32) -> &[Instance] {
        self.index(x, y)
            .and_then(|index| self.cells.get(index))
            .map_or(&[], Cell::as_slice)
    }

    /// Current square of an entity.
    #[must_use]
    pub fn position_of(&self, id: EntityId) -> Option<Position> {
        self.positions.get(&id).copied()
    }

    /// Look up a live instance by entity id.
    #[must_use]
    pub fn get(&self, id: EntityId) -> Option<&Instance> {
        let position = self.position_of(id)?;
        let index = self.index(position.x, position.y)?;
        self.cells.get(index)?.get(id)
    }

    /// All instances with their squares, row-major.
    pub fn instances(&self) -> impl Iterator<Item = (Position, &Instance)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .flat_map(move |(index, cell)| {
                let position = self.position_at(index);
                cell.iter().map(move |instance| (position, instance))
            })
    }

    /// Instances matching `filter`, row-major.
    #[must_use]
    pub fn find_objects(&self, filter: ObjectFilter<'_>) -> Vec<(Position, &Instance)> {
        self.instances()
            .filter(|(_, instance)| filter.matches(instance))
            .collect()
    }

    /// Total number of live instances.
    #[must_use]
    pub fn object_count(&self) -> usize {
        self.positions.len()
    }

    /// Live instances per kind name.
    #[must_use]
    pub fn count_objects(&self) -> FxHashMap<String, usize> {
        let mut counts = FxHashMap::default();
        for (_, instance) in self.instances() {
            *counts.entry(instance.name.clone()).or_insert(0) += 1;
        }
        counts
    }

    /// The instance drawn on top of a square.
    #[must_use]
    pub fn top_instance(&self, x: i32, y: i32) -> Option<&Instance> {
        self.index(x, y)
            .and_then(|index| self.cells.get(index))
            .and_then(Cell::top)
    }

    /// One glyph per square, rows separated by newlines; `.` for empty.
    #[must_use]
    pub fn render_text(&self) -> String {
        let mut out = String::with_capacity((self.width + 1) * self.height);
        for y in 0..self.height as i32 {
            if y > 0 {
                out.push('\n');
            }
            for x in 0..self.width as i32 {
                let glyph = self
                    .top_instance(x, y)
                    .and_then(|instance| self.registry.template(instance.type_id))
                    .map_or('.', |template| template.glyph);
                out.push(glyph);
            }
        }
        out
    }

    // === Rules ===

    /// Re-read sentences from the board and rebuild the rule tables.
    ///
    /// Level loaders call this once after placing everything.
    pub fn update_rules(&mut self) {
        let rules = extract_rules(&*self);
        self.rules.update_rules(rules);
    }

    // === Step ===

    /// Advance one turn. Returns `(won, lost)`.
    pub fn step(&mut self, action: Action) -> (bool, bool) {
        self.steps += 1;
        debug!(step = self.steps, action = %action, "Step");

        if action.is_move() {
            self.move_you(action.delta());
        }
        self.update_rules();
        self.apply_transformations();
        self.check_win_lose();
        self.apply_sink();

        (self.won, self.lost)
    }

    fn move_you(&mut self, delta: (i32, i32)) {
        let subjects: Vec<String> = self
            .rules
            .objects_with(Property::You)
            .map(str::to_string)
            .collect();

        let movers: Vec<EntityId> = subjects
            .iter()
            .flat_map(|subject| {
                self.instances()
                    .filter(move |(_, instance)| !instance.is_text() && instance.is_named(subject))
                    .map(|(_, instance)| instance.id)
            })
            .collect();

        // Everything relocated this phase, so a YOU shoved by another YOU
        // does not move a second square.
        let mut moved: FxHashSet<EntityId> = FxHashSet::default();
        for id in movers {
            if moved.contains(&id) {
                continue;
            }
            let Some(from) = self.position_of(id) else {
                continue;
            };
            match plan_move(self, id, from, delta) {
                Some(plan) => {
                    moved.extend(plan.iter().map(|step| step.entity));
                    self.commit(&plan);
                }
                None => trace!(entity = %id, from = %from, "Move blocked"),
            }
        }
        debug!(subjects = subjects.len(), moved = moved.len(), "Move phase");
    }

    fn commit(&mut self, plan: &MovePlan) {
        for step in plan {
            self.relocate(step.entity, step.from, step.to);
        }
    }

    fn apply_transformations(&mut self) {
        if !self.rules.has_transformations() {
            return;
        }

        let pending: Vec<(EntityId, Position, String)> = self
            .instances()
            .filter(|(_, instance)| !instance.is_text())
            .filter_map(|(position, instance)| {
                self.rules
                    .get_transformation(&instance.name)
                    .map(|target| (instance.id, position, target.to_string()))
            })
            .collect();

        for (id, position, target) in &pending {
            let Some(replacement) = self.registry.create_instance(target, false) else {
                warn!(entity = %id, target = %target, "Transformation target not registered");
                continue;
            };
            self.remove_object(*id);
            self.place_object(replacement, position.x, position.y);
        }
        debug!(transformed = pending.len(), "Transform phase");
    }

    fn check_win_lose(&mut self) {
        let you: Vec<&str> = self.rules.objects_with(Property::You).collect();
        if you.is_empty() {
            self.lost = true;
            debug!("No YOU subject, lost");
            return;
        }

        let won = you.iter().any(|subject| {
            self.instances()
                .filter(|(_, instance)| instance.is_named(subject))
                .any(|(position, instance)| {
                    self.get_objects_at(position.x, position.y)
                        .iter()
                        .any(|other| {
                            other.id != instance.id
                                && self.rules.has_property(&other.name, Property::Win)
                        })
                })
        });

        if won {
            self.won = true;
            debug!("YOU reached WIN");
        }
    }

    fn apply_sink(&mut self) {
        let sinking: Vec<usize> = self
            .cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| {
                cell.iter()
                    .any(|instance| self.rules.has_property(&instance.name, Property::Sink))
            })
            .map(|(index, _)| index)
            .collect();

        for &index in &sinking {
            if let Some(cell) = self.cells.get_mut(index) {
                for instance in cell.take_all() {
                    self.positions.remove(&instance.id);
                }
            }
        }
        if !sinking.is_empty() {
            debug!(cells = sinking.len(), "Sink phase");
        }
    }

    // === Lifecycle ===

    /// Empty the board and clear rules, steps and terminal flags.
    pub fn reset(&mut self) {
        *self = Self::new(self.width, self.height, Arc::clone(&self.registry));
        self.update_rules();
    }

    /// Independent copy with freshly recomputed rules.
    ///
    /// Shares structure with `self` until either side is mutated.
    #[must_use]
    pub fn copy(&self) -> Self {
        let mut copy = self.clone();
        copy.update_rules();
        copy
    }

    pub(crate) fn set_progress(&mut self, steps: u32, won: bool, lost: bool) {
        self.steps = steps;
        self.won = won;
        self.lost = lost;
    }
}

impl CellSource for Grid {
    fn width(&self) -> usize {
        self.width
    }

    fn height(&self) -> usize {
        self.height
    }

    fn cell_instances(&self, x: usize, y: usize) -> &[Instance] {
        self.cells
            .get(y * self.width + x)
            .map_or(&[], Cell::as_slice)
    }
}
