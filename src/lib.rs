//! # baba-sim
//!
//! A rule-driven grid puzzle simulator in the style of "Baba Is You",
//! built for agents and search.
//!
//! ## Design Principles
//!
//! 1. **Rules Live On The Board**: Behavior comes from `NOUN IS PROPERTY`
//!    sentences spelled with text blocks. Pushing text rewrites the rules
//!    mid-game.
//!
//! 2. **Soft Failure**: Stepping never errors. Off-board moves, blocked
//!    pushes and garbage actions are no-ops. Only parsing and configuration
//!    return `Result`.
//!
//! 3. **Deterministic**: Rule extraction, push resolution and the step
//!    pipeline are pure functions of the board. Randomness is confined to
//!    drivers through a seeded `GameRng`.
//!
//! ## Architecture
//!
//! - **Template/Instance Split**: An immutable `Registry` of templates is
//!   shared behind an `Arc`; grids own their instances by value.
//!
//! - **Persistent Data Structures**: Grid cells and the entity index use
//!   `im-rs`, so cloning a grid for lookahead is O(1).
//!
//! - **Two-Phase Pushing**: Push chains are planned without mutation and
//!   committed all at once, or not at all.
//!
//! ## Modules
//!
//! - `core`: Entity IDs, positions, properties, actions, RNG, configuration
//! - `objects`: Templates, instances and the registry
//! - `rules`: Sentence extraction and the rule tables
//! - `grid`: The board and the five-phase step pipeline
//! - `levels`: Text level format and the fallback puzzle
//! - `env`: Reset/step loop, rewards and observations

pub mod core;
pub mod objects;
pub mod rules;
pub mod grid;
pub mod levels;
pub mod env;

#[cfg(feature = "python")]
pub mod python;

// Re-export commonly used types
pub use crate::core::{
    Action, EnvConfig,
    EntityId, Position,
    GameRng, GameRngState,
    Property, PropertySet,
    Result, SimError,
};

pub use crate::objects::{Instance, ObjectTemplate, Registry, TextPayload, TypeId};

pub use crate::rules::{extract_rules, CellSource, Rule, RuleManager, SubjectId};

pub use crate::grid::{Cell, Grid, ObjectFilter, Snapshot, SnapshotObject};

pub use crate::levels::{export_level, fallback_level, parse_level};

pub use crate::env::{Environment, LevelSource, Observation, StepOutcome};
