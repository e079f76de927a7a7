//! Core types: entities, positions, properties, actions, RNG, configuration.
//!
//! These are the leaf building blocks every other module depends on.

pub mod action;
pub mod config;
pub mod entity;
pub mod error;
pub mod property;
pub mod rng;

pub use action::Action;
pub use config::EnvConfig;
pub use entity::{EntityId, Position};
pub use error::{Result, SimError};
pub use property::{Property, PropertySet};
pub use rng::{GameRng, GameRngState};
