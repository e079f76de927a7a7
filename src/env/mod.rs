//! Agent-facing episode loop.
//!
//! ## Key Types
//!
//! - `Environment`: Owns a grid, resets it from a level source, scores steps
//! - `StepOutcome`: Reward, termination and the active rules after a step
//! - `Observation`: `height x width x depth` tensor of type ids

pub mod environment;
pub mod observation;

pub use environment::{Environment, LevelSource, StepOutcome};
pub use observation::Observation;
