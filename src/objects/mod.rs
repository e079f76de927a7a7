//! Object system: templates, instances, and the registry.
//!
//! ## Key Types
//!
//! - `TypeId`: Arena index of a template
//! - `ObjectTemplate`: Immutable definition of an object or text kind
//! - `TextPayload`: The word a text block spells (noun, verb, property, special)
//! - `Instance`: A live occurrence on a grid
//! - `Registry`: Template arena and instance factory
//!
//! ## Text Blocks
//!
//! Text blocks are ordinary instances whose template carries a payload.
//! They are always pushable and are what sentences are built from.

mod catalog;
pub mod instance;
pub mod registry;
pub mod template;

pub use instance::Instance;
pub use registry::Registry;
pub use template::{ObjectTemplate, TextPayload, TypeId};
