//! Level sources.
//!
//! Everything here produces a ready-to-play `Grid`: instances placed and
//! rules already read.
//!
//! - `parse_level` / `export_level`: one-character-per-square text format
//! - `fallback_level`: the built-in 12x12 starter puzzle

pub mod ascii;
pub mod fallback;

pub use ascii::{export_level, parse_level};
pub use fallback::{fallback_level, FALLBACK_SIZE};
