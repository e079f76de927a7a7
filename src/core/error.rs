//! Error type for the fallible edges of the simulator.
//!
//! The simulation itself never fails: bad moves are no-ops and bad actions
//! are waits. Errors only come from parsing input (levels, property words,
//! snapshots) and from invalid configuration.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimError {
    #[error("Unknown property: {0}")]
    UnknownProperty(String),

    #[error("Unknown level glyph {ch:?} at ({x}, {y})")]
    UnknownGlyph { ch: char, x: usize, y: usize },

    #[error("Level is empty")]
    EmptyLevel,

    #[error("Invalid grid dimensions {width}x{height}")]
    InvalidDimensions { width: usize, height: usize },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Snapshot error: {0}")]
    Snapshot(#[from] bincode::Error),
}

pub type Result<T> = std::result::Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages() {
        let err = SimError::UnknownGlyph { ch: '%', x: 3, y: 1 };
        assert_eq!(err.to_string(), "Unknown level glyph '%' at (3, 1)");

        let err = SimError::UnknownProperty("FLY".into());
        assert_eq!(err.to_string(), "Unknown property: FLY");

        let err = SimError::InvalidDimensions { width: 4096, height: 4096 };
        assert_eq!(err.to_string(), "Invalid grid dimensions 4096x4096");
    }
}
