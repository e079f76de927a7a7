//! Player actions.
//!
//! One step of the simulation takes exactly one `Action`: a direction to
//! move every YOU object, or `Wait`. Drivers that speak strings (agents,
//! Python) go through `Action::parse`, which never fails; anything that is
//! not a known direction is a `Wait`.

use serde::{Deserialize, Serialize};

/// A single-step action.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    Up,
    Down,
    Left,
    Right,
    #[default]
    Wait,
}

impl Action {
    /// All actions, in the order drivers enumerate them.
    pub const ALL: [Action; 5] = [
        Action::Up,
        Action::Down,
        Action::Left,
        Action::Right,
        Action::Wait,
    ];

    /// Parse an action word, ignoring ASCII case and surrounding whitespace.
    ///
    /// ```
    /// use baba_sim::core::Action;
    ///
    /// assert_eq!(Action::parse("right"), Action::Right);
    /// assert_eq!(Action::parse(" UP "), Action::Up);
    /// assert_eq!(Action::parse("jump"), Action::Wait);
    /// ```
    #[must_use]
    pub fn parse(word: &str) -> Action {
        let word = word.trim();
        Action::ALL
            .iter()
            .copied()
            .find(|a| a.name().eq_ignore_ascii_case(word))
            .unwrap_or(Action::Wait)
    }

    /// Lower-case action word.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Action::Up => "up",
            Action::Down => "down",
            Action::Left => "left",
            Action::Right => "right",
            Action::Wait => "wait",
        }
    }

    /// Displacement `(dx, dy)`; y grows downward.
    #[must_use]
    pub const fn delta(self) -> (i32, i32) {
        match self {
            Action::Up => (0, -1),
            Action::Down => (0, 1),
            Action::Left => (-1, 0),
            Action::Right => (1, 0),
            Action::Wait => (0, 0),
        }
    }

    /// Whether this action moves anything.
    #[must_use]
    pub const fn is_move(self) -> bool {
        !matches!(self, Action::Wait)
    }
}

impl From<&str> for Action {
    fn from(word: &str) -> Self {
        Action::parse(word)
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
