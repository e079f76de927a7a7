//! Built-in puzzle used when no level is supplied.

use std::sync::Arc;

use crate::grid::Grid;
use crate::objects::Registry;

pub const FALLBACK_SIZE: usize = 12;

/// `(word, is_text, x, y)` placements.
const LAYOUT: &[(&str, bool, i32, i32)] = &[
    ("baba", false, 1, 1),
    ("baba", true, 1, 3),
    ("is", true, 2, 3),
    ("you", true, 3, 3),
    ("flag", false, 8, 8),
    ("flag", true, 7, 1),
    ("is", true, 8, 1),
    ("win", true, 9, 1),
];

/// 12x12 board with `BABA IS YOU`, `FLAG IS WIN`, one baba and one flag.
///
/// Kinds missing from `registry` are left out.
#[must_use]
pub fn fallback_level(registry: Arc<Registry>) -> Grid {
    let mut grid = Grid::new(FALLBACK_SIZE, FALLBACK_SIZE, registry);
    for &(word, is_text, x, y) in LAYOUT {
        grid.spawn(word, is_text, x, y);
    }
    grid.update_rules();
    grid
}
