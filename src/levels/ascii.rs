//! Plain-text level format.
//!
//! One character per square, one line per row:
//!
//! ```text
//! b i y . .
//! ```
//!
//! Upper-case letters are objects, lower-case letters their noun blocks, and
//! a handful of lower-case letters spell verbs and properties. `.` and space
//! are empty squares. Short rows are padded with empty squares.

use std::sync::Arc;

use crate::core::{Result, SimError};
use crate::grid::Grid;
use crate::objects::{Instance, Registry};

/// `(glyph, word, is_text)` for every character the format knows.
const GLYPHS: &[(char, &str, bool)] = &[
    ('B', "baba", false),
    ('W', "wall", false),
    ('R', "rock", false),
    ('F', "flag", false),
    ('A', "water", false),
    ('b', "baba", true),
    ('w', "wall", true),
    ('r', "rock", true),
    ('f', "flag", true),
    ('a', "water", true),
    ('i', "is", true),
    ('y', "you", true),
    ('n', "win", true),
    ('s', "stop", true),
    ('p', "push", true),
    ('k', "sink", true),
];

const EMPTY: char = '.';

/// Glyph written for squares whose top instance has no glyph.
const UNKNOWN: char = '?';

fn lookup(ch: char) -> Option<(&'static str, bool)> {
    GLYPHS
        .iter()
        .find(|(glyph, _, _)| *glyph == ch)
        .map(|&(_, word, is_text)| (word, is_text))
}

fn glyph_for(instance: &Instance) -> char {
    let word = if instance.is_text() {
        instance.name.strip_suffix("_text").unwrap_or(&instance.name)
    } else {
        &instance.name
    };
    GLYPHS
        .iter()
        .find(|(_, w, is_text)| *is_text == instance.is_text() && w.eq_ignore_ascii_case(word))
        .map_or(UNKNOWN, |(glyph, _, _)| *glyph)
}

/// Build a grid from a text level and read its rules.
///
/// Trailing blank lines are ignored. Fails on characters outside the
/// format and on levels with no squares.
///
/// ## Example
///
/// ```
/// use std::sync::Arc;
/// use baba_sim::core::Property;
/// use baba_sim::levels::parse_level;
/// use baba_sim::objects::Registry;
///
/// let grid = parse_level("biy\n...\nB.F", Arc::new(Registry::with_defaults())).unwrap();
/// assert_eq!((grid.width(), grid.height()), (3, 3));
/// assert!(grid.rule_manager().has_property("baba", Property::You));
/// ```
pub fn parse_level(source: &str, registry: Arc<Registry>) -> Result<Grid> {
    let mut rows: Vec<&str> = source.lines().collect();
    while rows.last().is_some_and(|row| row.trim().is_empty()) {
        rows.pop();
    }

    let width = rows.iter().map(|row| row.chars().count()).max().unwrap_or(0);
    if rows.is_empty() || width == 0 {
        return Err(SimError::EmptyLevel);
    }

    let mut grid = Grid::new(width, rows.len(), registry);
    for (y, row) in rows.iter().enumerate() {
        for (x, ch) in row.chars().enumerate() {
            if ch == EMPTY || ch == ' ' {
                continue;
            }
            let (word, is_text) = lookup(ch).ok_or(SimError::UnknownGlyph { ch, x, y })?;
            // Every word in the table is part of the default catalog; custom
            // registries without it just leave the square empty.
            grid.spawn(word, is_text, x as i32, y as i32);
        }
    }

    grid.update_rules();
    Ok(grid)
}

/// Write the top instance of every square back out in the text format.
#[must_use]
pub fn export_level(grid: &Grid) -> String {
    let mut out = String::with_capacity((grid.width() + 1) * grid.height());
    for y in 0..grid.height() as i32 {
        if y > 0 {
            out.push('\n');
        }
        for x in 0..grid.width() as i32 {
            out.push(grid.top_instance(x, y).map_or(EMPTY, glyph_for));
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{Action, Property};
    use crate::grid::ObjectFilter;

    fn registry() -> Arc<Registry> {
        Arc::new(Registry::with_defaults())
    }

    #[test]
    fn test_glyphs_are_unique_and_registered() {
        let registry = Registry::with_defaults();
        for (i, (glyph, word, is_text)) in GLYPHS.iter().enumerate() {
            assert!(GLYPHS[i + 1..].iter().all(|(g, _, _)| g != glyph));
            assert!(registry.create_instance(word, *is_text).is_some(), "{word}");
        }
    }

    #[test]
    fn test_parse_places_instances() {
        let grid = parse_level("B.R\n.fW", registry()).unwrap();

        assert_eq!(grid.object_count(), 4);
        assert_eq!(grid.get_objects_at(0, 0)[0].name, "baba");
        assert_eq!(grid.get_objects_at(2, 0)[0].name, "rock");
        assert_eq!(grid.get_objects_at(1, 1)[0].name, "flag_text");
        assert_eq!(grid.get_objects_at(2, 1)[0].name, "wall");
    }

    #[test]
    fn test_parse_reads_rules() {
        let grid = parse_level("biy\nwis\nrip\nfin\naik", registry()).unwrap();
        let rules = grid.rule_manager();

        assert!(rules.has_property("baba", Property::You));
        assert!(rules.has_property("wall", Property::Stop));
        assert!(rules.has_property("rock", Property::Push));
        assert!(rules.has_property("flag", Property::Win));
        assert!(rules.has_property("water", Property::Sink));
    }

    #[test]
    fn test_ragged_rows_are_padded() {
        let grid = parse_level("B\n...R\n\n", registry()).unwrap();
        assert_eq!((grid.width(), grid.height()), (4, 2));
        assert!(grid.get_objects_at(3, 0).is_empty());
    }

    #[test]
    fn test_spaces_are_empty() {
        let grid = parse_level("B  F", registry()).unwrap();
        assert_eq!(grid.object_count(), 2);
        assert_eq!(grid.find_objects(ObjectFilter::Name("flag"))[0].0.x, 3);
    }

    #[test]
    fn test_unknown_glyph() {
        let err = parse_level("B..\n.%.", registry()).unwrap_err();
        assert!(matches!(err, SimError::UnknownGlyph { ch: '%', x: 1, y: 1 }));
    }

    #[test]
    fn test_empty_level() {
        assert!(matches!(parse_level("", registry()), Err(SimError::EmptyLevel)));
        assert!(matches!(parse_level("\n  \n", registry()), Err(SimError::EmptyLevel)));
    }

    #[test]
    fn test_export_round_trip() {
        let source = "biy..\n.B.R.\nfin.F";
        let grid = parse_level(source, registry()).unwrap();
        assert_eq!(export_level(&grid), source);
    }

    #[test]
    fn test_export_after_play() {
        let mut grid = parse_level("biy\nB..", registry()).unwrap();
        grid.step(Action::Right);
        assert_eq!(export_level(&grid), "biy\n.B.");
    }

    #[test]
    fn test_export_unknown_kind() {
        let mut grid = parse_level("...", registry()).unwrap();
        grid.spawn("keke", false, 1, 0).unwrap();
        assert_eq!(export_level(&grid), ".?.");
    }
}
