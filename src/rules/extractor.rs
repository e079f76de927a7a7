//! Sentence extraction.
//!
//! Scans a board for three text blocks in a row, left-to-right or
//! top-to-bottom, spelling `NOUN IS (PROPERTY | NOUN)`. Horizontal windows
//! are scanned first (row-major), then vertical ones (row-major). Windows
//! overlap freely and duplicate sentences are kept: two separate
//! `BABA IS YOU` lines yield the rule twice.
//!
//! When several text blocks share a cell, the one with the lowest `TypeId`
//! is read. That makes extraction a pure function of the board.

use crate::objects::Instance;

use super::rule::{Rule, VERB_IS};

/// Read access to a rectangular board of stacked instances.
///
/// Implemented by `Grid`; anything that can hand out cell contents by
/// coordinate can be scanned for rules.
pub trait CellSource {
    fn width(&self) -> usize;

    fn height(&self) -> usize;

    /// Instances at `(x, y)`. Callers stay within `width() x height()`.
    fn cell_instances(&self, x: usize, y: usize) -> &[Instance];
}

/// Extract every rule on the board, in scan order.
pub fn extract_rules<S: CellSource + ?Sized>(board: &S) -> Vec<Rule> {
    let (width, height) = (board.width(), board.height());
    let mut rules = Vec::new();

    for y in 0..height {
        for x in 0..width.saturating_sub(2) {
            if let Some(rule) = rule_at(board, x, y, (1, 0)) {
                rules.push(rule);
            }
        }
    }

    for y in 0..height.saturating_sub(2) {
        for x in 0..width {
            if let Some(rule) = rule_at(board, x, y, (0, 1)) {
                rules.push(rule);
            }
        }
    }

    rules
}

fn rule_at<S: CellSource + ?Sized>(
    board: &S,
    x: usize,
    y: usize,
    (dx, dy): (usize, usize),
) -> Option<Rule> {
    let first = text_at(board, x, y)?;
    let second = text_at(board, x + dx, y + dy)?;
    let third = text_at(board, x + 2 * dx, y + 2 * dy)?;

    let subject = first.noun()?;
    if !second.verb()?.eq_ignore_ascii_case(VERB_IS) {
        return None;
    }

    if let Some(property) = third.property() {
        Some(Rule::property(subject, property))
    } else {
        third.noun().map(|target| Rule::transformation(subject, target))
    }
}

/// The text block read at a cell: the lowest type id among stacked text.
fn text_at<S: CellSource + ?Sized>(board: &S, x: usize, y: usize) -> Option<&Instance> {
    board
        .cell_instances(x, y)
        .iter()
        .filter(|instance| instance.is_text())
        .min_by_key(|instance| instance.type_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Property;
    use crate::objects::Registry;

    /// Plain board for exercising the scanner without a grid.
    struct Board {
        width: usize,
        height: usize,
        cells: Vec<Vec<Instance>>,
    }

    impl Board {
        fn new(width: usize, height: usize) -> Self {
            Self {
                width,
                height,
                cells: vec![Vec::new(); width * height],
            }
        }

        fn put(&mut self, registry: &Registry, name: &str, is_text: bool, x: usize, y: usize) {
            let instance = registry.create_instance(name, is_text).unwrap();
            self.cells[y * self.width + x].push(instance);
        }

        fn sentence(
            &mut self,
            registry: &Registry,
            words: [&str; 3],
            x: usize,
            y: usize,
            vertical: bool,
        ) {
            for (i, word) in words.iter().enumerate() {
                let (cx, cy) = if vertical { (x, y + i) } else { (x + i, y) };
                self.put(registry, word, true, cx, cy);
            }
        }
    }

    impl CellSource for Board {
        fn width(&self) -> usize {
            self.width
        }

        fn height(&self) -> usize {
            self.height
        }

        fn cell_instances(&self, x: usize, y: usize) -> &[Instance] {
            &self.cells[y * self.width + x]
        }
    }

    #[test]
    fn test_horizontal_property_rule() {
        let registry = Registry::with_defaults();
        let mut board = Board::new(5, 5);
        board.sentence(&registry, ["baba", "is", "you"], 1, 1, false);

        assert_eq!(extract_rules(&board), vec![Rule::property("baba", Property::You)]);
    }

    #[test]
    fn test_vertical_rule() {
        let registry = Registry::with_defaults();
        let mut board = Board::new(5, 5);
        board.sentence(&registry, ["flag", "is", "win"], 2, 0, true);

        assert_eq!(extract_rules(&board), vec![Rule::property("flag", Property::Win)]);
    }

    #[test]
    fn test_transformation_rule_is_upper_cased() {
        let registry = Registry::with_defaults();
        let mut board = Board::new(3, 1);
        board.sentence(&registry, ["rock", "is", "baba"], 0, 0, false);

        let rules = extract_rules(&board);
        assert_eq!(rules.len(), 1);
        assert_eq!(rules[0].subject, "ROCK");
        assert_eq!(rules[0].complement, "BABA");
    }

    #[test]
    fn test_wrong_order_is_not_a_rule() {
        let registry = Registry::with_defaults();
        let mut board = Board::new(3, 3);
        board.sentence(&registry, ["is", "baba", "you"], 0, 0, false);
        board.sentence(&registry, ["you", "is", "baba"], 0, 1, false);
        board.sentence(&registry, ["baba", "and", "you"], 0, 2, false);

        assert!(extract_rules(&board).is_empty());
    }

    #[test]
    fn test_gap_and_diagonal_are_not_rules() {
        let registry = Registry::with_defaults();
        let mut board = Board::new(5, 5);
        board.put(&registry, "baba", true, 0, 0);
        board.put(&registry, "is", true, 1, 0);
        board.put(&registry, "you", true, 3, 0);

        board.put(&registry, "wall", true, 0, 2);
        board.put(&registry, "is", true, 1, 3);
        board.put(&registry, "stop", true, 2, 4);

        assert!(extract_rules(&board).is_empty());
    }

    #[test]
    fn test_object_in_window_breaks_rule() {
        let registry = Registry::with_defaults();
        let mut board = Board::new(3, 1);
        board.put(&registry, "baba", true, 0, 0);
        board.put(&registry, "rock", false, 1, 0);
        board.put(&registry, "you", true, 2, 0);

        assert!(extract_rules(&board).is_empty());
    }

    #[test]
    fn test_shared_is_reads_both_ways() {
        let registry = Registry::with_defaults();
        let mut board = Board::new(3, 3);
        board.put(&registry, "baba", true, 0, 1);
        board.put(&registry, "is", true, 1, 1);
        board.put(&registry, "you", true, 2, 1);
        board.put(&registry, "rock", true, 1, 0);
        board.put(&registry, "push", true, 1, 2);

        let rules = extract_rules(&board);
        assert_eq!(
            rules,
            vec![
                Rule::property("baba", Property::You),
                Rule::property("rock", Property::Push),
            ]
        );
    }

    #[test]
    fn test_duplicates_are_kept() {
        let registry = Registry::with_defaults();
        let mut board = Board::new(3, 2);
        board.sentence(&registry, ["baba", "is", "you"], 0, 0, false);
        board.sentence(&registry, ["baba", "is", "you"], 0, 1, false);

        let rules = extract_rules(&board);
        assert_eq!(rules.len(), 2);
        assert_eq!(rules[0], rules[1]);
    }

    #[test]
    fn test_stacked_text_uses_lowest_type_id() {
        let registry = Registry::with_defaults();
        let mut board = Board::new(3, 1);
        // Nouns are registered before property words, so ROCK wins the cell.
        board.put(&registry, "you", true, 0, 0);
        board.put(&registry, "rock", true, 0, 0);
        board.put(&registry, "is", true, 1, 0);
        board.put(&registry, "push", true, 2, 0);

        assert_eq!(extract_rules(&board), vec![Rule::property("rock", Property::Push)]);

        // Stacking order does not matter.
        board.cells[0].reverse();
        assert_eq!(extract_rules(&board), vec![Rule::property("rock", Property::Push)]);
    }

    #[test]
    fn test_small_boards() {
        let board = Board::new(2, 2);
        assert!(extract_rules(&board).is_empty());

        let board = Board::new(0, 0);
        assert!(extract_rules(&board).is_empty());
    }
}
