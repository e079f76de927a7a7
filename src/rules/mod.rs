//! Rules read off the grid and the tables built from them.
//!
//! ## Key Types
//!
//! - `Rule`: One `SUBJECT IS COMPLEMENT` sentence
//! - `CellSource`: Anything the extractor can scan
//! - `RuleManager`: Property and transformation lookups over the active rules
//!
//! The grid re-extracts rules after every move phase, so rules can be built
//! and broken by pushing text blocks around.

pub mod extractor;
pub mod manager;
pub mod rule;

pub use extractor::{extract_rules, CellSource};
pub use manager::{RuleManager, SubjectId};
pub use rule::{Rule, VERB_IS};
