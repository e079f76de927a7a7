//! A single sentence read off the grid.

use serde::{Deserialize, Serialize};

use crate::core::Property;

/// The only verb sentences are built with.
pub const VERB_IS: &str = "IS";

/// `subject IS complement`, all parts upper-case.
///
/// The complement is either a property word (`BABA IS YOU`) or another
/// object kind (`ROCK IS BABA`). Equality is structural.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Rule {
    pub subject: String,
    pub verb: String,
    pub complement: String,
}

impl Rule {
    /// Create a rule, upper-casing every part.
    #[must_use]
    pub fn new(subject: &str, verb: &str, complement: &str) -> Self {
        Self {
            subject: subject.to_ascii_uppercase(),
            verb: verb.to_ascii_uppercase(),
            complement: complement.to_ascii_uppercase(),
        }
    }

    /// `subject IS property`.
    #[must_use]
    pub fn property(subject: &str, property: Property) -> Self {
        Self::new(subject, VERB_IS, property.name())
    }

    /// `subject IS target`.
    #[must_use]
    pub fn transformation(subject: &str, target: &str) -> Self {
        Self::new(subject, VERB_IS, target)
    }

    /// The granted property, if the complement is a property word.
    #[must_use]
    pub fn complement_property(&self) -> Option<Property> {
        Property::parse(&self.complement)
    }

    #[must_use]
    pub fn is_property_rule(&self) -> bool {
        self.complement_property().is_some()
    }
}

impl std::fmt::Display for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.subject, self.verb, self.complement)
    }
}
