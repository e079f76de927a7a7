//! Instances - live occurrences of an object kind on a grid.
//!
//! An `Instance` is cloned out of an `ObjectTemplate` by the registry and
//! then owned by exactly one grid cell. It carries its kind's name (which is
//! what rules match against) and, for text blocks, the word it spells.
//!
//! There is no `is_text` flag to get out of sync with the payload: an
//! instance is text exactly when it carries a `TextPayload`.

use serde::{Deserialize, Serialize};

use super::template::{ObjectTemplate, TextPayload, TypeId};
use crate::core::entity::EntityId;
use crate::core::Property;

/// An object or text block occurrence.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Instance {
    /// Unique per grid. `EntityId::UNPLACED` until a grid adopts it.
    pub id: EntityId,

    /// Template this instance was cloned from.
    pub type_id: TypeId,

    /// Kind name; rule subjects are matched against it case-insensitively.
    pub name: String,

    /// Word payload, present exactly for text blocks.
    pub text: Option<TextPayload>,
}

impl Instance {
    /// Clone a fresh, unplaced instance from a template.
    #[must_use]
    pub fn from_template(template: &ObjectTemplate) -> Self {
        Self {
            id: EntityId::UNPLACED,
            type_id: template.id,
            name: template.name.clone(),
            text: template.text.clone(),
        }
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        self.text.is_some()
    }

    /// Noun payload, for noun text blocks.
    #[must_use]
    pub fn noun(&self) -> Option<&str> {
        self.text.as_ref().and_then(TextPayload::as_noun)
    }

    /// Verb payload, for verb text blocks.
    #[must_use]
    pub fn verb(&self) -> Option<&str> {
        self.text.as_ref().and_then(TextPayload::as_verb)
    }

    /// Property payload, for property text blocks.
    #[must_use]
    pub fn property(&self) -> Option<Property> {
        self.text.as_ref().and_then(TextPayload::as_property)
    }

    /// Check if this instance is of the named kind, ignoring ASCII case.
    #[must_use]
    pub fn is_named(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name)
    }

    /// Ordering key for "which instance shows on top": text above objects,
    /// then the higher type id.
    #[must_use]
    pub fn draw_order(&self) -> (bool, TypeId) {
        (self.is_text(), self.type_id)
    }
}

impl std::fmt::Display for Instance {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}#{}", self.name, self.id.0)
    }
}
