//! Object templates - immutable definitions of object kinds.
//!
//! `ObjectTemplate` holds what every instance of a kind shares: its name,
//! base color, display glyph and default traversal flags. For text blocks
//! it also holds the word the block spells.
//!
//! Instance-specific data (entity id, position) lives on `Instance` and in
//! the grid.

use serde::{Deserialize, Serialize};

use crate::core::Property;

/// Identifier of a template inside a `Registry`.
///
/// Dense arena index; also the stable tiebreak for stacked instances.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TypeId(pub u16);

impl TypeId {
    /// Create a new type ID.
    #[must_use]
    pub const fn new(id: u16) -> Self {
        Self(id)
    }

    /// Get the raw ID value.
    #[must_use]
    pub const fn raw(self) -> u16 {
        self.0
    }

    /// Index into the registry arena.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for TypeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Type({})", self.0)
    }
}

/// The word spelled by a text block.
///
/// A text block is exactly one of these; which one decides the slot it can
/// fill in a sentence.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextPayload {
    /// An object kind, e.g. `baba`. Valid as subject or as transformation target.
    Noun(String),
    /// A connective, e.g. `is`.
    Verb(String),
    /// A property word, e.g. `YOU`.
    Property(Property),
    /// Reserved words (`all`, `text`, `level`) that never form rules here.
    Special(String),
}

impl TextPayload {
    /// The noun, if this is a noun block.
    #[must_use]
    pub fn as_noun(&self) -> Option<&str> {
        match self {
            TextPayload::Noun(noun) => Some(noun),
            _ => None,
        }
    }

    /// The verb, if this is a verb block.
    #[must_use]
    pub fn as_verb(&self) -> Option<&str> {
        match self {
            TextPayload::Verb(verb) => Some(verb),
            _ => None,
        }
    }

    /// The property, if this is a property block.
    #[must_use]
    pub fn as_property(&self) -> Option<Property> {
        match self {
            TextPayload::Property(property) => Some(*property),
            _ => None,
        }
    }

    /// Upper-case word shown on the block.
    #[must_use]
    pub fn word(&self) -> String {
        match self {
            TextPayload::Noun(word) | TextPayload::Verb(word) | TextPayload::Special(word) => {
                word.to_ascii_uppercase()
            }
            TextPayload::Property(property) => property.name().to_string(),
        }
    }
}

/// Immutable definition of an object or text kind.
///
/// ## Example
///
/// ```
/// use baba_sim::objects::{ObjectTemplate, TextPayload, TypeId};
///
/// let wall = ObjectTemplate::object(TypeId::new(5), "wall")
///     .with_color([139, 69, 19])
///     .with_glyph('W')
///     .solid();
///
/// assert!(!wall.is_text());
/// assert!(!wall.traversable);
///
/// let text = ObjectTemplate::text(TypeId::new(6), "wall", TextPayload::Noun("wall".into()));
/// assert_eq!(text.name, "wall_text");
/// assert!(text.is_text());
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ObjectTemplate {
    /// Arena index inside the owning registry.
    pub id: TypeId,

    /// Kind name. Objects use the lower-case word, text blocks `<word>_text`.
    pub name: String,

    /// Base RGB color for renderers.
    pub color: [u8; 3],

    /// Single-character key for text renderers and sprite lookup.
    pub glyph: char,

    /// Default traversal flag (renderer/agent hint; rules decide blocking).
    pub traversable: bool,

    /// Default displaceable flag (renderer/agent hint; rules decide pushing).
    pub displaceable: bool,

    /// Word payload. `Some` exactly for text templates.
    pub text: Option<TextPayload>,
}

impl ObjectTemplate {
    /// Create an object template with neutral defaults.
    #[must_use]
    pub fn object(id: TypeId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into().to_ascii_lowercase(),
            color: [100, 100, 100],
            glyph: '?',
            traversable: true,
            displaceable: true,
            text: None,
        }
    }

    /// Create a text template for `word`, named `<word>_text`.
    #[must_use]
    pub fn text(id: TypeId, word: &str, payload: TextPayload) -> Self {
        Self {
            id,
            name: format!("{}_text", word.to_ascii_lowercase()),
            color: [200, 200, 200],
            glyph: '?',
            traversable: true,
            displaceable: true,
            text: Some(payload),
        }
    }

    /// Set the base color (builder pattern).
    #[must_use]
    pub fn with_color(mut self, color: [u8; 3]) -> Self {
        self.color = color;
        self
    }

    /// Set the glyph.
    #[must_use]
    pub fn with_glyph(mut self, glyph: char) -> Self {
        self.glyph = glyph;
        self
    }

    /// Mark as neither traversable nor displaceable by default.
    #[must_use]
    pub fn solid(mut self) -> Self {
        self.traversable = false;
        self.displaceable = false;
        self
    }

    #[must_use]
    pub fn is_text(&self) -> bool {
        self.text.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_id() {
        let id = TypeId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id.index(), 42);
        assert_eq!(format!("{}", id), "Type(42)");
    }

    #[test]
    fn test_payload_accessors() {
        let noun = TextPayload::Noun("baba".into());
        assert_eq!(noun.as_noun(), Some("baba"));
        assert_eq!(noun.as_verb(), None);
        assert_eq!(noun.word(), "BABA");

        let verb = TextPayload::Verb("is".into());
        assert_eq!(verb.as_verb(), Some("is"));
        assert_eq!(verb.as_property(), None);

        let property = TextPayload::Property(Property::Win);
        assert_eq!(property.as_property(), Some(Property::Win));
        assert_eq!(property.word(), "WIN");

        let special = TextPayload::Special("all".into());
        assert_eq!(special.as_noun(), None);
        assert_eq!(special.word(), "ALL");
    }

    #[test]
    fn test_object_template_builder() {
        let rock = ObjectTemplate::object(TypeId::new(1), "Rock")
            .with_color([169, 169, 169])
            .with_glyph('O');

        assert_eq!(rock.name, "rock");
        assert_eq!(rock.glyph, 'O');
        assert!(rock.traversable);
        assert!(rock.displaceable);
        assert!(!rock.is_text());
    }

    #[test]
    fn test_text_template() {
        let you = ObjectTemplate::text(TypeId::new(2), "YOU", TextPayload::Property(Property::You));
        assert_eq!(you.name, "you_text");
        assert!(you.is_text());
        assert!(you.displaceable);
    }

    #[test]
    fn test_template_serialization() {
        let flag = ObjectTemplate::object(TypeId::new(7), "flag").with_glyph('F');
        let json = serde_json::to_string(&flag).unwrap();
        let deserialized: ObjectTemplate = serde_json::from_str(&json).unwrap();
        assert_eq!(flag, deserialized);
    }
}
