//! Built-in object catalog.
//!
//! The standard set of kinds: 44 objects, a noun block for each of them,
//! one block per property word, the verbs and the reserved words.
//! Registration order is fixed, so type ids are stable across runs.

use super::registry::Registry;
use super::template::{ObjectTemplate, TextPayload, TypeId};
use crate::core::Property;

/// `(name, glyph, color)` for every built-in object kind.
const OBJECTS: &[(&str, char, [u8; 3])] = &[
    ("baba", 'B', [255, 255, 255]),
    ("keke", 'K', [255, 100, 100]),
    ("anni", 'A', [200, 100, 200]),
    ("me", 'M', [100, 100, 255]),
    ("wall", 'W', [139, 69, 19]),
    ("rock", 'O', [169, 169, 169]),
    ("flag", 'F', [255, 215, 0]),
    ("tile", '=', [200, 200, 150]),
    ("grass", ',', [50, 200, 50]),
    ("brick", '#', [165, 42, 42]),
    ("hedge", 'H', [0, 100, 0]),
    ("water", '~', [30, 144, 255]),
    ("lava", 'L', [255, 69, 0]),
    ("bog", '&', [107, 142, 35]),
    ("door", 'D', [139, 90, 43]),
    ("key", 'k', [255, 223, 0]),
    ("skull", 'S', [245, 245, 245]),
    ("fungus", 'U', [139, 0, 139]),
    ("flower", '*', [255, 192, 203]),
    ("bolt", '!', [255, 255, 0]),
    ("pillar", 'I', [160, 160, 160]),
    ("box", 'X', [184, 134, 11]),
    ("belt", '>', [70, 70, 70]),
    ("bug", 'b', [0, 255, 0]),
    ("foliage", 'f', [34, 139, 34]),
    ("algae", 'a', [0, 128, 128]),
    ("jelly", 'J', [138, 43, 226]),
    ("bat", 'V', [75, 0, 130]),
    ("bubble", 'o', [173, 216, 230]),
    ("bird", 'v', [135, 206, 235]),
    ("hand", 'h', [255, 228, 196]),
    ("tree", 'T', [0, 128, 0]),
    ("fruit", 'Q', [255, 0, 0]),
    ("rose", '@', [255, 0, 127]),
    ("love", 'Y', [255, 105, 180]),
    ("moon", 'C', [245, 245, 220]),
    ("star", '+', [255, 255, 0]),
    ("dust", '.', [210, 180, 140]),
    ("ice", 'i', [175, 238, 238]),
    ("leaf", 'l', [154, 205, 50]),
    ("husk", 'u', [160, 82, 45]),
    ("robot", 'R', [192, 192, 192]),
    ("cog", 'G', [128, 128, 128]),
    ("cup", 'c', [255, 248, 220]),
];

/// Objects that block and resist displacement by default.
const SOLID: &[&str] = &["wall"];

/// Property words that exist as text blocks, with their block colors.
const PROPERTY_TEXT: &[(Property, [u8; 3])] = &[
    (Property::You, [255, 255, 255]),
    (Property::Win, [255, 215, 0]),
    (Property::Stop, [200, 100, 100]),
    (Property::Push, [200, 150, 100]),
    (Property::Sink, [100, 150, 200]),
    (Property::Defeat, [200, 50, 50]),
    (Property::Hot, [255, 100, 0]),
    (Property::Melt, [100, 200, 255]),
    (Property::Move, [150, 255, 150]),
    (Property::Tele, [200, 100, 255]),
    (Property::Open, [255, 255, 100]),
    (Property::Shut, [100, 100, 100]),
    (Property::Weak, [150, 150, 150]),
    (Property::Float, [150, 200, 255]),
    (Property::Pull, [200, 150, 200]),
    (Property::Shift, [255, 200, 100]),
];

const VERBS: &[(&str, [u8; 3])] = &[
    ("is", [255, 255, 255]),
    ("and", [255, 255, 255]),
    ("not", [255, 100, 100]),
];

const SPECIALS: &[(&str, [u8; 3])] = &[
    ("all", [255, 255, 0]),
    ("text", [200, 200, 255]),
    ("level", [255, 200, 255]),
];

/// Noun blocks are drawn in a washed-out version of their object's color.
fn text_tint([r, g, b]: [u8; 3]) -> [u8; 3] {
    let lift = |c: u8| ((c as u16 + 255) / 2) as u8;
    [lift(r), lift(g), lift(b)]
}

fn text_glyph(word: &str) -> char {
    word.chars().next().map_or('?', |c| c.to_ascii_lowercase())
}

/// Register the full built-in catalog into `registry`.
pub fn register_defaults(registry: &mut Registry) {
    for &(name, glyph, color) in OBJECTS {
        let mut template = ObjectTemplate::object(TypeId::new(0), name)
            .with_glyph(glyph)
            .with_color(color);
        if SOLID.contains(&name) {
            template = template.solid();
        }
        registry.register_object(template);
    }

    for &(name, _, color) in OBJECTS {
        let template =
            ObjectTemplate::text(TypeId::new(0), name, TextPayload::Noun(name.to_string()))
                .with_glyph(text_glyph(name))
                .with_color(text_tint(color));
        registry.register_text(template);
    }

    for &(property, color) in PROPERTY_TEXT {
        let word = property.name();
        let template = ObjectTemplate::text(TypeId::new(0), word, TextPayload::Property(property))
            .with_glyph(text_glyph(word))
            .with_color(color);
        registry.register_text(template);
    }

    for &(verb, color) in VERBS {
        let template =
            ObjectTemplate::text(TypeId::new(0), verb, TextPayload::Verb(verb.to_string()))
                .with_glyph(text_glyph(verb))
                .with_color(color);
        registry.register_text(template);
    }

    for &(special, color) in SPECIALS {
        let template =
            ObjectTemplate::text(TypeId::new(0), special, TextPayload::Special(special.to_string()))
                .with_glyph(text_glyph(special))
                .with_color(color);
        registry.register_text(template);
    }
}
