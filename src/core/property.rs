//! Behavioral tags granted to object kinds by rules.
//!
//! A `Property` carries no payload; what it means is decided by the grid
//! engine. Only YOU, WIN, STOP, PUSH and SINK drive step mechanics; the
//! rest are parsed and tracked so rules mentioning them are still valid.
//!
//! `PropertySet` is a copyable bitset, one bit per tag. Property tables are
//! rebuilt every step, so they stay allocation-free.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::error::SimError;

/// Behavioral tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Property {
    You,
    Win,
    Stop,
    Push,
    Sink,
    Defeat,
    Hot,
    Melt,
    Move,
    Shift,
    Tele,
    Open,
    Shut,
    Weak,
    Float,
    Pull,
    Swap,
    End,
}

impl Property {
    /// Every property, in declaration order.
    pub const ALL: [Property; 18] = [
        Property::You,
        Property::Win,
        Property::Stop,
        Property::Push,
        Property::Sink,
        Property::Defeat,
        Property::Hot,
        Property::Melt,
        Property::Move,
        Property::Shift,
        Property::Tele,
        Property::Open,
        Property::Shut,
        Property::Weak,
        Property::Float,
        Property::Pull,
        Property::Swap,
        Property::End,
    ];

    /// The upper-case word for this property, as it appears in rules.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Property::You => "YOU",
            Property::Win => "WIN",
            Property::Stop => "STOP",
            Property::Push => "PUSH",
            Property::Sink => "SINK",
            Property::Defeat => "DEFEAT",
            Property::Hot => "HOT",
            Property::Melt => "MELT",
            Property::Move => "MOVE",
            Property::Shift => "SHIFT",
            Property::Tele => "TELE",
            Property::Open => "OPEN",
            Property::Shut => "SHUT",
            Property::Weak => "WEAK",
            Property::Float => "FLOAT",
            Property::Pull => "PULL",
            Property::Swap => "SWAP",
            Property::End => "END",
        }
    }

    /// Parse a property word, ignoring ASCII case.
    #[must_use]
    pub fn parse(word: &str) -> Option<Property> {
        Property::ALL
            .iter()
            .copied()
            .find(|p| p.name().eq_ignore_ascii_case(word))
    }

    const fn bit(self) -> u32 {
        1 << (self as u32)
    }
}

impl FromStr for Property {
    type Err = SimError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Property::parse(s).ok_or_else(|| SimError::UnknownProperty(s.to_string()))
    }
}

impl std::fmt::Display for Property {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Set of properties held by one subject.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PropertySet(u32);

impl PropertySet {
    /// The empty set.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Add a property. Returns true if it was not already present.
    pub fn insert(&mut self, property: Property) -> bool {
        let had = self.contains(property);
        self.0 |= property.bit();
        !had
    }

    #[must_use]
    pub const fn contains(self, property: Property) -> bool {
        self.0 & property.bit() != 0
    }

    #[must_use]
    pub const fn union(self, other: PropertySet) -> PropertySet {
        PropertySet(self.0 | other.0)
    }

    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }

    #[must_use]
    pub const fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Iterate members in declaration order.
    pub fn iter(self) -> impl Iterator<Item = Property> {
        Property::ALL.into_iter().filter(move |p| self.contains(*p))
    }
}

impl FromIterator<Property> for PropertySet {
    fn from_iter<I: IntoIterator<Item = Property>>(iter: I) -> Self {
        let mut set = PropertySet::new();
        for property in iter {
            set.insert(property);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(Property::parse("you"), Some(Property::You));
        assert_eq!(Property::parse("Sink"), Some(Property::Sink));
        assert_eq!(Property::parse("END"), Some(Property::End));
        assert_eq!(Property::parse("BABA"), None);
        assert_eq!(Property::parse(""), None);
    }

    #[test]
    fn test_from_str_error() {
        assert_eq!("win".parse::<Property>().unwrap(), Property::Win);
        assert!(matches!(
            "rock".parse::<Property>(),
            Err(SimError::UnknownProperty(w)) if w == "rock"
        ));
    }

    #[test]
    fn test_names_round_trip() {
        for property in Property::ALL {
            assert_eq!(Property::parse(property.name()), Some(property));
            assert_eq!(property.to_string(), property.name());
        }
    }

    #[test]
    fn test_set_membership() {
        let mut set = PropertySet::new();
        assert!(set.is_empty());

        assert!(set.insert(Property::Stop));
        assert!(set.insert(Property::Push));
        assert!(!set.insert(Property::Stop));

        assert!(set.contains(Property::Stop));
        assert!(set.contains(Property::Push));
        assert!(!set.contains(Property::You));
        assert_eq!(set.len(), 2);
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![Property::Stop, Property::Push]);
    }

    #[test]
    fn test_set_union() {
        let a: PropertySet = [Property::You, Property::Win].into_iter().collect();
        let b: PropertySet = [Property::Win, Property::End].into_iter().collect();
        let both = a.union(b);

        assert_eq!(both.len(), 3);
        assert!(both.contains(Property::End));
    }
}
