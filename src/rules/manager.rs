//! Rule tables derived from the active rule list.
//!
//! `RuleManager` turns the flat list of rules into two lookups:
//!
//! - **properties**: subject -> `PropertySet`, the union over every property
//!   rule for that subject. Contradictions (STOP and PUSH together) are kept;
//!   the grid decides precedence.
//! - **transformations**: subject -> target, one per subject. Later rules
//!   overwrite earlier ones.
//!
//! Subject names are interned to `SubjectId`s in first-seen order, so every
//! table is an index or a small integer map. Both tables and the interner are
//! rebuilt from scratch on every `update_rules`; the same rule list always
//! produces the same manager.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use tracing::{debug, warn};

use crate::core::{Property, PropertySet};

use super::rule::Rule;

/// Interned, upper-cased subject name.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SubjectId(pub u16);

impl SubjectId {
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// Active rules and the tables derived from them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RuleManager {
    rules: Vec<Rule>,
    names: Vec<String>,
    ids: FxHashMap<String, SubjectId>,
    properties: Vec<PropertySet>,
    transformations: FxHashMap<SubjectId, SubjectId>,
}

impl RuleManager {
    /// Create a manager with no active rules.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the active rules and recompute every table.
    pub fn update_rules(&mut self, rules: Vec<Rule>) {
        self.names.clear();
        self.ids.clear();
        self.properties.clear();
        self.transformations.clear();

        for rule in &rules {
            let Some(subject) = self.intern(&rule.subject) else {
                warn!(rule = %rule, "Subject table full, rule ignored");
                continue;
            };
            match rule.complement_property() {
                Some(property) => {
                    self.properties[subject.index()].insert(property);
                }
                None => {
                    let Some(target) = self.intern(&rule.complement) else {
                        warn!(rule = %rule, "Subject table full, rule ignored");
                        continue;
                    };
                    self.transformations.insert(subject, target);
                }
            }
        }

        self.rules = rules;
        debug!(
            rules = self.rules.len(),
            subjects = self.names.len(),
            transformations = self.transformations.len(),
            "Recomputed rule tables"
        );
    }

    /// `None` once every `u16` id is taken.
    fn intern(&mut self, name: &str) -> Option<SubjectId> {
        let key = name.to_ascii_uppercase();
        if let Some(id) = self.ids.get(&key) {
            return Some(*id);
        }
        let id = SubjectId(u16::try_from(self.names.len()).ok()?);
        self.names.push(key.clone());
        self.ids.insert(key, id);
        self.properties.push(PropertySet::new());
        Some(id)
    }

    /// Resolve a name, ignoring ASCII case.
    ///
    /// Names up to 32 bytes are upper-cased on the stack.
    #[must_use]
    pub fn subject_id(&self, name: &str) -> Option<SubjectId> {
        let mut upper: SmallVec<[u8; 32]> = SmallVec::with_capacity(name.len());
        upper.extend(name.bytes().map(|b| b.to_ascii_uppercase()));
        let key = std::str::from_utf8(&upper).ok()?;
        self.ids.get(key).copied()
    }

    /// Name of an interned subject.
    #[must_use]
    pub fn subject_name(&self, id: SubjectId) -> Option<&str> {
        self.names.get(id.index()).map(String::as_str)
    }

    /// Every property the named subject holds.
    #[must_use]
    pub fn get_properties(&self, name: &str) -> PropertySet {
        self.subject_id(name)
            .and_then(|id| self.properties.get(id.index()).copied())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn has_property(&self, name: &str, property: Property) -> bool {
        self.get_properties(name).contains(property)
    }

    /// Upper-cased transformation target for the named subject.
    #[must_use]
    pub fn get_transformation(&self, name: &str) -> Option<&str> {
        let id = self.subject_id(name)?;
        let target = self.transformations.get(&id)?;
        self.subject_name(*target)
    }

    /// Subjects holding `property`, in first-seen order.
    pub fn objects_with(&self, property: Property) -> impl Iterator<Item = &str> + '_ {
        self.names
            .iter()
            .zip(&self.properties)
            .filter(move |(_, set)| set.contains(property))
            .map(|(name, _)| name.as_str())
    }

    #[must_use]
    pub fn get_you_objects(&self) -> Vec<&str> {
        self.objects_with(Property::You).collect()
    }

    #[must_use]
    pub fn get_win_objects(&self) -> Vec<&str> {
        self.objects_with(Property::Win).collect()
    }

    #[must_use]
    pub fn get_push_objects(&self) -> Vec<&str> {
        self.objects_with(Property::Push).collect()
    }

    #[must_use]
    pub fn get_stop_objects(&self) -> Vec<&str> {
        self.objects_with(Property::Stop).collect()
    }

    #[must_use]
    pub fn get_sink_objects(&self) -> Vec<&str> {
        self.objects_with(Property::Sink).collect()
    }

    /// Active rules in extraction order, duplicates included.
    #[must_use]
    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    #[must_use]
    pub fn has_transformations(&self) -> bool {
        !self.transformations.is_empty()
    }

    /// Human-readable summary, one rule per line.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.rules.is_empty() {
            return "No active rules".to_string();
        }
        let mut out = String::from("Active rules:");
        for rule in &self.rules {
            out.push_str("\n  ");
            out.push_str(&rule.to_string());
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manager(rules: &[Rule]) -> RuleManager {
        let mut manager = RuleManager::new();
        manager.update_rules(rules.to_vec());
        manager
    }

    #[test]
    fn test_subject_overflow_drops_rules() {
        let limit = usize::from(u16::MAX) + 1;
        let mut rules: Vec<Rule> = (0..limit)
            .map(|i| Rule::property(&format!("kind{i}"), Property::Push))
            .collect();
        rules.push(Rule::property("late", Property::You));
        rules.push(Rule::transformation("kind0", "late"));

        let manager = manager(&rules);

        assert_eq!(manager.rules().len(), limit + 2);
        assert!(manager.has_property("KIND0", Property::Push));
        assert!(manager.has_property("kind65535", Property::Push));
        assert!(!manager.has_property("late", Property::You));
        assert!(manager.get_transformation("kind0").is_none());
        assert_eq!(manager.subject_id("kind65535"), Some(SubjectId(u16::MAX)));
    }

    #[test]
    fn test_property_lookup_ignores_case() {
        let manager = manager(&[Rule::property("baba", Property::You)]);

        assert!(manager.has_property("baba", Property::You));
        assert!(manager.has_property("BaBa", Property::You));
        assert!(!manager.has_property("baba", Property::Win));
        assert!(!manager.has_property("keke", Property::You));
    }

    #[test]
    fn test_properties_union() {
        let manager = manager(&[
            Rule::property("wall", Property::Stop),
            Rule::property("wall", Property::Push),
            Rule::property("rock", Property::Push),
        ]);

        let wall = manager.get_properties("wall");
        assert!(wall.contains(Property::Stop));
        assert!(wall.contains(Property::Push));
        assert_eq!(wall.len(), 2);

        assert_eq!(manager.get_push_objects(), vec!["WALL", "ROCK"]);
        assert_eq!(manager.get_stop_objects(), vec!["WALL"]);
        assert!(manager.get_sink_objects().is_empty());
    }

    #[test]
    fn test_last_transformation_wins() {
        let manager = manager(&[
            Rule::transformation("rock", "baba"),
            Rule::transformation("rock", "flag"),
        ]);

        assert_eq!(manager.get_transformation("rock"), Some("FLAG"));
        assert_eq!(manager.get_transformation("flag"), None);
        assert!(manager.has_transformations());
    }

    #[test]
    fn test_transformation_target_is_not_a_you_subject() {
        let manager = manager(&[Rule::transformation("rock", "baba")]);
        assert!(manager.get_you_objects().is_empty());
        assert!(manager.get_properties("baba").is_empty());
    }

    #[test]
    fn test_first_seen_order() {
        let manager = manager(&[
            Rule::property("keke", Property::You),
            Rule::property("baba", Property::You),
            Rule::property("keke", Property::Win),
        ]);

        assert_eq!(manager.get_you_objects(), vec!["KEKE", "BABA"]);
        assert_eq!(manager.get_win_objects(), vec!["KEKE"]);
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let rules = vec![
            Rule::property("baba", Property::You),
            Rule::transformation("rock", "baba"),
            Rule::property("baba", Property::You),
        ];

        let mut a = RuleManager::new();
        a.update_rules(rules.clone());
        let first = a.clone();
        a.update_rules(rules);

        assert_eq!(a, first);
        assert_eq!(a.rules().len(), 3);
    }

    #[test]
    fn test_update_replaces_previous_tables() {
        let mut manager = manager(&[Rule::property("baba", Property::You)]);
        manager.update_rules(vec![Rule::property("flag", Property::Win)]);

        assert!(!manager.has_property("baba", Property::You));
        assert!(manager.has_property("flag", Property::Win));
        assert!(manager.subject_id("baba").is_none());
    }

    #[test]
    fn test_long_names() {
        let name = "a".repeat(64);
        let manager = manager(&[Rule::property(&name, Property::Sink)]);
        assert!(manager.has_property(&name, Property::Sink));
    }

    #[test]
    fn test_describe() {
        assert_eq!(RuleManager::new().describe(), "No active rules");

        let manager = manager(&[
            Rule::property("baba", Property::You),
            Rule::transformation("rock", "flag"),
        ]);
        assert_eq!(manager.describe(), "Active rules:\n  BABA IS YOU\n  ROCK IS FLAG");
    }
}
