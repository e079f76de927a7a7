//! Object registry - the arena of templates and the only instance factory.
//!
//! The `Registry` owns every `ObjectTemplate` for a game. Templates are
//! immutable once registered; grids share the registry behind an `Arc` and
//! obtain new instances through `create_instance`, which hands back an
//! independent owned value every call.

use rustc_hash::FxHashMap;

use super::catalog;
use super::instance::Instance;
use super::template::{ObjectTemplate, TypeId};

/// Registry of object and text templates.
///
/// ## Example
///
/// ```
/// use baba_sim::objects::{ObjectTemplate, Registry, TypeId};
///
/// let mut registry = Registry::new();
/// let id = registry.register_object(ObjectTemplate::object(TypeId::new(0), "rock"));
///
/// let rock = registry.create_instance("ROCK", false).unwrap();
/// assert_eq!(rock.type_id, id);
/// assert!(registry.create_instance("rock", true).is_none());
/// ```
#[derive(Clone, Debug, Default)]
pub struct Registry {
    templates: Vec<ObjectTemplate>,
    objects: FxHashMap<String, TypeId>,
    texts: FxHashMap<String, TypeId>,
}

impl Registry {
    /// Create a new empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in catalog.
    #[must_use]
    pub fn with_defaults() -> Self {
        let mut registry = Self::new();
        catalog::register_defaults(&mut registry);
        registry
    }

    /// Register an object template under its name.
    ///
    /// The template's `id` is replaced by the next arena slot, which is
    /// returned. Panics if an object with the same name already exists or
    /// the arena already holds `u16::MAX + 1` templates.
    pub fn register_object(&mut self, template: ObjectTemplate) -> TypeId {
        let key = template.name.to_ascii_lowercase();
        if self.objects.contains_key(&key) {
            panic!("Object {:?} already registered", key);
        }
        let id = self.push(template);
        self.objects.insert(key, id);
        id
    }

    /// Register a text template under the word it spells.
    ///
    /// Panics if the template has no payload, the word is already taken or
    /// the arena is full.
    pub fn register_text(&mut self, template: ObjectTemplate) -> TypeId {
        assert!(template.is_text(), "Text template {:?} has no payload", template.name);
        let key = text_key(&template.name);
        if self.texts.contains_key(&key) {
            panic!("Text {:?} already registered", key);
        }
        let id = self.push(template);
        self.texts.insert(key, id);
        id
    }

    fn push(&mut self, mut template: ObjectTemplate) -> TypeId {
        let Ok(raw) = u16::try_from(self.templates.len()) else {
            panic!("Registry is full ({} templates)", self.templates.len());
        };
        let id = TypeId::new(raw);
        template.id = id;
        self.templates.push(template);
        id
    }

    /// Get a template by ID.
    #[must_use]
    pub fn template(&self, id: TypeId) -> Option<&ObjectTemplate> {
        self.templates.get(id.index())
    }

    /// Look up an object template by name, ignoring ASCII case.
    #[must_use]
    pub fn get_object(&self, name: &str) -> Option<&ObjectTemplate> {
        self.objects
            .get(&name.to_ascii_lowercase())
            .and_then(|id| self.template(*id))
    }

    /// Look up a text template by its word (`"baba"`) or full name (`"baba_text"`).
    #[must_use]
    pub fn get_text(&self, word: &str) -> Option<&ObjectTemplate> {
        self.texts
            .get(&text_key(word))
            .and_then(|id| self.template(*id))
    }

    /// Clone a fresh instance of the named kind.
    ///
    /// Returns `None` when no such kind is registered.
    #[must_use]
    pub fn create_instance(&self, name: &str, is_text: bool) -> Option<Instance> {
        let template = if is_text {
            self.get_text(name)
        } else {
            self.get_object(name)
        };
        template.map(Instance::from_template)
    }

    /// Check if an object kind is registered.
    #[must_use]
    pub fn contains_object(&self, name: &str) -> bool {
        self.get_object(name).is_some()
    }

    /// Number of registered templates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    #[must_use]
    pub fn object_count(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn text_count(&self) -> usize {
        self.texts.len()
    }

    /// Iterate over all templates in id order.
    pub fn iter(&self) -> impl Iterator<Item = &ObjectTemplate> {
        self.templates.iter()
    }

    /// Find templates matching a predicate.
    pub fn find<F>(&self, predicate: F) -> impl Iterator<Item = &ObjectTemplate>
    where
        F: Fn(&ObjectTemplate) -> bool,
    {
        self.templates.iter().filter(move |t| predicate(t))
    }
}

fn text_key(name: &str) -> String {
    let lower = name.to_ascii_lowercase();
    match lower.strip_suffix("_text") {
        Some(word) if !word.is_empty() => word.to_string(),
        _ => lower,
    }
}
