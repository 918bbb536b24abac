//! Vocabulary: the four ID ↔ name namespaces of a knowledge graph.
//!
//! A [`Vocabulary`] is a bijection between dense positional IDs and unique,
//! whitespace-free names. The [`VocabularyRegistry`] bundles the namespaces for
//! individuals, classes, relations and literal types. Entries can only be
//! appended, which keeps every namespace's ID set equal to `0..len`.

pub mod id;
pub mod registry;

use std::collections::HashMap;
use std::marker::PhantomData;

use serde::{Deserialize, Serialize};

use crate::error::{VocabError, VocabResult};

pub use id::{ClassId, IndividualId, LiteralId, RelationId, VocabId};
pub use registry::VocabularyRegistry;

/// One of the four vocabulary namespaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Namespace {
    Individual,
    Class,
    Relation,
    Literal,
}

impl Namespace {
    /// All namespaces, in the order their files are read.
    pub const ALL: [Namespace; 4] = [
        Namespace::Individual,
        Namespace::Class,
        Namespace::Relation,
        Namespace::Literal,
    ];
}

impl std::fmt::Display for Namespace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Namespace::Individual => write!(f, "individual"),
            Namespace::Class => write!(f, "class"),
            Namespace::Relation => write!(f, "relation"),
            Namespace::Literal => write!(f, "literal type"),
        }
    }
}

/// Check that `name` can be stored in a vocabulary file.
pub fn validate_name(namespace: Namespace, name: &str) -> VocabResult<()> {
    let reason = if name.is_empty() {
        "name is empty"
    } else if name.chars().any(char::is_whitespace) {
        "name contains whitespace"
    } else {
        return Ok(());
    };
    Err(VocabError::InvalidName {
        namespace,
        name: name.to_string(),
        reason,
    })
}

/// A single namespace: dense IDs `0..len` mapped one-to-one onto names.
#[derive(Clone)]
pub struct Vocabulary<I> {
    /// Forward map: position = ID (source of truth).
    names: Vec<String>,
    /// Reverse map: name → ID.
    ids: HashMap<String, usize>,
    _id: PhantomData<I>,
}

impl<I: VocabId> Vocabulary<I> {
    /// Create an empty namespace.
    pub fn new() -> Self {
        Self {
            names: Vec::new(),
            ids: HashMap::new(),
            _id: PhantomData,
        }
    }

    /// Register a name under the next consecutive ID.
    pub fn register(&mut self, name: impl Into<String>) -> VocabResult<I> {
        let name = name.into();
        validate_name(I::NAMESPACE, &name)?;

        if let Some(&existing) = self.ids.get(&name) {
            return Err(VocabError::DuplicateName {
                namespace: I::NAMESPACE,
                name,
                existing,
            });
        }

        let index = self.names.len();
        let id = I::from_index(index).ok_or(VocabError::Exhausted {
            namespace: I::NAMESPACE,
            max_id: id::MAX_INDEX,
        })?;
        self.ids.insert(name.clone(), index);
        self.names.push(name);
        Ok(id)
    }

    /// Look up the ID registered for `name`.
    pub fn id_of(&self, name: &str) -> VocabResult<I> {
        self.get(name).ok_or_else(|| VocabError::UnknownEntry {
            namespace: I::NAMESPACE,
            entry: format!("{name:?}"),
        })
    }

    /// Look up the name registered for `id`.
    pub fn name_of(&self, id: I) -> VocabResult<&str> {
        self.names
            .get(id.index())
            .map(String::as_str)
            .ok_or_else(|| unknown_id(id))
    }

    /// Look up the ID registered for `name`, if any.
    pub fn get(&self, name: &str) -> Option<I> {
        // Stored indices were produced by `I::from_index`, so they always convert.
        self.ids.get(name).and_then(|&index| I::from_index(index))
    }

    /// Resolve a raw positional index to an ID of this namespace.
    pub fn id_at(&self, index: usize) -> VocabResult<I> {
        if index < self.names.len() {
            if let Some(id) = I::from_index(index) {
                return Ok(id);
            }
        }
        Err(VocabError::UnknownEntry {
            namespace: I::NAMESPACE,
            entry: format!("#{index}"),
        })
    }

    /// Whether `id` is declared in this namespace.
    pub fn contains(&self, id: I) -> bool {
        id.index() < self.names.len()
    }

    /// Fail with `UnknownEntry` unless `id` is declared.
    pub fn ensure(&self, id: I) -> VocabResult<()> {
        if self.contains(id) {
            Ok(())
        } else {
            Err(unknown_id(id))
        }
    }

    /// Number of registered entries.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether the namespace is empty.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Iterate over `(id, name)` pairs in ascending ID order.
    pub fn iter(&self) -> impl Iterator<Item = (I, &str)> + '_ {
        self.names
            .iter()
            .enumerate()
            .filter_map(|(index, name)| I::from_index(index).map(|id| (id, name.as_str())))
    }

    /// Iterate over all IDs in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = I> + '_ {
        (0..self.names.len()).filter_map(I::from_index)
    }
}

fn unknown_id<I: VocabId>(id: I) -> VocabError {
    VocabError::UnknownEntry {
        namespace: I::NAMESPACE,
        entry: format!("#{}", id.index()),
    }
}

impl<I: VocabId> Default for Vocabulary<I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<I> PartialEq for Vocabulary<I> {
    fn eq(&self, other: &Self) -> bool {
        // The reverse map is derived from `names`.
        self.names == other.names
    }
}

impl<I> Eq for Vocabulary<I> {}

impl<I: VocabId> std::fmt::Debug for Vocabulary<I> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Vocabulary")
            .field("namespace", &I::NAMESPACE)
            .field("names", &self.names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_assigns_consecutive_ids() {
        let mut classes = Vocabulary::<ClassId>::new();
        let a = classes.register("A").unwrap();
        let b = classes.register("B").unwrap();
        assert_eq!(a.index(), 0);
        assert_eq!(b.index(), 1);
        assert_eq!(classes.len(), 2);
    }

    #[test]
    fn register_and_lookup() {
        let mut individuals = Vocabulary::<IndividualId>::new();
        let alice = individuals.register("alice").unwrap();

        // Forward lookup by ID.
        assert_eq!(individuals.name_of(alice).unwrap(), "alice");
        // Reverse lookup by name.
        assert_eq!(individuals.id_of("alice").unwrap(), alice);
        assert_eq!(individuals.get("bob"), None);
    }

    #[test]
    fn names_are_case_sensitive() {
        let mut relations = Vocabulary::<RelationId>::new();
        let lower = relations.register("knows").unwrap();
        let upper = relations.register("Knows").unwrap();
        assert_ne!(lower, upper);
    }

    #[test]
    fn duplicate_name_error() {
        let mut classes = Vocabulary::<ClassId>::new();
        classes.register("A").unwrap();
        let err = classes.register("A").unwrap_err();
        assert!(matches!(
            err,
            VocabError::DuplicateName {
                namespace: Namespace::Class,
                existing: 0,
                ..
            }
        ));
        // A failed registration leaves the namespace unchanged.
        assert_eq!(classes.len(), 1);
    }

    #[test]
    fn invalid_names_are_rejected() {
        let mut literals = Vocabulary::<LiteralId>::new();
        for bad in ["", "two words", "tab\there", "line\nbreak", "nbsp\u{a0}"] {
            let err = literals.register(bad).unwrap_err();
            assert!(
                matches!(err, VocabError::InvalidName { .. }),
                "{bad:?} should be invalid"
            );
        }
        assert!(literals.is_empty());
    }

    #[test]
    fn unknown_entries() {
        let mut classes = Vocabulary::<ClassId>::new();
        classes.register("A").unwrap();

        let missing = ClassId::from_index(1).unwrap();
        assert!(!classes.contains(missing));
        assert!(matches!(
            classes.name_of(missing),
            Err(VocabError::UnknownEntry { .. })
        ));
        assert!(classes.ensure(missing).is_err());
        assert!(classes.id_of("B").is_err());
        assert!(classes.id_at(1).is_err());
        assert_eq!(classes.id_at(0).unwrap().index(), 0);
    }

    #[test]
    fn iteration_is_in_id_order() {
        let mut individuals = Vocabulary::<IndividualId>::new();
        for name in ["c", "a", "b"] {
            individuals.register(name).unwrap();
        }
        let names: Vec<_> = individuals.iter().map(|(_, n)| n).collect();
        assert_eq!(names, ["c", "a", "b"]);
        let ids: Vec<_> = individuals.ids().map(|id| id.index()).collect();
        assert_eq!(ids, [0, 1, 2]);
    }

    #[test]
    fn equality_ignores_construction_history() {
        let mut a = Vocabulary::<ClassId>::new();
        let mut b = Vocabulary::<ClassId>::new();
        a.register("X").unwrap();
        b.register("X").unwrap();
        assert_eq!(a, b);
        b.register("Y").unwrap();
        assert_ne!(a, b);
    }
}
