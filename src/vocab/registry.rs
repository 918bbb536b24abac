//! Vocabulary registry: the four namespaces owned by one knowledge graph.

use crate::error::VocabResult;

use super::{ClassId, IndividualId, LiteralId, RelationId, VocabId, Vocabulary};

/// The individuals, classes, relations and literal types of one graph.
///
/// Owned exclusively by a [`KnowledgeGraph`](crate::graph::KnowledgeGraph) and
/// passed by reference wherever IDs must be validated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VocabularyRegistry {
    pub(super) individuals: Vocabulary<IndividualId>,
    pub(super) classes: Vocabulary<ClassId>,
    pub(super) relations: Vocabulary<RelationId>,
    pub(super) literals: Vocabulary<LiteralId>,
}

impl VocabularyRegistry {
    /// Create a registry with four empty namespaces.
    pub fn new() -> Self {
        Self::default()
    }

    /// Assemble a registry from already-populated namespaces.
    pub fn from_parts(
        individuals: Vocabulary<IndividualId>,
        classes: Vocabulary<ClassId>,
        relations: Vocabulary<RelationId>,
        literals: Vocabulary<LiteralId>,
    ) -> Self {
        Self {
            individuals,
            classes,
            relations,
            literals,
        }
    }

    pub fn individuals(&self) -> &Vocabulary<IndividualId> {
        &self.individuals
    }

    pub fn classes(&self) -> &Vocabulary<ClassId> {
        &self.classes
    }

    pub fn relations(&self) -> &Vocabulary<RelationId> {
        &self.relations
    }

    pub fn literals(&self) -> &Vocabulary<LiteralId> {
        &self.literals
    }

    /// The namespace an ID type belongs to.
    pub fn namespace<I: VocabId>(&self) -> &Vocabulary<I> {
        I::vocabulary(self)
    }

    /// Register `name` in the namespace of `I`.
    pub fn register<I: VocabId>(&mut self, name: impl Into<String>) -> VocabResult<I> {
        I::vocabulary_mut(self).register(name)
    }

    /// Fail with `UnknownEntry` unless `id` is declared in its namespace.
    pub fn ensure<I: VocabId>(&self, id: I) -> VocabResult<()> {
        I::vocabulary(self).ensure(id)
    }

    /// Whether `id` is declared in its namespace.
    pub fn contains<I: VocabId>(&self, id: I) -> bool {
        I::vocabulary(self).contains(id)
    }

    /// Resolve a name to an ID of `I`'s namespace.
    pub fn id_of<I: VocabId>(&self, name: &str) -> VocabResult<I> {
        I::vocabulary(self).id_of(name)
    }

    /// Resolve an ID to its name.
    pub fn name_of<I: VocabId>(&self, id: I) -> VocabResult<&str> {
        I::vocabulary(self).name_of(id)
    }

    /// Total number of entries across all four namespaces.
    pub fn total_len(&self) -> usize {
        self.individuals.len() + self.classes.len() + self.relations.len() + self.literals.len()
    }
}
