//! Knowledge graph model: one vocabulary registry plus three statement layers.
//!
//! The [`KnowledgeGraph`] owns its [`VocabularyRegistry`] and enforces, at
//! every mutation, that each ID in a statement is declared in the matching
//! namespace. A rejected mutation leaves the graph unchanged.

pub mod stats;

use crate::error::{StoreResult, VocabResult};
use crate::store::{Layer, LayerStore, LiteralEntry, Membership, Polarity, RelationEntry, Truth};
use crate::vocab::{ClassId, IndividualId, LiteralId, RelationId, VocabId, VocabularyRegistry};

/// A relational dataset: vocabulary plus fact, inferred and predicted statements.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KnowledgeGraph {
    vocab: VocabularyRegistry,
    facts: LayerStore,
    inferred: LayerStore,
    predicted: LayerStore,
}

impl Default for KnowledgeGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl KnowledgeGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::with_vocabulary(VocabularyRegistry::new())
    }

    /// Create a graph over an existing vocabulary, with no statements.
    pub fn with_vocabulary(vocab: VocabularyRegistry) -> Self {
        Self {
            vocab,
            facts: LayerStore::new(Layer::Fact),
            inferred: LayerStore::new(Layer::Inferred),
            predicted: LayerStore::new(Layer::Predicted),
        }
    }

    pub fn vocab(&self) -> &VocabularyRegistry {
        &self.vocab
    }

    // -- vocabulary ---------------------------------------------------------

    /// Declare a new individual.
    pub fn add_individual(&mut self, name: impl Into<String>) -> VocabResult<IndividualId> {
        self.vocab.register(name)
    }

    /// Declare a new class.
    pub fn add_class(&mut self, name: impl Into<String>) -> VocabResult<ClassId> {
        self.vocab.register(name)
    }

    /// Declare a new relation type.
    pub fn add_relation(&mut self, name: impl Into<String>) -> VocabResult<RelationId> {
        self.vocab.register(name)
    }

    /// Declare a new literal type.
    pub fn add_literal_type(&mut self, name: impl Into<String>) -> VocabResult<LiteralId> {
        self.vocab.register(name)
    }

    /// Resolve a name in the namespace of `I`.
    pub fn id_of<I: VocabId>(&self, name: &str) -> VocabResult<I> {
        self.vocab.id_of(name)
    }

    /// Resolve an ID to its name.
    pub fn name_of<I: VocabId>(&self, id: I) -> VocabResult<&str> {
        self.vocab.name_of(id)
    }

    /// Whether `id` is declared.
    pub fn contains<I: VocabId>(&self, id: I) -> bool {
        self.vocab.contains(id)
    }

    pub fn num_individuals(&self) -> usize {
        self.vocab.individuals().len()
    }

    pub fn num_classes(&self) -> usize {
        self.vocab.classes().len()
    }

    pub fn num_relations(&self) -> usize {
        self.vocab.relations().len()
    }

    pub fn num_literal_types(&self) -> usize {
        self.vocab.literals().len()
    }

    // -- layers -------------------------------------------------------------

    /// Read-only view of one layer.
    pub fn layer(&self, layer: Layer) -> &LayerStore {
        match layer {
            Layer::Fact => &self.facts,
            Layer::Inferred => &self.inferred,
            Layer::Predicted => &self.predicted,
        }
    }

    /// All three layers in file order.
    pub fn layers(&self) -> impl Iterator<Item = &LayerStore> + '_ {
        Layer::ALL.into_iter().map(|layer| self.layer(layer))
    }

    /// Borrow the vocabulary and one layer at the same time.
    fn split_mut(&mut self, layer: Layer) -> (&VocabularyRegistry, &mut LayerStore) {
        let store = match layer {
            Layer::Fact => &mut self.facts,
            Layer::Inferred => &mut self.inferred,
            Layer::Predicted => &mut self.predicted,
        };
        (&self.vocab, store)
    }

    /// Total number of explicit statements in all layers.
    pub fn statement_count(&self) -> usize {
        self.layers().map(LayerStore::len).sum()
    }

    // -- class memberships --------------------------------------------------

    /// Set a membership, returning the previous value. [`Truth::Unknown`] removes it.
    pub fn set_membership(
        &mut self,
        layer: Layer,
        individual: IndividualId,
        class: ClassId,
        state: Truth,
    ) -> StoreResult<Truth> {
        let (vocab, store) = self.split_mut(layer);
        store.classes.set(vocab, individual, class, state)
    }

    pub fn membership(&self, layer: Layer, individual: IndividualId, class: ClassId) -> Truth {
        self.layer(layer).classes().get(individual, class)
    }

    pub fn memberships(&self, layer: Layer) -> impl Iterator<Item = Membership> + '_ {
        self.layer(layer).classes().iter()
    }

    // -- relations ----------------------------------------------------------

    /// Assert a signed triple. See [`RelationLayer::assert`](crate::store::RelationLayer::assert).
    pub fn assert_relation(
        &mut self,
        layer: Layer,
        subject: IndividualId,
        predicate: RelationId,
        object: IndividualId,
        polarity: Polarity,
    ) -> StoreResult<bool> {
        let (vocab, store) = self.split_mut(layer);
        store
            .relations
            .assert(vocab, subject, predicate, object, polarity)
    }

    /// Remove a triple from one layer, returning the polarity it had.
    pub fn retract_relation(
        &mut self,
        layer: Layer,
        subject: IndividualId,
        predicate: RelationId,
        object: IndividualId,
    ) -> Option<Polarity> {
        let (_, store) = self.split_mut(layer);
        store.relations.retract(subject, predicate, object)
    }

    pub fn query_relation(
        &self,
        layer: Layer,
        subject: IndividualId,
        predicate: RelationId,
        object: IndividualId,
    ) -> Truth {
        self.layer(layer).relations().query(subject, predicate, object)
    }

    pub fn relations(&self, layer: Layer) -> impl Iterator<Item = RelationEntry> + '_ {
        self.layer(layer).relations().iter()
    }

    // -- literals -----------------------------------------------------------

    /// Attach a literal value. Returns `Ok(false)` if the identical entry exists.
    pub fn add_literal(
        &mut self,
        layer: Layer,
        individual: IndividualId,
        literal: LiteralId,
        value: impl Into<String>,
    ) -> StoreResult<bool> {
        let (vocab, store) = self.split_mut(layer);
        store.literals.add(vocab, individual, literal, value)
    }

    pub fn remove_literal(
        &mut self,
        layer: Layer,
        individual: IndividualId,
        literal: LiteralId,
        value: &str,
    ) -> bool {
        let (_, store) = self.split_mut(layer);
        store.literals.remove(individual, literal, value)
    }

    pub fn literal_values(
        &self,
        layer: Layer,
        individual: IndividualId,
        literal: LiteralId,
    ) -> impl Iterator<Item = &str> + '_ {
        self.layer(layer).literals().values(individual, literal)
    }

    pub fn literals(&self, layer: Layer) -> impl Iterator<Item = &LiteralEntry> + '_ {
        self.layer(layer).literals().iter()
    }
}
