//! Signed relation triples of one layer.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::vocab::{IndividualId, RelationId, VocabId, VocabularyRegistry};

use super::{Layer, Polarity, Truth};

/// An explicit relation statement `(subject, predicate, object)` with its sign.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RelationEntry {
    pub subject: IndividualId,
    pub predicate: RelationId,
    pub object: IndividualId,
    pub polarity: Polarity,
}

type TripleKey = (IndividualId, RelationId, IndividualId);

/// Sparse set of signed triples. Absence of a triple means "unknown", which is
/// distinct from an explicit negative entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationLayer {
    layer: Layer,
    triples: BTreeMap<TripleKey, Polarity>,
}

impl RelationLayer {
    /// Create an empty relation collection for `layer`.
    pub fn new(layer: Layer) -> Self {
        Self {
            layer,
            triples: BTreeMap::new(),
        }
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    /// Assert a triple with the given polarity.
    ///
    /// Returns `Ok(true)` if the statement was added and `Ok(false)` if the
    /// identical statement was already present. Fails with
    /// [`StoreError::Conflict`] if the triple is already asserted with the
    /// opposite polarity in this layer.
    pub fn assert(
        &mut self,
        vocab: &VocabularyRegistry,
        subject: IndividualId,
        predicate: RelationId,
        object: IndividualId,
        polarity: Polarity,
    ) -> StoreResult<bool> {
        vocab.ensure(subject)?;
        vocab.ensure(predicate)?;
        vocab.ensure(object)?;

        let key = (subject, predicate, object);
        match self.triples.get(&key) {
            Some(&existing) if existing == polarity => Ok(false),
            Some(&existing) => Err(StoreError::Conflict {
                layer: self.layer,
                subject: subject.index(),
                predicate: predicate.index(),
                object: object.index(),
                existing,
            }),
            None => {
                self.triples.insert(key, polarity);
                Ok(true)
            }
        }
    }

    /// Remove a triple regardless of its polarity, returning the polarity it had.
    pub fn retract(
        &mut self,
        subject: IndividualId,
        predicate: RelationId,
        object: IndividualId,
    ) -> Option<Polarity> {
        self.triples.remove(&(subject, predicate, object))
    }

    /// Whether `(subject, predicate, object)` holds in this layer.
    pub fn query(&self, subject: IndividualId, predicate: RelationId, object: IndividualId) -> Truth {
        self.triples.get(&(subject, predicate, object)).copied().into()
    }

    /// All triples, ordered by subject, predicate, object.
    pub fn iter(&self) -> impl Iterator<Item = RelationEntry> + '_ {
        self.triples
            .iter()
            .map(|(&(subject, predicate, object), &polarity)| RelationEntry {
                subject,
                predicate,
                object,
                polarity,
            })
    }

    /// All triples whose subject is `subject`.
    pub fn from_subject(&self, subject: IndividualId) -> impl Iterator<Item = RelationEntry> + '_ {
        let lower = (subject, RelationId::MIN, IndividualId::MIN);
        let upper = (subject, RelationId::MAX, IndividualId::MAX);
        self.triples
            .range(lower..=upper)
            .map(|(&(subject, predicate, object), &polarity)| RelationEntry {
                subject,
                predicate,
                object,
                polarity,
            })
    }

    /// All triples using `predicate`.
    pub fn with_predicate(&self, predicate: RelationId) -> impl Iterator<Item = RelationEntry> + '_ {
        self.iter().filter(move |entry| entry.predicate == predicate)
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }
}
