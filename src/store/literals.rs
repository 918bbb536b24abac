//! Typed attribute values of one layer.
//!
//! Literals carry no polarity and are never in conflict: the same individual
//! may hold several values of the same literal type.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::error::{StoreError, StoreResult};
use crate::vocab::{IndividualId, LiteralId, VocabularyRegistry};

/// One `(individual, literal type, value)` entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LiteralEntry {
    pub individual: IndividualId,
    pub literal: LiteralId,
    pub value: String,
}

/// Check that `value` survives the line-oriented text format unchanged.
pub fn validate_value(value: &str) -> StoreResult<()> {
    let reason = if value.is_empty() {
        "value is empty"
    } else if value.starts_with([' ', '\t']) {
        "value starts with a blank or tab"
    } else if value.contains(['\n', '\r']) {
        "value contains a line break"
    } else {
        return Ok(());
    };
    Err(StoreError::InvalidLiteralValue {
        value: value.to_string(),
        reason,
    })
}

/// Sparse set of literal entries, ordered by individual, type, then value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LiteralLayer {
    entries: BTreeSet<LiteralEntry>,
}

impl LiteralLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a literal value. Returns `Ok(false)` if the exact entry was already present.
    pub fn add(
        &mut self,
        vocab: &VocabularyRegistry,
        individual: IndividualId,
        literal: LiteralId,
        value: impl Into<String>,
    ) -> StoreResult<bool> {
        vocab.ensure(individual)?;
        vocab.ensure(literal)?;
        let value = value.into();
        validate_value(&value)?;

        Ok(self.entries.insert(LiteralEntry {
            individual,
            literal,
            value,
        }))
    }

    /// Remove one value. Returns whether it was present.
    pub fn remove(&mut self, individual: IndividualId, literal: LiteralId, value: &str) -> bool {
        self.entries.remove(&LiteralEntry {
            individual,
            literal,
            value: value.to_string(),
        })
    }

    /// Whether the exact entry is present.
    pub fn contains(&self, individual: IndividualId, literal: LiteralId, value: &str) -> bool {
        self.values(individual, literal).any(|v| v == value)
    }

    /// All values of `literal` held by `individual`, in ascending order.
    pub fn values(
        &self,
        individual: IndividualId,
        literal: LiteralId,
    ) -> impl Iterator<Item = &str> + '_ {
        self.of_individual(individual)
            .filter(move |entry| entry.literal == literal)
            .map(|entry| entry.value.as_str())
    }

    /// All entries of one individual.
    pub fn of_individual(&self, individual: IndividualId) -> impl Iterator<Item = &LiteralEntry> + '_ {
        self.entries
            .iter()
            .skip_while(move |entry| entry.individual < individual)
            .take_while(move |entry| entry.individual == individual)
    }

    pub fn iter(&self) -> impl Iterator<Item = &LiteralEntry> + '_ {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
