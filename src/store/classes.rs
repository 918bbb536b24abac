//! Sparse tri-state class-membership matrix.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::StoreResult;
use crate::vocab::{ClassId, IndividualId, VocabularyRegistry};

use super::{Polarity, Truth};

/// An explicit (non-unknown) class membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Membership {
    pub individual: IndividualId,
    pub class: ClassId,
    pub polarity: Polarity,
}

/// Conceptually a dense `[#individuals × #classes]` matrix of [`Truth`]
/// values; only the known cells are stored.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassLayer {
    cells: BTreeMap<(IndividualId, ClassId), Polarity>,
}

impl ClassLayer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the membership of `individual` in `class`, returning the previous value.
    ///
    /// Setting [`Truth::Unknown`] removes the cell.
    pub fn set(
        &mut self,
        vocab: &VocabularyRegistry,
        individual: IndividualId,
        class: ClassId,
        state: Truth,
    ) -> StoreResult<Truth> {
        vocab.ensure(individual)?;
        vocab.ensure(class)?;

        let key = (individual, class);
        let previous = match state.polarity() {
            Some(polarity) => self.cells.insert(key, polarity),
            None => self.cells.remove(&key),
        };
        Ok(previous.into())
    }

    /// Membership of `individual` in `class`; `Unknown` if never set.
    pub fn get(&self, individual: IndividualId, class: ClassId) -> Truth {
        self.cells.get(&(individual, class)).copied().into()
    }

    /// All known memberships, ordered by individual then class.
    pub fn iter(&self) -> impl Iterator<Item = Membership> + '_ {
        self.cells
            .iter()
            .map(|(&(individual, class), &polarity)| Membership {
                individual,
                class,
                polarity,
            })
    }

    /// Known memberships of one individual, ordered by class.
    pub fn of_individual(&self, individual: IndividualId) -> impl Iterator<Item = Membership> + '_ {
        self.cells
            .range((individual, ClassId::MIN)..=(individual, ClassId::MAX))
            .map(move |(&(_, class), &polarity)| Membership {
                individual,
                class,
                polarity,
            })
    }

    /// Number of known cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{StoreError, VocabError};
    use crate::vocab::VocabId;

    fn vocab() -> (VocabularyRegistry, [IndividualId; 2], [ClassId; 2]) {
        let mut reg = VocabularyRegistry::new();
        let i0 = reg.register("i0").unwrap();
        let i1 = reg.register("i1").unwrap();
        let a = reg.register("A").unwrap();
        let b = reg.register("B").unwrap();
        (reg, [i0, i1], [a, b])
    }

    #[test]
    fn unset_cells_are_unknown() {
        let (_, [i0, i1], [a, b]) = vocab();
        let layer = ClassLayer::new();
        for ind in [i0, i1] {
            for cls in [a, b] {
                assert_eq!(layer.get(ind, cls), Truth::Unknown);
            }
        }
    }

    #[test]
    fn set_returns_previous_and_unknown_clears() {
        let (reg, [i0, _], [a, _]) = vocab();
        let mut layer = ClassLayer::new();

        assert_eq!(layer.set(&reg, i0, a, Truth::Positive).unwrap(), Truth::Unknown);
        assert_eq!(layer.set(&reg, i0, a, Truth::Negative).unwrap(), Truth::Positive);
        assert_eq!(layer.get(i0, a), Truth::Negative);
        assert_eq!(layer.len(), 1);

        assert_eq!(layer.set(&reg, i0, a, Truth::Unknown).unwrap(), Truth::Negative);
        assert!(layer.is_empty());
    }

    #[test]
    fn unknown_ids_are_rejected_without_change() {
        let (reg, [i0, _], [a, _]) = vocab();
        let mut layer = ClassLayer::new();
        let ghost_ind = IndividualId::from_index(5).unwrap();
        let ghost_cls = ClassId::from_index(2).unwrap();

        let err = layer.set(&reg, ghost_ind, a, Truth::Positive).unwrap_err();
        assert!(matches!(err, StoreError::Vocab(VocabError::UnknownEntry { .. })));
        assert!(layer.set(&reg, i0, ghost_cls, Truth::Negative).is_err());
        assert!(layer.is_empty());
    }

    #[test]
    fn row_iteration_is_ordered() {
        let (reg, [i0, i1], [a, b]) = vocab();
        let mut layer = ClassLayer::new();
        layer.set(&reg, i1, b, Truth::Negative).unwrap();
        layer.set(&reg, i0, b, Truth::Positive).unwrap();
        layer.set(&reg, i0, a, Truth::Negative).unwrap();

        let row: Vec<_> = layer.of_individual(i0).map(|m| (m.class, m.polarity)).collect();
        assert_eq!(row, [(a, Polarity::Negative), (b, Polarity::Positive)]);

        let all: Vec<_> = layer.iter().map(|m| (m.individual, m.class)).collect();
        assert_eq!(all, [(i0, a), (i0, b), (i1, b)]);
    }
}
