//! Occurrence statistics over one or more knowledge graphs.
//!
//! Counts are keyed by vocabulary *name*, so graphs with different
//! vocabularies can be accumulated into one summary: a class called `Person`
//! in two datasets contributes to the same row.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::store::{Layer, Polarity};
use crate::vocab::VocabId;

use super::KnowledgeGraph;

/// Positive and negative statement counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolarityCounts {
    pub positive: usize,
    pub negative: usize,
}

impl PolarityCounts {
    fn record(&mut self, polarity: Polarity) {
        match polarity {
            Polarity::Positive => self.positive += 1,
            Polarity::Negative => self.negative += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.positive + self.negative
    }
}

impl std::ops::AddAssign for PolarityCounts {
    fn add_assign(&mut self, other: Self) {
        self.positive += other.positive;
        self.negative += other.negative;
    }
}

impl std::fmt::Display for PolarityCounts {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} / {}", self.positive, self.negative)
    }
}

/// One counter per epistemic layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerCounts<T> {
    pub fact: T,
    pub inferred: T,
    pub predicted: T,
}

impl<T> LayerCounts<T> {
    pub fn get(&self, layer: Layer) -> &T {
        match layer {
            Layer::Fact => &self.fact,
            Layer::Inferred => &self.inferred,
            Layer::Predicted => &self.predicted,
        }
    }

    pub fn get_mut(&mut self, layer: Layer) -> &mut T {
        match layer {
            Layer::Fact => &mut self.fact,
            Layer::Inferred => &mut self.inferred,
            Layer::Predicted => &mut self.predicted,
        }
    }
}

impl<T: std::ops::AddAssign + Copy> LayerCounts<T> {
    fn merge(&mut self, other: &Self) {
        self.fact += other.fact;
        self.inferred += other.inferred;
        self.predicted += other.predicted;
    }
}

/// Per-name occurrence counts for classes, relations and literal types.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OccurrenceStats {
    /// Number of graphs that contributed.
    pub graphs: usize,
    /// Sum of the individual counts of all contributing graphs.
    pub individuals: usize,
    /// Class memberships per class name.
    pub classes: BTreeMap<String, LayerCounts<PolarityCounts>>,
    /// Relation triples per relation name.
    pub relations: BTreeMap<String, LayerCounts<PolarityCounts>>,
    /// Literal entries per literal-type name.
    pub literals: BTreeMap<String, LayerCounts<usize>>,
}

impl OccurrenceStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Statistics of a single graph.
    pub fn from_graph(kg: &KnowledgeGraph) -> Self {
        let mut stats = Self::new();
        stats.accumulate(kg);
        stats
    }

    /// Add the counts of `kg`.
    ///
    /// Every declared class, relation and literal type gets a row, even if it
    /// never occurs in a statement.
    pub fn accumulate(&mut self, kg: &KnowledgeGraph) {
        let vocab = kg.vocab();
        self.graphs += 1;
        self.individuals += kg.num_individuals();

        let mut classes = vec![LayerCounts::<PolarityCounts>::default(); kg.num_classes()];
        let mut relations = vec![LayerCounts::<PolarityCounts>::default(); kg.num_relations()];
        let mut literals = vec![LayerCounts::<usize>::default(); kg.num_literal_types()];

        for store in kg.layers() {
            let layer = store.layer();
            for membership in store.classes().iter() {
                if let Some(row) = classes.get_mut(membership.class.index()) {
                    row.get_mut(layer).record(membership.polarity);
                }
            }
            for entry in store.relations().iter() {
                if let Some(row) = relations.get_mut(entry.predicate.index()) {
                    row.get_mut(layer).record(entry.polarity);
                }
            }
            for entry in store.literals().iter() {
                if let Some(row) = literals.get_mut(entry.literal.index()) {
                    *row.get_mut(layer) += 1;
                }
            }
        }

        for ((_, name), counts) in vocab.classes().iter().zip(&classes) {
            self.classes.entry(name.to_string()).or_default().merge(counts);
        }
        for ((_, name), counts) in vocab.relations().iter().zip(&relations) {
            self.relations.entry(name.to_string()).or_default().merge(counts);
        }
        for ((_, name), counts) in vocab.literals().iter().zip(&literals) {
            self.literals.entry(name.to_string()).or_default().merge(counts);
        }
    }

    /// Column totals of the class table.
    pub fn class_totals(&self) -> LayerCounts<PolarityCounts> {
        totals(self.classes.values())
    }

    /// Column totals of the relation table.
    pub fn relation_totals(&self) -> LayerCounts<PolarityCounts> {
        totals(self.relations.values())
    }
}

fn totals<'a>(
    rows: impl Iterator<Item = &'a LayerCounts<PolarityCounts>>,
) -> LayerCounts<PolarityCounts> {
    let mut sum = LayerCounts::default();
    for row in rows {
        sum.merge(row);
    }
    sum
}
