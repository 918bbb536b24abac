//! Export types for serializing knowledge graphs.
//!
//! These types provide human-readable, name-resolved representations of
//! vocabulary entries and statements suitable for JSON export.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::codec::Codec;
use crate::error::{RelResult, VocabResult};
use crate::graph::KnowledgeGraph;
use crate::store::{Layer, Polarity};
use crate::vocab::{Namespace, VocabId, Vocabulary};

/// Exported vocabulary entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryExport {
    pub namespace: Namespace,
    pub id: usize,
    pub name: String,
}

/// Exported class membership with resolved names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MembershipExport {
    pub layer: Layer,
    pub individual: String,
    pub class: String,
    pub polarity: Polarity,
}

/// Exported relation triple with resolved names for all positions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelationExport {
    pub layer: Layer,
    pub subject: String,
    pub predicate: String,
    pub object: String,
    pub polarity: Polarity,
}

/// Exported literal value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiteralExport {
    pub layer: Layer,
    pub individual: String,
    pub literal: String,
    pub value: String,
}

/// Sizes of one graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphSummary {
    pub individuals: usize,
    pub classes: usize,
    pub relations: usize,
    pub literal_types: usize,
    /// Memberships, relations and literals per layer, in layer order.
    pub layers: Vec<LayerSummary>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerSummary {
    pub layer: Layer,
    pub memberships: usize,
    pub relations: usize,
    pub literals: usize,
}

impl GraphSummary {
    pub fn from_graph(kg: &KnowledgeGraph) -> Self {
        Self {
            individuals: kg.num_individuals(),
            classes: kg.num_classes(),
            relations: kg.num_relations(),
            literal_types: kg.num_literal_types(),
            layers: kg
                .layers()
                .map(|store| LayerSummary {
                    layer: store.layer(),
                    memberships: store.classes().len(),
                    relations: store.relations().len(),
                    literals: store.literals().len(),
                })
                .collect(),
        }
    }
}

/// A whole graph with every ID resolved to its name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphExport {
    pub vocabulary: Vec<EntryExport>,
    pub memberships: Vec<MembershipExport>,
    pub relations: Vec<RelationExport>,
    pub literals: Vec<LiteralExport>,
}

impl GraphExport {
    pub fn from_graph(kg: &KnowledgeGraph) -> VocabResult<Self> {
        let vocab = kg.vocab();
        let mut vocabulary = Vec::with_capacity(vocab.total_len());
        export_entries(vocab.individuals(), &mut vocabulary);
        export_entries(vocab.classes(), &mut vocabulary);
        export_entries(vocab.relations(), &mut vocabulary);
        export_entries(vocab.literals(), &mut vocabulary);

        let mut memberships = Vec::new();
        let mut relations = Vec::new();
        let mut literals = Vec::new();
        for layer in Layer::ALL {
            for m in kg.memberships(layer) {
                memberships.push(MembershipExport {
                    layer,
                    individual: kg.name_of(m.individual)?.to_string(),
                    class: kg.name_of(m.class)?.to_string(),
                    polarity: m.polarity,
                });
            }
            for r in kg.relations(layer) {
                relations.push(RelationExport {
                    layer,
                    subject: kg.name_of(r.subject)?.to_string(),
                    predicate: kg.name_of(r.predicate)?.to_string(),
                    object: kg.name_of(r.object)?.to_string(),
                    polarity: r.polarity,
                });
            }
            for l in kg.literals(layer) {
                literals.push(LiteralExport {
                    layer,
                    individual: kg.name_of(l.individual)?.to_string(),
                    literal: kg.name_of(l.literal)?.to_string(),
                    value: l.value.clone(),
                });
            }
        }

        Ok(Self {
            vocabulary,
            memberships,
            relations,
            literals,
        })
    }
}

/// Read dataset `basename` from `dir` and export it with all names resolved.
pub fn export_dataset(codec: &Codec, dir: impl AsRef<Path>, basename: &str) -> RelResult<GraphExport> {
    let kg = codec.read(dir, basename)?;
    Ok(GraphExport::from_graph(&kg)?)
}

fn export_entries<I: VocabId>(vocab: &Vocabulary<I>, out: &mut Vec<EntryExport>) {
    out.extend(vocab.iter().map(|(id, name)| EntryExport {
        namespace: I::NAMESPACE,
        id: id.index(),
        name: name.to_string(),
    }));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::Truth;

    fn sample() -> KnowledgeGraph {
        let mut kg = KnowledgeGraph::new();
        let ada = kg.add_individual("ada").unwrap();
        let bob = kg.add_individual("bob").unwrap();
        let person = kg.add_class("Person").unwrap();
        let knows = kg.add_relation("knows").unwrap();
        let born = kg.add_literal_type("born").unwrap();
        kg.set_membership(Layer::Fact, ada, person, Truth::Positive)
            .unwrap();
        kg.assert_relation(Layer::Inferred, bob, knows, ada, Polarity::Negative)
            .unwrap();
        kg.add_literal(Layer::Predicted, ada, born, "1815").unwrap();
        kg
    }

    #[test]
    fn summary_counts() {
        let summary = GraphSummary::from_graph(&sample());
        assert_eq!(summary.individuals, 2);
        assert_eq!(summary.layers.len(), 3);
        assert_eq!(summary.layers[0].memberships, 1);
        assert_eq!(summary.layers[1].relations, 1);
        assert_eq!(summary.layers[2].literals, 1);
    }

    #[test]
    fn export_resolves_names() {
        let export = GraphExport::from_graph(&sample()).unwrap();
        assert_eq!(export.vocabulary.len(), 5);
        assert_eq!(export.vocabulary[2].namespace, Namespace::Class);
        assert_eq!(
            export.relations,
            [RelationExport {
                layer: Layer::Inferred,
                subject: "bob".into(),
                predicate: "knows".into(),
                object: "ada".into(),
                polarity: Polarity::Negative,
            }]
        );
        assert_eq!(export.literals[0].value, "1815");
    }

    #[test]
    fn export_dataset_from_disk() {
        let tmp = tempfile::TempDir::new().unwrap();
        let codec = Codec::default();
        codec.write(&sample(), tmp.path(), "sample").unwrap();

        let export = export_dataset(&codec, tmp.path(), "sample").unwrap();
        assert_eq!(export, GraphExport::from_graph(&sample()).unwrap());

        let err = export_dataset(&codec, tmp.path(), "absent").unwrap_err();
        assert!(matches!(
            err,
            crate::error::RelDataError::Codec(crate::error::CodecError::MissingFile { .. })
        ));
    }

    #[test]
    fn export_json_shape() {
        let export = GraphExport::from_graph(&sample()).unwrap();
        let json = serde_json::to_value(&export).unwrap();
        assert_eq!(json["memberships"][0]["layer"], "fact");
        assert_eq!(json["memberships"][0]["polarity"], "positive");
        assert_eq!(json["vocabulary"][4]["namespace"], "literal");
    }
}
