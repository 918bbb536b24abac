//! # reldata
//!
//! In-memory model and text codec for relational knowledge-graph datasets.
//!
//! ## Architecture
//!
//! - **Vocabulary** (`vocab`): four dense ID ↔ name namespaces (individuals,
//!   classes, relations, literal types) with typed identifiers
//! - **Statement store** (`store`): tri-state class memberships, signed relation
//!   triples and literal values, each in a fact, inferred and predicted layer
//! - **Knowledge graph** (`graph`): vocabulary plus the three layers, with the
//!   ID invariant checked at every mutation; occurrence statistics in `graph::stats`
//! - **Codec** (`codec`): the 13-file line-oriented text format, graph
//!   sequences and dataset discovery
//!
//! ## Library usage
//!
//! ```no_run
//! use reldata::graph::KnowledgeGraph;
//! use reldata::store::{Layer, Polarity};
//!
//! let mut kg = KnowledgeGraph::new();
//! let ada = kg.add_individual("ada").unwrap();
//! let bob = kg.add_individual("bob").unwrap();
//! let knows = kg.add_relation("knows").unwrap();
//! kg.assert_relation(Layer::Fact, ada, knows, bob, Polarity::Positive).unwrap();
//!
//! reldata::codec::write(&kg, "data", "family").unwrap();
//! let back = reldata::codec::read("data", "family").unwrap();
//! assert_eq!(back, kg);
//! ```

pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod graph;
pub mod store;
pub mod vocab;

pub use codec::Codec;
pub use config::CodecConfig;
pub use error::{RelDataError, RelResult};
pub use graph::KnowledgeGraph;
pub use store::{Layer, Polarity, Truth};
pub use vocab::{ClassId, IndividualId, LiteralId, RelationId, VocabularyRegistry};
