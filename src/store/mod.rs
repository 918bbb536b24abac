//! Statement store: class memberships, relations and literals per epistemic layer.
//!
//! Every statement lives in one of three independent layers:
//!
//! - [`Layer::Fact`] — statements given as input
//! - [`Layer::Inferred`] — statements derivable with certainty (supplied externally)
//! - [`Layer::Predicted`] — statements estimated by some model (supplied externally)
//!
//! Each layer is a [`LayerStore`] holding three structurally identical
//! collections: [`ClassLayer`], [`RelationLayer`] and [`LiteralLayer`]. Layers
//! are independent sets; the same triple may appear in several of them, even
//! with different polarities.
//!
//! All mutators take the [`VocabularyRegistry`] by reference and reject any ID
//! outside the current vocabulary before touching their collection.

pub mod classes;
pub mod literals;
pub mod relations;

use serde::{Deserialize, Serialize};

pub use classes::{ClassLayer, Membership};
pub use literals::{LiteralEntry, LiteralLayer};
pub use relations::{RelationEntry, RelationLayer};

/// Epistemic status of a statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Layer {
    Fact,
    Inferred,
    Predicted,
}

impl Layer {
    /// All layers, in file order.
    pub const ALL: [Layer; 3] = [Layer::Fact, Layer::Inferred, Layer::Predicted];
}

impl std::fmt::Display for Layer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layer::Fact => write!(f, "fact"),
            Layer::Inferred => write!(f, "inferred"),
            Layer::Predicted => write!(f, "predicted"),
        }
    }
}

/// Sign of an explicit statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Polarity {
    Positive,
    Negative,
}

impl Polarity {
    /// The other polarity.
    pub fn opposite(self) -> Self {
        match self {
            Polarity::Positive => Polarity::Negative,
            Polarity::Negative => Polarity::Positive,
        }
    }

    /// `true` for [`Polarity::Positive`].
    pub fn is_positive(self) -> bool {
        self == Polarity::Positive
    }
}

impl From<bool> for Polarity {
    fn from(positive: bool) -> Self {
        if positive {
            Polarity::Positive
        } else {
            Polarity::Negative
        }
    }
}

impl std::fmt::Display for Polarity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Polarity::Positive => write!(f, "positive"),
            Polarity::Negative => write!(f, "negative"),
        }
    }
}

/// Three-valued answer to "does this statement hold?".
///
/// `Unknown` is the absence of a statement and is never materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Truth {
    Positive,
    Negative,
    #[default]
    Unknown,
}

impl Truth {
    /// The explicit polarity, or `None` for `Unknown`.
    pub fn polarity(self) -> Option<Polarity> {
        match self {
            Truth::Positive => Some(Polarity::Positive),
            Truth::Negative => Some(Polarity::Negative),
            Truth::Unknown => None,
        }
    }

    pub fn is_known(self) -> bool {
        self != Truth::Unknown
    }
}

impl From<Polarity> for Truth {
    fn from(polarity: Polarity) -> Self {
        match polarity {
            Polarity::Positive => Truth::Positive,
            Polarity::Negative => Truth::Negative,
        }
    }
}

impl From<Option<Polarity>> for Truth {
    fn from(polarity: Option<Polarity>) -> Self {
        polarity.map_or(Truth::Unknown, Truth::from)
    }
}

impl std::fmt::Display for Truth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Truth::Positive => write!(f, "positive"),
            Truth::Negative => write!(f, "negative"),
            Truth::Unknown => write!(f, "unknown"),
        }
    }
}

/// The class, relation and literal statements of one layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LayerStore {
    layer: Layer,
    pub(crate) classes: ClassLayer,
    pub(crate) relations: RelationLayer,
    pub(crate) literals: LiteralLayer,
}

impl LayerStore {
    /// Create an empty store for `layer`.
    pub fn new(layer: Layer) -> Self {
        Self {
            layer,
            classes: ClassLayer::new(),
            relations: RelationLayer::new(layer),
            literals: LiteralLayer::new(),
        }
    }

    pub fn layer(&self) -> Layer {
        self.layer
    }

    pub fn classes(&self) -> &ClassLayer {
        &self.classes
    }

    pub fn relations(&self) -> &RelationLayer {
        &self.relations
    }

    pub fn literals(&self) -> &LiteralLayer {
        &self.literals
    }

    /// Number of explicit statements across all three collections.
    pub fn len(&self) -> usize {
        self.classes.len() + self.relations.len() + self.literals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truth_polarity_round_trip() {
        assert_eq!(Truth::from(Polarity::Positive), Truth::Positive);
        assert_eq!(Truth::from(Polarity::Negative), Truth::Negative);
        assert_eq!(Truth::from(None), Truth::Unknown);
        assert_eq!(Truth::Negative.polarity(), Some(Polarity::Negative));
        assert_eq!(Truth::Unknown.polarity(), None);
        assert_eq!(Truth::default(), Truth::Unknown);
    }

    #[test]
    fn polarity_helpers() {
        assert_eq!(Polarity::Positive.opposite(), Polarity::Negative);
        assert_eq!(Polarity::from(false), Polarity::Negative);
        assert!(Polarity::Positive.is_positive());
    }

    #[test]
    fn new_layer_store_is_empty() {
        let store = LayerStore::new(Layer::Inferred);
        assert!(store.is_empty());
        assert_eq!(store.layer(), Layer::Inferred);
        assert_eq!(store.relations().layer(), Layer::Inferred);
    }

    #[test]
    fn layer_display() {
        let names: Vec<_> = Layer::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["fact", "inferred", "predicted"]);
    }
}
