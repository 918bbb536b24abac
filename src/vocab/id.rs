//! Typed, dense identifiers for the four vocabulary namespaces.
//!
//! An identifier is a positional index: in a namespace of size `n` the valid
//! IDs are exactly `0..n`. Each namespace gets its own newtype so that an
//! individual ID can never be passed where a class ID is expected.

use serde::{Deserialize, Serialize};

use super::{Namespace, Vocabulary, VocabularyRegistry};

/// Highest positional index an identifier can take; a namespace holds at most
/// `MAX_INDEX + 1` entries.
pub const MAX_INDEX: usize = u32::MAX as usize;

/// Common behavior of the namespace-specific identifier types.
pub trait VocabId:
    Copy + Eq + Ord + std::hash::Hash + std::fmt::Debug + std::fmt::Display + 'static
{
    /// The namespace this identifier lives in.
    const NAMESPACE: Namespace;

    /// Build an identifier from a positional index.
    ///
    /// Returns `None` if the index does not fit the 32-bit ID space.
    fn from_index(index: usize) -> Option<Self>;

    /// The positional index of this identifier.
    fn index(self) -> usize;

    /// Select this identifier's namespace from a registry.
    fn vocabulary(registry: &VocabularyRegistry) -> &Vocabulary<Self>;

    /// Select this identifier's namespace from a registry, mutably.
    fn vocabulary_mut(registry: &mut VocabularyRegistry) -> &mut Vocabulary<Self>;
}

macro_rules! vocab_id {
    ($(#[$doc:meta])* $name:ident, $namespace:ident, $prefix:literal, $field:ident) => {
        $(#[$doc])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Smallest identifier of the namespace.
            pub const MIN: Self = $name(0);
            /// Largest representable identifier of the namespace.
            pub const MAX: Self = $name(u32::MAX);

            /// Get the underlying positional index.
            pub fn get(self) -> u32 {
                self.0
            }
        }

        impl VocabId for $name {
            const NAMESPACE: Namespace = Namespace::$namespace;

            fn from_index(index: usize) -> Option<Self> {
                u32::try_from(index).ok().map($name)
            }

            fn index(self) -> usize {
                self.0 as usize
            }

            fn vocabulary(registry: &VocabularyRegistry) -> &Vocabulary<Self> {
                &registry.$field
            }

            fn vocabulary_mut(registry: &mut VocabularyRegistry) -> &mut Vocabulary<Self> {
                &mut registry.$field
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, concat!($prefix, ":{}"), self.0)
            }
        }
    };
}

vocab_id!(
    /// Identifier of an individual (an entity of the graph).
    IndividualId,
    Individual,
    "ind",
    individuals
);
vocab_id!(
    /// Identifier of a class (a unary predicate).
    ClassId,
    Class,
    "cls",
    classes
);
vocab_id!(
    /// Identifier of a relation type (a binary predicate).
    RelationId,
    Relation,
    "rel",
    relations
);
vocab_id!(
    /// Identifier of a literal type (the type of an attribute value).
    LiteralId,
    Literal,
    "lit",
    literals
);
