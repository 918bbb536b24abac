//! Rich diagnostic error types for reldata.
//!
//! Each subsystem defines its own error type with miette `#[diagnostic]` derives,
//! providing error codes, help text, and source chains so users know exactly what
//! went wrong and how to fix it. Every codec error names the file it was raised
//! for, and line-level errors carry the 1-based line number.

// Fields read only by the derived `Display`/`Diagnostic` impls (`#[label]`,
// `#[source_code]`, `{field}` in messages) are reported as never read.
#![allow(unused_assignments)]

use miette::{Diagnostic, NamedSource, SourceSpan};
use thiserror::Error;

use crate::config::ConfigError;
use crate::store::{Layer, Polarity};
use crate::vocab::Namespace;

/// Top-level error type for reldata.
///
/// Each variant wraps a subsystem-specific error, preserving the full diagnostic
/// chain (error codes, help text, source spans) through to the user.
#[derive(Debug, Error, Diagnostic)]
pub enum RelDataError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Vocab(#[from] VocabError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Codec(#[from] CodecError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),
}

// ---------------------------------------------------------------------------
// Vocabulary errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum VocabError {
    #[error("invalid {namespace} name {name:?}: {reason}")]
    #[diagnostic(
        code(reldata::vocab::invalid_name),
        help(
            "Names must be non-empty and must not contain whitespace, \
             because the text format separates IDs and names by blanks and tabs."
        )
    )]
    InvalidName {
        namespace: Namespace,
        name: String,
        reason: &'static str,
    },

    #[error("duplicate {namespace} name {name:?}: already registered with ID {existing}")]
    #[diagnostic(
        code(reldata::vocab::duplicate_name),
        help("Every name may be declared only once per namespace. Look up the existing ID instead.")
    )]
    DuplicateName {
        namespace: Namespace,
        name: String,
        existing: usize,
    },

    #[error("unknown {namespace}: {entry}")]
    #[diagnostic(
        code(reldata::vocab::unknown_entry),
        help(
            "The referenced entry is not declared in the vocabulary. \
             Register it first, or check that the ID is below the namespace size."
        )
    )]
    UnknownEntry { namespace: Namespace, entry: String },

    #[error("{namespace} vocabulary exhausted: every ID up to {max_id} is taken")]
    #[diagnostic(
        code(reldata::vocab::exhausted),
        help("Identifiers are 32-bit positional indices; split the dataset into smaller graphs.")
    )]
    Exhausted { namespace: Namespace, max_id: usize },
}

/// Convenience alias for vocabulary operations.
pub type VocabResult<T> = std::result::Result<T, VocabError>;

// ---------------------------------------------------------------------------
// Store errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum StoreError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Vocab(#[from] VocabError),

    #[error(
        "conflicting {layer} relation ({subject}, {predicate}, {object}): \
         already asserted as {existing}"
    )]
    #[diagnostic(
        code(reldata::store::conflict),
        help(
            "A triple cannot be both positive and negative within one layer. \
             Retract the existing statement first, or record the other polarity \
             in a different layer."
        )
    )]
    Conflict {
        layer: Layer,
        subject: usize,
        predicate: usize,
        object: usize,
        existing: Polarity,
    },

    #[error("invalid literal value {value:?}: {reason}")]
    #[diagnostic(
        code(reldata::store::invalid_literal),
        help(
            "Literal values are stored verbatim as the remainder of a line, so they \
             must be non-empty, must not start with a blank or tab, and must not \
             contain line breaks."
        )
    )]
    InvalidLiteralValue { value: String, reason: &'static str },
}

/// Convenience alias for statement-store operations.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

// ---------------------------------------------------------------------------
// Codec errors
// ---------------------------------------------------------------------------

#[derive(Debug, Error, Diagnostic)]
pub enum CodecError {
    #[error("{file}:{line}: {reason}")]
    #[diagnostic(
        code(reldata::codec::format),
        help(
            "The line does not follow the rel-data grammar. Vocabulary lines are \
             `<id> <name>` with the ID equal to the 0-based line index, membership \
             rows hold one of 1, 0, -1 per class, relation lines are \
             `<+|-> <subject> <relation> <object>` and literal lines are \
             `<individual> <literal> <value>`."
        )
    )]
    Format {
        file: String,
        line: usize,
        reason: String,
        #[source_code]
        snippet: NamedSource<String>,
        #[label("here")]
        span: SourceSpan,
    },

    #[error("missing file: {file}")]
    #[diagnostic(
        code(reldata::codec::missing_file),
        help(
            "A dataset consists of 13 files sharing one basename: four vocabularies \
             and nine data files. Check the directory and the basename."
        )
    )]
    MissingFile { file: String },

    #[error("I/O error on {file}: {source}")]
    #[diagnostic(
        code(reldata::codec::io),
        help("A filesystem operation failed. Check that the path exists and has correct permissions.")
    )]
    Io {
        file: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{file}:{line}: {statement}: {reason}")]
    #[diagnostic(
        code(reldata::codec::conflict),
        help(
            "Each statement may appear only once per data file, and a relation may \
             not be both positive and negative within one file."
        )
    )]
    Conflict {
        file: String,
        line: usize,
        statement: String,
        reason: String,
    },

    #[error("{file}:{line}: {source}")]
    #[diagnostic(
        code(reldata::codec::vocab),
        help("The line references or declares a vocabulary entry that is not valid here.")
    )]
    Vocab {
        file: String,
        line: usize,
        #[source]
        source: VocabError,
    },

    #[error("graph {index} of the sequence does not share the vocabulary of graph 0")]
    #[diagnostic(
        code(reldata::codec::vocabulary_mismatch),
        help(
            "A graph sequence is written with a single set of vocabulary files, so \
             every graph must declare exactly the same individuals, classes, \
             relations and literal types."
        )
    )]
    VocabularyMismatch { index: usize },

    #[error("cannot write an empty graph sequence")]
    #[diagnostic(
        code(reldata::codec::empty_sequence),
        help("Provide at least one knowledge graph.")
    )]
    EmptySequence,
}

impl CodecError {
    /// Build a [`CodecError::Format`] for a span of one line.
    ///
    /// `span` is a byte range within `text`; it is clamped to the line.
    pub fn format(
        file: &str,
        line: usize,
        text: &str,
        span: std::ops::Range<usize>,
        reason: impl Into<String>,
    ) -> Self {
        let start = span.start.min(text.len());
        let end = span.end.clamp(start, text.len());
        Self::Format {
            file: file.to_string(),
            line,
            reason: reason.into(),
            snippet: NamedSource::new(format!("{file}:{line}"), text.to_string()),
            span: (start, end - start).into(),
        }
    }

    /// The file this error was raised for, if it concerns a single file.
    pub fn file(&self) -> Option<&str> {
        match self {
            Self::Format { file, .. }
            | Self::MissingFile { file }
            | Self::Io { file, .. }
            | Self::Conflict { file, .. }
            | Self::Vocab { file, .. } => Some(file),
            Self::VocabularyMismatch { .. } | Self::EmptySequence => None,
        }
    }

    /// The 1-based line number, for line-level errors.
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Format { line, .. } | Self::Conflict { line, .. } | Self::Vocab { line, .. } => {
                Some(*line)
            }
            _ => None,
        }
    }
}

/// Convenience alias for codec operations.
pub type CodecResult<T> = std::result::Result<T, CodecError>;

/// Convenience alias for functions returning reldata results.
pub type RelResult<T> = std::result::Result<T, RelDataError>;
