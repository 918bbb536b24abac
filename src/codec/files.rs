//! File layout of a dataset: four vocabulary files and nine data files that
//! share one basename.

use std::path::{Path, PathBuf};

use crate::store::Layer;
use crate::vocab::Namespace;

/// One of the four vocabulary files.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VocabFile(pub Namespace);

impl VocabFile {
    /// Vocabulary files in read order.
    pub const ALL: [VocabFile; 4] = [
        VocabFile(Namespace::Individual),
        VocabFile(Namespace::Class),
        VocabFile(Namespace::Relation),
        VocabFile(Namespace::Literal),
    ];

    pub fn suffix(self) -> &'static str {
        match self.0 {
            Namespace::Individual => ".individuals",
            Namespace::Class => ".classes",
            Namespace::Relation => ".relations",
            Namespace::Literal => ".literals",
        }
    }
}

/// Statement kind stored in a data file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Classes,
    Relations,
    Literals,
}

impl DataKind {
    pub const ALL: [DataKind; 3] = [DataKind::Classes, DataKind::Relations, DataKind::Literals];

    fn suffix(self) -> &'static str {
        match self {
            DataKind::Classes => ".classes.data",
            DataKind::Relations => ".relations.data",
            DataKind::Literals => ".literals.data",
        }
    }
}

/// One of the nine data files: a statement kind in a layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DataFile {
    pub kind: DataKind,
    pub layer: Layer,
}

impl DataFile {
    /// Data files in read order: facts, then inferences, then predictions.
    pub fn all() -> impl Iterator<Item = DataFile> {
        Layer::ALL.into_iter().flat_map(|layer| {
            DataKind::ALL
                .into_iter()
                .map(move |kind| DataFile { kind, layer })
        })
    }

    pub fn suffix(self) -> String {
        let layer = match self.layer {
            Layer::Fact => "",
            Layer::Inferred => ".inf",
            Layer::Predicted => ".pred",
        };
        format!("{}{layer}", self.kind.suffix())
    }

    /// Whether the file may be absent under a lenient configuration.
    pub fn is_optional(self, require_prediction_files: bool) -> bool {
        self.layer == Layer::Predicted && !require_prediction_files
    }
}

/// Every suffix a dataset file can carry (unindexed).
pub fn all_suffixes() -> Vec<String> {
    VocabFile::ALL
        .iter()
        .map(|v| v.suffix().to_string())
        .chain(DataFile::all().map(DataFile::suffix))
        .collect()
}

/// Paths of one dataset, or of one element of a sequence.
///
/// Vocabulary files are never indexed; in a sequence the data files of graph
/// `k` carry an extra `.k` suffix.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetFiles {
    dir: PathBuf,
    basename: String,
    index: Option<usize>,
}

impl DatasetFiles {
    pub fn new(dir: impl AsRef<Path>, basename: impl Into<String>) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            basename: basename.into(),
            index: None,
        }
    }

    /// The same dataset, addressing the data files of sequence element `index`.
    pub fn indexed(&self, index: usize) -> Self {
        Self {
            index: Some(index),
            ..self.clone()
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn basename(&self) -> &str {
        &self.basename
    }

    pub fn index(&self) -> Option<usize> {
        self.index
    }

    pub fn vocab_path(&self, file: VocabFile) -> PathBuf {
        self.dir.join(format!("{}{}", self.basename, file.suffix()))
    }

    pub fn data_path(&self, file: DataFile) -> PathBuf {
        let name = match self.index {
            Some(index) => format!("{}{}.{index}", self.basename, file.suffix()),
            None => format!("{}{}", self.basename, file.suffix()),
        };
        self.dir.join(name)
    }

    /// All 13 paths: vocabularies first, then data files.
    pub fn paths(&self) -> Vec<PathBuf> {
        VocabFile::ALL
            .iter()
            .map(|&v| self.vocab_path(v))
            .chain(DataFile::all().map(|d| self.data_path(d)))
            .collect()
    }
}
