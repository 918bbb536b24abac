//! Format codec: reading and writing the 13-file text representation.
//!
//! A dataset with basename `kg` consists of
//!
//! - four vocabularies: `kg.individuals`, `kg.classes`, `kg.relations`, `kg.literals`
//! - three fact files: `kg.classes.data`, `kg.relations.data`, `kg.literals.data`
//! - the same three with `.inf` (inferences) and `.pred` (predictions) appended
//!
//! Reads are all-or-nothing: any error aborts the read and no graph is
//! returned. Writes render every file in memory first and, by default, stage
//! them next to their targets so that a failed write never leaves a
//! half-replaced dataset behind.
//!
//! A *sequence* of graphs shares one set of vocabulary files; the data files
//! of graph `k` carry an extra `.k` suffix (`kg.relations.data.inf.3`).

pub mod discover;
pub mod files;
pub mod line;
mod reader;
mod writer;

use std::path::Path;

use crate::config::CodecConfig;
use crate::error::{CodecError, CodecResult};
use crate::graph::KnowledgeGraph;

pub use files::{DataFile, DataKind, DatasetFiles, VocabFile};

/// Reader and writer for rel-data datasets.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    config: CodecConfig,
}

impl Codec {
    pub fn new(config: CodecConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &CodecConfig {
        &self.config
    }

    /// Read the dataset `basename` from `dir`.
    pub fn read(&self, dir: impl AsRef<Path>, basename: &str) -> CodecResult<KnowledgeGraph> {
        let files = DatasetFiles::new(dir, basename);
        let vocab = reader::read_vocabulary(&files)?;
        let mut kg = KnowledgeGraph::with_vocabulary(vocab);
        reader::read_data(&files, &self.config, &mut kg)?;

        tracing::info!(
            dir = %files.dir().display(),
            basename,
            individuals = kg.num_individuals(),
            classes = kg.num_classes(),
            relations = kg.num_relations(),
            literal_types = kg.num_literal_types(),
            statements = kg.statement_count(),
            "read knowledge graph"
        );
        Ok(kg)
    }

    /// Write `kg` as dataset `basename` into `dir`, replacing existing files.
    pub fn write(&self, kg: &KnowledgeGraph, dir: impl AsRef<Path>, basename: &str) -> CodecResult<()> {
        let files = DatasetFiles::new(dir, basename);
        let mut pending = writer::render_vocabulary(&files, kg.vocab());
        pending.extend(writer::render_data(&files, kg));
        writer::commit(files.dir(), pending, &self.config)?;

        tracing::info!(
            dir = %files.dir().display(),
            basename,
            statements = kg.statement_count(),
            "wrote knowledge graph"
        );
        Ok(())
    }

    /// Write a sequence of graphs that share one vocabulary.
    ///
    /// Fails with [`CodecError::EmptySequence`] for an empty slice and with
    /// [`CodecError::VocabularyMismatch`] if any graph's vocabulary differs
    /// from the first one's; nothing is written in either case.
    pub fn write_sequence(
        &self,
        graphs: &[KnowledgeGraph],
        dir: impl AsRef<Path>,
        basename: &str,
    ) -> CodecResult<()> {
        let Some(first) = graphs.first() else {
            return Err(CodecError::EmptySequence);
        };
        if let Some(index) = graphs.iter().position(|kg| kg.vocab() != first.vocab()) {
            return Err(CodecError::VocabularyMismatch { index });
        }

        let files = DatasetFiles::new(dir, basename);
        let mut pending = writer::render_vocabulary(&files, first.vocab());
        for (index, kg) in graphs.iter().enumerate() {
            pending.extend(writer::render_data(&files.indexed(index), kg));
        }
        writer::commit(files.dir(), pending, &self.config)?;

        tracing::info!(
            dir = %files.dir().display(),
            basename,
            graphs = graphs.len(),
            "wrote knowledge graph sequence"
        );
        Ok(())
    }

    /// Read a sequence written by [`Codec::write_sequence`].
    ///
    /// Graphs are read for `k = 0, 1, …` until no data file with index `k`
    /// exists. An index for which only some data files exist is an error, as is
    /// a sequence without any graph.
    pub fn read_sequence(&self, dir: impl AsRef<Path>, basename: &str) -> CodecResult<Vec<KnowledgeGraph>> {
        let files = DatasetFiles::new(dir, basename);
        let vocab = reader::read_vocabulary(&files)?;

        let mut graphs = Vec::new();
        loop {
            let indexed = files.indexed(graphs.len());
            let any_present = DataFile::all().any(|d| indexed.data_path(d).is_file());
            if !any_present && !graphs.is_empty() {
                break;
            }
            let mut kg = KnowledgeGraph::with_vocabulary(vocab.clone());
            reader::read_data(&indexed, &self.config, &mut kg)?;
            graphs.push(kg);
        }

        tracing::info!(
            dir = %files.dir().display(),
            basename,
            graphs = graphs.len(),
            "read knowledge graph sequence"
        );
        Ok(graphs)
    }

    /// Basenames of all complete datasets in `dir`, sorted.
    pub fn discover(&self, dir: impl AsRef<Path>) -> CodecResult<Vec<String>> {
        discover::find_datasets(dir.as_ref(), self.config.require_prediction_files)
    }
}

/// Read a dataset with the default configuration.
pub fn read(dir: impl AsRef<Path>, basename: &str) -> CodecResult<KnowledgeGraph> {
    Codec::default().read(dir, basename)
}

/// Write a dataset with the default configuration.
pub fn write(kg: &KnowledgeGraph, dir: impl AsRef<Path>, basename: &str) -> CodecResult<()> {
    Codec::default().write(kg, dir, basename)
}

/// Read a graph sequence with the default configuration.
pub fn read_sequence(dir: impl AsRef<Path>, basename: &str) -> CodecResult<Vec<KnowledgeGraph>> {
    Codec::default().read_sequence(dir, basename)
}

/// Write a graph sequence with the default configuration.
pub fn write_sequence(graphs: &[KnowledgeGraph], dir: impl AsRef<Path>, basename: &str) -> CodecResult<()> {
    Codec::default().write_sequence(graphs, dir, basename)
}

/// Find complete datasets with the default configuration.
pub fn discover(dir: impl AsRef<Path>) -> CodecResult<Vec<String>> {
    Codec::default().discover(dir)
}
