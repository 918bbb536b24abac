//! Rendering of datasets to text and committing them to disk.
//!
//! Output is canonical: vocabulary lines by ascending ID, membership rows by
//! individual with one cell per class, relations sorted by (subject, relation,
//! object), literals sorted by (individual, literal type, value). Writing an
//! unchanged graph twice yields byte-identical files.

use std::fmt::Write as _;
use std::io::Write as _;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::config::CodecConfig;
use crate::error::{CodecError, CodecResult};
use crate::graph::KnowledgeGraph;
use crate::store::{Layer, Polarity, Truth};
use crate::vocab::{Namespace, VocabId, Vocabulary, VocabularyRegistry};

use super::files::{DataFile, DataKind, DatasetFiles, VocabFile};
use super::line::render_tri_val;

/// A rendered file waiting to be committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct PendingFile {
    pub path: PathBuf,
    pub content: String,
}

/// Render the four vocabulary files.
pub(crate) fn render_vocabulary(files: &DatasetFiles, vocab: &VocabularyRegistry) -> Vec<PendingFile> {
    VocabFile::ALL
        .iter()
        .map(|&file| {
            let content = match file.0 {
                Namespace::Individual => render_vocab(vocab.individuals()),
                Namespace::Class => render_vocab(vocab.classes()),
                Namespace::Relation => render_vocab(vocab.relations()),
                Namespace::Literal => render_vocab(vocab.literals()),
            };
            PendingFile {
                path: files.vocab_path(file),
                content,
            }
        })
        .collect()
}

/// Render the nine data files of `kg`.
pub(crate) fn render_data(files: &DatasetFiles, kg: &KnowledgeGraph) -> Vec<PendingFile> {
    DataFile::all()
        .map(|file| {
            let content = match file.kind {
                DataKind::Classes => render_memberships(kg, file.layer),
                DataKind::Relations => render_relations(kg, file.layer),
                DataKind::Literals => render_literals(kg, file.layer),
            };
            PendingFile {
                path: files.data_path(file),
                content,
            }
        })
        .collect()
}

pub(crate) fn render_vocab<I: VocabId>(vocab: &Vocabulary<I>) -> String {
    let mut out = String::new();
    for (id, name) in vocab.iter() {
        let _ = writeln!(out, "{} {name}", id.index());
    }
    out
}

pub(crate) fn render_memberships(kg: &KnowledgeGraph, layer: Layer) -> String {
    let classes = kg.layer(layer).classes();
    let mut out = String::new();
    let mut row = vec![Truth::Unknown; kg.num_classes()];

    for individual in kg.vocab().individuals().ids() {
        row.fill(Truth::Unknown);
        for membership in classes.of_individual(individual) {
            if let Some(cell) = row.get_mut(membership.class.index()) {
                *cell = membership.polarity.into();
            }
        }
        let cells: Vec<&str> = row.iter().map(|&truth| render_tri_val(truth)).collect();
        out.push_str(&cells.join(" "));
        out.push('\n');
    }
    out
}

pub(crate) fn render_relations(kg: &KnowledgeGraph, layer: Layer) -> String {
    let mut out = String::new();
    for entry in kg.relations(layer) {
        let sign = match entry.polarity {
            Polarity::Positive => '+',
            Polarity::Negative => '-',
        };
        let _ = writeln!(
            out,
            "{sign} {} {} {}",
            entry.subject.index(),
            entry.predicate.index(),
            entry.object.index()
        );
    }
    out
}

pub(crate) fn render_literals(kg: &KnowledgeGraph, layer: Layer) -> String {
    let mut out = String::new();
    for entry in kg.literals(layer) {
        let _ = writeln!(
            out,
            "{} {} {}",
            entry.individual.index(),
            entry.literal.index(),
            entry.value
        );
    }
    out
}

/// Write all pending files to disk.
///
/// With `atomic_writes`, every file is first staged in a temporary file in its
/// target directory; targets are replaced only after all files were staged.
/// A target that exists but is not a regular file fails the commit before
/// anything is staged.
///
/// Replaced files keep their permissions; new files get the permissions a
/// direct write would give them.
pub(crate) fn commit(dir: &Path, pending: Vec<PendingFile>, config: &CodecConfig) -> CodecResult<()> {
    if config.create_dirs {
        std::fs::create_dir_all(dir).map_err(|e| io_error(dir, e))?;
    }

    if let Some(file) = pending.iter().find(|f| f.path.is_dir()) {
        return Err(io_error(
            &file.path,
            std::io::Error::from(std::io::ErrorKind::IsADirectory),
        ));
    }

    if !config.atomic_writes {
        for file in &pending {
            std::fs::write(&file.path, &file.content).map_err(|e| io_error(&file.path, e))?;
            tracing::debug!(file = %file.path.display(), bytes = file.content.len(), "wrote file");
        }
        return Ok(());
    }

    let mut staged = Vec::with_capacity(pending.len());
    for file in pending {
        let tmp = stage(dir, &file, config.sync_on_write)?;
        staged.push((tmp, file.path));
    }
    for (tmp, path) in staged {
        tmp.persist(&path).map_err(|e| io_error(&path, e.error))?;
        tracing::debug!(file = %path.display(), "committed file");
    }
    Ok(())
}

fn stage(dir: &Path, file: &PendingFile, sync: bool) -> CodecResult<NamedTempFile> {
    let existing = std::fs::metadata(&file.path).ok().map(|m| m.permissions());

    #[cfg_attr(not(unix), allow(unused_mut))]
    let mut builder = tempfile::Builder::new();
    // Same mode as `File::create`, before the umask.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        builder.permissions(std::fs::Permissions::from_mode(0o666));
    }
    let mut tmp = builder
        .tempfile_in(dir)
        .map_err(|e| io_error(&file.path, e))?;

    tmp.write_all(file.content.as_bytes())
        .map_err(|e| io_error(&file.path, e))?;
    if let Some(permissions) = existing {
        tmp.as_file()
            .set_permissions(permissions)
            .map_err(|e| io_error(&file.path, e))?;
    }
    if sync {
        tmp.as_file()
            .sync_all()
            .map_err(|e| io_error(&file.path, e))?;
    }
    Ok(tmp)
}

fn io_error(path: &Path, source: std::io::Error) -> CodecError {
    CodecError::Io {
        file: path.display().to_string(),
        source,
    }
}
