//! Finding datasets in a directory.

use std::collections::{BTreeSet, HashSet};
use std::path::Path;

use crate::error::{CodecError, CodecResult};

use super::files::{DataFile, VocabFile, all_suffixes};

/// Basenames of all complete datasets in `dir`, sorted.
///
/// A basename is reported only if every required file exists; `.pred` files
/// count as required when `require_prediction_files` is set. Indexed sequence
/// files are not recognized.
pub fn find_datasets(dir: &Path, require_prediction_files: bool) -> CodecResult<Vec<String>> {
    let entries = std::fs::read_dir(dir).map_err(|e| CodecError::Io {
        file: dir.display().to_string(),
        source: e,
    })?;

    let mut names = HashSet::new();
    for entry in entries {
        let entry = entry.map_err(|e| CodecError::Io {
            file: dir.display().to_string(),
            source: e,
        })?;
        if !entry.path().is_file() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            names.insert(name);
        }
    }

    let suffixes = all_suffixes();
    let candidates: BTreeSet<&str> = names
        .iter()
        .flat_map(|name| {
            suffixes
                .iter()
                .filter_map(move |suffix| name.strip_suffix(suffix.as_str()))
        })
        .filter(|base| !base.is_empty())
        .collect();

    let required: Vec<String> = VocabFile::ALL
        .iter()
        .map(|v| v.suffix().to_string())
        .chain(
            DataFile::all()
                .filter(|d| !d.is_optional(require_prediction_files))
                .map(DataFile::suffix),
        )
        .collect();

    let found: Vec<String> = candidates
        .into_iter()
        .filter(|base| {
            required
                .iter()
                .all(|suffix| names.contains(&format!("{base}{suffix}")))
        })
        .map(str::to_string)
        .collect();

    tracing::debug!(dir = %dir.display(), datasets = found.len(), "scanned directory");
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn touch_dataset(dir: &Path, base: &str, with_predictions: bool) {
        for suffix in all_suffixes() {
            if suffix.ends_with(".pred") && !with_predictions {
                continue;
            }
            std::fs::write(dir.join(format!("{base}{suffix}")), "").unwrap();
        }
    }

    #[test]
    fn finds_complete_datasets_sorted() {
        let tmp = tempfile::TempDir::new().unwrap();
        touch_dataset(tmp.path(), "zeta", true);
        touch_dataset(tmp.path(), "alpha", true);
        std::fs::write(tmp.path().join("notes.txt"), "").unwrap();

        assert_eq!(find_datasets(tmp.path(), true).unwrap(), ["alpha", "zeta"]);
    }

    #[test]
    fn incomplete_datasets_are_skipped() {
        let tmp = tempfile::TempDir::new().unwrap();
        touch_dataset(tmp.path(), "full", true);
        touch_dataset(tmp.path(), "partial", false);
        std::fs::remove_file(tmp.path().join("full.relations")).unwrap();

        assert!(find_datasets(tmp.path(), true).unwrap().is_empty());
        assert_eq!(find_datasets(tmp.path(), false).unwrap(), ["partial"]);
    }

    #[test]
    fn dotted_basenames() {
        let tmp = tempfile::TempDir::new().unwrap();
        touch_dataset(tmp.path(), "family.v2", true);
        assert_eq!(find_datasets(tmp.path(), true).unwrap(), ["family.v2"]);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let tmp = tempfile::TempDir::new().unwrap();
        let err = find_datasets(&tmp.path().join("nope"), true).unwrap_err();
        assert!(matches!(err, CodecError::Io { .. }));
    }
}
