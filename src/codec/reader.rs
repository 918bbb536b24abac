//! Parsing of vocabulary and data files.
//!
//! Every function here either returns a complete result or the first error it
//! met; callers assemble the graph only once all files were parsed.

use std::collections::HashMap;
use std::path::Path;

use crate::config::CodecConfig;
use crate::error::{CodecError, CodecResult, StoreError};
use crate::graph::KnowledgeGraph;
use crate::store::{Layer, Polarity};
use crate::vocab::{
    ClassId, IndividualId, LiteralId, RelationId, VocabId, Vocabulary, VocabularyRegistry,
};

use super::files::{DataFile, DataKind, DatasetFiles, VocabFile};
use super::line::{Line, Span, Tokens, lines, parse_id, parse_tri_val};

/// Read a whole file, or `None` if it does not exist.
pub(crate) fn read_text(path: &Path) -> CodecResult<Option<String>> {
    match std::fs::read_to_string(path) {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
        Err(e) => Err(CodecError::Io {
            file: path.display().to_string(),
            source: e,
        }),
    }
}

fn require_text(path: &Path) -> CodecResult<String> {
    read_text(path)?.ok_or_else(|| CodecError::MissingFile {
        file: path.display().to_string(),
    })
}

/// Read the four vocabulary files.
pub(crate) fn read_vocabulary(files: &DatasetFiles) -> CodecResult<VocabularyRegistry> {
    let individuals = read_vocab_file::<IndividualId>(files)?;
    let classes = read_vocab_file::<ClassId>(files)?;
    let relations = read_vocab_file::<RelationId>(files)?;
    let literals = read_vocab_file::<LiteralId>(files)?;
    Ok(VocabularyRegistry::from_parts(
        individuals,
        classes,
        relations,
        literals,
    ))
}

fn read_vocab_file<I: VocabId>(files: &DatasetFiles) -> CodecResult<Vocabulary<I>> {
    let path = files.vocab_path(VocabFile(I::NAMESPACE));
    let file = path.display().to_string();
    let content = require_text(&path)?;
    let vocab = parse_vocabulary(&file, &content)?;
    tracing::debug!(file = %file, entries = vocab.len(), "read vocabulary");
    Ok(vocab)
}

/// Parse `<id> <name>` lines, checking that each ID equals its 0-based line index.
pub(crate) fn parse_vocabulary<I: VocabId>(file: &str, content: &str) -> CodecResult<Vocabulary<I>> {
    let mut vocab = Vocabulary::new();
    for line in lines(content) {
        let mut tokens = line.tokens();
        let Some(id) = tokens.next() else {
            return Err(format_error(file, &line, line.full_span(), "blank line"));
        };
        let found = parse_id(id.text).map_err(|reason| format_error(file, &line, id.span, reason))?;
        let expected = vocab.len();
        if found != expected {
            return Err(format_error(
                file,
                &line,
                id.span,
                format!("expected ID {expected}, found {found}"),
            ));
        }
        let Some(name) = tokens.next() else {
            return Err(format_error(
                file,
                &line,
                end_span(&line),
                format!("missing name for ID {found}"),
            ));
        };
        if let Some(extra) = tokens.next() {
            return Err(format_error(
                file,
                &line,
                extra.span,
                "unexpected text after name; names must not contain whitespace",
            ));
        }
        vocab
            .register(name.text)
            .map_err(|source| CodecError::Vocab {
                file: file.to_string(),
                line: line.number,
                source,
            })?;
    }
    Ok(vocab)
}

/// Read the nine data files of `files` into `kg`.
///
/// `kg` must hold the dataset's vocabulary and no statements.
pub(crate) fn read_data(
    files: &DatasetFiles,
    config: &CodecConfig,
    kg: &mut KnowledgeGraph,
) -> CodecResult<()> {
    for data in DataFile::all() {
        let path = files.data_path(data);
        let file = path.display().to_string();
        let content = match read_text(&path)? {
            Some(content) => content,
            None if data.is_optional(config.require_prediction_files) => {
                tracing::warn!(file = %file, "prediction file missing, reading an empty layer");
                continue;
            }
            None => return Err(CodecError::MissingFile { file }),
        };

        let statements = match data.kind {
            DataKind::Classes => parse_memberships(kg, data.layer, &file, &content)?,
            DataKind::Relations => parse_relations(kg, data.layer, &file, &content)?,
            DataKind::Literals => parse_literals(kg, data.layer, &file, &content)?,
        };
        tracing::debug!(file = %file, layer = %data.layer, statements, "read data file");
    }
    Ok(())
}

/// Parse a class-membership matrix: one row per individual, one cell per class.
///
/// Returns the number of known cells.
pub(crate) fn parse_memberships(
    kg: &mut KnowledgeGraph,
    layer: Layer,
    file: &str,
    content: &str,
) -> CodecResult<usize> {
    let individuals = kg.num_individuals();
    let classes = kg.num_classes();
    let mut rows = 0;
    let mut known = 0;

    for line in lines(content) {
        if line.number > individuals {
            return Err(format_error(
                file,
                &line,
                line.full_span(),
                format!("expected {individuals} rows (one per individual), found more"),
            ));
        }
        let cells: Vec<_> = line.tokens().collect();
        if cells.len() != classes {
            let reason = if line.is_blank() {
                format!("blank line, expected {classes} values (one per class)")
            } else {
                format!(
                    "expected {classes} values (one per class), found {}",
                    cells.len()
                )
            };
            return Err(format_error(file, &line, line.full_span(), reason));
        }

        let individual = resolve::<IndividualId>(kg.vocab(), file, &line, line.number - 1)?;
        for (index, cell) in cells.iter().enumerate() {
            let truth = parse_tri_val(cell.text)
                .map_err(|reason| format_error(file, &line, cell.span, reason))?;
            if !truth.is_known() {
                continue;
            }
            let class = resolve::<ClassId>(kg.vocab(), file, &line, index)?;
            kg.set_membership(layer, individual, class, truth)
                .map_err(|e| store_error(file, &line, e))?;
            known += 1;
        }
        rows += 1;
    }

    if rows != individuals {
        return Err(CodecError::format(
            file,
            rows + 1,
            "",
            0..0,
            format!("expected {individuals} rows (one per individual), found {rows}"),
        ));
    }
    Ok(known)
}

/// Parse `<+|-> <subject> <relation> <object>` lines.
pub(crate) fn parse_relations(
    kg: &mut KnowledgeGraph,
    layer: Layer,
    file: &str,
    content: &str,
) -> CodecResult<usize> {
    let mut first_seen: HashMap<(IndividualId, RelationId, IndividualId), usize> = HashMap::new();

    for line in lines(content) {
        let mut tokens = line.tokens();
        let Some(sign) = tokens.next() else {
            return Err(format_error(file, &line, line.full_span(), "blank line"));
        };
        let polarity = match sign.text {
            "+" => Polarity::Positive,
            "-" => Polarity::Negative,
            other => {
                return Err(format_error(
                    file,
                    &line,
                    sign.span,
                    format!("expected sign `+` or `-` followed by whitespace, found {other:?}"),
                ));
            }
        };
        let subject = next_id(file, &line, &mut tokens, "subject")?;
        let predicate = next_id(file, &line, &mut tokens, "relation")?;
        let object = next_id(file, &line, &mut tokens, "object")?;
        expect_end(file, &line, &mut tokens, "object ID")?;

        let subject = resolve::<IndividualId>(kg.vocab(), file, &line, subject)?;
        let predicate = resolve::<RelationId>(kg.vocab(), file, &line, predicate)?;
        let object = resolve::<IndividualId>(kg.vocab(), file, &line, object)?;
        let key = (subject, predicate, object);

        match kg.assert_relation(layer, subject, predicate, object, polarity) {
            Ok(true) => {
                first_seen.insert(key, line.number);
            }
            Ok(false) => {
                return Err(conflict(file, &line, first_seen.get(&key), "duplicate of line"));
            }
            Err(StoreError::Conflict { .. }) => {
                return Err(conflict(file, &line, first_seen.get(&key), "contradicts line"));
            }
            Err(e) => return Err(store_error(file, &line, e)),
        }
    }
    Ok(first_seen.len())
}

/// Parse `<individual> <literal> <value>` lines; the value is the verbatim rest of the line.
pub(crate) fn parse_literals(
    kg: &mut KnowledgeGraph,
    layer: Layer,
    file: &str,
    content: &str,
) -> CodecResult<usize> {
    let mut first_seen: HashMap<(IndividualId, LiteralId, &str), usize> = HashMap::new();

    for line in lines(content) {
        let mut tokens = line.tokens();
        if line.is_blank() {
            return Err(format_error(file, &line, line.full_span(), "blank line"));
        }
        let individual = next_id(file, &line, &mut tokens, "individual")?;
        let literal = next_id(file, &line, &mut tokens, "literal type")?;
        let Some(value) = tokens.rest() else {
            return Err(format_error(
                file,
                &line,
                end_span(&line),
                "missing literal value",
            ));
        };

        let individual = resolve::<IndividualId>(kg.vocab(), file, &line, individual)?;
        let literal = resolve::<LiteralId>(kg.vocab(), file, &line, literal)?;
        let key = (individual, literal, value.text);

        match kg.add_literal(layer, individual, literal, value.text) {
            Ok(true) => {
                first_seen.insert(key, line.number);
            }
            Ok(false) => {
                return Err(conflict(file, &line, first_seen.get(&key), "duplicate of line"));
            }
            Err(e) => return Err(store_error(file, &line, e)),
        }
    }
    Ok(first_seen.len())
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn format_error(file: &str, line: &Line<'_>, span: Span, reason: impl Into<String>) -> CodecError {
    CodecError::format(file, line.number, line.text, span.range(), reason)
}

fn end_span(line: &Line<'_>) -> Span {
    let end = line.text.len();
    Span { start: end, end }
}

fn next_id(file: &str, line: &Line<'_>, tokens: &mut Tokens<'_>, what: &str) -> CodecResult<usize> {
    let Some(token) = tokens.next() else {
        return Err(format_error(
            file,
            line,
            end_span(line),
            format!("missing {what} ID"),
        ));
    };
    parse_id(token.text).map_err(|reason| format_error(file, line, token.span, reason))
}

fn expect_end(file: &str, line: &Line<'_>, tokens: &mut Tokens<'_>, after: &str) -> CodecResult<()> {
    match tokens.next() {
        Some(extra) => Err(format_error(
            file,
            line,
            extra.span,
            format!("unexpected text after {after}"),
        )),
        None => Ok(()),
    }
}

fn resolve<I: VocabId>(
    vocab: &VocabularyRegistry,
    file: &str,
    line: &Line<'_>,
    index: usize,
) -> CodecResult<I> {
    vocab
        .namespace::<I>()
        .id_at(index)
        .map_err(|source| CodecError::Vocab {
            file: file.to_string(),
            line: line.number,
            source,
        })
}

fn conflict(file: &str, line: &Line<'_>, first: Option<&usize>, what: &str) -> CodecError {
    let reason = match first {
        Some(first) => format!("{what} {first}"),
        None => format!("{what} unknown"),
    };
    CodecError::Conflict {
        file: file.to_string(),
        line: line.number,
        statement: line.text.trim().to_string(),
        reason,
    }
}

fn store_error(file: &str, line: &Line<'_>, error: StoreError) -> CodecError {
    match error {
        StoreError::Vocab(source) => CodecError::Vocab {
            file: file.to_string(),
            line: line.number,
            source,
        },
        other @ StoreError::Conflict { .. } => CodecError::Conflict {
            file: file.to_string(),
            line: line.number,
            statement: line.text.trim().to_string(),
            reason: other.to_string(),
        },
        other @ StoreError::InvalidLiteralValue { .. } => {
            format_error(file, line, line.full_span(), other.to_string())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::VocabError;
    use crate::store::Truth;

    fn graph(individuals: &[&str], classes: &[&str], relations: &[&str], literals: &[&str]) -> KnowledgeGraph {
        let mut kg = KnowledgeGraph::new();
        for name in individuals {
            kg.add_individual(*name).unwrap();
        }
        for name in classes {
            kg.add_class(*name).unwrap();
        }
        for name in relations {
            kg.add_relation(*name).unwrap();
        }
        for name in literals {
            kg.add_literal_type(*name).unwrap();
        }
        kg
    }

    fn ind(index: usize) -> IndividualId {
        IndividualId::from_index(index).unwrap()
    }

    #[test]
    fn vocabulary_lines() {
        let vocab: Vocabulary<ClassId> = parse_vocabulary("kg.classes", "0 A\n1\tB\r\n 2  C \n").unwrap();
        let names: Vec<_> = vocab.iter().map(|(_, n)| n).collect();
        assert_eq!(names, ["A", "B", "C"]);
    }

    #[test]
    fn vocabulary_ids_must_be_positional() {
        let err = parse_vocabulary::<ClassId>("kg.classes", "0 A\n2 B\n").unwrap_err();
        assert_eq!(err.line(), Some(2));
        assert!(err.to_string().contains("expected ID 1, found 2"));

        let err = parse_vocabulary::<ClassId>("kg.classes", "0 A\n0 B\n").unwrap_err();
        assert!(err.to_string().contains("expected ID 1, found 0"));
    }

    #[test]
    fn vocabulary_grammar_errors() {
        for (content, line) in [
            ("0\n", 1),
            ("0 A\n\n", 2),
            ("0 two words\n", 1),
            ("x A\n", 1),
            ("+0 A\n", 1),
        ] {
            let err = parse_vocabulary::<IndividualId>("kg.individuals", content).unwrap_err();
            assert!(matches!(err, CodecError::Format { .. }), "{content:?}: {err:?}");
            assert_eq!(err.line(), Some(line), "{content:?}");
        }
    }

    #[test]
    fn vocabulary_duplicate_name() {
        let err = parse_vocabulary::<RelationId>("kg.relations", "0 knows\n1 knows\n").unwrap_err();
        match err {
            CodecError::Vocab { line, source, .. } => {
                assert_eq!(line, 2);
                assert!(matches!(source, VocabError::DuplicateName { existing: 0, .. }));
            }
            other => panic!("expected vocab error, got {other:?}"),
        }
    }

    #[test]
    fn membership_matrix() {
        let mut kg = graph(&["i0", "i1"], &["A", "B"], &[], &[]);
        let known = parse_memberships(&mut kg, Layer::Fact, "kg.classes.data", "1 0\n0 -1\n").unwrap();
        assert_eq!(known, 2);
        let (a, b) = (ClassId::from_index(0).unwrap(), ClassId::from_index(1).unwrap());
        assert_eq!(kg.membership(Layer::Fact, ind(0), a), Truth::Positive);
        assert_eq!(kg.membership(Layer::Fact, ind(0), b), Truth::Unknown);
        assert_eq!(kg.membership(Layer::Fact, ind(1), a), Truth::Unknown);
        assert_eq!(kg.membership(Layer::Fact, ind(1), b), Truth::Negative);
    }

    #[test]
    fn membership_shape_is_checked() {
        let cases = [
            ("1 0\n", 2),           // too few rows
            ("1 0\n0 -1\n1 1\n", 3), // too many rows
            ("1\n0 -1\n", 1),       // short row
            ("1 0 1\n0 -1\n", 1),   // long row
            ("1 0\n0 2\n", 2),      // bad cell
            ("1 0\n\n", 2),         // blank row
        ];
        for (content, line) in cases {
            let mut kg = graph(&["i0", "i1"], &["A", "B"], &[], &[]);
            let err = parse_memberships(&mut kg, Layer::Fact, "kg.classes.data", content).unwrap_err();
            assert!(matches!(err, CodecError::Format { .. }), "{content:?}: {err:?}");
            assert_eq!(err.line(), Some(line), "{content:?}");
        }
    }

    #[test]
    fn membership_rows_without_classes_are_empty() {
        let mut kg = graph(&["i0", "i1"], &[], &[], &[]);
        assert_eq!(parse_memberships(&mut kg, Layer::Inferred, "f", "\n\n").unwrap(), 0);
        let mut empty = graph(&[], &["A"], &[], &[]);
        assert_eq!(parse_memberships(&mut empty, Layer::Fact, "f", "").unwrap(), 0);
    }

    #[test]
    fn relation_lines() {
        let mut kg = graph(&["a", "b", "c"], &[], &["knows"], &[]);
        let count = parse_relations(&mut kg, Layer::Fact, "kg.relations.data", "+ 1 0 2\n-\t0  0 1 \n").unwrap();
        assert_eq!(count, 2);
        let knows = RelationId::from_index(0).unwrap();
        assert_eq!(kg.query_relation(Layer::Fact, ind(1), knows, ind(2)), Truth::Positive);
        assert_eq!(kg.query_relation(Layer::Fact, ind(0), knows, ind(1)), Truth::Negative);
    }

    #[test]
    fn relation_conflicts_within_file() {
        let mut kg = graph(&["a", "b", "c"], &[], &["knows"], &[]);
        let err = parse_relations(&mut kg, Layer::Fact, "kg.relations.data", "+ 1 0 2\n- 1 0 2\n").unwrap_err();
        match err {
            CodecError::Conflict { line, reason, statement, .. } => {
                assert_eq!(line, 2);
                assert_eq!(statement, "- 1 0 2");
                assert_eq!(reason, "contradicts line 1");
            }
            other => panic!("expected conflict, got {other:?}"),
        }

        let mut kg = graph(&["a", "b", "c"], &[], &["knows"], &[]);
        let err = parse_relations(&mut kg, Layer::Fact, "f", "+ 1 0 2\n+ 0 0 0\n+ 1 0 2\n").unwrap_err();
        assert!(matches!(err, CodecError::Conflict { line: 3, .. }));
    }

    #[test]
    fn relation_grammar_errors() {
        for content in ["+1 0 2\n", "* 1 0 2\n", "+ 1 0\n", "+ 1 0 2 3\n", "+ 1 x 2\n", "\n"] {
            let mut kg = graph(&["a", "b", "c"], &[], &["knows"], &[]);
            let err = parse_relations(&mut kg, Layer::Fact, "f", content).unwrap_err();
            assert!(matches!(err, CodecError::Format { line: 1, .. }), "{content:?}: {err:?}");
        }
    }

    #[test]
    fn relation_ids_are_checked_against_vocabulary() {
        let mut kg = graph(&["a", "b"], &[], &["knows"], &[]);
        let err = parse_relations(&mut kg, Layer::Fact, "f", "+ 0 0 5\n").unwrap_err();
        assert!(matches!(
            err,
            CodecError::Vocab {
                source: VocabError::UnknownEntry { .. },
                ..
            }
        ));
        let err = parse_relations(&mut kg, Layer::Fact, "f", "+ 0 1 1\n").unwrap_err();
        assert!(matches!(err, CodecError::Vocab { line: 1, .. }));
    }

    #[test]
    fn literal_values_are_line_remainders() {
        let mut kg = graph(&["a"], &[], &[], &["name", "note"]);
        let content = "0 0 Ada Lovelace\n0\t1   spaced  out\t\n0 0 Ada\n";
        assert_eq!(parse_literals(&mut kg, Layer::Predicted, "f", content).unwrap(), 3);

        let name = LiteralId::from_index(0).unwrap();
        let note = LiteralId::from_index(1).unwrap();
        let names: Vec<_> = kg.literal_values(Layer::Predicted, ind(0), name).collect();
        assert_eq!(names, ["Ada", "Ada Lovelace"]);
        let notes: Vec<_> = kg.literal_values(Layer::Predicted, ind(0), note).collect();
        assert_eq!(notes, ["spaced  out\t"]);
    }

    #[test]
    fn literal_errors() {
        let mut kg = graph(&["a"], &[], &[], &["name"]);
        let err = parse_literals(&mut kg, Layer::Fact, "f", "0 0\n").unwrap_err();
        assert!(matches!(err, CodecError::Format { line: 1, .. }));

        let mut kg = graph(&["a"], &[], &[], &["name"]);
        let err = parse_literals(&mut kg, Layer::Fact, "f", "0 0 x\n0 0 x\n").unwrap_err();
        match err {
            CodecError::Conflict { line, reason, .. } => {
                assert_eq!(line, 2);
                assert_eq!(reason, "duplicate of line 1");
            }
            other => panic!("expected conflict, got {other:?}"),
        }

        let mut kg = graph(&["a"], &[], &[], &["name"]);
        let err = parse_literals(&mut kg, Layer::Fact, "f", "0 1 x\n").unwrap_err();
        assert!(matches!(err, CodecError::Vocab { .. }));
    }
}
