//! Line grammar shared by all rel-data files.
//!
//! Lines are split on `\n`; a `\r` right before the newline is dropped.
//! Tokens are separated by runs of blanks and tabs, and every token keeps its
//! byte span within the line for error reporting.

use std::ops::Range;

use crate::store::Truth;

/// Byte-level span of a token within its line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

/// A whitespace-delimited token.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    pub span: Span,
}

/// One line of a file, numbered from 1.
#[derive(Debug, Clone, Copy)]
pub struct Line<'a> {
    pub number: usize,
    pub text: &'a str,
}

impl<'a> Line<'a> {
    pub fn tokens(&self) -> Tokens<'a> {
        Tokens {
            text: self.text,
            pos: 0,
        }
    }

    /// Span covering the whole line.
    pub fn full_span(&self) -> Span {
        Span {
            start: 0,
            end: self.text.len(),
        }
    }

    /// Whether the line holds nothing but blanks and tabs.
    pub fn is_blank(&self) -> bool {
        self.text.bytes().all(is_ws)
    }
}

/// Split file content into numbered lines.
///
/// A final newline does not start another line, so `"a\nb\n"` has two lines
/// and an empty file has none.
pub fn lines(content: &str) -> impl Iterator<Item = Line<'_>> + '_ {
    content
        .split_terminator('\n')
        .enumerate()
        .map(|(index, text)| Line {
            number: index + 1,
            text: text.strip_suffix('\r').unwrap_or(text),
        })
}

fn is_ws(byte: u8) -> bool {
    byte == b' ' || byte == b'\t'
}

/// Iterator over the tokens of a line.
#[derive(Debug, Clone)]
pub struct Tokens<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn skip_ws(&mut self) {
        let bytes = self.text.as_bytes();
        while self.pos < bytes.len() && is_ws(bytes[self.pos]) {
            self.pos += 1;
        }
    }

    /// Everything after the next run of blanks and tabs, verbatim.
    pub fn rest(&mut self) -> Option<Token<'a>> {
        self.skip_ws();
        if self.pos >= self.text.len() {
            return None;
        }
        let start = self.pos;
        self.pos = self.text.len();
        Some(Token {
            text: &self.text[start..],
            span: Span {
                start,
                end: self.text.len(),
            },
        })
    }
}

impl<'a> Iterator for Tokens<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Token<'a>> {
        self.skip_ws();
        let bytes = self.text.as_bytes();
        if self.pos >= bytes.len() {
            return None;
        }
        let start = self.pos;
        while self.pos < bytes.len() && !is_ws(bytes[self.pos]) {
            self.pos += 1;
        }
        Some(Token {
            text: &self.text[start..self.pos],
            span: Span {
                start,
                end: self.pos,
            },
        })
    }
}

/// Parse an `ID` token: one or more ASCII digits.
pub fn parse_id(token: &str) -> Result<usize, String> {
    if token.is_empty() || !token.bytes().all(|b| b.is_ascii_digit()) {
        return Err(format!("expected a non-negative integer ID, found {token:?}"));
    }
    token
        .parse()
        .map_err(|_| format!("ID {token} is out of range"))
}

/// Parse a class-membership cell.
pub fn parse_tri_val(token: &str) -> Result<Truth, String> {
    match token {
        "1" => Ok(Truth::Positive),
        "0" => Ok(Truth::Unknown),
        "-1" => Ok(Truth::Negative),
        other => Err(format!("expected one of 1, 0, -1, found {other:?}")),
    }
}

/// Render a class-membership cell.
pub fn render_tri_val(truth: Truth) -> &'static str {
    match truth {
        Truth::Positive => "1",
        Truth::Unknown => "0",
        Truth::Negative => "-1",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn texts(line: &str) -> Vec<&str> {
        Line {
            number: 1,
            text: line,
        }
        .tokens()
        .map(|t| t.text)
        .collect()
    }

    #[test]
    fn line_splitting() {
        let numbered: Vec<_> = lines("a\r\nb\n\nc").map(|l| (l.number, l.text)).collect();
        assert_eq!(numbered, [(1, "a"), (2, "b"), (3, ""), (4, "c")]);
        assert_eq!(lines("").count(), 0);
        assert_eq!(lines("x\n").count(), 1);
        assert_eq!(lines("\n").count(), 1);
    }

    #[test]
    fn tokens_split_on_blank_and_tab_runs() {
        assert_eq!(texts("  0 \t\tfoo  "), ["0", "foo"]);
        assert!(texts(" \t ").is_empty());
    }

    #[test]
    fn token_spans_point_into_line() {
        let line = Line {
            number: 1,
            text: " + 12",
        };
        let spans: Vec<_> = line.tokens().map(|t| t.span.range()).collect();
        assert_eq!(spans, [1..2, 3..5]);
    }

    #[test]
    fn rest_is_verbatim() {
        let line = Line {
            number: 1,
            text: "0 1\t  a  b\t ",
        };
        let mut tokens = line.tokens();
        tokens.next();
        tokens.next();
        let rest = tokens.rest().unwrap();
        assert_eq!(rest.text, "a  b\t ");
        assert_eq!(rest.span.start, 6);
        assert!(tokens.rest().is_none());
    }

    #[test]
    fn ids_are_plain_digits() {
        assert_eq!(parse_id("0").unwrap(), 0);
        assert_eq!(parse_id("0042").unwrap(), 42);
        for bad in ["", "+1", "-1", "1a", "x"] {
            assert!(parse_id(bad).is_err(), "{bad:?} should be rejected");
        }
        assert!(parse_id("99999999999999999999999999").unwrap_err().contains("out of range"));
    }

    #[test]
    fn tri_values() {
        assert_eq!(parse_tri_val("1").unwrap(), Truth::Positive);
        assert_eq!(parse_tri_val("0").unwrap(), Truth::Unknown);
        assert_eq!(parse_tri_val("-1").unwrap(), Truth::Negative);
        assert!(parse_tri_val("+1").is_err());
        assert!(parse_tri_val("2").is_err());
        for truth in [Truth::Positive, Truth::Unknown, Truth::Negative] {
            assert_eq!(parse_tri_val(render_tri_val(truth)).unwrap(), truth);
        }
    }
}
