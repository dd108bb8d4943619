//! # Note Tokenizer
//!
//! Splits free-form tablature text into [`Segment`]s: note tokens and the
//! literal text between them.
//!
//! A note token is one ASCII digit followed by any number of apostrophes
//! (`1`, `4'`, `2''`). The match is greedy and ASCII only. Everything else,
//! including whitespace and newlines, is literal.
//!
//! ## Guarantees
//! - Concatenating segment texts reproduces the input exactly.
//! - Adjacent notes (`12`) stay separate `Note` segments.
//! - The empty string produces no segments.
//! - Tokenizing never fails.
//!
//! ## Example
//! ```rust
//! use kalimba::lexer::{tokenize, SegmentKind};
//!
//! let segments = tokenize("1'' world 2'");
//! let kinds: Vec<_> = segments.iter().map(|s| (s.kind, s.text)).collect();
//! assert_eq!(
//!     kinds,
//!     vec![
//!         (SegmentKind::Note, "1''"),
//!         (SegmentKind::Literal, " world "),
//!         (SegmentKind::Note, "2'"),
//!     ]
//! );
//! ```

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

static NOTE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"[0-9]'*").expect("valid note regex"));
static NOTE_ID_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]'*$").expect("valid note id regex"));

/// Segment classification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SegmentKind {
    Note,
    Literal,
}

/// A slice of the input with its byte offset
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment<'a> {
    pub kind: SegmentKind,
    pub text: &'a str,
    pub offset: usize,
}

impl<'a> Segment<'a> {
    fn note(text: &'a str, offset: usize) -> Self {
        Self {
            kind: SegmentKind::Note,
            text,
            offset,
        }
    }

    fn literal(text: &'a str, offset: usize) -> Self {
        Self {
            kind: SegmentKind::Literal,
            text,
            offset,
        }
    }

    pub fn is_note(&self) -> bool {
        self.kind == SegmentKind::Note
    }
}

/// Tokenize a string into note and literal segments.
pub fn tokenize(input: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for m in NOTE_RE.find_iter(input) {
        if m.start() > last {
            segments.push(Segment::literal(&input[last..m.start()], last));
        }
        segments.push(Segment::note(m.as_str(), m.start()));
        last = m.end();
    }

    if last < input.len() {
        segments.push(Segment::literal(&input[last..], last));
    }

    segments
}

/// Tokenize each `\n`-separated line independently.
///
/// A trailing `\r` is dropped from each line so CRLF text yields the same
/// rows as LF text. Offsets are relative to the start of each line. An empty
/// document still yields one (empty) line.
pub fn tokenize_lines(text: &str) -> Vec<Vec<Segment<'_>>> {
    text.split('\n')
        .map(|line| tokenize(line.strip_suffix('\r').unwrap_or(line)))
        .collect()
}

/// Whether `s` is exactly one note token.
pub fn is_note_id(s: &str) -> bool {
    NOTE_ID_RE.is_match(s)
}

/// Distinct note identifiers in order of first appearance.
pub fn note_ids(text: &str) -> Vec<&str> {
    let mut seen: Vec<&str> = Vec::new();
    for m in NOTE_RE.find_iter(text) {
        if !seen.contains(&m.as_str()) {
            seen.push(m.as_str());
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds<'a>(segments: &[Segment<'a>]) -> Vec<(SegmentKind, &'a str)> {
        segments.iter().map(|s| (s.kind, s.text)).collect()
    }

    #[test]
    fn test_spaced_notes() {
        let segments = tokenize("1 2 3");
        assert_eq!(
            kinds(&segments),
            vec![
                (SegmentKind::Note, "1"),
                (SegmentKind::Literal, " "),
                (SegmentKind::Note, "2"),
                (SegmentKind::Literal, " "),
                (SegmentKind::Note, "3"),
            ]
        );
    }

    #[test]
    fn test_plain_text_is_one_literal() {
        let segments = tokenize("hello");
        assert_eq!(kinds(&segments), vec![(SegmentKind::Literal, "hello")]);
    }

    #[test]
    fn test_primes_are_greedy() {
        let segments = tokenize("1'' world 2'");
        assert_eq!(
            kinds(&segments),
            vec![
                (SegmentKind::Note, "1''"),
                (SegmentKind::Literal, " world "),
                (SegmentKind::Note, "2'"),
            ]
        );

        let segments = tokenize("5'''''");
        assert_eq!(kinds(&segments), vec![(SegmentKind::Note, "5'''''")]);
    }

    #[test]
    fn test_empty_input() {
        assert!(tokenize("").is_empty());
    }

    #[test]
    fn test_adjacent_notes_not_merged() {
        let segments = tokenize("12'3");
        assert_eq!(
            kinds(&segments),
            vec![
                (SegmentKind::Note, "1"),
                (SegmentKind::Note, "2'"),
                (SegmentKind::Note, "3"),
            ]
        );
    }

    #[test]
    fn test_lone_apostrophe_is_literal() {
        let segments = tokenize("' 1 '");
        assert_eq!(
            kinds(&segments),
            vec![
                (SegmentKind::Literal, "' "),
                (SegmentKind::Note, "1"),
                (SegmentKind::Literal, " '"),
            ]
        );
    }

    #[test]
    fn test_zero_eight_nine_are_notes() {
        let segments = tokenize("0 8' 9''");
        let notes: Vec<_> = segments.iter().filter(|s| s.is_note()).map(|s| s.text).collect();
        assert_eq!(notes, vec!["0", "8'", "9''"]);
    }

    #[test]
    fn test_non_ascii_digits_are_literal() {
        let segments = tokenize("٣ 1");
        assert_eq!(
            kinds(&segments),
            vec![(SegmentKind::Literal, "٣ "), (SegmentKind::Note, "1")]
        );
    }

    #[test]
    fn test_offsets_track_bytes() {
        let segments = tokenize("é1 2");
        let offsets: Vec<_> = segments.iter().map(|s| s.offset).collect();
        assert_eq!(offsets, vec![0, 2, 3, 4]);
    }

    #[test]
    fn test_reconstruction() {
        let inputs = [
            "",
            "hello",
            "1 2 3",
            "1''2'x'''y",
            "  leading and trailing  ",
            "mixed\nlines 4' 5\n\n6''",
            "'''",
            "ümlaut 7'' ñ",
        ];
        for input in inputs {
            let rebuilt: String = tokenize(input).iter().map(|s| s.text).collect();
            assert_eq!(rebuilt, input);
        }
    }

    #[test]
    fn test_newlines_stay_in_literals() {
        let segments = tokenize("1\n2");
        assert_eq!(
            kinds(&segments),
            vec![
                (SegmentKind::Note, "1"),
                (SegmentKind::Literal, "\n"),
                (SegmentKind::Note, "2"),
            ]
        );
    }

    #[test]
    fn test_tokenize_lines() {
        let lines = tokenize_lines("1 2\n\nintro 3'");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0].len(), 3);
        assert!(lines[1].is_empty());
        assert_eq!(
            kinds(&lines[2]),
            vec![(SegmentKind::Literal, "intro "), (SegmentKind::Note, "3'")]
        );
        assert_eq!(lines[2][1].offset, 6);
    }

    #[test]
    fn test_tokenize_lines_crlf_matches_lf() {
        let crlf = tokenize_lines("1 2\r\n\r\nintro 3'\r\n");
        let lf = tokenize_lines("1 2\n\nintro 3'\n");
        assert_eq!(crlf, lf);
        assert!(crlf.iter().flatten().all(|s| !s.text.contains('\r')));
    }

    #[test]
    fn test_tokenize_lines_keeps_inner_carriage_return() {
        let lines = tokenize_lines("1\r2");
        assert_eq!(
            kinds(&lines[0]),
            vec![
                (SegmentKind::Note, "1"),
                (SegmentKind::Literal, "\r"),
                (SegmentKind::Note, "2"),
            ]
        );
    }

    #[test]
    fn test_is_note_id() {
        assert!(is_note_id("1"));
        assert!(is_note_id("7''"));
        assert!(is_note_id("0'"));
        assert!(!is_note_id(""));
        assert!(!is_note_id("12"));
        assert!(!is_note_id("'1"));
        assert!(!is_note_id("1 "));
    }

    #[test]
    fn test_note_ids_first_appearance() {
        assert_eq!(note_ids("3 1 3' 1 2"), vec!["3", "1", "3'", "2"]);
        assert!(note_ids("no notes here").is_empty());
    }
}
