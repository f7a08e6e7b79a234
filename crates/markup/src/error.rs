//! Parse errors for document construction.

use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParseErrorKind {
    UnexpectedEof,
    MalformedTag,
    MismatchedEndTag,
    TextOutsideRoot,
    MultipleRoots,
    NoRootElement,
}

/// A fatal parse failure. Carries the byte position and the offending
/// source region so callers can report what could not be parsed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParseError {
    pub kind: ParseErrorKind,
    pub position: usize,
    pub snippet: String,
}

const SNIPPET_LEN: usize = 40;

impl ParseError {
    pub(crate) fn at(kind: ParseErrorKind, position: usize, input: &str) -> Self {
        let start = position.min(input.len());
        let mut end = (start + SNIPPET_LEN).min(input.len());
        while !input.is_char_boundary(end) {
            end -= 1;
        }
        Self {
            kind,
            position,
            snippet: input[start..end].to_string(),
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let what = match self.kind {
            ParseErrorKind::UnexpectedEof => "unexpected end of input",
            ParseErrorKind::MalformedTag => "malformed tag",
            ParseErrorKind::MismatchedEndTag => "end tag does not match open element",
            ParseErrorKind::TextOutsideRoot => "text content outside the root element",
            ParseErrorKind::MultipleRoots => "more than one root element",
            ParseErrorKind::NoRootElement => "no root element",
        };
        write!(f, "{what} at byte {}: {:?}", self.position, self.snippet)
    }
}

impl std::error::Error for ParseError {}
