//! Failures of the reinsertion pass.

use std::fmt;

use markup::ParseError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnnotateError {
    /// The original document could not be parsed.
    Malformed(ParseError),
    /// The annotated text ran out of glyphs while a text or tail run still
    /// needed characters. The annotator corrupted the text; truncating
    /// silently would misalign every later run.
    AlignmentUnderrun {
        tag: String,
        needed: usize,
        consumed: usize,
    },
}

impl fmt::Display for AnnotateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnnotateError::Malformed(err) => write!(f, "malformed markup: {err}"),
            AnnotateError::AlignmentUnderrun {
                tag,
                needed,
                consumed,
            } => write!(
                f,
                "annotated text underruns a run of <{tag}>: needed {needed} glyphs, got {consumed}"
            ),
        }
    }
}

impl std::error::Error for AnnotateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnnotateError::Malformed(err) => Some(err),
            AnnotateError::AlignmentUnderrun { .. } => None,
        }
    }
}

impl From<ParseError> for AnnotateError {
    fn from(err: ParseError) -> Self {
        AnnotateError::Malformed(err)
    }
}
