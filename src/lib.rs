//! Reconciles markup documents with externally produced plain-text
//! annotations: strip the tags, hand the plain text to an annotator, and
//! merge its span markers back into the original tree without losing the
//! pre-existing inline markup.

pub use annotate::{
    AnnotateError, Glyphs, OpenSpan, Position, align, copy_prefix_declarations, curie_set,
    merge_siblings, promote_spans, reinsert, reinsert_into, strip,
};
pub use markup::{Document, Element, NodeId, ParseError, ParseErrorKind, compare_trees};
