//! Tree walker that aligns annotated text against the original tree.
//!
//! Walks the original elements in document order. An element's start visits
//! its text run, its end visits its tail run; each run of N characters
//! draws exactly N glyphs from the stream and hands the concatenation to
//! the span builder. Elements materialized by the builder during the pass
//! are skipped: membership in the id set captured before the pass decides
//! what counts as original.

use std::collections::HashSet;

use markup::{Document, NodeId};

use crate::error::AnnotateError;
use crate::glyphs::Glyphs;
use crate::merge::merge_siblings;
use crate::promote::promote_spans;
use crate::spans::{self, OpenSpan, Position};

/// Rebuilds `original` markup to carry the annotations in `annotated`,
/// canonicalizes, and serializes.
pub fn reinsert(annotated: &str, original: &str) -> Result<String, AnnotateError> {
    let mut doc = Document::parse(original)?;
    reinsert_into(annotated, &mut doc)?;
    Ok(doc.serialize())
}

/// As [`reinsert`], against an already-parsed document, mutating it in
/// place.
pub fn reinsert_into(annotated: &str, doc: &mut Document) -> Result<(), AnnotateError> {
    align(doc, annotated)?;
    promote_spans(doc);
    merge_siblings(doc);
    Ok(())
}

/// The raw alignment pass: reinsertion without canonicalization.
pub fn align(doc: &mut Document, annotated: &str) -> Result<(), AnnotateError> {
    let root = doc.root();
    let original: HashSet<NodeId> = doc.descendants(root).into_iter().collect();
    let mut glyphs = Glyphs::new(annotated);
    let mut open_spans: Vec<OpenSpan> = Vec::new();

    let rebuilt = walk(doc, root, &mut glyphs, &mut open_spans, &original)?;
    if rebuilt != root {
        doc.set_root(rebuilt);
    }
    Ok(())
}

fn walk(
    doc: &mut Document,
    id: NodeId,
    glyphs: &mut Glyphs<'_>,
    open_spans: &mut Vec<OpenSpan>,
    original: &HashSet<NodeId>,
) -> Result<NodeId, AnnotateError> {
    let mut anchor = id;

    if doc.get(id).text.is_some() {
        anchor = consume_run(doc, id, Position::Text, glyphs, open_spans)?;
    }

    // Snapshot before descending: the builder inserts spans into this list
    // while the walk is under way.
    let children = doc.children(anchor).to_vec();
    for child in children {
        if original.contains(&child) {
            walk(doc, child, glyphs, open_spans, original)?;
        }
    }

    if doc.get(anchor).tail.is_some() {
        anchor = consume_run(doc, anchor, Position::Tail, glyphs, open_spans)?;
    }

    Ok(anchor)
}

fn consume_run(
    doc: &mut Document,
    anchor: NodeId,
    position: Position,
    glyphs: &mut Glyphs<'_>,
    open_spans: &mut Vec<OpenSpan>,
) -> Result<NodeId, AnnotateError> {
    let run = match position {
        Position::Text => doc.get(anchor).text.as_deref(),
        Position::Tail => doc.get(anchor).tail.as_deref(),
    };
    let needed = run.map_or(0, |r| r.chars().count());

    let mut consumed = String::new();
    for drawn in 0..needed {
        match glyphs.next() {
            Some(glyph) => consumed.push_str(&glyph),
            None => {
                return Err(AnnotateError::AlignmentUnderrun {
                    tag: doc.get(anchor).tag.clone(),
                    needed,
                    consumed: drawn,
                });
            }
        }
    }
    log::trace!(
        target: "annotate.align",
        "consumed {needed} glyphs for {position:?} of <{}>",
        doc.get(anchor).tag
    );

    let (anchor, remaining) =
        spans::build(doc, anchor, &consumed, std::mem::take(open_spans), position);
    *open_spans = remaining;
    Ok(anchor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alignment_rebuilds_identical_text_in_place() {
        let mut doc =
            Document::parse("<div>with the <sc>l</sc>-tryptophan, we observed</div>").unwrap();
        align(&mut doc, "with the l-tryptophan, we observed").unwrap();
        assert_eq!(
            doc.serialize(),
            "<div>with the <sc>l</sc>-tryptophan, we observed</div>"
        );
    }

    #[test]
    fn underrun_is_a_fatal_contract_violation() {
        let mut doc = Document::parse("<div>twelve chars</div>").unwrap();
        let err = align(&mut doc, "short").unwrap_err();
        assert_eq!(
            err,
            AnnotateError::AlignmentUnderrun {
                tag: "div".to_string(),
                needed: 12,
                consumed: 5,
            }
        );
    }

    #[test]
    fn surplus_annotated_text_is_left_unconsumed() {
        let mut doc = Document::parse("<div>abc</div>").unwrap();
        align(&mut doc, "abc and much more").unwrap();
        assert_eq!(doc.serialize(), "<div>abc</div>");
    }

    #[test]
    fn malformed_original_markup_is_reported_with_the_offending_text() {
        let err = reinsert("text", "<div><p>text</div>").unwrap_err();
        let AnnotateError::Malformed(parse_err) = err else {
            panic!("expected a parse failure, got: {err:?}");
        };
        assert!(
            parse_err.snippet.starts_with("</div>"),
            "offending region should be attached, got: {parse_err:?}"
        );
    }

    #[test]
    fn span_crossing_runs_stays_open_across_the_boundary() {
        let mut doc = Document::parse("<div>ab <i>cd</i> ef</div>").unwrap();
        align(&mut doc, r##"ab <span resource="#x">cd ef</span>"##).unwrap();
        // Before canonicalization the annotation exists as nested
        // fragments: one inside <i>, one re-opened after it.
        assert_eq!(
            doc.serialize(),
            concat!(
                r##"<div>ab <i><span resource="#x">cd</span></i>"##,
                r##"<span resource="#x"> ef</span></div>"##
            )
        );
    }
}
