//! Promotion and merging as one canonicalization pipeline.

use annotate::{merge_siblings, promote_spans};
use markup::{Document, compare_trees};

const SPAN_SEQUENCE: &str = concat!(
    r##"<root><italic><span resource="#T3" typeof="d3o:Strain">P</span></italic>"##,
    r##"<span resource="#T3" typeof="d3o:Strain">2</span>"##,
    r##"<sub><span resource="#T3" typeof="d3o:Strain">1</span></sub></root>"##
);

#[test]
fn three_wrapped_spans_collapse_into_one() {
    let mut doc = Document::parse(SPAN_SEQUENCE).unwrap();
    promote_spans(&mut doc);
    merge_siblings(&mut doc);
    assert_eq!(
        doc.serialize(),
        concat!(
            r##"<root><span resource="#T3" typeof="d3o:Strain">"##,
            r#"<italic>P</italic>2<sub>1</sub></span></root>"#
        )
    );
}

#[test]
fn the_pipeline_is_idempotent() {
    let mut doc = Document::parse(SPAN_SEQUENCE).unwrap();
    promote_spans(&mut doc);
    merge_siblings(&mut doc);
    let once = Document::parse(&doc.serialize()).unwrap();

    promote_spans(&mut doc);
    merge_siblings(&mut doc);
    compare_trees(&once, &doc).expect("a second pass should change nothing");
}

#[test]
fn promotion_alone_is_idempotent() {
    let mut doc = Document::parse(SPAN_SEQUENCE).unwrap();
    promote_spans(&mut doc);
    let once = doc.serialize();
    promote_spans(&mut doc);
    assert_eq!(doc.serialize(), once);
}

#[test]
fn merging_alone_is_idempotent() {
    let mut doc = Document::parse(SPAN_SEQUENCE).unwrap();
    promote_spans(&mut doc);
    merge_siblings(&mut doc);
    let once = doc.serialize();
    merge_siblings(&mut doc);
    assert_eq!(doc.serialize(), once);
}

#[test]
fn unrelated_markup_passes_through_untouched() {
    let input = concat!(
        r#"<article><sec id="s1"><title>Results</title>"#,
        r#"<p>O<sub>2</sub> rose, see <xref rid="F1">Fig. 1</xref>.</p></sec></article>"#
    );
    let mut doc = Document::parse(input).unwrap();
    promote_spans(&mut doc);
    merge_siblings(&mut doc);
    assert_eq!(doc.serialize(), input);
}
