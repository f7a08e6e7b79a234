//! The stripping/reinsertion laws, end to end.

use annotate::{reinsert, strip};
use markup::Document;

/// Reinserting the untouched plain text must reproduce the serialized
/// original byte for byte.
fn assert_round_trip(markup: &str) {
    let canonical = Document::parse(markup)
        .expect("fixture should parse")
        .serialize();
    let rebuilt = reinsert(&strip(&canonical), &canonical).expect("round trip should rebuild");
    assert_eq!(rebuilt, canonical);
}

#[test]
fn stripping_and_reinsertion_are_inverses() {
    assert_round_trip("<div>with the indole precursor <sc>l</sc>-tryptophan, we observed</div>");
    assert_round_trip(r#"<sec id="s4.12"><title>CE-ESI-TOF-MS target analysis.</title></sec>"#);
    assert_round_trip(concat!(
        "<div>with the <italic>indole precursor l-tryptophan</italic>",
        ", we observed</div>"
    ));
}

#[test]
fn round_trip_survives_deep_nesting_and_attributes() {
    assert_round_trip(concat!(
        r#"<article><sec id="s1"><title>Results</title>"#,
        r#"<p>see [<xref ref-type="bibr" rid="B12">12</xref>] and Table "#,
        r#"<xref ref-type="table" rid="T1">1</xref>. O<sub>2</sub> rose.</p>"#,
        r#"</sec></article>"#
    ));
}

#[test]
fn round_trip_survives_multibyte_text() {
    assert_round_trip("<p>naïve <i>café</i> Σ-algebra</p>");
}

#[test]
fn stripping_yields_the_plain_text_view() {
    assert_eq!(
        strip("<div>with the indole precursor <sc>l</sc>-tryptophan, we observed</div>"),
        "with the indole precursor l-tryptophan, we observed"
    );
}

#[test]
fn annotation_nests_inside_surviving_inline_markup() {
    let original = "<div>with the indole precursor <sc>l</sc>-tryptophan, we observed</div>";
    let annotated =
        r#"with the indole precursor <span typeof="entity">l</span>-tryptophan, we observed"#;
    assert_eq!(
        reinsert(annotated, original).unwrap(),
        concat!(
            r#"<div>with the indole precursor <sc><span typeof="entity">l</span></sc>"#,
            r#"-tryptophan, we observed</div>"#
        )
    );
}

#[test]
fn annotation_spanning_plain_text_lands_inside_the_styled_run() {
    let original =
        "<div>with the <italic>indole precursor l-tryptophan</italic>, we observed</div>";
    let annotated =
        r#"with the indole precursor <span typeof="entity">l-tryptophan</span>, we observed"#;
    assert_eq!(
        reinsert(annotated, original).unwrap(),
        concat!(
            "<div>with the <italic>indole precursor ",
            r#"<span typeof="entity">l-tryptophan</span></italic>, we observed</div>"#
        )
    );
}

#[test]
fn span_crossing_run_boundaries_comes_out_contiguous() {
    let original = "<div>ab <i>cd</i> ef</div>";
    let annotated = r##"ab <span resource="#x">cd ef</span>"##;
    assert_eq!(
        reinsert(annotated, original).unwrap(),
        r##"<div>ab <span resource="#x"><i>cd</i> ef</span></div>"##
    );
}

#[test]
fn div_marker_moves_prefix_declarations_to_the_root() {
    let original = "<p>The bacteria were grown</p>";
    let annotated = concat!(
        r#"<div prefix="d3o: https://purl.dsmz.de/schema/">The "#,
        r##"<span resource="#T1" typeof="d3o:OOS">bacteria</span> were grown</div>"##
    );
    assert_eq!(
        reinsert(annotated, original).unwrap(),
        concat!(
            r#"<p prefix="d3o: https://purl.dsmz.de/schema/">The "#,
            r##"<span resource="#T1" typeof="d3o:OOS">bacteria</span> were grown</p>"##
        )
    );
}

#[test]
fn unbalanced_closing_markers_are_tolerated() {
    // Intentionally permissive: annotators sometimes emit a close with no
    // matching open; it vanishes instead of failing the pass.
    let original = "<p>some plain text</p>";
    let annotated = "some plain</span> text";
    assert_eq!(reinsert(annotated, original).unwrap(), original);
}

#[test]
fn annotator_markup_other_than_div_and_span_is_literal() {
    let original = "<p>press the button now</p>";
    let annotated = "press the <button>button</button> now";
    assert_eq!(
        reinsert(annotated, original).unwrap(),
        "<p>press the <button>button</button> now</p>"
    );
}
