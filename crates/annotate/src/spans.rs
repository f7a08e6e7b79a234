//! Span builder: regenerates one consumed text or tail run.
//!
//! The aligner hands this module the glyph text it drew for a run, together
//! with the spans left open by earlier runs. Spans opened in earlier runs
//! re-open here as a fresh "shadow" chain so that one annotation crossing
//! several runs comes out as nested fragments the canonicalization passes
//! can later fuse. Spans opened in this run close against their own stack;
//! the two stacks must stay separate or a close would pop to the wrong
//! depth.

use std::sync::OnceLock;

use markup::{Document, NodeId, concat_text};
use regex::Regex;

use crate::curies;
use crate::tokens::{TextToken, TextTokens, tag_name};

/// A marker whose closing token has not been seen yet. Descriptor only; a
/// fresh element is materialized from it each time it re-opens.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OpenSpan {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
}

/// Which run of the anchor element is being rebuilt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Position {
    Text,
    Tail,
}

/// Rebuilds the `position` run of `anchor` from `consumed`, materializing
/// recognized markers. Returns the anchor (unchanged unless a future
/// variant replaces it) and the spans still open after this run: carried
/// ones not yet closed, then ones newly opened here.
pub(crate) fn build(
    doc: &mut Document,
    anchor: NodeId,
    consumed: &str,
    mut open_spans: Vec<OpenSpan>,
    mut position: Position,
) -> (NodeId, Vec<OpenSpan>) {
    // The run's former content is regenerated below.
    match position {
        Position::Text => doc.get_mut(anchor).text = Some(String::new()),
        Position::Tail => doc.get_mut(anchor).tail = Some(String::new()),
    }

    let mut context = anchor;
    let mut new_spans: Vec<OpenSpan> = Vec::new();

    // Shadow chain: re-open every span carried over from earlier runs,
    // outermost first, and descend into it.
    for marker in &open_spans {
        let shadow = doc.new_element(marker.tag.clone(), marker.attrs.clone());
        attach(doc, context, shadow, position);
        context = shadow;
        position = Position::Text;
    }

    for token in TextTokens::new(consumed) {
        match token {
            TextToken::OpenTag(source) => match tag_name(source) {
                "div" => {
                    // Prefix declarations move to the root; the div itself
                    // is transparent and never becomes a node.
                    if let Some((_, value)) = parse_marker_attrs(source)
                        .into_iter()
                        .find(|(name, _)| name == curies::PREFIX_ATTR)
                    {
                        let root = top_ancestor(doc, anchor);
                        curies::merge_prefix_value(doc, root, &value);
                    }
                }
                "span" => {
                    let attrs = parse_marker_attrs(source);
                    let span = doc.new_element("span".to_string(), attrs.clone());
                    attach(doc, context, span, position);
                    context = span;
                    position = Position::Text;
                    new_spans.push(OpenSpan {
                        tag: "span".to_string(),
                        attrs,
                    });
                }
                _ => append_literal(doc, context, source, position),
            },
            TextToken::CloseTag(source) => match source {
                "</span>" => {
                    if new_spans.pop().is_some() || open_spans.pop().is_some() {
                        position = Position::Tail;
                    } else {
                        // Annotators occasionally emit unbalanced markers;
                        // an unmatched close is ignored rather than fatal.
                        log::debug!(
                            target: "annotate.spans",
                            "unmatched </span> in run of <{}>",
                            doc.get(anchor).tag
                        );
                    }
                }
                "</div>" => {}
                _ => append_literal(doc, context, source, position),
            },
            TextToken::Char(c) => append_literal(doc, context, c, position),
        }
    }

    open_spans.extend(new_spans);
    (anchor, open_spans)
}

fn attach(doc: &mut Document, context: NodeId, node: NodeId, position: Position) {
    match position {
        Position::Text => doc.insert_first(context, node),
        Position::Tail => doc.insert_after(context, node),
    }
}

fn append_literal(doc: &mut Document, context: NodeId, literal: &str, position: Position) {
    let el = doc.get_mut(context);
    match position {
        Position::Text => concat_text(&mut el.text, literal),
        Position::Tail => concat_text(&mut el.tail, literal),
    }
}

fn top_ancestor(doc: &Document, mut id: NodeId) -> NodeId {
    while let Some(parent) = doc.parent(id) {
        id = parent;
    }
    id
}

fn marker_attr_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        // Names and values exclude quotes, angle brackets, `=` and control
        // characters; names additionally exclude spaces. Anything else
        // inside the bracket is noise.
        Regex::new(
            r#"([^ "'<>=\x00-\x1f\x7f-\x9f]+)=["']([^"'<>=\x00-\x1f\x7f-\x9f]+)["']"#,
        )
        .unwrap_or_else(|err| unreachable!("marker attribute pattern failed to compile: {err}"))
    })
}

/// Parses `name="value"` and `name='value'` pairs from a marker token.
/// Later duplicates win, as in a mapping.
fn parse_marker_attrs(source: &str) -> Vec<(String, String)> {
    let mut attrs: Vec<(String, String)> = Vec::new();
    for caps in marker_attr_pattern().captures_iter(source) {
        let name = caps[1].to_string();
        let value = caps[2].to_string();
        match attrs.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => attrs.push((name, value)),
        }
    }
    attrs
}
