//! Span promotion: floating an annotation up through single-child wrappers.
//!
//! A span inserted deep inside a chain of wrapper elements that hold no
//! text of their own should wrap the outermost equivalent scope instead,
//! so the serialized markup stays minimal. Each step replaces the parent
//! with a copy of the span and re-homes the parent inside the copy; the
//! float continues from the copy's new position.

use markup::{Document, NodeId};

/// Promotes every span in the document, in document order.
pub fn promote_spans(doc: &mut Document) {
    let snapshot = doc.descendants(doc.root());
    for id in snapshot {
        if doc.get(id).tag == "span" && doc.is_attached(id) {
            promote_span(doc, id);
        }
    }
}

fn promote_span(doc: &mut Document, mut span: NodeId) {
    loop {
        let Some(parent) = doc.parent(span) else {
            return;
        };
        let qualifies = doc.children(parent).len() == 1
            && doc.get(parent).has_blank_text()
            && doc.get(parent).has_blank_tail();
        if !qualifies {
            return;
        }

        let copy = doc.deep_copy(span);
        doc.detach(span);

        // The copy takes over the parent's outside position, so it inherits
        // the parent's tail; the parent keeps the span's text and children.
        let parent_tail = doc.get_mut(parent).tail.take();
        doc.get_mut(copy).tail = parent_tail;
        let span_text = doc.get_mut(copy).text.take();
        doc.get_mut(parent).text = span_text;

        let grandchildren = doc.children(copy).to_vec();
        for child in grandchildren {
            doc.detach(child);
            doc.append(parent, child);
        }

        if doc.parent(parent).is_some() {
            doc.replace(parent, copy);
        } else {
            doc.detach(parent);
            doc.set_root(copy);
        }
        doc.append(copy, parent);

        span = copy;
    }
}
