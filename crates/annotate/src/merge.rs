//! Adjacent-sibling merging.
//!
//! Reinsertion and promotion leave runs of siblings with the same tag and
//! attributes sitting next to each other. When the earlier sibling carries
//! no tail there is nothing between them in the serialized form, so the
//! two collapse into one node with the content stitched across the join
//! point.

use markup::{Document, NodeId, attrs_eq, concat_text};

/// Merges qualifying adjacent siblings everywhere in the document.
pub fn merge_siblings(doc: &mut Document) {
    merge_into(doc, doc.root());
}

fn merge_into(doc: &mut Document, id: NodeId) {
    // Right to left, so a chain of equal siblings collapses in one pass.
    let mut cursor = doc.children(id).len();
    while cursor > 1 {
        cursor -= 1;
        let current = doc.children(id)[cursor];
        let preceding = doc.children(id)[cursor - 1];
        if mergeable(doc, preceding, current) {
            let merged = merge_nodes(doc, preceding, current);
            doc.replace(preceding, merged);
            doc.detach(current);
        }
    }

    let children = doc.children(id).to_vec();
    for child in children {
        merge_into(doc, child);
    }
}

fn mergeable(doc: &Document, preceding: NodeId, current: NodeId) -> bool {
    let left = doc.get(preceding);
    let right = doc.get(current);
    left.tag == right.tag && attrs_eq(&left.attrs, &right.attrs) && left.has_blank_tail()
}

/// Builds the fused node. The right node's text lands on the left's last
/// child's tail (or on the node text when the left has no children), then
/// the right's children follow and its tail becomes the fused tail.
fn merge_nodes(doc: &mut Document, left: NodeId, right: NodeId) -> NodeId {
    let tag = doc.get(left).tag.clone();
    let attrs = doc.get(left).attrs.clone();
    let merged = doc.new_element(tag, attrs);

    let left_children = doc.children(left).to_vec();
    for child in &left_children {
        doc.detach(*child);
        doc.append(merged, *child);
    }
    let left_text = doc.get_mut(left).text.take();
    doc.get_mut(merged).text = left_text;

    let right_text = doc.get_mut(right).text.take();
    let stitch_target = match doc.children(merged).last().copied() {
        Some(last) => last,
        None => merged,
    };
    if let Some(text) = right_text {
        let el = doc.get_mut(stitch_target);
        let slot = if stitch_target == merged {
            &mut el.text
        } else {
            &mut el.tail
        };
        concat_text(slot, &text);
    }

    let right_children = doc.children(right).to_vec();
    for child in right_children {
        doc.detach(child);
        doc.append(merged, child);
    }
    let right_tail = doc.get_mut(right).tail.take();
    doc.get_mut(merged).tail = right_tail;

    merged
}
