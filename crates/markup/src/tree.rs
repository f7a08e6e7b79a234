//! The document tree: an arena of element nodes plus a root id.
//!
//! Nodes removed by tree surgery stay in the arena but become unreachable
//! from the root; ids are never reused within one document's lifetime.

use crate::error::{ParseError, ParseErrorKind};
use crate::tokenizer::{Token, tokenize};
use crate::types::{Element, NodeId, concat_text};

#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Element>,
    root: NodeId,
}

impl Document {
    /// Parses serialized markup into a tree. Strict: mismatched or unclosed
    /// tags, several roots, or character data outside the root are errors.
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        let tokens = tokenize(input)?;
        let mut nodes: Vec<Element> = Vec::new();
        let mut root: Option<NodeId> = None;
        let mut open: Vec<NodeId> = Vec::new();

        for (pos, token) in tokens {
            match token {
                Token::Text(text) => match open.last() {
                    Some(&top) => {
                        // Character data lands on the open element's text,
                        // or on the tail of its most recent child.
                        let last_child = nodes[top.0 as usize].children.last().copied();
                        let target = match last_child {
                            Some(last) => &mut nodes[last.0 as usize].tail,
                            None => &mut nodes[top.0 as usize].text,
                        };
                        concat_text(target, &text);
                    }
                    None => {
                        if !text.trim().is_empty() {
                            return Err(ParseError::at(
                                ParseErrorKind::TextOutsideRoot,
                                pos,
                                input,
                            ));
                        }
                    }
                },
                Token::StartTag {
                    name,
                    attributes,
                    self_closing,
                } => {
                    let id = NodeId(nodes.len() as u32);
                    nodes.push(Element::new(name, attributes));
                    match open.last() {
                        Some(&top) => {
                            nodes[id.0 as usize].parent = Some(top);
                            nodes[top.0 as usize].children.push(id);
                        }
                        None => {
                            if root.is_some() {
                                return Err(ParseError::at(
                                    ParseErrorKind::MultipleRoots,
                                    pos,
                                    input,
                                ));
                            }
                            root = Some(id);
                        }
                    }
                    if !self_closing {
                        open.push(id);
                    }
                }
                Token::EndTag(name) => match open.pop() {
                    Some(top) if nodes[top.0 as usize].tag == name => {}
                    _ => {
                        return Err(ParseError::at(
                            ParseErrorKind::MismatchedEndTag,
                            pos,
                            input,
                        ));
                    }
                },
            }
        }

        if !open.is_empty() {
            return Err(ParseError::at(
                ParseErrorKind::UnexpectedEof,
                input.len(),
                input,
            ));
        }
        let root = root
            .ok_or_else(|| ParseError::at(ParseErrorKind::NoRootElement, 0, input))?;
        Ok(Self { nodes, root })
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Installs `id` as the new root. The node loses any parent link.
    pub fn set_root(&mut self, id: NodeId) {
        self.nodes[id.0 as usize].parent = None;
        self.root = id;
    }

    pub fn get(&self, id: NodeId) -> &Element {
        &self.nodes[id.0 as usize]
    }

    pub fn get_mut(&mut self, id: NodeId) -> &mut Element {
        &mut self.nodes[id.0 as usize]
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0 as usize].parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0 as usize].children
    }

    /// Creates a fresh, detached element.
    pub fn new_element(&mut self, tag: String, attrs: Vec<(String, String)>) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Element::new(tag, attrs));
        id
    }

    /// Removes `id` from its parent's child list. No-op for detached nodes.
    pub fn detach(&mut self, id: NodeId) {
        let Some(parent) = self.nodes[id.0 as usize].parent.take() else {
            return;
        };
        let siblings = &mut self.nodes[parent.0 as usize].children;
        if let Some(at) = siblings.iter().position(|&c| c == id) {
            siblings.remove(at);
        }
    }

    pub fn insert_first(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child.0 as usize].parent.is_none());
        self.nodes[child.0 as usize].parent = Some(parent);
        self.nodes[parent.0 as usize].children.insert(0, child);
    }

    pub fn append(&mut self, parent: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child.0 as usize].parent.is_none());
        self.nodes[child.0 as usize].parent = Some(parent);
        self.nodes[parent.0 as usize].children.push(child);
    }

    /// Inserts `child` as the sibling immediately after `sibling`.
    pub fn insert_after(&mut self, sibling: NodeId, child: NodeId) {
        debug_assert!(self.nodes[child.0 as usize].parent.is_none());
        let Some(parent) = self.nodes[sibling.0 as usize].parent else {
            unreachable!("sibling insertion below the root");
        };
        let at = self.nodes[parent.0 as usize]
            .children
            .iter()
            .position(|&c| c == sibling)
            .unwrap_or_else(|| unreachable!("sibling not in its parent's child list"));
        self.nodes[child.0 as usize].parent = Some(parent);
        self.nodes[parent.0 as usize].children.insert(at + 1, child);
    }

    /// Puts `new` at `old`'s position in `old`'s parent; `old` is detached.
    pub fn replace(&mut self, old: NodeId, new: NodeId) {
        debug_assert!(self.nodes[new.0 as usize].parent.is_none());
        let Some(parent) = self.nodes[old.0 as usize].parent.take() else {
            unreachable!("replace target must have a parent");
        };
        let at = self.nodes[parent.0 as usize]
            .children
            .iter()
            .position(|&c| c == old)
            .unwrap_or_else(|| unreachable!("replace target not in its parent's child list"));
        self.nodes[parent.0 as usize].children[at] = new;
        self.nodes[new.0 as usize].parent = Some(parent);
    }

    /// Structural clone of the subtree rooted at `id` into fresh, detached
    /// nodes. The copy shares nothing with the source.
    pub fn deep_copy(&mut self, id: NodeId) -> NodeId {
        let source = self.nodes[id.0 as usize].clone();
        let copy = self.new_element(source.tag, source.attrs);
        self.nodes[copy.0 as usize].text = source.text;
        self.nodes[copy.0 as usize].tail = source.tail;
        for child in source.children {
            let child_copy = self.deep_copy(child);
            self.nodes[child_copy.0 as usize].parent = Some(copy);
            self.nodes[copy.0 as usize].children.push(child_copy);
        }
        copy
    }

    /// Ids of the subtree rooted at `id`, in document order, `id` first.
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            out.push(next);
            for &child in self.nodes[next.0 as usize].children.iter().rev() {
                stack.push(child);
            }
        }
        out
    }

    /// Whether `id` is still reachable from the root.
    pub fn is_attached(&self, id: NodeId) -> bool {
        let mut cursor = id;
        while let Some(parent) = self.nodes[cursor.0 as usize].parent {
            cursor = parent;
        }
        cursor == self.root
    }
}
