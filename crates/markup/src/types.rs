/// Arena index of an element node. Copyable; only meaningful for the
/// `Document` that produced it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

/// One element node. `text` is the character data before the first child;
/// `tail` is the character data after this element's end tag, owned by the
/// parent context. Attributes keep insertion order for serialization but
/// compare order-insensitively.
#[derive(Clone, Debug)]
pub struct Element {
    pub tag: String,
    pub attrs: Vec<(String, String)>,
    pub text: Option<String>,
    pub tail: Option<String>,
    pub(crate) parent: Option<NodeId>,
    pub(crate) children: Vec<NodeId>,
}

impl Element {
    pub(crate) fn new(tag: String, attrs: Vec<(String, String)>) -> Self {
        Self {
            tag,
            attrs,
            text: None,
            tail: None,
            parent: None,
            children: Vec::new(),
        }
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Replaces the value of `name` in place, or appends it.
    pub fn set_attr(&mut self, name: &str, value: String) {
        match self.attrs.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => *v = value,
            None => self.attrs.push((name.to_string(), value)),
        }
    }

    pub fn has_blank_text(&self) -> bool {
        is_blank(self.text.as_deref())
    }

    pub fn has_blank_tail(&self) -> bool {
        is_blank(self.tail.as_deref())
    }
}

pub(crate) fn is_blank(value: Option<&str>) -> bool {
    value.is_none_or(str::is_empty)
}

/// Order-insensitive attribute comparison; duplicate names are not
/// produced by the parser, so multiset semantics are not needed.
pub fn attrs_eq(a: &[(String, String)], b: &[(String, String)]) -> bool {
    a.len() == b.len()
        && a.iter()
            .all(|(k, v)| b.iter().any(|(bk, bv)| bk == k && bv == v))
}

/// Appends `add` to `dst`, treating a missing value as empty.
pub fn concat_text(dst: &mut Option<String>, add: &str) {
    if add.is_empty() {
        return;
    }
    dst.get_or_insert_with(String::new).push_str(add);
}
