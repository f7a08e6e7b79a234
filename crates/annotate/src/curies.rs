//! CURIE prefix declarations: parsing and propagation.
//!
//! A `prefix` attribute holds space-separated `name: uri` entries. Merging
//! is a set union written back in sorted order, so repeated propagation is
//! idempotent and the direction of a copy does not matter for the resulting
//! set.

use std::collections::BTreeSet;
use std::sync::OnceLock;

use markup::{Document, NodeId};
use regex::Regex;

pub(crate) const PREFIX_ATTR: &str = "prefix";

fn curie_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        let prefix = r"[a-zA-Z_][a-zA-Z_\-\.\d]*";
        // URI shape after RFC 3986 appendix B: scheme, optional authority,
        // path, optional query and fragment.
        let uri = r"[^:/?#]+:(?://[^/?# ]+)?[^?# ]*(?:\?[^# ]*)?(?:#\S*)?";
        Regex::new(&format!("{prefix}: ?{uri}")).unwrap_or_else(|err| {
            unreachable!("curie pattern failed to compile: {err}")
        })
    })
}

/// The set of CURIE entries declared in a `prefix` attribute value.
pub fn curie_set(value: &str) -> BTreeSet<String> {
    curie_pattern()
        .find_iter(value)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Unions `source`'s prefix declarations into `target`. A source without a
/// `prefix` attribute leaves `target` untouched.
pub fn copy_prefix_declarations(doc: &mut Document, source: NodeId, target: NodeId) {
    let Some(value) = doc.get(source).attr(PREFIX_ATTR).map(str::to_string) else {
        return;
    };
    merge_prefix_value(doc, target, &value);
}

/// Unions the entries of a raw `prefix` attribute value into `target`.
pub(crate) fn merge_prefix_value(doc: &mut Document, target: NodeId, value: &str) {
    let mut union = curie_set(doc.get(target).attr(PREFIX_ATTR).unwrap_or(""));
    union.extend(curie_set(value));
    let joined = union.into_iter().collect::<Vec<_>>().join(" ");
    doc.get_mut(target).set_attr(PREFIX_ATTR, joined);
}
