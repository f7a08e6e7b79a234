use crate::tokens::{TextToken, TextTokens};

/// Removes every well-formed tag token from `markup`, keeping all other
/// characters untouched. Total over any string; the output of
/// [`Document::serialize`](markup::Document::serialize) stripped this way
/// aligns character for character with the tree's text and tail runs.
pub fn strip(markup: &str) -> String {
    let mut out = String::with_capacity(markup.len());
    for token in TextTokens::new(markup) {
        if matches!(token, TextToken::Char(_)) {
            out.push_str(token.source());
        }
    }
    out
}
