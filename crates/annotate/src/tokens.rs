//! Shared scanner for annotated plain text.
//!
//! Recognizes exactly two shapes of tag token: an opening tag (`<` followed
//! by a word character, then anything but angle brackets, then `>`) and a
//! closing tag (`</`, anything but angle brackets, `>`). Everything else,
//! including stray angle brackets and malformed tag-like sequences, comes
//! out one character at a time. The stripper, the glyph stream and the span
//! builder all tokenize with this one grammar so they stay aligned.

use memchr::memchr;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum TextToken<'a> {
    /// A complete opening tag, brackets included.
    OpenTag(&'a str),
    /// A complete closing tag, brackets included.
    CloseTag(&'a str),
    /// One literal character.
    Char(&'a str),
}

impl<'a> TextToken<'a> {
    pub(crate) fn source(&self) -> &'a str {
        match self {
            TextToken::OpenTag(s) | TextToken::CloseTag(s) | TextToken::Char(s) => s,
        }
    }
}

pub(crate) struct TextTokens<'a> {
    input: &'a str,
    pos: usize,
}

impl<'a> TextTokens<'a> {
    pub(crate) fn new(input: &'a str) -> Self {
        Self { input, pos: 0 }
    }

    fn one_char(&mut self) -> TextToken<'a> {
        let start = self.pos;
        let ch = self.input[start..]
            .chars()
            .next()
            .unwrap_or_else(|| unreachable!("scanner advanced past the end"));
        self.pos = start + ch.len_utf8();
        TextToken::Char(&self.input[start..self.pos])
    }
}

impl<'a> Iterator for TextTokens<'a> {
    type Item = TextToken<'a>;

    fn next(&mut self) -> Option<TextToken<'a>> {
        if self.pos >= self.input.len() {
            return None;
        }
        let bytes = self.input.as_bytes();
        if bytes[self.pos] != b'<' {
            return Some(self.one_char());
        }

        let rest = &self.input[self.pos + 1..];
        let close = memchr(b'>', rest.as_bytes());
        let reopen = memchr(b'<', rest.as_bytes());
        let Some(close) = close else {
            return Some(self.one_char());
        };
        if reopen.is_some_and(|r| r < close) {
            return Some(self.one_char());
        }

        let inner = &rest[..close];
        let token_end = self.pos + 1 + close + 1;
        let source = &self.input[self.pos..token_end];
        if inner.starts_with('/') {
            self.pos = token_end;
            return Some(TextToken::CloseTag(source));
        }
        let starts_word = inner
            .chars()
            .next()
            .is_some_and(|c| c.is_alphanumeric() || c == '_');
        if starts_word {
            self.pos = token_end;
            return Some(TextToken::OpenTag(source));
        }
        Some(self.one_char())
    }
}

/// Tag name of an opening or closing tag token, without brackets or
/// attributes.
pub(crate) fn tag_name(token_source: &str) -> &str {
    let inner = token_source
        .trim_start_matches('<')
        .trim_start_matches('/');
    let end = inner
        .find(|c: char| !(c.is_alphanumeric() || matches!(c, '_' | ':' | '-' | '.')))
        .unwrap_or(inner.len());
    &inner[..end]
}
