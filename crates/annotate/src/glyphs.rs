//! The glyph stream: alignment units over annotated plain text.
//!
//! One glyph is one literal character, together with any complete tag
//! tokens that immediately precede it and any closing tags that directly
//! follow it. Aligning glyph-per-character keeps a styled single letter
//! (for example `<sc>l</sc>` inside `l-tryptophan`) in lockstep with the
//! original text; counting the injected tag characters instead would shift
//! every later run by the width of the tags.
//!
//! The stream is finite and forward-only. Restart by constructing a new
//! one.

use crate::tokens::{TextToken, TextTokens};

pub struct Glyphs<'a> {
    tokens: TextTokens<'a>,
    current: String,
    last_was_char: bool,
}

impl<'a> Glyphs<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            tokens: TextTokens::new(text),
            current: String::new(),
            last_was_char: false,
        }
    }
}

impl Iterator for Glyphs<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        loop {
            let Some(token) = self.tokens.next() else {
                // Trailing tags with no following character flush with
                // whatever is pending.
                if self.current.is_empty() {
                    return None;
                }
                self.last_was_char = false;
                return Some(std::mem::take(&mut self.current));
            };
            match token {
                TextToken::CloseTag(s) => {
                    let complete = self.last_was_char;
                    self.current.push_str(s);
                    if complete {
                        self.last_was_char = false;
                        return Some(std::mem::take(&mut self.current));
                    }
                }
                TextToken::OpenTag(s) => {
                    if self.last_was_char {
                        let glyph = std::mem::take(&mut self.current);
                        self.current.push_str(s);
                        self.last_was_char = false;
                        return Some(glyph);
                    }
                    self.current.push_str(s);
                }
                TextToken::Char(c) => {
                    if self.last_was_char {
                        let glyph = std::mem::take(&mut self.current);
                        self.current.push_str(c);
                        return Some(glyph);
                    }
                    self.current.push_str(c);
                    self.last_was_char = true;
                }
            }
        }
    }
}
