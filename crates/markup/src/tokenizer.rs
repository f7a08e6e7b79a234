//! Strict tokenizer for serialized article markup.
//!
//! Tag and attribute names use a constrained ASCII character set
//! (`[A-Za-z0-9:_.-]`), which covers the archival vocabularies this engine
//! is fed. Attribute values must be quoted (double or single). Character
//! data between tags is passed through verbatim; no entity decoding happens
//! here, so serializing a parsed document reproduces its character data
//! byte for byte.
//!
//! Comments, processing instructions and doctype declarations are consumed
//! and dropped; they have no representation in the element tree.

use crate::error::{ParseError, ParseErrorKind};
use memchr::memchr;

#[derive(Debug)]
pub(crate) enum Token {
    StartTag {
        name: String,
        attributes: Vec<(String, String)>,
        self_closing: bool,
    },
    EndTag(String),
    Text(String),
}

fn is_name_byte(b: u8) -> bool {
    b.is_ascii_alphanumeric() || matches!(b, b':' | b'_' | b'-' | b'.')
}

/// Tokenizes `input`, reporting each token with its starting byte offset.
pub(crate) fn tokenize(input: &str) -> Result<Vec<(usize, Token)>, ParseError> {
    let bytes = input.as_bytes();
    let len = bytes.len();
    let mut out = Vec::new();
    let mut i = 0;

    while i < len {
        if bytes[i] != b'<' {
            let start = i;
            i = match memchr(b'<', &bytes[i..]) {
                Some(rel) => i + rel,
                None => len,
            };
            out.push((start, Token::Text(input[start..i].to_string())));
            continue;
        }

        if input[i..].starts_with("<!--") {
            let body = i + 4;
            match input[body..].find("-->") {
                Some(end) => i = body + end + 3,
                None => return Err(ParseError::at(ParseErrorKind::UnexpectedEof, i, input)),
            }
            continue;
        }

        if i + 1 < len && (bytes[i + 1] == b'!' || bytes[i + 1] == b'?') {
            // Doctype or processing instruction; skipped.
            match memchr(b'>', &bytes[i..]) {
                Some(rel) => i += rel + 1,
                None => return Err(ParseError::at(ParseErrorKind::UnexpectedEof, i, input)),
            }
            continue;
        }

        if i + 1 < len && bytes[i + 1] == b'/' {
            let tag_at = i;
            let start = i + 2;
            let mut j = start;
            while j < len && is_name_byte(bytes[j]) {
                j += 1;
            }
            if j == start {
                return Err(ParseError::at(ParseErrorKind::MalformedTag, tag_at, input));
            }
            let name = input[start..j].to_string();
            while j < len && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if j >= len {
                return Err(ParseError::at(ParseErrorKind::UnexpectedEof, tag_at, input));
            }
            if bytes[j] != b'>' {
                return Err(ParseError::at(ParseErrorKind::MalformedTag, tag_at, input));
            }
            out.push((tag_at, Token::EndTag(name)));
            i = j + 1;
            continue;
        }

        let tag_at = i;
        let start = i + 1;
        let mut j = start;
        while j < len && is_name_byte(bytes[j]) {
            j += 1;
        }
        if j == start {
            return Err(ParseError::at(ParseErrorKind::MalformedTag, tag_at, input));
        }
        let name = input[start..j].to_string();

        let mut attributes: Vec<(String, String)> = Vec::new();
        let mut self_closing = false;
        loop {
            while j < len && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if j >= len {
                return Err(ParseError::at(ParseErrorKind::UnexpectedEof, tag_at, input));
            }
            if bytes[j] == b'>' {
                j += 1;
                break;
            }
            if bytes[j] == b'/' {
                if j + 1 < len && bytes[j + 1] == b'>' {
                    self_closing = true;
                    j += 2;
                    break;
                }
                return Err(ParseError::at(ParseErrorKind::MalformedTag, j, input));
            }

            let name_start = j;
            while j < len && is_name_byte(bytes[j]) {
                j += 1;
            }
            if name_start == j {
                return Err(ParseError::at(ParseErrorKind::MalformedTag, j, input));
            }
            let attr_name = input[name_start..j].to_string();

            while j < len && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if j >= len {
                return Err(ParseError::at(ParseErrorKind::UnexpectedEof, tag_at, input));
            }
            if bytes[j] != b'=' {
                return Err(ParseError::at(ParseErrorKind::MalformedTag, j, input));
            }
            j += 1;
            while j < len && bytes[j].is_ascii_whitespace() {
                j += 1;
            }
            if j >= len {
                return Err(ParseError::at(ParseErrorKind::UnexpectedEof, tag_at, input));
            }
            if bytes[j] != b'"' && bytes[j] != b'\'' {
                return Err(ParseError::at(ParseErrorKind::MalformedTag, j, input));
            }
            let quote = bytes[j];
            j += 1;
            let value_start = j;
            match memchr(quote, &bytes[j..]) {
                Some(rel) => {
                    attributes.push((attr_name, input[value_start..j + rel].to_string()));
                    j += rel + 1;
                }
                None => {
                    return Err(ParseError::at(
                        ParseErrorKind::UnexpectedEof,
                        value_start,
                        input,
                    ));
                }
            }
        }

        out.push((
            tag_at,
            Token::StartTag {
                name,
                attributes,
                self_closing,
            },
        ));
        i = j;
    }

    Ok(out)
}
