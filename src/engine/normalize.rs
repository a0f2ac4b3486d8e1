//! Text views fed to the pattern matcher.
//!
//! OCR output arrives with arbitrary line breaks and stray glyphs. Some
//! patterns need the original layout (to pair a latitude line with the
//! longitude line below it), others match best against a single-line view,
//! so both are built once per input text.

use std::sync::LazyLock;

use regex::Regex;

static WHITESPACE_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// The two views of one raw text: untouched, and with every maximal
/// whitespace run (line breaks included) collapsed to a single space.
#[derive(Debug)]
pub struct TextViews<'a> {
    pub original: &'a str,
    pub normalized: String,
}

impl<'a> TextViews<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            original: raw,
            normalized: collapse_whitespace(raw),
        }
    }
}

/// Collapse every whitespace run (including line breaks) to one space.
pub fn collapse_whitespace(raw: &str) -> String {
    WHITESPACE_RUN.replace_all(raw, " ").into_owned()
}

/// Clip to at most `max_chars` characters, never splitting a char.
pub(crate) fn clip_chars(s: &str, max_chars: usize) -> &str {
    match s.char_indices().nth(max_chars) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}
