//! Tokens of a single line
//!
//! A line splits into runs of whitespace, runs of word characters and
//! single punctuation characters. Matching happens on token text, so the
//! highlighter never marks part of a word as changed.

use regex::{Captures, Regex};
use std::hash::{Hash, Hasher};
use std::ops::Range;
use std::sync::LazyLock;

const TOKEN_PATTERN: &str = r"(?<space>\s+)|(?<word>\w+)|[^\s\w]";

static TOKEN_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(TOKEN_PATTERN).expect("token pattern is a valid regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Whitespace,
    Word,
    Punctuation,
}

/// A token and its byte range in the line
///
/// Equality and hashing look at the text only.
#[derive(Debug, Clone)]
pub struct Token<'l> {
    text: &'l str,
    range: Range<usize>,
    class: TokenClass,
}

impl<'l> Token<'l> {
    pub fn text(&self) -> &'l str {
        self.text
    }

    pub fn range(&self) -> Range<usize> {
        self.range.clone()
    }

    pub fn class(&self) -> TokenClass {
        self.class
    }

    pub fn is_whitespace(&self) -> bool {
        self.class == TokenClass::Whitespace
    }
}

impl PartialEq for Token<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.text == other.text
    }
}

impl Eq for Token<'_> {}

impl Hash for Token<'_> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.text.hash(state);
    }
}

/// Class of a token, taken from the alternative of the pattern it matched
fn classify(captures: &Captures<'_>) -> TokenClass {
    if captures.name("space").is_some() {
        TokenClass::Whitespace
    } else if captures.name("word").is_some() {
        TokenClass::Word
    } else {
        TokenClass::Punctuation
    }
}

pub fn tokenize(line: &str) -> Vec<Token<'_>> {
    TOKEN_REGEX
        .captures_iter(line)
        .filter_map(|captures| {
            let m = captures.get(0)?;
            Some(Token {
                text: m.as_str(),
                range: m.range(),
                class: classify(&captures),
            })
        })
        .collect()
}
