//! Lines and validated line sequences
//!
//! Raw content is split on `\n`. The newline itself is not stored in the
//! line; a flag records whether one followed, so the original bytes can be
//! rebuilt exactly. A carriage return before the newline stays part of the
//! content, which keeps CRLF and LF files distinguishable.

use crate::artifacts::core::error::{DiffError, DiffResult};
use crate::artifacts::core::hashing::ContentHash;
use derive_new::new;

/// One line of a file revision
///
/// Two lines are equal when both their content and their newline flag match;
/// the source position does not take part in comparisons.
#[derive(Debug, Clone, new)]
pub struct Line {
    index: usize,
    content: String,
    has_newline: bool,
}

impl Line {
    pub fn index(&self) -> usize {
        self.index
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn has_newline(&self) -> bool {
        self.has_newline
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }

    pub fn hash(&self) -> ContentHash {
        ContentHash::of_line(&self.content, self.has_newline)
    }

    /// Comparison key used by the matcher
    pub fn key(&self) -> (&str, bool) {
        (self.content.as_str(), self.has_newline)
    }

    pub fn write_to(&self, out: &mut String) {
        out.push_str(&self.content);
        if self.has_newline {
            out.push('\n');
        }
    }
}

impl PartialEq for Line {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl Eq for Line {}

impl std::hash::Hash for Line {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}

/// Ordered, index-consistent sequence of lines of one file revision
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LineSet {
    lines: Vec<Line>,
}

impl LineSet {
    /// Split text into lines
    ///
    /// An empty string has no lines. A trailing newline terminates the last
    /// line instead of opening an empty one.
    pub fn tokenize(text: &str) -> Self {
        let mut lines = Vec::new();
        let mut rest = text;

        while !rest.is_empty() {
            let index = lines.len();
            match rest.find('\n') {
                Some(pos) => {
                    lines.push(Line::new(index, rest[..pos].to_string(), true));
                    rest = &rest[pos + 1..];
                }
                None => {
                    lines.push(Line::new(index, rest.to_string(), false));
                    rest = "";
                }
            }
        }

        Self { lines }
    }

    /// Split raw bytes into lines, rejecting content that is not UTF-8
    pub fn tokenize_bytes(bytes: &[u8]) -> DiffResult<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            DiffError::malformed(format!(
                "content is not valid UTF-8 at byte {}",
                e.valid_up_to()
            ))
        })?;

        Ok(Self::tokenize(text))
    }

    /// Build a line set from lines produced elsewhere
    ///
    /// Indices must run `0..n` in order, and only the last line may lack a
    /// trailing newline.
    pub fn try_from_lines(lines: Vec<Line>) -> DiffResult<Self> {
        for (position, line) in lines.iter().enumerate() {
            if line.index != position {
                return Err(DiffError::malformed(format!(
                    "line at position {} carries index {}",
                    position, line.index
                )));
            }
            if line.content.contains('\n') {
                return Err(DiffError::malformed(format!(
                    "line {} contains an embedded newline",
                    position
                )));
            }
            if !line.has_newline && position + 1 != lines.len() {
                return Err(DiffError::malformed(format!(
                    "line {} lacks a newline but is not the last line",
                    position
                )));
            }
        }

        Ok(Self { lines })
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Line> {
        self.lines.get(index)
    }

    pub fn lines(&self) -> &[Line] {
        &self.lines
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Line> {
        self.lines.iter()
    }

    pub fn hashes(&self) -> Vec<ContentHash> {
        self.lines.iter().map(Line::hash).collect()
    }

    /// Rebuild the original bytes
    pub fn to_text(&self) -> String {
        let mut out = String::new();
        for line in &self.lines {
            line.write_to(&mut out);
        }
        out
    }
}

impl AsRef<[Line]> for LineSet {
    fn as_ref(&self) -> &[Line] {
        &self.lines
    }
}

impl<'l> IntoIterator for &'l LineSet {
    type Item = &'l Line;
    type IntoIter = std::slice::Iter<'l, Line>;

    fn into_iter(self) -> Self::IntoIter {
        self.lines.iter()
    }
}
