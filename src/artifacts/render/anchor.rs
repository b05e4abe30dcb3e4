//! Comment anchoring
//!
//! Comments are stored as a virtual line range plus the content hash of the
//! rows they cover, never as references into a render tree. When a diff is
//! rendered again the anchor is resolved against the new `AnchorTable`:
//!
//! - `Exact`: the same rows still carry the same content
//! - `Relocated`: the content moved; the nearest matching range wins
//! - `Orphaned`: the content is gone
//!
//! Virtual lines are 1-based, like the line numbers stored with comments.

use crate::artifacts::core::error::{DiffError, DiffResult};
use crate::artifacts::core::hashing::ContentHash;
use derive_new::new;
use std::ops::Range;

/// What a virtual line points at
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct AnchorEntry {
    pub left: Option<usize>,
    pub right: Option<usize>,
    /// Hash of the row's left and right content
    pub hash: ContentHash,
    /// Index of the render chunk showing or hiding this row
    pub chunk: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct CommentAnchor {
    pub first_line: usize,
    pub num_lines: usize,
    pub content_hash: ContentHash,
}

impl CommentAnchor {
    /// `None` for an empty or overflowing range
    pub fn last_line(&self) -> Option<usize> {
        self.vlines().map(|vlines| vlines.end - 1)
    }

    /// `None` for an empty or overflowing range
    pub fn vlines(&self) -> Option<Range<usize>> {
        span(self.first_line, self.num_lines)
    }
}

fn span(first_line: usize, num_lines: usize) -> Option<Range<usize>> {
    if first_line == 0 || num_lines == 0 {
        return None;
    }
    first_line
        .checked_add(num_lines)
        .map(|end| first_line..end)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnchorResolution {
    Exact(Range<usize>),
    Relocated(Range<usize>),
    Orphaned,
}

/// Side table from virtual line to file positions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnchorTable {
    entries: Vec<AnchorEntry>,
}

impl AnchorTable {
    pub(crate) fn push(&mut self, entry: AnchorEntry) -> usize {
        self.entries.push(entry);
        self.entries.len()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, vline: usize) -> Option<&AnchorEntry> {
        vline.checked_sub(1).and_then(|i| self.entries.get(i))
    }

    /// `(left index, right index)` of a virtual line
    pub fn positions(&self, vline: usize) -> Option<(Option<usize>, Option<usize>)> {
        self.get(vline).map(|entry| (entry.left, entry.right))
    }

    fn range_hash(&self, vlines: Range<usize>) -> Option<ContentHash> {
        let start = vlines.start.checked_sub(1)?;
        let end = vlines.end.checked_sub(1)?;
        self.entries
            .get(start..end)
            .map(|entries| ContentHash::of_sequence(entries.iter().map(|e| &e.hash)))
    }

    /// Anchor a comment on `num_lines` rows starting at `first_line`
    pub fn anchor(&self, first_line: usize, num_lines: usize) -> DiffResult<CommentAnchor> {
        let vlines = span(first_line, num_lines).ok_or_else(|| {
            DiffError::malformed(format!(
                "comment range {}+{} is not a valid line range",
                first_line, num_lines
            ))
        })?;

        let content_hash = self.range_hash(vlines.clone()).ok_or_else(|| {
            DiffError::malformed(format!(
                "comment range {}..{} is outside the {} rendered lines",
                vlines.start,
                vlines.end,
                self.len()
            ))
        })?;

        Ok(CommentAnchor::new(first_line, num_lines, content_hash))
    }

    /// Find where a stored anchor points in this render
    pub fn resolve(&self, anchor: &CommentAnchor) -> AnchorResolution {
        let Some(vlines) = anchor.vlines() else {
            return AnchorResolution::Orphaned;
        };
        if self.range_hash(vlines.clone()) == Some(anchor.content_hash) {
            return AnchorResolution::Exact(vlines);
        }

        let last_start = match self.len().checked_sub(anchor.num_lines) {
            Some(offset) => offset + 1,
            None => return AnchorResolution::Orphaned,
        };

        (1..=last_start)
            .filter(|&start| {
                self.range_hash(start..start + anchor.num_lines) == Some(anchor.content_hash)
            })
            .min_by_key(|&start| (start.abs_diff(anchor.first_line), start))
            .map(|start| AnchorResolution::Relocated(start..start + anchor.num_lines))
            .unwrap_or(AnchorResolution::Orphaned)
    }
}
