//! Renderer output types
//!
//! A `RenderChunk` is a run of rows of one kind. Rows carry their virtual
//! line number, the left and right line (either may be absent), and the
//! intra-line spans of the pair. Collapsed chunks carry no rows, only the
//! range of virtual lines they stand for.

use crate::artifacts::diff::opcode::{Opcode, OpcodeTag};
use crate::artifacts::interdiff::composer::{ChangeOrigin, InterdiffChunk, InterdiffKind};
use crate::artifacts::intraline::highlighter::IntraLineSpan;
use bitflags::bitflags;
use derive_new::new;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChunkKind {
    Equal,
    Insert,
    Delete,
    Replace,
    /// Changed in both revisions of an interdiff, with identical results
    ReplaceEqual,
}

impl ChunkKind {
    pub fn is_change(&self) -> bool {
        matches!(
            self,
            ChunkKind::Insert | ChunkKind::Delete | ChunkKind::Replace
        )
    }
}

impl From<OpcodeTag> for ChunkKind {
    fn from(tag: OpcodeTag) -> Self {
        match tag {
            OpcodeTag::Equal => ChunkKind::Equal,
            OpcodeTag::Insert => ChunkKind::Insert,
            OpcodeTag::Delete => ChunkKind::Delete,
            OpcodeTag::Replace => ChunkKind::Replace,
        }
    }
}

impl From<InterdiffKind> for ChunkKind {
    fn from(kind: InterdiffKind) -> Self {
        match kind {
            InterdiffKind::Equal => ChunkKind::Equal,
            InterdiffKind::Insert => ChunkKind::Insert,
            InterdiffKind::Delete => ChunkKind::Delete,
            InterdiffKind::Replace => ChunkKind::Replace,
            InterdiffKind::ReplaceEqual => ChunkKind::ReplaceEqual,
        }
    }
}

impl fmt::Display for ChunkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkKind::Equal => write!(f, "equal"),
            ChunkKind::Insert => write!(f, "insert"),
            ChunkKind::Delete => write!(f, "delete"),
            ChunkKind::Replace => write!(f, "replace"),
            ChunkKind::ReplaceEqual => write!(f, "replace-equal"),
        }
    }
}

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct ChunkFlags: u8 {
        /// Interdiff change the reviewer has not seen before
        const NEW_CHANGE = 0b0001;
        /// Interdiff region only the old revision touched
        const PREVIOUSLY_CHANGED = 0b0010;
        /// Every highlighted pair differs in whitespace only
        const WHITESPACE_ONLY = 0b0100;
        /// Rows hidden behind a placeholder
        const COLLAPSED = 0b1000;
    }
}

/// Renderer input: one aligned region of the left and right files
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct Segment {
    pub kind: ChunkKind,
    pub flags: ChunkFlags,
    pub left: Range<usize>,
    pub right: Range<usize>,
}

impl From<&Opcode> for Segment {
    fn from(opcode: &Opcode) -> Self {
        Segment::new(
            opcode.tag.into(),
            ChunkFlags::empty(),
            opcode.a.clone(),
            opcode.b.clone(),
        )
    }
}

impl From<&InterdiffChunk> for Segment {
    fn from(chunk: &InterdiffChunk) -> Self {
        let mut flags = ChunkFlags::empty();
        if chunk.is_new_change() {
            flags |= ChunkFlags::NEW_CHANGE;
        }
        if chunk.origin == ChangeOrigin::OldOnly {
            flags |= ChunkFlags::PREVIOUSLY_CHANGED;
        }

        Segment::new(
            chunk.kind.into(),
            flags,
            chunk.old_b.clone(),
            chunk.new_b.clone(),
        )
    }
}

/// One side of a row
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RowLine {
    /// 0-based index in its file
    pub index: usize,
    pub content: String,
}

impl RowLine {
    /// 1-based line number for display
    pub fn number(&self) -> usize {
        self.index + 1
    }
}

#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct RenderRow {
    /// Virtual line number, starting at 1
    pub vline: usize,
    pub left: Option<RowLine>,
    pub right: Option<RowLine>,
    pub spans: Option<IntraLineSpan>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderChunk {
    pub kind: ChunkKind,
    pub flags: ChunkFlags,
    pub rows: Vec<RenderRow>,
    /// Virtual lines hidden behind this placeholder
    pub collapsed: Option<Range<usize>>,
}

impl RenderChunk {
    pub fn is_collapsed(&self) -> bool {
        self.collapsed.is_some()
    }

    /// Virtual lines this chunk stands for, shown or hidden
    pub fn vlines(&self) -> Range<usize> {
        match (&self.collapsed, self.rows.first(), self.rows.last()) {
            (Some(hidden), _, _) => hidden.clone(),
            (None, Some(first), Some(last)) => first.vline..last.vline + 1,
            _ => 0..0,
        }
    }

    pub fn hidden_lines(&self) -> usize {
        self.collapsed.as_ref().map(Range::len).unwrap_or(0)
    }
}
