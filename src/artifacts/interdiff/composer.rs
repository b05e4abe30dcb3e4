//! Interdiff composition
//!
//! Given two diffs against the same original file, the composer tells a
//! reviewer what changed between the two uploaded revisions, without
//! repeating changes they have already seen.
//!
//! ## Algorithm
//!
//! Both opcode scripts share the original file as coordinate space. The
//! changes of both diffs are sorted by original position and clustered:
//! changes overlap, or one of them is an insertion at a point of the other,
//! end up in the same region. Everything between regions is untouched by
//! both diffs and becomes an `Equal` chunk.
//!
//! Each region is mapped to a range of the old revision and a range of the
//! new revision, then classified:
//!
//! | touched by     | content of both revisions | kind                      |
//! |----------------|---------------------------|---------------------------|
//! | old diff only  | -                         | `Equal` (`OldOnly`)       |
//! | new diff only  | -                         | insert / delete / replace |
//! | both           | identical                 | `ReplaceEqual`            |
//! | both           | different                 | insert / delete / replace |
//!
//! The kind of a genuinely new region is decided by the sizes of its old and
//! new revision ranges. When the old diff left the region alone this is the
//! kind of the new diff's own opcode.
//!
//! ## Invariants
//!
//! The `a` ranges of the chunks partition the original file, and the
//! `old_b`/`new_b` ranges partition the old and new revisions.

use crate::artifacts::core::error::{DiffError, DiffResult};
use crate::artifacts::diff::opcode::OpcodeTag;
use crate::artifacts::interdiff::revision_diff::RevisionDiff;
use std::fmt;
use std::ops::Range;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InterdiffKind {
    Equal,
    Insert,
    Delete,
    Replace,
    /// Both revisions changed the region and ended up with identical content
    ReplaceEqual,
}

impl From<OpcodeTag> for InterdiffKind {
    fn from(tag: OpcodeTag) -> Self {
        match tag {
            OpcodeTag::Equal => InterdiffKind::Equal,
            OpcodeTag::Insert => InterdiffKind::Insert,
            OpcodeTag::Delete => InterdiffKind::Delete,
            OpcodeTag::Replace => InterdiffKind::Replace,
        }
    }
}

impl fmt::Display for InterdiffKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InterdiffKind::Equal => write!(f, "equal"),
            InterdiffKind::Insert => write!(f, "insert"),
            InterdiffKind::Delete => write!(f, "delete"),
            InterdiffKind::Replace => write!(f, "replace"),
            InterdiffKind::ReplaceEqual => write!(f, "replace-equal"),
        }
    }
}

/// Which of the two diffs touched a region
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeOrigin {
    Neither,
    OldOnly,
    NewOnly,
    Both,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InterdiffChunk {
    pub kind: InterdiffKind,
    pub origin: ChangeOrigin,
    /// Range in the original file
    pub a: Range<usize>,
    /// Range in the old revision
    pub old_b: Range<usize>,
    /// Range in the new revision
    pub new_b: Range<usize>,
    /// Indices of the old diff's opcodes this chunk covers
    pub old_ops: Vec<usize>,
    /// Indices of the new diff's opcodes this chunk covers
    pub new_ops: Vec<usize>,
}

impl InterdiffChunk {
    /// Whether a reviewer sees the region as unchanged between revisions
    pub fn displays_unchanged(&self) -> bool {
        matches!(self.kind, InterdiffKind::Equal | InterdiffKind::ReplaceEqual)
    }

    /// Whether the region holds changes the reviewer has not seen yet
    pub fn is_new_change(&self) -> bool {
        !self.displays_unchanged()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Old,
    New,
}

#[derive(Debug, Clone)]
struct Change {
    side: Side,
    op_index: usize,
    a: Range<usize>,
}

#[derive(Debug)]
struct Region {
    a: Range<usize>,
    old_ops: Vec<usize>,
    new_ops: Vec<usize>,
}

impl Region {
    fn start(change: &Change) -> Self {
        let mut region = Region {
            a: change.a.clone(),
            old_ops: Vec::new(),
            new_ops: Vec::new(),
        };
        region.add(change);
        region
    }

    /// Overlapping ranges interact, and so does an insertion point at
    /// either edge of the other range
    fn touches(&self, change: &Change) -> bool {
        change.a.start < self.a.end
            || (change.a.start == self.a.end && (change.a.is_empty() || self.a.is_empty()))
    }

    fn add(&mut self, change: &Change) {
        self.a.end = self.a.end.max(change.a.end);
        match change.side {
            Side::Old => self.old_ops.push(change.op_index),
            Side::New => self.new_ops.push(change.op_index),
        }
    }
}

fn changes(diff: &RevisionDiff, side: Side) -> impl Iterator<Item = Change> + '_ {
    diff.opcodes()
        .iter()
        .enumerate()
        .filter(|(_, op)| op.is_change())
        .map(move |(op_index, op)| Change {
            side,
            op_index,
            a: op.a.clone(),
        })
}

fn regions(old: &RevisionDiff, new: &RevisionDiff) -> Vec<Region> {
    let mut all: Vec<Change> = changes(old, Side::Old).chain(changes(new, Side::New)).collect();
    all.sort_by_key(|change| (change.a.start, change.a.end));

    let mut regions: Vec<Region> = Vec::new();
    for change in &all {
        match regions.last_mut() {
            Some(region) if region.touches(change) => region.add(change),
            _ => regions.push(Region::start(change)),
        }
    }

    regions
}

/// Compose two diffs of the same original into interdiff chunks
pub fn compose(old: &RevisionDiff, new: &RevisionDiff) -> DiffResult<Vec<InterdiffChunk>> {
    if old.original_len() != new.original_len() {
        return Err(DiffError::MismatchedBase {
            old_len: old.original_len(),
            new_len: new.original_len(),
        });
    }

    let mut chunks = Vec::new();
    let (mut a_pos, mut old_pos, mut new_pos) = (0, 0, 0);

    for region in regions(old, new) {
        let old_b = old.position_before(region.a.start)..old.position_after(region.a.end);
        let new_b = new.position_before(region.a.start)..new.position_after(region.a.end);

        push_equal(
            &mut chunks,
            old,
            new,
            a_pos..region.a.start,
            old_pos..old_b.start,
            new_pos..new_b.start,
        )?;

        let identical = old.modified_hashes(old_b.clone()) == new.modified_hashes(new_b.clone());
        let (kind, origin) = match (region.old_ops.is_empty(), region.new_ops.is_empty()) {
            (false, true) => (InterdiffKind::Equal, ChangeOrigin::OldOnly),
            (false, false) if identical => (InterdiffKind::ReplaceEqual, ChangeOrigin::Both),
            (old_untouched, _) => {
                let kind = OpcodeTag::for_change(old_b.len(), new_b.len())
                    .map(InterdiffKind::from)
                    .unwrap_or(InterdiffKind::ReplaceEqual);
                let origin = if old_untouched {
                    ChangeOrigin::NewOnly
                } else {
                    ChangeOrigin::Both
                };
                (kind, origin)
            }
        };

        a_pos = region.a.end;
        old_pos = old_b.end;
        new_pos = new_b.end;

        chunks.push(InterdiffChunk {
            kind,
            origin,
            a: region.a,
            old_b,
            new_b,
            old_ops: region.old_ops,
            new_ops: region.new_ops,
        });
    }

    push_equal(
        &mut chunks,
        old,
        new,
        a_pos..old.original_len(),
        old_pos..old.modified_len(),
        new_pos..new.modified_len(),
    )?;

    debug!(
        chunks = chunks.len(),
        new_changes = chunks.iter().filter(|c| c.is_new_change()).count(),
        "composed interdiff"
    );

    Ok(chunks)
}

fn push_equal(
    chunks: &mut Vec<InterdiffChunk>,
    old: &RevisionDiff,
    new: &RevisionDiff,
    a: Range<usize>,
    old_b: Range<usize>,
    new_b: Range<usize>,
) -> DiffResult<()> {
    if a.len() != old_b.len() || a.len() != new_b.len() {
        return Err(DiffError::malformed(format!(
            "unchanged region a[{}:{}] maps to old[{}:{}] and new[{}:{}]",
            a.start, a.end, old_b.start, old_b.end, new_b.start, new_b.end
        )));
    }
    if a.is_empty() {
        return Ok(());
    }

    chunks.push(InterdiffChunk {
        kind: InterdiffKind::Equal,
        origin: ChangeOrigin::Neither,
        old_ops: old.opcode_index_at(a.start).into_iter().collect(),
        new_ops: new.opcode_index_at(a.start).into_iter().collect(),
        a,
        old_b,
        new_b,
    });

    Ok(())
}
