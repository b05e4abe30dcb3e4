//! Turn aligned segments into renderable chunks
//!
//! Segments come from a plain line diff (one per opcode) or from an
//! interdiff (one per composed chunk). The renderer:
//!
//! 1. Checks the segments partition both files
//! 2. Merges neighbouring segments of the same kind and flags
//! 3. Pairs rows positionally and numbers them with virtual lines from 1
//! 4. Records every row, shown or hidden, in the anchor table
//! 5. Collapses unchanged runs beyond the context window
//!
//! Virtual lines are assigned before collapsing, so a comment anchor keeps
//! its line number whatever the context setting.

use crate::artifacts::core::config::DiffConfig;
use crate::artifacts::core::error::{DiffError, DiffResult};
use crate::artifacts::core::hashing::ContentHash;
use crate::artifacts::intraline::highlighter::IntraLineMap;
use crate::artifacts::lines::line::{Line, LineSet};
use crate::artifacts::render::anchor::{AnchorEntry, AnchorTable};
use crate::artifacts::render::render_chunk::{
    ChunkFlags, ChunkKind, RenderChunk, RenderRow, RowLine, Segment,
};
use std::ops::Range;
use tracing::{debug, trace};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Render {
    chunks: Vec<RenderChunk>,
    anchors: AnchorTable,
}

impl Render {
    pub fn chunks(&self) -> &[RenderChunk] {
        &self.chunks
    }

    pub fn anchors(&self) -> &AnchorTable {
        &self.anchors
    }

    /// Total virtual lines, hidden rows included
    pub fn vline_count(&self) -> usize {
        self.anchors.len()
    }

    /// Chunk showing or hiding virtual line `vline`
    pub fn chunk_for_vline(&self, vline: usize) -> Option<&RenderChunk> {
        self.anchors
            .get(vline)
            .and_then(|entry| self.chunks.get(entry.chunk))
    }

    /// Rows that are not hidden behind a placeholder
    pub fn visible_rows(&self) -> impl Iterator<Item = &RenderRow> {
        self.chunks.iter().flat_map(|chunk| chunk.rows.iter())
    }

    pub fn has_changes(&self) -> bool {
        self.chunks.iter().any(|chunk| chunk.kind.is_change())
    }
}

fn check_partition(segments: &[Segment], left_len: usize, right_len: usize) -> DiffResult<()> {
    let (mut left, mut right) = (0, 0);

    for segment in segments {
        if segment.left.start != left
            || segment.right.start != right
            || segment.left.end < segment.left.start
            || segment.right.end < segment.right.start
        {
            return Err(DiffError::malformed(format!(
                "segment {} [{:?}, {:?}] does not continue from ({}, {})",
                segment.kind, segment.left, segment.right, left, right
            )));
        }
        left = segment.left.end;
        right = segment.right.end;
    }

    if left != left_len || right != right_len {
        return Err(DiffError::malformed(format!(
            "segments cover ({}, {}) lines, files have ({}, {})",
            left, right, left_len, right_len
        )));
    }

    Ok(())
}

/// Merge neighbours of the same kind and flags that are contiguous on both sides
fn merge(segments: &[Segment]) -> Vec<Segment> {
    let mut merged: Vec<Segment> = Vec::with_capacity(segments.len());

    for segment in segments {
        if segment.left.is_empty() && segment.right.is_empty() {
            continue;
        }
        match merged.last_mut() {
            Some(last)
                if last.kind == segment.kind
                    && last.flags == segment.flags
                    && last.left.end == segment.left.start
                    && last.right.end == segment.right.start =>
            {
                last.left.end = segment.left.end;
                last.right.end = segment.right.end;
            }
            _ => merged.push(segment.clone()),
        }
    }

    merged
}

fn row_line(line: &Line) -> RowLine {
    RowLine::new(line.index(), line.content().to_string())
}

fn row_hash(left: Option<&Line>, right: Option<&Line>) -> ContentHash {
    let sides = [left, right].map(|line| line.map(Line::hash).unwrap_or_default());
    ContentHash::of_sequence(sides.iter())
}

/// Build the rows of one merged segment, pairing lines by offset
fn build_rows(
    segment: &Segment,
    left: &LineSet,
    right: &LineSet,
    intraline: Option<&IntraLineMap>,
    first_vline: usize,
) -> Vec<(RenderRow, ContentHash)> {
    let height = segment.left.len().max(segment.right.len());

    (0..height)
        .map(|offset| {
            let l = (offset < segment.left.len())
                .then(|| left.get(segment.left.start + offset))
                .flatten();
            let r = (offset < segment.right.len())
                .then(|| right.get(segment.right.start + offset))
                .flatten();

            let spans = match (segment.kind, l, r, intraline) {
                (ChunkKind::Replace, Some(l), Some(r), Some(map)) => {
                    map.get(&(l.index(), r.index())).cloned()
                }
                _ => None,
            };

            let row = RenderRow::new(
                first_vline + offset,
                l.map(row_line),
                r.map(row_line),
                spans,
            );
            (row, row_hash(l, r))
        })
        .collect()
}

fn whitespace_only(rows: &[RenderRow]) -> bool {
    let mut spans = rows.iter().filter_map(|row| row.spans.as_ref()).peekable();
    spans.peek().is_some() && spans.all(|span| span.whitespace_only)
}

/// Rows kept visible at the head and tail of an unchanged run
fn context_window(
    len: usize,
    context_lines: Option<usize>,
    has_prev: bool,
    has_next: bool,
) -> Option<(usize, usize)> {
    let context = context_lines?;
    let head = if has_prev { context } else { 0 };
    let tail = if has_next { context } else { 0 };

    (head + tail < len).then(|| (head, len - tail))
}

fn chunk(kind: ChunkKind, flags: ChunkFlags, rows: Vec<RenderRow>) -> RenderChunk {
    RenderChunk {
        kind,
        flags,
        rows,
        collapsed: None,
    }
}

/// Render aligned segments of `left` and `right` into chunks
///
/// # Arguments
///
/// * `segments` - Must partition both files, in order
/// * `intraline` - Spans for paired lines of replace segments, keyed by
///   `(left index, right index)`
/// * `config` - Only `context_lines` is read here
pub fn render(
    segments: &[Segment],
    left: &LineSet,
    right: &LineSet,
    intraline: Option<&IntraLineMap>,
    config: &DiffConfig,
) -> DiffResult<Render> {
    check_partition(segments, left.len(), right.len())?;

    let merged = merge(segments);
    let mut render = Render::default();
    let mut next_vline = 1;

    for (position, segment) in merged.iter().enumerate() {
        let rows = build_rows(segment, left, right, intraline, next_vline);
        next_vline += rows.len();

        let mut flags = segment.flags;
        let collapsible = segment.kind == ChunkKind::Equal && flags.is_empty();
        let window = if collapsible {
            context_window(
                rows.len(),
                config.context_lines,
                position > 0,
                position + 1 < merged.len(),
            )
        } else {
            None
        };

        let (rows, hashes): (Vec<_>, Vec<_>) = rows.into_iter().unzip();
        if segment.kind == ChunkKind::Replace && whitespace_only(&rows) {
            flags |= ChunkFlags::WHITESPACE_ONLY;
        }

        let pieces = match window {
            None => vec![(0..rows.len(), false)],
            Some((head, tail)) => [(0..head, false), (head..tail, true), (tail..rows.len(), false)]
                .into_iter()
                .filter(|(range, _)| !range.is_empty())
                .collect(),
        };

        for (range, hidden) in pieces {
            let index = render.chunks.len();
            for (row, hash) in rows[range.clone()].iter().zip(&hashes[range.clone()]) {
                render.anchors.push(AnchorEntry::new(
                    row.left.as_ref().map(|l| l.index),
                    row.right.as_ref().map(|r| r.index),
                    *hash,
                    index,
                ));
            }
            render.chunks.push(piece(segment.kind, flags, &rows, range, hidden));
        }
    }

    debug!(
        segments = segments.len(),
        chunks = render.chunks.len(),
        vlines = render.vline_count(),
        "rendered diff"
    );

    Ok(render)
}

fn piece(
    kind: ChunkKind,
    flags: ChunkFlags,
    rows: &[RenderRow],
    range: Range<usize>,
    hidden: bool,
) -> RenderChunk {
    if !hidden {
        return chunk(kind, flags, rows[range].to_vec());
    }

    let vlines = rows[range.start].vline..rows[range.end - 1].vline + 1;
    trace!(?vlines, "collapsing unchanged lines");
    RenderChunk {
        kind,
        flags: flags | ChunkFlags::COLLAPSED,
        rows: Vec::new(),
        collapsed: Some(vlines),
    }
}
