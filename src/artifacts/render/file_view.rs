//! One file's diff, ready to display
//!
//! `FileDiffView` runs the whole pipeline for a file: line tokenizing, the
//! line diff (or the two revision diffs and their composition for an
//! interdiff), intra-line highlighting and rendering. Views are immutable
//! once built, which is what lets the cache hand out shared references.

use crate::artifacts::core::config::DiffConfig;
use crate::artifacts::core::error::DiffResult;
use crate::artifacts::diff::opcode::Opcode;
use crate::artifacts::diff::sequence_matcher::diff_lines;
use crate::artifacts::interdiff::composer::{InterdiffChunk, compose};
use crate::artifacts::interdiff::revision_diff::RevisionDiff;
use crate::artifacts::intraline::highlighter::{
    IntraLineMap, highlight_opcodes, highlight_pairs, replace_pairs,
};
use crate::artifacts::lines::line::LineSet;
use crate::artifacts::render::anchor::{AnchorResolution, CommentAnchor};
use crate::artifacts::render::render_chunk::{ChunkKind, Segment};
use crate::artifacts::render::renderer::{Render, render};
use std::fmt;
use tracing::debug;

/// Row counts per kind, hidden rows included
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DiffStats {
    pub inserted: usize,
    pub deleted: usize,
    pub replaced: usize,
    pub unchanged: usize,
}

impl DiffStats {
    fn from_segments(segments: &[Segment]) -> Self {
        segments.iter().fold(Self::default(), |mut stats, segment| {
            let rows = segment.left.len().max(segment.right.len());
            match segment.kind {
                ChunkKind::Insert => stats.inserted += rows,
                ChunkKind::Delete => stats.deleted += rows,
                ChunkKind::Replace => stats.replaced += rows,
                ChunkKind::Equal | ChunkKind::ReplaceEqual => stats.unchanged += rows,
            }
            stats
        })
    }

    pub fn changed(&self) -> usize {
        self.inserted + self.deleted + self.replaced
    }
}

impl fmt::Display for DiffStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} inserted, {} deleted, {} replaced",
            self.inserted, self.deleted, self.replaced
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewSource {
    Diff(Vec<Opcode>),
    Interdiff(Vec<InterdiffChunk>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDiffView {
    left: LineSet,
    right: LineSet,
    source: ViewSource,
    render: Render,
    stats: DiffStats,
}

impl FileDiffView {
    /// Diff two versions of a file
    pub fn diff(old_text: &str, new_text: &str, config: &DiffConfig) -> DiffResult<Self> {
        Self::from_lines(LineSet::tokenize(old_text), LineSet::tokenize(new_text), config)
    }

    pub fn from_lines(left: LineSet, right: LineSet, config: &DiffConfig) -> DiffResult<Self> {
        let opcodes = diff_lines(&left, &right, config)?;
        let intraline = if config.intraline {
            Some(highlight_opcodes(&opcodes, &left, &right, config)?)
        } else {
            None
        };

        let segments: Vec<Segment> = opcodes.iter().map(Segment::from).collect();
        Self::build(left, right, ViewSource::Diff(opcodes), segments, intraline, config)
    }

    /// Show what changed between two revisions of the same change
    ///
    /// # Arguments
    ///
    /// * `original` - The file both revisions were made against
    /// * `old_text` - The revision the reviewer already saw
    /// * `new_text` - The revision under review
    pub fn interdiff(
        original: &str,
        old_text: &str,
        new_text: &str,
        config: &DiffConfig,
    ) -> DiffResult<Self> {
        let original = LineSet::tokenize(original);
        let left = LineSet::tokenize(old_text);
        let right = LineSet::tokenize(new_text);

        let old_diff = RevisionDiff::compute(&original, &left, config)?;
        let new_diff = RevisionDiff::compute(&original, &right, config)?;
        let chunks = compose(&old_diff, &new_diff)?;

        let segments: Vec<Segment> = chunks.iter().map(Segment::from).collect();
        let intraline = if config.intraline {
            let pairs = segments
                .iter()
                .filter(|segment| segment.kind == ChunkKind::Replace)
                .flat_map(|segment| replace_pairs(segment.left.clone(), segment.right.clone()));
            Some(highlight_pairs(pairs, &left, &right, config)?)
        } else {
            None
        };

        Self::build(left, right, ViewSource::Interdiff(chunks), segments, intraline, config)
    }

    fn build(
        left: LineSet,
        right: LineSet,
        source: ViewSource,
        segments: Vec<Segment>,
        intraline: Option<IntraLineMap>,
        config: &DiffConfig,
    ) -> DiffResult<Self> {
        let render = render(&segments, &left, &right, intraline.as_ref(), config)?;
        let stats = DiffStats::from_segments(&segments);
        debug!(%stats, "built file view");

        Ok(Self {
            left,
            right,
            source,
            render,
            stats,
        })
    }

    pub fn left(&self) -> &LineSet {
        &self.left
    }

    pub fn right(&self) -> &LineSet {
        &self.right
    }

    pub fn source(&self) -> &ViewSource {
        &self.source
    }

    pub fn render(&self) -> &Render {
        &self.render
    }

    pub fn stats(&self) -> DiffStats {
        self.stats
    }

    pub fn is_interdiff(&self) -> bool {
        matches!(self.source, ViewSource::Interdiff(_))
    }

    pub fn anchor_comment(&self, first_line: usize, num_lines: usize) -> DiffResult<CommentAnchor> {
        self.render.anchors().anchor(first_line, num_lines)
    }

    pub fn resolve_comment(&self, anchor: &CommentAnchor) -> AnchorResolution {
        self.render.anchors().resolve(anchor)
    }
}
