//! Token-level highlighting of changed lines
//!
//! For every line pair inside a replace region, the sequence matcher runs
//! again over the lines' tokens. Unmatched token runs become byte ranges on
//! each side; adjacent ranges are merged so a consumer can paint them
//! directly.
//!
//! Lines beyond the token budget are reported as fully changed instead of
//! failing the surrounding diff.

use crate::artifacts::core::config::DiffConfig;
use crate::artifacts::core::error::{DiffError, DiffResult};
use crate::artifacts::diff::opcode::{Opcode, OpcodeTag};
use crate::artifacts::diff::sequence_matcher::{MatchBudget, SequenceMatcher};
use crate::artifacts::intraline::token::{Token, tokenize};
use crate::artifacts::lines::line::{Line, LineSet};
use derive_new::new;
use std::collections::HashMap;
use std::ops::Range;
use tracing::debug;

/// Changed byte ranges of one line pair
#[derive(Debug, Clone, PartialEq, Eq, new)]
pub struct IntraLineSpan {
    /// Index of the left line
    pub a_line: usize,
    /// Index of the right line
    pub b_line: usize,
    pub a_spans: Vec<Range<usize>>,
    pub b_spans: Vec<Range<usize>>,
    /// Every changed token on both sides is whitespace
    pub whitespace_only: bool,
}

impl IntraLineSpan {
    /// Both lines marked as changed from start to end
    pub fn whole_line(a: &Line, b: &Line) -> Self {
        let full = |line: &Line| {
            if line.is_empty() {
                Vec::new()
            } else {
                vec![0..line.len()]
            }
        };

        Self::new(a.index(), b.index(), full(a), full(b), false)
    }

    pub fn is_whole_line(&self, a: &Line, b: &Line) -> bool {
        self.a_spans.iter().map(Range::len).sum::<usize>() == a.len()
            && self.b_spans.iter().map(Range::len).sum::<usize>() == b.len()
    }
}

/// Intra-line spans keyed by `(left index, right index)`
pub type IntraLineMap = HashMap<(usize, usize), IntraLineSpan>;

fn push_merged(spans: &mut Vec<Range<usize>>, range: Range<usize>) {
    if range.is_empty() {
        return;
    }

    match spans.last_mut() {
        Some(last) if last.end == range.start => last.end = range.end,
        _ => spans.push(range),
    }
}

fn token_span(tokens: &[Token], range: &Range<usize>) -> Range<usize> {
    match (tokens.get(range.start), range.end.checked_sub(1).and_then(|i| tokens.get(i))) {
        (Some(first), Some(last)) if !range.is_empty() => first.range().start..last.range().end,
        _ => 0..0,
    }
}

/// Changed regions of `b` relative to `a`, in byte offsets
pub fn highlight(a: &Line, b: &Line, config: &DiffConfig) -> DiffResult<IntraLineSpan> {
    let a_tokens = tokenize(a.content());
    let b_tokens = tokenize(b.content());

    let opcodes = SequenceMatcher::new(
        &a_tokens,
        &b_tokens,
        MatchBudget::for_tokens(&config.limits),
    )
    .with_autojunk(false)
    .opcodes()?;

    let mut a_spans = Vec::new();
    let mut b_spans = Vec::new();
    let mut whitespace_only = true;

    for opcode in opcodes.iter().filter(|op| op.is_change()) {
        whitespace_only &= a_tokens[opcode.a.clone()]
            .iter()
            .chain(&b_tokens[opcode.b.clone()])
            .all(Token::is_whitespace);

        push_merged(&mut a_spans, token_span(&a_tokens, &opcode.a));
        push_merged(&mut b_spans, token_span(&b_tokens, &opcode.b));
    }

    Ok(IntraLineSpan::new(
        a.index(),
        b.index(),
        a_spans,
        b_spans,
        whitespace_only,
    ))
}

/// Line pairs of a replace region, matched by offset from its start
///
/// Lines beyond the shorter side have no partner and are not highlighted.
pub fn replace_pairs(a: Range<usize>, b: Range<usize>) -> impl Iterator<Item = (usize, usize)> {
    a.zip(b)
}

/// Highlight explicit line pairs, falling back to whole-line spans for
/// lines over the token budget
pub fn highlight_pairs<I>(
    pairs: I,
    left: &LineSet,
    right: &LineSet,
    config: &DiffConfig,
) -> DiffResult<IntraLineMap>
where
    I: IntoIterator<Item = (usize, usize)>,
{
    let mut map = IntraLineMap::new();

    for (a_index, b_index) in pairs {
        let (a, b) = match (left.get(a_index), right.get(b_index)) {
            (Some(a), Some(b)) => (a, b),
            _ => {
                return Err(DiffError::malformed(format!(
                    "line pair ({}, {}) is out of range ({} and {} lines)",
                    a_index,
                    b_index,
                    left.len(),
                    right.len()
                )));
            }
        };

        let span = match highlight(a, b, config) {
            Ok(span) => span,
            Err(e) if e.is_resource_limit() => {
                debug!(a_index, b_index, error = %e, "highlighting whole line");
                IntraLineSpan::whole_line(a, b)
            }
            Err(e) => return Err(e),
        };
        map.insert((a_index, b_index), span);
    }

    Ok(map)
}

/// Highlight every paired line inside the replace opcodes of a line diff
pub fn highlight_opcodes(
    opcodes: &[Opcode],
    a: &LineSet,
    b: &LineSet,
    config: &DiffConfig,
) -> DiffResult<IntraLineMap> {
    let pairs = opcodes
        .iter()
        .filter(|op| op.tag == OpcodeTag::Replace)
        .flat_map(|op| replace_pairs(op.a.clone(), op.b.clone()));

    highlight_pairs(pairs, a, b, config)
}
