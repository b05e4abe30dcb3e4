//! Longest-matching-block sequence matcher
//!
//! Aligns two sequences by repeatedly finding the longest block of equal
//! elements and recursing on the unmatched regions to its left and right.
//! The same matcher serves lines (whole-file diffs) and tokens (intra-line
//! highlighting).
//!
//! ## Algorithm Overview
//!
//! 1. Every distinct element is interned to a small integer so comparisons
//!    are O(1) regardless of line length.
//! 2. An index maps each element of B to the ascending list of positions
//!    where it occurs.
//! 3. `find_longest_match` sweeps A and, for each candidate position in B,
//!    extends the run that ended one step earlier. The first longest run
//!    wins, which makes the earliest start in A, then in B, the tie-break.
//! 4. Matching blocks are collected with an explicit work stack, sorted,
//!    merged when adjacent, and converted into opcodes.
//!
//! ## Junk Tolerance
//!
//! When B has at least `AUTOJUNK_MIN_LEN` elements, elements occurring more
//! than 1% + 1 times are left out of the index. Blank lines and closing
//! braces in large files would otherwise make the sweep quadratic. Such
//! "popular" elements still join a match when it is extended at its edges.
//!
//! ## Budget
//!
//! Sequence lengths and the number of candidate positions visited are capped
//! per invocation; exceeding either returns `ResourceLimitExceeded`.

use crate::artifacts::core::config::{DiffConfig, DiffLimits};
use crate::artifacts::core::error::{DiffError, DiffResult, LimitKind};
use crate::artifacts::diff::opcode::{Opcode, OpcodeTag};
use crate::artifacts::lines::line::{Line, LineSet};
use derive_new::new;
use std::collections::HashMap;
use std::hash::Hash;
use tracing::{debug, trace};

/// Minimum length of B before popular elements are dropped from the index
pub const AUTOJUNK_MIN_LEN: usize = 200;

/// A run of `size` equal elements at `a` in A and `b` in B
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, new)]
pub struct MatchingBlock {
    pub a: usize,
    pub b: usize,
    pub size: usize,
}

/// Budget applied to a single matcher run
#[derive(Debug, Clone, Copy, PartialEq, Eq, new)]
pub struct MatchBudget {
    max_len: usize,
    len_kind: LimitKind,
    max_comparisons: u64,
}

impl MatchBudget {
    pub fn for_lines(limits: &DiffLimits) -> Self {
        Self::new(limits.max_lines, LimitKind::Lines, limits.max_comparisons)
    }

    pub fn for_tokens(limits: &DiffLimits) -> Self {
        Self::new(
            limits.max_line_tokens,
            LimitKind::LineTokens,
            limits.max_comparisons,
        )
    }

    fn check_len(&self, len: usize) -> DiffResult<()> {
        if len > self.max_len {
            return Err(DiffError::ResourceLimitExceeded {
                kind: self.len_kind,
                limit: self.max_len as u64,
                actual: len as u64,
            });
        }

        Ok(())
    }
}

/// Running count of comparisons against the budget
#[derive(Debug)]
struct ComparisonMeter {
    used: u64,
    limit: u64,
}

impl ComparisonMeter {
    fn spend(&mut self, amount: u64) -> DiffResult<()> {
        self.used = self.used.saturating_add(amount);
        if self.used > self.limit {
            return Err(DiffError::ResourceLimitExceeded {
                kind: LimitKind::Comparisons,
                limit: self.limit,
                actual: self.used,
            });
        }

        Ok(())
    }
}

/// Both sequences rewritten as element ids, plus the position index of B
#[derive(Debug)]
struct Interned {
    a: Vec<usize>,
    b: Vec<usize>,
    b2j: Vec<Vec<usize>>,
}

impl Interned {
    fn build<'t, T: Eq + Hash>(a: &'t [T], b: &'t [T], autojunk: bool) -> Self {
        let mut ids: HashMap<&'t T, usize> = HashMap::new();
        let b = intern(b, &mut ids);
        let a = intern(a, &mut ids);

        let mut b2j = vec![Vec::new(); ids.len()];
        for (j, &id) in b.iter().enumerate() {
            b2j[id].push(j);
        }

        if autojunk && b.len() >= AUTOJUNK_MIN_LEN {
            let threshold = b.len() / 100 + 1;
            let mut popular = 0;
            for positions in b2j.iter_mut().filter(|p| p.len() > threshold) {
                positions.clear();
                popular += 1;
            }
            trace!(popular, threshold, "dropped popular elements from index");
        }

        Self { a, b, b2j }
    }
}

fn intern<'t, T: Eq + Hash>(items: &'t [T], ids: &mut HashMap<&'t T, usize>) -> Vec<usize> {
    items
        .iter()
        .map(|item| {
            let next = ids.len();
            *ids.entry(item).or_insert(next)
        })
        .collect()
}

#[derive(Debug, Clone, new)]
pub struct SequenceMatcher<'d, T> {
    a: &'d [T],
    b: &'d [T],
    budget: MatchBudget,
    #[new(value = "true")]
    autojunk: bool,
}

impl<'d, T: Eq + Hash> SequenceMatcher<'d, T> {
    pub fn with_autojunk(mut self, autojunk: bool) -> Self {
        self.autojunk = autojunk;
        self
    }

    /// Maximal runs of equal elements, ordered by position, ending with a
    /// zero-sized sentinel at `(a.len(), b.len())`
    pub fn matching_blocks(&self) -> DiffResult<Vec<MatchingBlock>> {
        self.budget.check_len(self.a.len())?;
        self.budget.check_len(self.b.len())?;

        let interned = Interned::build(self.a, self.b, self.autojunk);
        let mut meter = ComparisonMeter {
            used: 0,
            limit: self.budget.max_comparisons,
        };

        let (la, lb) = (interned.a.len(), interned.b.len());
        let mut stack = vec![(0, la, 0, lb)];
        let mut blocks = Vec::new();

        while let Some((alo, ahi, blo, bhi)) = stack.pop() {
            let block = find_longest_match(&interned, alo, ahi, blo, bhi, &mut meter)?;
            if block.size == 0 {
                continue;
            }

            if alo < block.a && blo < block.b {
                stack.push((alo, block.a, blo, block.b));
            }
            if block.a + block.size < ahi && block.b + block.size < bhi {
                stack.push((block.a + block.size, ahi, block.b + block.size, bhi));
            }
            blocks.push(block);
        }

        blocks.sort();

        let mut merged: Vec<MatchingBlock> = Vec::with_capacity(blocks.len() + 1);
        for block in blocks {
            match merged.last_mut() {
                Some(last) if last.a + last.size == block.a && last.b + last.size == block.b => {
                    last.size += block.size;
                }
                _ => merged.push(block),
            }
        }
        merged.push(MatchingBlock::new(la, lb, 0));

        trace!(
            a_len = la,
            b_len = lb,
            blocks = merged.len() - 1,
            comparisons = meter.used,
            "matched sequences"
        );

        Ok(merged)
    }

    /// Opcode script turning A into B
    pub fn opcodes(&self) -> DiffResult<Vec<Opcode>> {
        let blocks = self.matching_blocks()?;
        let mut opcodes = Vec::new();
        let (mut i, mut j) = (0, 0);

        for block in blocks {
            if let Some(tag) = OpcodeTag::for_change(block.a - i, block.b - j) {
                opcodes.push(Opcode::new(tag, i..block.a, j..block.b));
            }

            i = block.a + block.size;
            j = block.b + block.size;

            if block.size > 0 {
                opcodes.push(Opcode::new(OpcodeTag::Equal, block.a..i, block.b..j));
            }
        }

        Ok(opcodes)
    }
}

/// Longest run of equal elements within `a[alo..ahi]` and `b[blo..bhi]`
///
/// Returns a zero-sized block at `(alo, blo)` when nothing matches.
fn find_longest_match(
    interned: &Interned,
    alo: usize,
    ahi: usize,
    blo: usize,
    bhi: usize,
    meter: &mut ComparisonMeter,
) -> DiffResult<MatchingBlock> {
    let (a, b) = (&interned.a, &interned.b);
    let (mut best_i, mut best_j, mut best_size) = (alo, blo, 0);

    // run length of the match ending at each position of b, for row i - 1
    let mut j2len: HashMap<usize, usize> = HashMap::new();

    for i in alo..ahi {
        let mut next_j2len = HashMap::new();
        let positions = &interned.b2j[a[i]];
        meter.spend(positions.len() as u64 + 1)?;

        for &j in positions {
            if j < blo {
                continue;
            }
            if j >= bhi {
                break;
            }

            let k = j.checked_sub(1).and_then(|p| j2len.get(&p)).copied().unwrap_or(0) + 1;
            next_j2len.insert(j, k);

            if k > best_size {
                best_i = i + 1 - k;
                best_j = j + 1 - k;
                best_size = k;
            }
        }

        j2len = next_j2len;
    }

    while best_i > alo && best_j > blo && a[best_i - 1] == b[best_j - 1] {
        best_i -= 1;
        best_j -= 1;
        best_size += 1;
    }
    while best_i + best_size < ahi
        && best_j + best_size < bhi
        && a[best_i + best_size] == b[best_j + best_size]
    {
        best_size += 1;
    }

    Ok(MatchingBlock::new(best_i, best_j, best_size))
}

/// Line-level diff of two file revisions
pub fn diff_lines(a: &LineSet, b: &LineSet, config: &DiffConfig) -> DiffResult<Vec<Opcode>> {
    let opcodes = SequenceMatcher::<Line>::new(
        a.lines(),
        b.lines(),
        MatchBudget::for_lines(&config.limits),
    )
    .with_autojunk(config.autojunk)
    .opcodes()
    .inspect_err(|e| debug!(error = %e, "line matcher gave up"))?;

    debug!(
        a_lines = a.len(),
        b_lines = b.len(),
        opcodes = opcodes.len(),
        changes = opcodes.iter().filter(|op| op.is_change()).count(),
        "computed line diff"
    );

    Ok(opcodes)
}
