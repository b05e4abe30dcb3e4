//! A diff of one uploaded revision against the original file
//!
//! The composer never looks at modified file content directly. It only
//! needs the opcode script, the original length, and one content hash per
//! line of the modified revision.

use crate::artifacts::core::config::DiffConfig;
use crate::artifacts::core::error::DiffResult;
use crate::artifacts::core::hashing::ContentHash;
use crate::artifacts::diff::opcode::{Opcode, validate};
use crate::artifacts::diff::sequence_matcher::diff_lines;
use crate::artifacts::lines::line::LineSet;
use std::ops::Range;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RevisionDiff {
    opcodes: Vec<Opcode>,
    original_len: usize,
    modified: Vec<ContentHash>,
}

impl RevisionDiff {
    /// Diff `modified` against `original`
    pub fn compute(original: &LineSet, modified: &LineSet, config: &DiffConfig) -> DiffResult<Self> {
        let opcodes = diff_lines(original, modified, config)?;

        Ok(Self {
            opcodes,
            original_len: original.len(),
            modified: modified.hashes(),
        })
    }

    /// Wrap an opcode script computed elsewhere
    ///
    /// The script must partition `0..original_len` and the modified lines.
    pub fn try_new(
        opcodes: Vec<Opcode>,
        original_len: usize,
        modified: Vec<ContentHash>,
    ) -> DiffResult<Self> {
        validate(&opcodes, original_len, modified.len())?;

        Ok(Self {
            opcodes,
            original_len,
            modified,
        })
    }

    pub fn opcodes(&self) -> &[Opcode] {
        &self.opcodes
    }

    pub fn original_len(&self) -> usize {
        self.original_len
    }

    pub fn modified_len(&self) -> usize {
        self.modified.len()
    }

    pub fn modified_hashes(&self, range: Range<usize>) -> &[ContentHash] {
        &self.modified[range]
    }

    /// Opcodes whose original range touches position `p`
    fn touching(&self, p: usize) -> impl Iterator<Item = &Opcode> {
        let first = self.opcodes.partition_point(|op| op.a.end < p);
        self.opcodes[first..]
            .iter()
            .take_while(move |op| op.a.start <= p)
    }

    fn candidates(&self, p: usize) -> impl Iterator<Item = usize> + '_ {
        self.touching(p).flat_map(move |op| {
            let mut found = Vec::with_capacity(2);
            if op.is_change() {
                if op.a.start == p {
                    found.push(op.b.start);
                }
                if op.a.end == p {
                    found.push(op.b.end);
                }
            } else {
                found.push(op.b.start + (p - op.a.start));
            }
            found
        })
    }

    /// Modified-side position of original position `p`, before anything
    /// inserted at `p`
    pub fn position_before(&self, p: usize) -> usize {
        self.candidates(p).min().unwrap_or(0)
    }

    /// Modified-side position of original position `p`, after anything
    /// inserted at `p`
    pub fn position_after(&self, p: usize) -> usize {
        self.candidates(p).max().unwrap_or(self.modified.len())
    }

    /// Index of the opcode covering the non-empty original range starting at `p`
    pub fn opcode_index_at(&self, p: usize) -> Option<usize> {
        let index = self.opcodes.partition_point(|op| op.a.end <= p);
        (index < self.opcodes.len()).then_some(index)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::core::error::DiffError;
    use crate::artifacts::diff::opcode::OpcodeTag;
    use pretty_assertions::assert_eq;

    fn revision(original: &str, modified: &str) -> RevisionDiff {
        RevisionDiff::compute(
            &LineSet::tokenize(original),
            &LineSet::tokenize(modified),
            &DiffConfig::default(),
        )
        .unwrap()
    }

    #[test]
    fn positions_straddle_insertions() {
        let diff = revision("a\nb\n", "a\nx\ny\nb\n");

        assert_eq!(diff.position_before(1), 1);
        assert_eq!(diff.position_after(1), 3);
        assert_eq!(diff.position_before(2), 4);
        assert_eq!(diff.position_after(0), 0);
    }

    #[test]
    fn positions_follow_deletions() {
        let diff = revision("a\nb\nc\n", "a\nc\n");

        assert_eq!(diff.position_before(1), 1);
        assert_eq!(diff.position_after(2), 1);
        assert_eq!(diff.position_after(3), 2);
    }

    #[test]
    fn opcode_index_skips_insertions_at_the_same_point() {
        let diff = revision("a\nb\n", "x\na\nb\n");

        assert_eq!(diff.opcodes()[0].tag, OpcodeTag::Insert);
        assert_eq!(diff.opcode_index_at(0), Some(1));
        assert_eq!(diff.opcode_index_at(2), None);
    }

    #[test]
    fn scripts_that_do_not_partition_are_rejected() {
        let opcodes = vec![Opcode::new(OpcodeTag::Equal, 0..1, 0..1)];
        let hashes = vec![ContentHash::of_line("a", true)];

        let result = RevisionDiff::try_new(opcodes, 2, hashes);

        assert!(matches!(result, Err(DiffError::MalformedInput(_))));
    }
}
