//! Alignment opcodes between two sequences
//!
//! An opcode script partitions both index spaces: ranges are half-open,
//! ordered, and leave neither gaps nor overlaps. `validate` enforces that
//! for scripts that come from outside the matcher, and `replay` rebuilds the
//! modified side from the original plus the script.

use crate::artifacts::core::error::{DiffError, DiffResult};
use crate::artifacts::lines::line::LineSet;
use derive_new::new;
use std::fmt;
use std::ops::Range;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum OpcodeTag {
    Equal,
    Insert,
    Delete,
    Replace,
}

impl OpcodeTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            OpcodeTag::Equal => "equal",
            OpcodeTag::Insert => "insert",
            OpcodeTag::Delete => "delete",
            OpcodeTag::Replace => "replace",
        }
    }

    /// Tag implied by the sizes of a changed region
    pub fn for_change(a_len: usize, b_len: usize) -> Option<Self> {
        match (a_len, b_len) {
            (0, 0) => None,
            (0, _) => Some(OpcodeTag::Insert),
            (_, 0) => Some(OpcodeTag::Delete),
            _ => Some(OpcodeTag::Replace),
        }
    }
}

impl fmt::Display for OpcodeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, new)]
pub struct Opcode {
    pub tag: OpcodeTag,
    /// Range in the original sequence
    pub a: Range<usize>,
    /// Range in the modified sequence
    pub b: Range<usize>,
}

impl Opcode {
    pub fn is_change(&self) -> bool {
        self.tag != OpcodeTag::Equal
    }

    fn is_consistent(&self) -> bool {
        let (a_len, b_len) = (self.a.len(), self.b.len());
        match self.tag {
            OpcodeTag::Equal => a_len == b_len && a_len > 0,
            OpcodeTag::Insert => a_len == 0 && b_len > 0,
            OpcodeTag::Delete => a_len > 0 && b_len == 0,
            OpcodeTag::Replace => a_len > 0 && b_len > 0,
        }
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<7} a[{}:{}] b[{}:{}]",
            self.tag.as_str(),
            self.a.start,
            self.a.end,
            self.b.start,
            self.b.end
        )
    }
}

/// Check that `opcodes` partition `0..a_len` and `0..b_len`
pub fn validate(opcodes: &[Opcode], a_len: usize, b_len: usize) -> DiffResult<()> {
    let (mut a_pos, mut b_pos) = (0, 0);

    for (position, opcode) in opcodes.iter().enumerate() {
        if opcode.a.start != a_pos || opcode.b.start != b_pos {
            return Err(DiffError::malformed(format!(
                "opcode {} ({}) does not start at a[{}] b[{}]",
                position, opcode, a_pos, b_pos
            )));
        }
        if opcode.a.start > opcode.a.end || opcode.b.start > opcode.b.end {
            return Err(DiffError::malformed(format!(
                "opcode {} ({}) has a reversed range",
                position, opcode
            )));
        }
        if !opcode.is_consistent() {
            return Err(DiffError::malformed(format!(
                "opcode {} ({}) has ranges that contradict its tag",
                position, opcode
            )));
        }

        a_pos = opcode.a.end;
        b_pos = opcode.b.end;
    }

    if a_pos != a_len || b_pos != b_len {
        return Err(DiffError::malformed(format!(
            "opcodes cover a[0:{}] b[0:{}] instead of a[0:{}] b[0:{}]",
            a_pos, b_pos, a_len, b_len
        )));
    }

    Ok(())
}

/// Rebuild the bytes of `b` by walking `opcodes` over `a`
///
/// Equal ranges are copied from `a`, so a script whose equal ranges do not
/// actually match produces text that differs from `b`.
pub fn replay(a: &LineSet, b: &LineSet, opcodes: &[Opcode]) -> DiffResult<String> {
    validate(opcodes, a.len(), b.len())?;

    let mut out = String::new();
    for opcode in opcodes {
        match opcode.tag {
            OpcodeTag::Equal => a.lines()[opcode.a.clone()]
                .iter()
                .for_each(|line| line.write_to(&mut out)),
            OpcodeTag::Insert | OpcodeTag::Replace => b.lines()[opcode.b.clone()]
                .iter()
                .for_each(|line| line.write_to(&mut out)),
            OpcodeTag::Delete => {}
        }
    }

    Ok(out)
}
