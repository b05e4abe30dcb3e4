//! Error taxonomy of the diff pipeline
//!
//! Every stage is pure and deterministic, so none of these errors is worth
//! retrying with the same input. Callers map them onto their own surface:
//!
//! - `ResourceLimitExceeded`: report the diff as too large to render fully
//! - `MismatchedBase`: reject the interdiff request
//! - `MalformedInput`: an upstream bug, propagate as-is
//! - `Cancelled`: the work was dropped before it finished

use thiserror::Error;

/// Which budget an invocation ran out of
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LimitKind {
    /// Number of lines on one side of the diff
    Lines,
    /// Number of element comparisons performed by the matcher
    Comparisons,
    /// Number of tokens in a single line
    LineTokens,
}

impl std::fmt::Display for LimitKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LimitKind::Lines => write!(f, "lines"),
            LimitKind::Comparisons => write!(f, "comparisons"),
            LimitKind::LineTokens => write!(f, "line tokens"),
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DiffError {
    /// The input exceeds the configured budget for one invocation.
    #[error("Diff too large: {actual} {kind} exceeds the limit of {limit}")]
    ResourceLimitExceeded {
        kind: LimitKind,
        limit: u64,
        actual: u64,
    },

    /// Two diffs handed to the composer do not share the same original file.
    #[error("Cannot compose diffs against different originals ({old_len} vs {new_len} lines)")]
    MismatchedBase { old_len: usize, new_len: usize },

    /// Line or opcode sequences with inconsistent metadata.
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A batch task was cancelled before producing a result.
    #[error("Diff was cancelled before it finished")]
    Cancelled,
}

impl DiffError {
    pub fn malformed(reason: impl Into<String>) -> Self {
        DiffError::MalformedInput(reason.into())
    }

    pub fn is_resource_limit(&self) -> bool {
        matches!(self, DiffError::ResourceLimitExceeded { .. })
    }
}

pub type DiffResult<T> = Result<T, DiffError>;
