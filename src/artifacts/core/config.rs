//! Diff pipeline configuration
//!
//! A `DiffConfig` travels through every stage by reference. It carries the
//! display policy (context lines, intra-line highlighting) and the per-call
//! budget that bounds the superlinear parts of the matcher.

/// Default number of unchanged lines kept around a change
pub const DEFAULT_CONTEXT_LINES: usize = 3;

/// Per-invocation resource budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DiffLimits {
    /// Maximum number of lines on either side of a diff
    pub max_lines: usize,
    /// Maximum element comparisons performed by one matcher run
    pub max_comparisons: u64,
    /// Maximum tokens per line before intra-line highlighting gives up
    pub max_line_tokens: usize,
}

impl Default for DiffLimits {
    fn default() -> Self {
        Self {
            max_lines: 100_000,
            max_comparisons: 50_000_000,
            max_line_tokens: 2_000,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DiffConfig {
    /// Unchanged rows kept around each change; `None` disables collapsing
    pub context_lines: Option<usize>,
    /// Whether replace opcodes get token-level highlighting
    pub intraline: bool,
    /// Whether very frequent elements are dropped from the matcher's index
    pub autojunk: bool,
    pub limits: DiffLimits,
}

impl Default for DiffConfig {
    fn default() -> Self {
        Self {
            context_lines: Some(DEFAULT_CONTEXT_LINES),
            intraline: true,
            autojunk: true,
            limits: DiffLimits::default(),
        }
    }
}

impl DiffConfig {
    pub fn with_context_lines(mut self, context_lines: Option<usize>) -> Self {
        self.context_lines = context_lines;
        self
    }

    pub fn with_intraline(mut self, intraline: bool) -> Self {
        self.intraline = intraline;
        self
    }

    pub fn with_autojunk(mut self, autojunk: bool) -> Self {
        self.autojunk = autojunk;
        self
    }

    pub fn with_limits(mut self, limits: DiffLimits) -> Self {
        self.limits = limits;
        self
    }
}
