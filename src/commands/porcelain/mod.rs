//! Porcelain commands (user-facing review views)
//!
//! Porcelain commands read files, run them through the cached pipeline and
//! print the rendered chunks.
//!
//! ## Commands
//!
//! - `diff`: Side-by-side diff of two files
//! - `interdiff`: What changed between two revisions made against one original
//! - `batch`: Per-file summary of two directory trees, diffed in parallel

pub mod batch;
pub mod diff;
pub mod interdiff;
mod view;
