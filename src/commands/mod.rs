//! Command implementations
//!
//! Commands are `impl Session` blocks, organized into two categories:
//!
//! - `plumbing`: Raw pipeline output (opcodes)
//! - `porcelain`: Rendered views for reviewers (diff, interdiff, batch)

pub mod plumbing;
pub mod porcelain;
