//! Interdiff between two revisions of the same change
//!
//! - `revision_diff`: One revision's opcodes plus the hashes of its lines
//! - `composer`: Joint walk over two revision diffs sharing an original file

pub mod composer;
pub mod revision_diff;
