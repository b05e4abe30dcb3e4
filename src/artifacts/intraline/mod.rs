//! Intra-line highlighting
//!
//! - `token`: Splits a line into words, whitespace runs and punctuation
//! - `highlighter`: Token-level diff of paired lines, mapped to byte ranges

pub mod highlighter;
pub mod token;
