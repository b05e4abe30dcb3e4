//! Line tokenizer
//!
//! Splits raw file content into an ordered `LineSet` that downstream stages
//! reference read-only. See `line` for the newline handling rules.

pub mod line;
