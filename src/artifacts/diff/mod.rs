//! Line-level diffing
//!
//! This module implements the sequence matcher and its output:
//!
//! - `opcode`: Equal/insert/delete/replace ranges, validation and replay
//! - `sequence_matcher`: Longest-matching-block alignment with a per-call budget
//!
//! The matcher is generic over the element type; lines and intra-line tokens
//! go through the same code path.

pub mod opcode;
pub mod sequence_matcher;
