//! Plumbing commands (raw pipeline output)
//!
//! Plumbing commands expose intermediate results for scripting and for
//! checking the pipeline by hand.
//!
//! ## Commands
//!
//! - `opcodes`: Print the line-level opcode script, optionally replaying it

pub mod opcodes;
