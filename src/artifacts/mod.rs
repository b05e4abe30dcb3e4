//! Diff data structures and algorithms
//!
//! This module contains the pipeline stages, in the order data flows
//! through them:
//!
//! - `core`: Shared utilities (config, errors, hashing, pager wrapper)
//! - `lines`: Line tokenizing
//! - `diff`: Line-level sequence matching and opcodes
//! - `intraline`: Token-level highlighting of replaced line pairs
//! - `interdiff`: Composition of two revision diffs against one original
//! - `render`: Chunks, virtual lines, context collapsing and comment anchors

pub mod core;
pub mod diff;
pub mod interdiff;
pub mod intraline;
pub mod lines;
pub mod render;
