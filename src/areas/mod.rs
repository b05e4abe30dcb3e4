//! Stateful parts of a diff run
//!
//! - `session`: Output writer, config and cache for one invocation
//! - `cache`: Shared, invalidatable cache of built file views
//! - `batch`: Parallel diffing of many file pairs on the blocking pool

pub mod batch;
pub mod cache;
pub mod session;
