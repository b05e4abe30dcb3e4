//! Rendering diffs into chunks
//!
//! - `render_chunk`: Chunk, row and segment types
//! - `renderer`: Merging, virtual line numbering and context collapsing
//! - `anchor`: Virtual line side table and comment anchors
//! - `file_view`: The full per-file pipeline

pub mod anchor;
pub mod file_view;
pub mod render_chunk;
pub mod renderer;
