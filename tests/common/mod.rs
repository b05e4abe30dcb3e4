#![allow(dead_code)]

pub mod command;
pub mod file;

/// Scratch trees for the file pairs each scenario diffs
const SCRATCH_DIR: &str = "../reviewdiff-scratch";

/// Point `TempDir` at a scratch directory outside the crate
pub fn redirect_temp_dir() {
    std::fs::create_dir_all(SCRATCH_DIR).expect("Failed to create scratch dir");

    // SAFETY: tests only set it to the same value
    unsafe {
        std::env::set_var("TMPDIR", SCRATCH_DIR);
    }
}

/// Numbered lines `line {start}` .. `line {end - 1}`, newline terminated
pub fn numbered_lines(range: std::ops::Range<usize>) -> String {
    range.map(|i| format!("line {}\n", i)).collect()
}
