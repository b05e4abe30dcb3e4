use crate::common::command::{file_a, file_b, put, run_reviewdiff_command, stdout_of, work_dir};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn show_whole_file_with_full_flag(
    work_dir: TempDir,
    file_a: String,
    file_b: String,
) -> Result<(), Box<dyn std::error::Error>> {
    put(work_dir.path(), "old.rs", &file_a);
    put(work_dir.path(), "new.rs", &file_b);

    let actual_output = stdout_of(&mut run_reviewdiff_command(
        work_dir.path(),
        &["diff", "--full", "old.rs", "new.rs"],
    ));

    assert!(!actual_output.contains("@@"));
    assert!(actual_output.contains("    10    7 |     let tx = std::thread::spawn(move || {"));
    // header, stats, then one output line per left or right line shown
    assert_eq!(actual_output.lines().count(), 2 + 3 + 3 + 9 + 4 + 3);

    Ok(())
}
