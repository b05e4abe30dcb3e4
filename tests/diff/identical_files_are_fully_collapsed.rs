use crate::common::command::{put, run_reviewdiff_command, stdout_of, work_dir};
use crate::common::numbered_lines;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn identical_files_are_fully_collapsed(
    work_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let content = numbered_lines(0..12);
    put(work_dir.path(), "old.txt", &content);
    put(work_dir.path(), "new.txt", &content);

    let actual_output = stdout_of(&mut run_reviewdiff_command(
        work_dir.path(),
        &["diff", "old.txt", "new.txt"],
    ));

    assert_eq!(
        actual_output,
        "diff a/old.txt b/new.txt\n0 inserted, 0 deleted, 0 replaced\n@@ 12 unchanged lines hidden (1-12) @@\n"
    );

    Ok(())
}
