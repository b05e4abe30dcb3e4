use crate::common::command::{put, run_reviewdiff_command, work_dir};
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn reverted_changes_are_marked_as_previously_changed(
    work_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    put(work_dir.path(), "original.txt", "a\nb\nc\n");
    put(work_dir.path(), "old.txt", "a\nx\nc\n");
    put(work_dir.path(), "new.txt", "a\nb\nc\n");

    run_reviewdiff_command(
        work_dir.path(),
        &["interdiff", "--full", "original.txt", "old.txt", "new.txt"],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("0 inserted, 0 deleted, 0 replaced"))
    .stdout(predicate::str::contains("~    2      | x"))
    .stdout(predicate::str::contains("~         2 | b"));

    Ok(())
}
