use crate::common::command::{put, run_reviewdiff_command, work_dir};
use crate::common::numbered_lines;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn oversized_files_fail_with_resource_limit(
    work_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    put(work_dir.path(), "old.txt", &numbered_lines(0..20));
    put(work_dir.path(), "new.txt", &numbered_lines(5..25));

    run_reviewdiff_command(
        work_dir.path(),
        &["diff", "--max-lines", "10", "old.txt", "new.txt"],
    )
    .assert()
    .failure()
    .stderr(predicate::str::contains(
        "Diff too large: 20 lines exceeds the limit of 10",
    ));

    Ok(())
}
