use crate::common::command::{put, run_reviewdiff_command, work_dir};
use assert_fs::TempDir;
use assert_fs::prelude::{FileWriteBin, PathChild};
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
fn binary_files_are_rejected(work_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    put(work_dir.path(), "old.txt", "a\n");
    work_dir.child("new.bin").write_binary(&[0xc3, 0x28, 0x0a])?;

    run_reviewdiff_command(work_dir.path(), &["diff", "old.txt", "new.bin"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Malformed input"))
        .stderr(predicate::str::contains("new.bin is not valid UTF-8"));

    Ok(())
}

#[rstest]
fn missing_files_are_reported(work_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    put(work_dir.path(), "old.txt", "a\n");

    run_reviewdiff_command(work_dir.path(), &["diff", "old.txt", "gone.txt"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read gone.txt"));

    Ok(())
}
