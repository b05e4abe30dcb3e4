use crate::common::command::{file_a, file_b, put, run_reviewdiff_command, work_dir};
use assert_fs::TempDir;
use predicates::prelude::{PredicateBooleanExt, predicate};
use rstest::rstest;

#[rstest]
fn identical_revisions_show_no_new_changes(
    work_dir: TempDir,
    file_a: String,
    file_b: String,
) -> Result<(), Box<dyn std::error::Error>> {
    put(work_dir.path(), "original.rs", &file_a);
    put(work_dir.path(), "old.rs", &file_b);
    put(work_dir.path(), "new.rs", &file_b);

    run_reviewdiff_command(
        work_dir.path(),
        &["interdiff", "original.rs", "old.rs", "new.rs"],
    )
    .assert()
    .success()
    .stdout(predicate::str::contains("0 inserted, 0 deleted, 0 replaced"))
    .stdout(predicate::str::is_match(r"(?m)^[-+] ")?.not());

    Ok(())
}
