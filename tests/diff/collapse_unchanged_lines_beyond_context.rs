use crate::common::command::{file_a, file_b, put, run_reviewdiff_command, work_dir};
use assert_fs::TempDir;
use predicates::prelude::{PredicateBooleanExt, predicate};
use rstest::rstest;

#[rstest]
fn collapse_unchanged_lines_beyond_context(
    work_dir: TempDir,
    file_a: String,
    file_b: String,
) -> Result<(), Box<dyn std::error::Error>> {
    put(work_dir.path(), "old.rs", &file_a);
    put(work_dir.path(), "new.rs", &file_b);

    run_reviewdiff_command(work_dir.path(), &["diff", "old.rs", "new.rs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("0 inserted, 3 deleted, 3 replaced"))
        .stdout(predicate::str::contains(
            "-    4      |     for i in 0..1000000000 {",
        ))
        .stdout(predicate::str::contains(
            "@@ 3 unchanged lines hidden (10-12) @@",
        ))
        .stdout(predicate::str::contains("    13   10 |         }"))
        .stdout(predicate::str::contains("-   16      |     tx.join().unwrap();"))
        .stdout(predicate::str::contains(
            "+        13 |     if let Err(e) = tx.join() {",
        ))
        .stdout(predicate::str::contains("+        15 |     }"))
        .stdout(predicate::str::contains("let tx = std::thread::spawn").not());

    Ok(())
}

#[rstest]
fn zero_context_hides_every_unchanged_line(
    work_dir: TempDir,
    file_a: String,
    file_b: String,
) -> Result<(), Box<dyn std::error::Error>> {
    put(work_dir.path(), "old.rs", &file_a);
    put(work_dir.path(), "new.rs", &file_b);

    run_reviewdiff_command(work_dir.path(), &["diff", "-U", "0", "old.rs", "new.rs"])
        .assert()
        .success()
        .stdout(predicate::str::contains("@@ 3 unchanged lines hidden (1-3) @@"))
        .stdout(predicate::str::contains("@@ 9 unchanged lines hidden (7-15) @@"))
        .stdout(predicate::str::contains("@@ 3 unchanged lines hidden (19-21) @@"))
        .stdout(predicate::str::contains("fn main()").not());

    Ok(())
}
