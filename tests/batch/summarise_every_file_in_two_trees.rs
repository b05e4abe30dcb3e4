use crate::common::command::{put, run_reviewdiff_command, stdout_of, work_dir};
use crate::common::file::write_generated_files;
use crate::common::numbered_lines;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn summarise_every_file_in_two_trees(
    work_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let old_dir = work_dir.path().join("old");
    let new_dir = work_dir.path().join("new");

    put(&old_dir, "kept.txt", "a\nb\n");
    put(&new_dir, "kept.txt", "a\nb\n");
    put(&old_dir, "nested/changed.txt", "a\nb\nc\n");
    put(&new_dir, "nested/changed.txt", "a\nB\nc\nd\n");
    put(&old_dir, "removed.txt", "gone\n");
    put(&new_dir, "added.txt", "x\ny\n");

    let actual_output = stdout_of(&mut run_reviewdiff_command(
        work_dir.path(),
        &["batch", "old", "new"],
    ));

    assert_eq!(
        actual_output,
        r#"added     added.txt  2 inserted, 0 deleted, 0 replaced
unchanged kept.txt  0 inserted, 0 deleted, 0 replaced
modified  nested/changed.txt  1 inserted, 0 deleted, 1 replaced
deleted   removed.txt  0 inserted, 1 deleted, 0 replaced
"#
    );

    Ok(())
}

#[rstest]
fn many_generated_files_are_reported_in_path_order(
    work_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let old_dir = work_dir.path().join("old");
    let new_dir = work_dir.path().join("new");
    std::fs::create_dir_all(&old_dir)?;

    let files = write_generated_files(&new_dir, 12);

    let actual_output = stdout_of(&mut run_reviewdiff_command(
        work_dir.path(),
        &["batch", "old", "new"],
    ));

    let mut expected_files: Vec<String> = files
        .iter()
        .map(|spec| spec.path.file_name().unwrap().to_string_lossy().to_string())
        .collect();
    expected_files.sort();
    let reported_files: Vec<String> = actual_output
        .lines()
        .map(|line| line.split_whitespace().nth(1).unwrap().to_string())
        .collect();

    assert_eq!(reported_files, expected_files);
    assert!(actual_output.lines().all(|line| line.starts_with("added")));

    Ok(())
}

#[rstest]
fn oversized_files_fail_without_stopping_the_batch(
    work_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let old_dir = work_dir.path().join("old");
    let new_dir = work_dir.path().join("new");

    put(&old_dir, "big.txt", &numbered_lines(0..50));
    put(&new_dir, "big.txt", &numbered_lines(1..51));
    put(&old_dir, "small.txt", "a\n");
    put(&new_dir, "small.txt", "b\n");

    run_reviewdiff_command(
        work_dir.path(),
        &["batch", "--max-lines", "10", "old", "new"],
    )
    .assert()
    .failure()
    .stdout(predicate::str::contains(
        "failed    big.txt  Diff too large: 50 lines exceeds the limit of 10",
    ))
    .stdout(predicate::str::contains(
        "modified  small.txt  0 inserted, 0 deleted, 1 replaced",
    ))
    .stderr(predicate::str::contains("1 of 2 files could not be diffed"));

    Ok(())
}

#[rstest]
fn binary_files_fail_without_stopping_the_batch(
    work_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let old_dir = work_dir.path().join("old");
    let new_dir = work_dir.path().join("new");

    put(&old_dir, "a.txt", "a\n");
    put(&new_dir, "a.txt", "a\nb\n");
    std::fs::write(new_dir.join("logo.png"), [0x89, b'P', b'N', b'G', 0xff, 0x00])?;

    run_reviewdiff_command(work_dir.path(), &["batch", "old", "new"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "modified  a.txt  1 inserted, 0 deleted, 0 replaced",
        ))
        .stdout(predicate::str::contains("failed    logo.png  Malformed input:"))
        .stdout(predicate::str::contains("logo.png is not valid UTF-8"))
        .stderr(predicate::str::contains("1 of 2 files could not be diffed"));

    Ok(())
}
