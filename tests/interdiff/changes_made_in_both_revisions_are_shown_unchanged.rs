use crate::common::command::{put, run_reviewdiff_command, stdout_of, work_dir};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn changes_made_in_both_revisions_are_shown_unchanged(
    work_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    put(work_dir.path(), "original.txt", "a\nb\nc\n");
    put(work_dir.path(), "old.txt", "a\nB\nc\n");
    put(work_dir.path(), "new.txt", "a\nB\nc\nd\n");

    let expected_output = r#"interdiff original.txt a/old.txt b/new.txt
1 inserted, 0 deleted, 0 replaced
     1    1 | a
=    2    2 | B
     3    3 | c
+         4 | d
"#;
    let actual_output = stdout_of(&mut run_reviewdiff_command(
        work_dir.path(),
        &["interdiff", "original.txt", "old.txt", "new.txt"],
    ));

    assert_eq!(actual_output, expected_output);

    Ok(())
}
