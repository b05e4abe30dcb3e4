use crate::common::command::{put, run_reviewdiff_command, stdout_of, work_dir};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn show_side_by_side_diff_for_small_change(
    work_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    put(work_dir.path(), "old.txt", "a\nb\nc\n");
    put(work_dir.path(), "new.txt", "a\nB\nc\nd\n");

    let expected_output = r#"diff a/old.txt b/new.txt
1 inserted, 0 deleted, 1 replaced
     1    1 | a
-    2      | b
+         2 | B
     3    3 | c
+         4 | d
"#;
    let actual_output = stdout_of(&mut run_reviewdiff_command(
        work_dir.path(),
        &["diff", "old.txt", "new.txt"],
    ));

    assert_eq!(actual_output, expected_output);

    Ok(())
}
