use crate::common::command::{put, run_reviewdiff_command, stdout_of, work_dir};
use crate::common::numbered_lines;
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn changes_at_file_edges_keep_nearby_context(
    work_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let old = numbered_lines(0..10);
    let new = old
        .replace("line 0\n", "first\n")
        .replace("line 9\n", "last\n");
    put(work_dir.path(), "old.txt", &old);
    put(work_dir.path(), "new.txt", &new);

    let expected_output = r#"diff a/old.txt b/new.txt
0 inserted, 0 deleted, 2 replaced
-    1      | line 0
+         1 | first
     2    2 | line 1
     3    3 | line 2
     4    4 | line 3
@@ 2 unchanged lines hidden (5-6) @@
     7    7 | line 6
     8    8 | line 7
     9    9 | line 8
-   10      | line 9
+        10 | last
"#;
    let actual_output = stdout_of(&mut run_reviewdiff_command(
        work_dir.path(),
        &["diff", "old.txt", "new.txt"],
    ));

    assert_eq!(actual_output, expected_output);

    Ok(())
}

#[rstest]
fn a_change_on_the_only_line_has_no_context(
    work_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    put(work_dir.path(), "old.txt", "a\n");
    put(work_dir.path(), "new.txt", "a\nb\n");

    let expected_output = r#"diff a/old.txt b/new.txt
1 inserted, 0 deleted, 0 replaced
     1    1 | a
+         2 | b
"#;
    let actual_output = stdout_of(&mut run_reviewdiff_command(
        work_dir.path(),
        &["diff", "old.txt", "new.txt"],
    ));

    assert_eq!(actual_output, expected_output);

    Ok(())
}
