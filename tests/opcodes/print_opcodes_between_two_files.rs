use crate::common::command::{file_a, file_b, put, run_reviewdiff_command, stdout_of, work_dir};
use assert_fs::TempDir;
use pretty_assertions::assert_eq;
use rstest::rstest;

#[rstest]
fn print_opcodes_between_two_files(work_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    put(work_dir.path(), "old.txt", "a\nb\nc\n");
    put(work_dir.path(), "new.txt", "a\nB\nc\nd\n");

    let actual_output = stdout_of(&mut run_reviewdiff_command(
        work_dir.path(),
        &["opcodes", "old.txt", "new.txt"],
    ));

    assert_eq!(
        actual_output,
        "equal   a[0:1] b[0:1]\nreplace a[1:2] b[1:2]\nequal   a[2:3] b[2:3]\ninsert  a[3:3] b[3:4]\n"
    );

    Ok(())
}

#[rstest]
fn replayed_opcodes_rebuild_the_new_file(
    work_dir: TempDir,
    file_a: String,
    file_b: String,
) -> Result<(), Box<dyn std::error::Error>> {
    put(work_dir.path(), "old.rs", &file_a);
    put(work_dir.path(), "new.rs", &file_b);

    let actual_output = stdout_of(&mut run_reviewdiff_command(
        work_dir.path(),
        &["opcodes", "--check", "old.rs", "new.rs"],
    ));

    assert_eq!(
        actual_output,
        "equal   a[0:3] b[0:3]\ndelete  a[3:6] b[3:3]\nequal   a[6:15] b[3:12]\nreplace a[15:16] b[12:15]\nequal   a[16:19] b[15:18]\nreplay ok\n"
    );

    Ok(())
}

#[rstest]
fn files_without_trailing_newline_differ_from_terminated_ones(
    work_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    put(work_dir.path(), "old.txt", "a\nb");
    put(work_dir.path(), "new.txt", "a\nb\n");

    let actual_output = stdout_of(&mut run_reviewdiff_command(
        work_dir.path(),
        &["opcodes", "--check", "old.txt", "new.txt"],
    ));

    assert_eq!(
        actual_output,
        "equal   a[0:1] b[0:1]\nreplace a[1:2] b[1:2]\nreplay ok\n"
    );

    Ok(())
}
