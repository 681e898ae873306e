use assert_cmd::Command;
use predicates::prelude::*;

// Going by stdin only: the file flag is just a different reader.

#[test]
fn test_cli_sweeps_to_completion() {
    let mut cmd = Command::cargo_bin("solver").unwrap();

    cmd.write_stdin("╹╸\n┏┓\n")
        .assert()
        .success()
        .stdout("(0, 0): face DOWN, rotate 2 clockwise
(1, 0): face DOWN, rotate 3 clockwise
(0, 1): face DOWN, rotate 3 clockwise
(1, 1): face RIGHT, rotate 1 clockwise

╻╻
┗┛
");
}

#[test]
fn test_cli_custom_delimiter() {
    let mut cmd = Command::cargo_bin("solver").unwrap();

    cmd.arg("--delimiter=|")
        .write_stdin("╻*╻*\n┗*┛*\n")
        .assert()
        .success()
        .stdout("\n╻╻|┗┛|");
}

#[test]
fn test_cli_stalls_without_failing() {
    let mut cmd = Command::cargo_bin("solver").unwrap();

    cmd.arg("--wrap")
        .write_stdin("┳┳┳\n┳┳┳\n┳┳┳\n")
        .assert()
        .success()
        .stdout("\n┳┳┳\n┳┳┳\n┳┳┳\n")
        .stderr(predicate::str::contains("no further progress possible right now"));
}

#[test]
fn test_cli_ragged_rows() {
    let mut cmd = Command::cargo_bin("solver").unwrap();

    cmd.write_stdin("╻╻\n┗\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("row 1 is 1 cells wide, expected 2"));
}

#[test]
fn test_cli_unknown_glyph() {
    let mut cmd = Command::cargo_bin("solver").unwrap();

    cmd.write_stdin("╻x\n┗┛\n")
        .assert()
        .failure()
        .stderr(predicate::str::contains("unrecognized cell type `x`"));
}
