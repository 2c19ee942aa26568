use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;

fn jackc() -> Command {
    Command::cargo_bin("jackc").unwrap()
}

#[test]
fn compiles_a_single_file_and_writes_both_artifacts() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Main.jack");
    fs::write(&input, "class Main { static int x; function void main() { return; } }").unwrap();

    jackc().arg(&input).assert().success();

    assert!(dir.path().join("MainT.xml").exists());
    assert!(dir.path().join("Main.xml").exists());
}

#[test]
fn tokens_only_flag_skips_the_parse_tree_artifact() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Main.jack");
    fs::write(&input, "class Main {}").unwrap();

    jackc().arg(&input).arg("--tokens-only").assert().success();

    assert!(dir.path().join("MainT.xml").exists());
    assert!(!dir.path().join("Main.xml").exists());
}

#[test]
fn directory_argument_compiles_every_jack_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("A.jack"), "class A {}").unwrap();
    fs::write(dir.path().join("B.jack"), "class B {}").unwrap();

    jackc().arg(dir.path()).assert().success();

    assert!(dir.path().join("A.xml").exists());
    assert!(dir.path().join("B.xml").exists());
}

#[test]
fn syntax_error_exits_nonzero_with_a_diagnostic() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("Broken.jack");
    fs::write(&input, "class { static int x; }").unwrap();

    jackc().arg(&input).assert().failure().stderr(predicate::str::contains("jackc:"));
}

#[test]
fn missing_path_exits_nonzero() {
    jackc().arg("/no/such/path.jack").assert().failure();
}

#[test]
fn out_dir_flag_redirects_output() {
    let src_dir = tempfile::tempdir().unwrap();
    let out_dir = tempfile::tempdir().unwrap();
    let input = src_dir.path().join("Main.jack");
    fs::write(&input, "class Main {}").unwrap();

    jackc().arg(&input).arg("--out-dir").arg(out_dir.path()).assert().success();

    assert!(out_dir.path().join("Main.xml").exists());
    assert!(!src_dir.path().join("Main.xml").exists());
}
