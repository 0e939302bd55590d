use std::fs;
use std::path::Path;
use std::process::{Command, Output};

use tempfile::TempDir;

const USER_ONE: &str = r#"{"id":"1","email":"a@b.com","age":30}"#;

fn userstore() -> Command {
    let mut command = Command::new(env!("CARGO_BIN_EXE_userstore"));
    command.env_remove("RUST_LOG");
    command
}

fn run_ok(cwd: &Path, args: &[&str]) -> Output {
    let out = userstore()
        .current_dir(cwd)
        .args(args)
        .output()
        .expect("run userstore");
    assert!(
        out.status.success(),
        "expected success\nargs={args:?}\nstatus={}\nstdout={}\nstderr={}",
        out.status,
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr),
    );
    out
}

fn run_err(cwd: &Path, args: &[&str]) -> Output {
    let out = userstore()
        .current_dir(cwd)
        .args(args)
        .output()
        .expect("run userstore");
    assert!(
        !out.status.success(),
        "expected failure\nargs={args:?}\nstatus={}\nstdout={}\nstderr={}",
        out.status,
        String::from_utf8_lossy(&out.stdout),
        String::from_utf8_lossy(&out.stderr),
    );
    out
}

fn stdout(out: &Output) -> String {
    String::from_utf8_lossy(&out.stdout).into_owned()
}

fn stderr(out: &Output) -> String {
    String::from_utf8_lossy(&out.stderr).into_owned()
}

#[test]
fn add_find_remove_through_the_binary() {
    let temp_dir = TempDir::new().unwrap();
    let cwd = temp_dir.path();
    fs::write(cwd.join("users.json"), "").unwrap();

    let out = run_ok(
        cwd,
        &["-operation", "add", "-fileName", "users.json", "-item", USER_ONE],
    );
    assert_eq!(stdout(&out), "");
    assert_eq!(
        fs::read_to_string(cwd.join("users.json")).unwrap(),
        format!("[{}]", USER_ONE)
    );

    let out = run_ok(cwd, &["-operation", "findById", "-fileName", "users.json", "-id", "1"]);
    assert_eq!(stdout(&out), USER_ONE);

    let out = run_ok(cwd, &["-operation=list", "-fileName=users.json"]);
    assert_eq!(stdout(&out), format!("[{}]", USER_ONE));

    let out = run_ok(cwd, &["-operation", "remove", "-fileName", "users.json", "-id", "1"]);
    assert_eq!(stdout(&out), "");
    assert_eq!(fs::read_to_string(cwd.join("users.json")).unwrap(), "[]");

    let out = run_ok(cwd, &["-operation", "findById", "-fileName", "users.json", "-id", "1"]);
    assert_eq!(stdout(&out), "");
}

#[test]
fn diagnostics_go_to_stdout_and_exit_cleanly() {
    let temp_dir = TempDir::new().unwrap();
    let cwd = temp_dir.path();

    run_ok(cwd, &["--operation", "add", "--fileName", "users.json", "--item", USER_ONE]);

    let out = run_ok(
        cwd,
        &["-operation", "add", "-fileName", "users.json", "-item", USER_ONE],
    );
    assert_eq!(stdout(&out), "Item with id 1 already exists");

    let out = run_ok(cwd, &["-operation", "remove", "-fileName", "users.json", "-id", "9"]);
    assert_eq!(stdout(&out), "Item with id 9 not found");
}

#[test]
fn missing_file_name_fails() {
    let temp_dir = TempDir::new().unwrap();
    let out = run_err(temp_dir.path(), &["-operation", "list"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("-fileName flag has to be specified"));
    assert_eq!(stdout(&out), "");
}

#[test]
fn missing_operation_fails() {
    let temp_dir = TempDir::new().unwrap();
    let out = run_err(temp_dir.path(), &[]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("-operation flag has to be specified"));
}

#[test]
fn unknown_operation_fails() {
    let temp_dir = TempDir::new().unwrap();
    let out = run_err(
        temp_dir.path(),
        &["-operation", "drop", "-fileName", "users.json"],
    );
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Operation drop not allowed!"));
}

#[test]
fn malformed_store_fails() {
    let temp_dir = TempDir::new().unwrap();
    let cwd = temp_dir.path();
    fs::write(cwd.join("users.json"), "[{").unwrap();

    let out = run_err(cwd, &["-operation", "list", "-fileName", "users.json"]);
    assert_eq!(out.status.code(), Some(1));
    assert!(stderr(&out).contains("Parsing error"));
}

#[test]
fn logging_stays_off_stdout() {
    let temp_dir = TempDir::new().unwrap();
    let cwd = temp_dir.path();

    let out = userstore()
        .current_dir(cwd)
        .env("RUST_LOG", "debug")
        .args(["-operation", "add", "-fileName", "users.json", "-item", USER_ONE])
        .output()
        .expect("run userstore");
    assert!(out.status.success(), "stderr={}", stderr(&out));
    assert_eq!(stdout(&out), "");

    let out = userstore()
        .current_dir(cwd)
        .env("RUST_LOG", "debug")
        .args(["-operation", "findById", "-fileName", "users.json", "-id", "1"])
        .output()
        .expect("run userstore");
    assert!(out.status.success(), "stderr={}", stderr(&out));
    assert_eq!(stdout(&out), USER_ONE);
}
