use std::fs;
use std::process::{Command, Output};

use tempfile::TempDir;

fn harvester(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_favicon-harvester"))
        .args(args)
        .output()
        .expect("binary runs")
}

#[test]
fn missing_addrs_flag_exits_with_failure() {
    let output = harvester(&[]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("-addrs is required"));
    assert!(output.stdout.is_empty());
}

#[test]
fn unreadable_addrs_file_exits_with_failure() {
    let temp = TempDir::new().unwrap();
    let missing = temp.path().join("nope.txt");
    let output = harvester(&["-addrs", missing.to_str().unwrap()]);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("opening addrs file"));
}

#[test]
fn blank_input_prints_nothing_and_succeeds() {
    let temp = TempDir::new().unwrap();
    let list = temp.path().join("urls.txt");
    fs::write(&list, "\n\n").unwrap();
    let out_dir = temp.path().join("icons");

    let output = harvester(&[
        "-addrs",
        list.to_str().unwrap(),
        "-output",
        out_dir.to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(0));
    assert!(output.stdout.is_empty());
    assert!(out_dir.is_dir());
}

#[test]
fn malformed_first_line_fails_the_run() {
    let temp = TempDir::new().unwrap();
    let list = temp.path().join("urls.txt");
    fs::write(&list, "http://[::1\nhttps://never.example.com\n").unwrap();

    let output = harvester(&[
        "--addrs",
        list.to_str().unwrap(),
        "--output",
        temp.path().to_str().unwrap(),
    ]);

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(String::from_utf8_lossy(&output.stdout), " []\n");
}
