use std::process::Output;

use assert_cmd::Command;
use insta::assert_snapshot;
use tempfile::TempDir;

/// Run `intrange` in an empty directory, isolated from the caller's environment.
fn intrange(dir: &TempDir, args: &[&str]) -> Output {
    Command::cargo_bin("intrange")
        .unwrap()
        .current_dir(dir.path())
        .env_remove("INTRANGE_CONFIG")
        .env_remove("RUST_LOG")
        .args(["--color", "never"])
        .args(args)
        .output()
        .unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).into_owned()
}

fn stderr(output: &Output) -> String {
    String::from_utf8_lossy(&output.stderr).into_owned()
}

#[test]
fn normalize() {
    let dir = TempDir::new().unwrap();
    let output = intrange(&dir, &["normalize", "3-5,1,3-5"]);
    assert!(output.status.success());
    assert_snapshot!(stdout(&output), @"1,3-5");

    let output = intrange(&dir, &["normalize", "9", "1-3", "4,7-8"]);
    assert_snapshot!(stdout(&output), @"1-4,7-9");

    let output = intrange(&dir, &["normalize", ""]);
    assert!(output.status.success());
    assert_eq!(stdout(&output), "\n");
}

#[test]
fn normalize_invalid() {
    let dir = TempDir::new().unwrap();
    let output = intrange(&dir, &["normalize", "1,3-5,typo"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).is_empty());
    assert_snapshot!(stderr(&output), @"error: Invalid character `t` in item `typo` of line `1,3-5,typo`");

    let output = intrange(&dir, &["normalize", "--lenient", "1,3-5,typo"]);
    assert!(output.status.success());
    assert_snapshot!(stdout(&output), @"1,3-5");
}

#[test]
fn custom_delimiters() {
    let dir = TempDir::new().unwrap();
    let output = intrange(
        &dir,
        &[
            "normalize",
            "--splitter",
            " ",
            "--range-splitter",
            " to ",
            "5 to 7 1 3 to 4",
        ],
    );
    assert_snapshot!(stdout(&output), @"1 3 to 7");
}

#[test]
fn invalid_delimiters() {
    let dir = TempDir::new().unwrap();
    let output = intrange(&dir, &["normalize", "--splitter", "-", "1"]);
    assert_eq!(output.status.code(), Some(1));
    assert_snapshot!(stderr(&output), @r"
    error: Invalid range settings
      Caused by: The splitter and the range splitter must differ, but both are `-`
    ");
}

#[test]
fn expand() {
    let dir = TempDir::new().unwrap();
    let output = intrange(&dir, &["expand", "7,1-3"]);
    assert!(output.status.success());
    assert_snapshot!(stdout(&output), @r"
    1
    2
    3
    7
    ");
}

#[test]
fn combine() {
    let dir = TempDir::new().unwrap();
    let output = intrange(&dir, &["union", "1,3", "3-5"]);
    assert_snapshot!(stdout(&output), @"1,3-5");

    let output = intrange(&dir, &["difference", "1-5", "2"]);
    assert_snapshot!(stdout(&output), @"1,3-5");

    let output = intrange(&dir, &["intersection", "1-10", "5-20", "0-6"]);
    assert_snapshot!(stdout(&output), @"5-6");

    let output = intrange(&dir, &["symmetric-difference", "1-5", "4-8"]);
    assert_snapshot!(stdout(&output), @"1-3,6-8");

    let output = intrange(&dir, &["union", "1"]);
    assert_eq!(output.status.code(), Some(2));
}

#[test]
fn check() {
    let dir = TempDir::new().unwrap();
    let output = intrange(&dir, &["check", "vlan", "10-20,1"]);
    assert!(output.status.success());
    assert_snapshot!(stdout(&output), @"1,10-20");

    let output = intrange(&dir, &["check", "vlan", "4095"]);
    assert_eq!(output.status.code(), Some(1));
    assert_snapshot!(stderr(&output), @"error: Invalid VLAN ID `4095`, expected a value in 1-4094");

    let output = intrange(&dir, &["check", "port", "0-80"]);
    assert_eq!(output.status.code(), Some(1));
    assert_snapshot!(stderr(&output), @"error: Invalid port `0`, expected a value in 1-65535");
}

#[test]
fn check_protocol_names() {
    let dir = TempDir::new().unwrap();
    let output = intrange(&dir, &["check", "protocol", "udp,tcp,6"]);
    assert_snapshot!(stdout(&output), @"6,17");

    let output = intrange(&dir, &["check", "protocol", "--names", "17,1,6-7"]);
    assert_snapshot!(stdout(&output), @"icmp,tcp,7,udp");

    let output = intrange(&dir, &["check", "protocol", "tpc"]);
    assert_eq!(output.status.code(), Some(1));
    assert_snapshot!(stderr(&output), @"error: Unknown IP protocol name `tpc`");
}

#[test]
fn config_file() {
    let dir = TempDir::new().unwrap();
    fs_err::write(
        dir.path().join("intrange.toml"),
        "splitter = \";\"\nrange-splitter = \":\"\n",
    )
    .unwrap();

    let output = intrange(&dir, &["normalize", "4:6;1"]);
    assert_snapshot!(stdout(&output), @"1;4:6");

    // Flags take precedence over the file.
    let output = intrange(&dir, &["normalize", "--splitter", " ", "4:6 1"]);
    assert_snapshot!(stdout(&output), @"1 4:6");
}

#[test]
fn config_file_invalid() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("settings.toml");
    fs_err::write(&path, "strict = \"yes\"\n").unwrap();

    let output = intrange(&dir, &["normalize", "--config", "settings.toml", "1"]);
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).starts_with("error: Failed to parse: `settings.toml`"));
}

#[test]
fn quiet() {
    let dir = TempDir::new().unwrap();
    let output = intrange(&dir, &["normalize", "--quiet", "3,1"]);
    assert!(output.status.success());
    assert!(stdout(&output).is_empty());
}
