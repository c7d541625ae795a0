//! Integration tests for the shellac binary

use std::io::Write;
use std::process::{Command, Output, Stdio};

fn run_cli(args: &[&str], stdin: Option<&str>) -> Output {
    let mut child = Command::new(env!("CARGO_BIN_EXE_shellac"))
        .args(args)
        .env_remove("SHELLAC_SUDO")
        .env_remove("SHELLAC_LOG")
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .expect("Failed to start shellac");
    {
        let mut pipe = child.stdin.take().unwrap();
        if let Some(input) = stdin {
            pipe.write_all(input.as_bytes()).unwrap();
        }
    }
    child.wait_with_output().unwrap()
}

fn stdout(output: &Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_dry_run_find() {
    let output = run_cli(
        &[
            "--dry-run",
            "find",
            r#"{"dirnames": ["."], "name": "*.go", "type": "f"}"#,
        ],
        None,
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "find . -name *.go -type f\n");
}

#[test]
fn test_dry_run_ssh_from_stdin() {
    let output = run_cli(
        &["-n", "ssh"],
        Some(r#"{"hostname": "example.com", "agent_forwarding": true, "command": ["uptime"]}"#),
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "ssh -A example.com uptime\n");
}

#[test]
fn test_dry_run_sudo_does_not_need_sudo_installed() {
    let output = run_cli(
        &["--sudo", "-n", "find", r#"{"dirnames": ["/"], "name": "core"}"#],
        None,
    );
    assert!(output.status.success());
    assert_eq!(stdout(&output), "sudo find / -name core\n");
}

#[test]
fn test_invalid_schema() {
    let output = run_cli(&["tar", "{}"], None);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid schema: tar"));
}

#[test]
fn test_invalid_record() {
    let output = run_cli(&["-n", "find", r#"{"nmae": "*.go"}"#], None);
    assert_eq!(output.status.code(), Some(1));
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid record"));
}

#[test]
fn test_version() {
    let output = run_cli(&["--version"], None);
    assert!(output.status.success());
    assert!(stdout(&output).starts_with("shellac version: "));
}

#[test]
fn test_run_propagates_exit_code() {
    if !shellac::is_command_available("find") {
        eprintln!("Skipping: find not installed");
        return;
    }
    let output = run_cli(
        &["-q", "find", r#"{"dirnames": ["/no/such/dir/shellac"]}"#],
        None,
    );
    assert!(!output.status.success());
    assert_ne!(output.status.code(), Some(0));
}
