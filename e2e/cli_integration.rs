// e2e/cli_integration.rs: black-box tests of the `cmdmux` demo binary.
//
// Spawns the binary with std::process::Command and checks stdout, stderr and
// exit codes for the help, greet and version commands.

use std::path::PathBuf;
use std::process::{Command, Output};

/// Locate the `cmdmux` binary produced by Cargo.
fn cmdmux_bin() -> PathBuf {
    PathBuf::from(env!("CARGO_BIN_EXE_cmdmux"))
}

fn run(args: &[&str]) -> Output {
    Command::new(cmdmux_bin())
        .args(args)
        .env_remove("CMDMUX_LOG")
        .output()
        .expect("failed to run cmdmux")
}

fn stdout(o: &Output) -> String {
    String::from_utf8_lossy(&o.stdout).into_owned()
}

fn stderr(o: &Output) -> String {
    String::from_utf8_lossy(&o.stderr).into_owned()
}

// ── 1. Help ──────────────────────────────────────────────────────────────────

#[test]
fn test_cli_no_arguments_prints_overview() {
    let o = run(&[]);
    assert!(o.status.success(), "stderr: {}", stderr(&o));
    let out = stdout(&o);
    assert!(out.contains("Commands:"));
    assert!(out.contains("greet"));
    assert!(out.contains("version"));
    assert!(out.contains("help COMMAND' for more information on a command"));
}

#[test]
fn test_cli_help_matches_no_arguments() {
    let a = run(&[]);
    let b = run(&["help"]);
    assert!(b.status.success());
    assert_eq!(stdout(&a), stdout(&b));
}

#[test]
fn test_cli_help_for_greet_lists_options() {
    let o = run(&["help", "greet"]);
    assert!(o.status.success(), "stderr: {}", stderr(&o));
    let out = stdout(&o);
    assert!(out.contains("Options:"));
    assert!(out.contains("-n, --name=<string>"));
    assert!(out.contains("-t, --times[=integer]"));
    assert!(out.contains("(default: 1)"));
    assert!(out.contains("-s, --shout"));
}

#[test]
fn test_cli_help_for_unknown_command_fails() {
    let o = run(&["help", "nope"]);
    assert_eq!(o.status.code(), Some(1));
    assert!(stderr(&o).contains("command not registered in manager: nope"));
}

// ── 2. Greet ─────────────────────────────────────────────────────────────────

#[test]
fn test_cli_greet_with_defaults() {
    let o = run(&["greet", "-n", "Ann"]);
    assert!(o.status.success(), "stderr: {}", stderr(&o));
    assert_eq!(stdout(&o), "Hello, Ann!\n");
}

#[test]
fn test_cli_greet_multi_word_value() {
    let o = run(&["greet", "--name", "Ann", "Lee", "--punct=?"]);
    assert!(o.status.success(), "stderr: {}", stderr(&o));
    assert_eq!(stdout(&o), "Hello, Ann Lee?\n");
}

#[test]
fn test_cli_greet_bundled_flags() {
    let o = run(&["greet", "-sn", "Ann"]);
    assert!(o.status.success(), "stderr: {}", stderr(&o));
    assert_eq!(stdout(&o), "HELLO, ANN!\n");
}

#[test]
fn test_cli_greet_times() {
    let o = run(&["greet", "-n", "Ann", "-t", "2"]);
    assert!(o.status.success(), "stderr: {}", stderr(&o));
    assert_eq!(stdout(&o), "Hello, Ann!\nHello, Ann!\n");
}

// ── 3. Version ───────────────────────────────────────────────────────────────

#[test]
fn test_cli_version() {
    let o = run(&["version"]);
    assert!(o.status.success());
    assert_eq!(
        stdout(&o).trim(),
        format!("cmdmux {}", env!("CARGO_PKG_VERSION"))
    );
}
