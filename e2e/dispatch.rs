// e2e/dispatch.rs: failure paths of the `cmdmux` binary.
//
// Every dispatch error is printed to stderr as `cmdmux: <error>` and the
// process exits with status 1, with nothing written to stdout.

use std::process::{Command, Output};

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_cmdmux"))
        .args(args)
        .env_remove("CMDMUX_LOG")
        .output()
        .expect("failed to run cmdmux")
}

fn assert_fails_with(args: &[&str], message: &str) {
    let o = run(args);
    let err = String::from_utf8_lossy(&o.stderr);
    assert_eq!(o.status.code(), Some(1), "args {args:?}, stderr: {err}");
    assert!(o.stdout.is_empty(), "args {args:?} wrote to stdout");
    assert!(
        err.contains(&format!("cmdmux: {message}")),
        "args {args:?}: expected {message:?} in {err:?}"
    );
}

#[test]
fn missing_required_option() {
    assert_fails_with(&["greet"], "option is required: name");
}

#[test]
fn required_option_without_value() {
    assert_fails_with(&["greet", "--name"], "option is required: name");
}

#[test]
fn unknown_command() {
    assert_fails_with(&["unknown"], "command not registered in manager: unknown");
}

#[test]
fn undeclared_option() {
    assert_fails_with(&["greet", "-n", "Ann", "--bogus=1"], "option not recognized: bogus");
}

#[test]
fn flag_given_a_value() {
    assert_fails_with(
        &["greet", "-n", "Ann", "--shout=1"],
        "option not accept any value: shout",
    );
}

#[test]
fn key_supplied_twice() {
    assert_fails_with(&["greet", "-n", "Ann", "-n", "Bob"], "option can not specify twice: n");
}

#[test]
fn long_and_short_for_one_option() {
    assert_fails_with(
        &["greet", "-n", "Ann", "--name=Bob"],
        "option can not specify twice: name",
    );
}

#[test]
fn non_numeric_integer() {
    assert_fails_with(
        &["greet", "-n", "Ann", "-t", "two"],
        "option value convert to integer failed: times",
    );
}

#[test]
fn dispatch_trace_goes_to_stderr_when_enabled() {
    let o = Command::new(env!("CARGO_BIN_EXE_cmdmux"))
        .args(["greet", "-n", "Ann"])
        .env("CMDMUX_LOG", "debug")
        .output()
        .expect("failed to run cmdmux");
    assert!(o.status.success());
    assert_eq!(String::from_utf8_lossy(&o.stdout), "Hello, Ann!\n");
    assert!(String::from_utf8_lossy(&o.stderr).contains("dispatch"));
}
