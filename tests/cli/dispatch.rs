// Integration tests for Manager dispatch: resolve → assign → validate → execute.
//
// The `run` command used throughout declares
//   --name / -n    required string
//   --verbose / -v presence-only flag

use std::sync::{Arc, Mutex};

use cmdmux::{
    Arguments, Command, CommandOption, Dispatch, DispatchState, Error, Manager, Mode,
    OptionConfig, Value, ValueType,
};

// ─────────────────────────────────────────────────────────────────────────────
// Helpers
// ─────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Default, Clone, PartialEq)]
struct Seen {
    calls: usize,
    name: String,
    verbose: bool,
}

fn run_command(seen: Arc<Mutex<Seen>>) -> Command {
    Command::new("run")
        .with_options([
            CommandOption::new(OptionConfig {
                short: Some('n'),
                mode: Mode::Required,
                ..OptionConfig::new("name", ValueType::String)
            })
            .unwrap(),
            CommandOption::flag("verbose", Some('v')).unwrap(),
        ])
        .unwrap()
        .with_handler(move |_, _, cmd| {
            let mut s = seen.lock().unwrap();
            s.calls += 1;
            s.name = cmd.option("name")?.to_string_value()?;
            s.verbose = cmd.option("verbose")?.assigned();
            Ok(())
        })
}

fn setup() -> (Manager, Arc<Mutex<Seen>>) {
    let seen = Arc::new(Mutex::new(Seen::default()));
    let manager = Manager::new();
    manager.add_command(run_command(seen.clone())).unwrap();
    (manager, seen)
}

fn dispatch(manager: &Manager, argv: &[&str]) -> (Result<(), Error>, DispatchState) {
    let arguments = Arguments::parse(argv).unwrap();
    let mut d = Dispatch::new(manager);
    let result = d.run(&arguments);
    (result, d.state())
}

// ─────────────────────────────────────────────────────────────────────────────
// Scenarios
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn round_trip_required_and_flag() {
    let (manager, seen) = setup();
    let arguments = Arguments::parse(["prog", "run", "-n", "demo", "-v"]).unwrap();
    assert_eq!(arguments.selector(), "run");
    assert_eq!(arguments.get("n"), "demo");
    assert_eq!(arguments.get("v"), "");

    manager.run(&arguments).unwrap();
    let s = seen.lock().unwrap().clone();
    assert_eq!(
        s,
        Seen {
            calls: 1,
            name: "demo".into(),
            verbose: true
        }
    );
}

#[test]
fn missing_required_option_never_runs_handler() {
    let (manager, seen) = setup();
    let (result, state) = dispatch(&manager, &["prog", "run"]);
    assert!(matches!(result, Err(Error::MissingRequiredOption { ref name }) if name == "name"));
    assert_eq!(state, DispatchState::Failed);
    assert_eq!(seen.lock().unwrap().calls, 0);
}

#[test]
fn unknown_command_fails_before_options() {
    let (manager, seen) = setup();
    let (result, state) = dispatch(&manager, &["prog", "unknown", "--bogus"]);
    assert!(matches!(result, Err(Error::CommandNotRegistered { ref name }) if name == "unknown"));
    assert_eq!(state, DispatchState::Failed);
    assert_eq!(seen.lock().unwrap().calls, 0);
}

#[test]
fn undeclared_option_rejected() {
    let (manager, seen) = setup();
    let (result, _) = dispatch(&manager, &["prog", "run", "--bogus=1"]);
    match result {
        Err(Error::OptionNotRecognized { command, key }) => {
            assert_eq!(command, "run");
            assert_eq!(key, "bogus");
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert_eq!(seen.lock().unwrap().calls, 0);
}

#[test]
fn long_form_round_trip() {
    let (manager, seen) = setup();
    manager
        .run_tokens(["prog", "run", "--verbose", "--name=long form"])
        .unwrap();
    let s = seen.lock().unwrap();
    assert_eq!(s.name, "long form");
    assert!(s.verbose);
}

#[test]
fn flag_given_value_fails_assignment() {
    let (manager, _) = setup();
    let (result, state) = dispatch(&manager, &["prog", "run", "-n", "x", "--verbose=yes"]);
    assert!(matches!(result, Err(Error::InvalidAssignment { ref name, .. }) if name == "verbose"));
    assert_eq!(state, DispatchState::Failed);
}

#[test]
fn required_present_without_value_fails_validation() {
    let (manager, _) = setup();
    let (result, _) = dispatch(&manager, &["prog", "run", "-vn"]);
    assert!(matches!(result, Err(Error::MissingRequiredOption { .. })));
}

#[test]
fn bundled_flags_with_trailing_value() {
    let (manager, seen) = setup();
    manager.run_tokens(["prog", "run", "-vn", "bundled"]).unwrap();
    let s = seen.lock().unwrap();
    assert_eq!(s.name, "bundled");
    assert!(s.verbose);
}

#[test]
fn each_run_starts_from_clean_options() {
    let (manager, seen) = setup();
    manager.run_tokens(["prog", "run", "-n", "first", "-v"]).unwrap();
    manager.run_tokens(["prog", "run", "-n", "second"]).unwrap();
    let s = seen.lock().unwrap();
    assert_eq!(s.calls, 2);
    assert_eq!(s.name, "second");
    assert!(!s.verbose, "flag from the first run must not leak");
}

#[test]
fn default_used_when_option_absent() {
    let manager = Manager::new();
    let out = Arc::new(Mutex::new(0i64));
    let sink = out.clone();
    manager
        .add_command(
            Command::new("count")
                .with_options([CommandOption::new(OptionConfig {
                    short: Some('t'),
                    default: Some(Value::Integer(4)),
                    ..OptionConfig::new("times", ValueType::Integer)
                })
                .unwrap()])
                .unwrap()
                .with_handler(move |_, _, cmd| {
                    *sink.lock().unwrap() = cmd.option("t")?.to_int()?;
                    Ok(())
                }),
        )
        .unwrap();

    manager.run_tokens(["prog", "count"]).unwrap();
    assert_eq!(*out.lock().unwrap(), 4);
    manager.run_tokens(["prog", "count", "-t", "9"]).unwrap();
    assert_eq!(*out.lock().unwrap(), 9);
}

#[test]
fn conversion_error_from_handler_surfaces_typed() {
    let manager = Manager::new();
    manager
        .add_command(
            Command::new("count")
                .with_options([CommandOption::optional("times", ValueType::Integer).unwrap()])
                .unwrap()
                .with_handler(|_, _, cmd| {
                    cmd.option("times")?.to_int()?;
                    Ok(())
                }),
        )
        .unwrap();
    let err = manager.run_tokens(["prog", "count", "--times", "many"]).unwrap_err();
    assert!(matches!(err, Error::ValueConversion { ref value, .. } if value == "many"));
}

#[test]
fn validation_follows_declaration_order() {
    let manager = Manager::new();
    manager
        .add_command(
            Command::new("pair")
                .with_options([
                    CommandOption::required("second", ValueType::String).unwrap(),
                    CommandOption::required("first", ValueType::String).unwrap(),
                ])
                .unwrap()
                .with_handler(|_, _, _| Ok(())),
        )
        .unwrap();
    let err = manager.run_tokens(["prog", "pair"]).unwrap_err();
    assert!(matches!(err, Error::MissingRequiredOption { ref name } if name == "second"));
}

#[test]
fn handler_error_fails_dispatch() {
    let manager = Manager::new();
    manager
        .add_command(Command::new("fail").with_handler(|_, _, _| anyhow::bail!("nope")))
        .unwrap();
    let (result, state) = dispatch(&manager, &["prog", "fail"]);
    assert!(matches!(result, Err(Error::Handler { .. })));
    assert_eq!(state, DispatchState::Failed);
}

#[test]
fn duplicate_key_stops_before_dispatch() {
    let (manager, seen) = setup();
    let err = manager
        .run_tokens(["prog", "run", "-n", "a", "-n", "b"])
        .unwrap_err();
    assert!(matches!(err, Error::DuplicateOptionAssignment { .. }));
    assert_eq!(seen.lock().unwrap().calls, 0);
}

#[test]
fn required_option_with_empty_default_still_missing() {
    let ran = Arc::new(Mutex::new(false));
    let flag = ran.clone();
    let manager = Manager::new();
    manager
        .add_command(
            Command::new("run")
                .with_options([CommandOption::new(OptionConfig {
                    mode: Mode::Required,
                    default: Some(Value::from("")),
                    ..OptionConfig::new("name", ValueType::String)
                })
                .unwrap()])
                .unwrap()
                .with_handler(move |_, _, _| {
                    *flag.lock().unwrap() = true;
                    Ok(())
                }),
        )
        .unwrap();

    let (result, state) = dispatch(&manager, &["prog", "run"]);
    assert!(matches!(result, Err(Error::MissingRequiredOption { ref name }) if name == "name"));
    assert_eq!(state, DispatchState::Failed);
    assert!(!*ran.lock().unwrap());

    manager.run_tokens(["prog", "run", "--name=set"]).unwrap();
    assert!(*ran.lock().unwrap());
}
