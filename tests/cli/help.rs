// Integration tests for the built-in help command wired through dispatch.

use cmdmux::cli::help;
use cmdmux::{Arguments, Command, CommandOption, Error, Manager, OptionConfig, Value, ValueType};

fn manager() -> Manager {
    let m = Manager::new()
        .with_description("Tools for the demo project")
        .with_version("3.1.4");
    m.add_command(help::command()).unwrap();
    m.add_command(
        Command::new("docs")
            .with_description("Generate application documents")
            .with_options([CommandOption::new(OptionConfig {
                short: Some('a'),
                default: Some(Value::from("markdown")),
                description: "Document formatter, accept: postman, markdown".into(),
                ..OptionConfig::new("adapter", ValueType::String)
            })
            .unwrap()])
            .unwrap()
            .with_handler(|_, _, _| Ok(())),
    )
    .unwrap();
    m
}

#[test]
fn empty_selector_dispatches_to_help() {
    manager().run_tokens(["./demo"]).unwrap();
}

#[test]
fn help_for_known_command() {
    manager().run_tokens(["./demo", "help", "docs"]).unwrap();
}

#[test]
fn help_for_unknown_command_fails() {
    let err = manager().run_tokens(["./demo", "help", "nope"]).unwrap_err();
    assert!(matches!(err, Error::CommandNotRegistered { ref name } if name == "nope"));
}

#[test]
fn command_page_shows_default_in_description() {
    let m = manager();
    let a = Arguments::parse(["./demo", "help", "docs"]).unwrap();
    let text = help::render(&m, &a).unwrap();
    assert!(text.contains("Version: 3.1.4"));
    assert!(text.contains(
        "-a, --adapter[=string]    Document formatter, accept: postman, markdown (default: markdown)"
    ));
}

#[test]
fn overview_hides_help_itself() {
    let m = manager();
    let text = help::render_manager(&m, "./demo");
    assert!(text.contains("  docs    Generate application documents"));
    assert!(!text.contains("Show commands"));
}
