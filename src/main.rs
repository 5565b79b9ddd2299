//! Binary entry point for the `cmdmux` demo tool.
//!
//! Wires a [`Manager`] with three commands and dispatches `std::env::args()`:
//!
//! | Command   | Purpose |
//! |-----------|---------|
//! | `help`    | Overview, or `help COMMAND` for one command's options (hidden, default). |
//! | `greet`   | Prints a greeting; shows required, defaulted, typed and flag options. |
//! | `version` | Prints the version string. |
//!
//! Logging goes to stderr through `tracing`; set `CMDMUX_LOG` (an `EnvFilter`
//! directive such as `debug`) to see dispatch transitions.
//!
//! Any dispatch error is printed as `cmdmux: <error>` and the process exits 1.

use anyhow::Context as _;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cmdmux::cli::help;
use cmdmux::config::{log_filter, DEFAULT_LOG_FILTER};
use cmdmux::{Command, CommandOption, Manager, Mode, OptionConfig, Value, ValueType};

const APP_NAME: &str = env!("CARGO_PKG_NAME");

fn init_logging() {
    let filter = EnvFilter::try_new(log_filter())
        .unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn greet_command() -> cmdmux::Result<Command> {
    Command::new("greet")
        .with_description("Print a greeting for NAME, TIMES times")
        .with_options([
            CommandOption::new(OptionConfig {
                short: Some('n'),
                mode: Mode::Required,
                description: "Who to greet".into(),
                ..OptionConfig::new("name", ValueType::String)
            })?,
            CommandOption::new(OptionConfig {
                short: Some('t'),
                default: Some(Value::Integer(1)),
                description: "How many lines to print".into(),
                ..OptionConfig::new("times", ValueType::Integer)
            })?,
            CommandOption::new(OptionConfig {
                short: Some('p'),
                default: Some(Value::from("!")),
                description: "Text appended to the greeting".into(),
                ..OptionConfig::new("punct", ValueType::String)
            })?,
            CommandOption::new(OptionConfig {
                short: Some('s'),
                description: "Upper-case the greeting".into(),
                ..OptionConfig::new("shout", ValueType::None)
            })?,
        ])
        .map(|c| c.with_handler(greet))
}

fn greet(_: &Manager, _: &cmdmux::Arguments, command: &Command) -> anyhow::Result<()> {
    let name = command.option("name")?.to_string_value()?;
    let times = command.option("times")?.to_int()?;
    let punct = command.option("punct")?.to_string_value()?;
    let shout = command.option("shout")?.assigned();

    anyhow::ensure!(times >= 0, "times must not be negative: {times}");

    let mut line = format!("Hello, {name}{punct}");
    if shout {
        line = line.to_uppercase();
    }
    for _ in 0..times {
        println!("{line}");
    }
    Ok(())
}

fn version_command() -> Command {
    Command::new("version")
        .with_description("Print the version and exit")
        .with_handler(|manager, _, _| {
            println!("{APP_NAME} {}", manager.version());
            Ok(())
        })
}

fn build_manager() -> anyhow::Result<Manager> {
    let manager = Manager::new().with_description(
        "Demonstrates declaring commands and typed options, then dispatching argv to them",
    );
    manager.add_command(help::command())?;
    manager.add_command(greet_command().context("declaring greet")?)?;
    manager.add_command(version_command())?;
    Ok(manager)
}

fn main() {
    init_logging();

    let manager = match build_manager() {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{APP_NAME}: {e:#}");
            std::process::exit(1);
        }
    };

    if let Err(e) = manager.run_terminal() {
        if let Some(trace) = e.trace() {
            debug!("{trace}");
        }
        eprintln!("{APP_NAME}: {e}");
        std::process::exit(1);
    }
}
