// cli/help.rs: built-in `help` command.
//
//   prog                 → manager overview (same as `prog help`)
//   prog help            → manager overview
//   prog help COMMAND    → usage and options of COMMAND
//
// The command is hidden, so it never lists itself.

use std::fmt::Write as _;

use crate::cli::arguments::Arguments;
use crate::cli::command::Command;
use crate::cli::constants::HELP_COMMAND;
use crate::cli::manager::Manager;
use crate::cli::output::{render_listing, split_words};
use crate::error::{Error, Result};

/// Builds the hidden `help` command. Register it on a manager so that an
/// empty selector has somewhere to go.
pub fn command() -> Command {
    Command::new(HELP_COMMAND)
        .with_hidden(true)
        .with_description("Show commands, or the options of one command")
        .with_handler(|manager, arguments, _| {
            print!("{}", render(manager, arguments)?);
            Ok(())
        })
}

/// Renders the help text selected by `arguments`.
///
/// Fails with [`Error::CommandNotRegistered`] when the help selector names an
/// unknown command.
pub fn render(manager: &Manager, arguments: &Arguments) -> Result<String> {
    match arguments.help_selector() {
        "" => Ok(render_manager(manager, arguments.script())),
        key => {
            let command = manager
                .get_command(key)
                .ok_or_else(|| Error::CommandNotRegistered {
                    name: key.to_owned(),
                })?;
            Ok(render_command(manager, arguments.script(), &command))
        }
    }
}

/// Overview: version, usage, description, visible commands, guide line.
pub fn render_manager(manager: &Manager, script: &str) -> String {
    let mut out = header(manager, script, "COMMAND");
    out.push_str(&description_block(manager.description()));

    let rows: Vec<(String, String)> = manager
        .commands()
        .iter()
        .filter(|c| !c.hidden())
        .map(|c| (c.name().to_owned(), c.description().to_owned()))
        .collect();
    out.push_str(&render_listing("Commands", &rows));

    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Run '{script} {HELP_COMMAND} COMMAND' for more information on a command"
    );
    out
}

/// One command: version, usage, description, options sorted by long name.
pub fn render_command(manager: &Manager, script: &str, command: &Command) -> String {
    let mut out = header(manager, script, command.name());
    out.push_str(&description_block(command.description()));

    let mut options: Vec<_> = command.options().collect();
    options.sort_by(|a, b| a.name().cmp(b.name()));
    let rows: Vec<(String, String)> = options
        .into_iter()
        .map(|o| (o.label(), o.description()))
        .collect();
    out.push_str(&render_listing("Options", &rows));
    out
}

fn header(manager: &Manager, script: &str, target: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out);
    let _ = writeln!(out, "Version: {}", manager.version());
    let _ = writeln!(out, "Usage: {script} {target} [OPTIONS]");
    out
}

fn description_block(text: &str) -> String {
    let mut out = String::new();
    for (i, line) in split_words(0, text).iter().enumerate() {
        if i == 0 {
            let _ = writeln!(out);
        }
        let _ = writeln!(out, "{line}");
    }
    out
}
