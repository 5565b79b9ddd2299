//! Command registry and dispatcher.
//!
//! A [`Manager`] owns the registered command schemas. Each call to
//! [`Manager::run`] drives one [`Dispatch`] through
//!
//! ```text
//! Idle → Resolving → Assigning → Validating → Executing → Done
//!            └───────────┴────────────┴────────────┴──────→ Failed
//! ```
//!
//! Resolution copies the registered command; values are assigned into that
//! copy, so concurrent runs of the same command never share option state.
//! Assignment is all-or-nothing: every parsed key is resolved against the
//! command before the first option is written.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use crate::cli::arguments::Arguments;
use crate::cli::command::Command;
use crate::cli::constants::HELP_COMMAND;
use crate::config::VERSION;
use crate::error::{Error, Result};

#[derive(Debug)]
pub struct Manager {
    description: String,
    version: String,
    commands: RwLock<HashMap<String, Arc<Command>>>,
}

impl Default for Manager {
    fn default() -> Self {
        Manager {
            description: String::new(),
            version: VERSION.to_owned(),
            commands: RwLock::new(HashMap::new()),
        }
    }
}

impl Manager {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn version(&self) -> &str {
        &self.version
    }

    /// Registers `command`. Names must be non-empty and unique.
    pub fn add_command(&self, command: Command) -> Result<()> {
        if command.name().is_empty() {
            return Err(Error::UnnamedCommand);
        }
        let mut commands = self.commands.write().unwrap_or_else(PoisonError::into_inner);
        if commands.contains_key(command.name()) {
            return Err(Error::CommandExists {
                name: command.name().to_owned(),
            });
        }
        commands.insert(command.name().to_owned(), Arc::new(command));
        Ok(())
    }

    pub fn get_command(&self, name: &str) -> Option<Arc<Command>> {
        self.commands
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .cloned()
    }

    /// All registered commands, hidden ones included, sorted by name.
    pub fn commands(&self) -> Vec<Arc<Command>> {
        let mut list: Vec<Arc<Command>> = self
            .commands
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .values()
            .cloned()
            .collect();
        list.sort_by(|a, b| a.name().cmp(b.name()));
        list
    }

    /// Dispatches one parsed invocation.
    pub fn run(&self, arguments: &Arguments) -> Result<()> {
        Dispatch::new(self).run(arguments)
    }

    /// Tokenizes `tokens` (index 0 = program path) and dispatches.
    pub fn run_tokens<I, S>(&self, tokens: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let arguments = Arguments::parse(tokens)?;
        self.run(&arguments)
    }

    /// Tokenizes the process arguments and dispatches.
    pub fn run_terminal(&self) -> Result<()> {
        let arguments = Arguments::from_env()?;
        self.run(&arguments)
    }
}

/// Stage of a single dispatch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchState {
    Idle,
    Resolving,
    Assigning,
    Validating,
    Executing,
    Done,
    Failed,
}

/// One resolve → assign → validate → execute pass over a [`Manager`].
///
/// Single-shot: the first error moves the dispatch to
/// [`DispatchState::Failed`] and is returned as is.
#[derive(Debug)]
pub struct Dispatch<'m> {
    manager: &'m Manager,
    state: DispatchState,
}

impl<'m> Dispatch<'m> {
    pub fn new(manager: &'m Manager) -> Self {
        Dispatch {
            manager,
            state: DispatchState::Idle,
        }
    }

    pub fn state(&self) -> DispatchState {
        self.state
    }

    pub fn run(&mut self, arguments: &Arguments) -> Result<()> {
        let result = self.drive(arguments);
        self.enter(if result.is_ok() {
            DispatchState::Done
        } else {
            DispatchState::Failed
        });
        result
    }

    fn enter(&mut self, next: DispatchState) {
        debug!(from = ?self.state, to = ?next, "dispatch");
        self.state = next;
    }

    fn drive(&mut self, arguments: &Arguments) -> Result<()> {
        // ── Resolving ─────────────────────────────────────────────────────────
        self.enter(DispatchState::Resolving);
        let selector = match arguments.selector() {
            "" => HELP_COMMAND,
            s => s,
        };
        let registered = self
            .manager
            .get_command(selector)
            .ok_or_else(|| Error::CommandNotRegistered {
                name: selector.to_owned(),
            })?;

        // ── Assigning ─────────────────────────────────────────────────────────
        self.enter(DispatchState::Assigning);
        let mut command = Command::clone(&registered);

        // Resolve every key before touching any option.
        let mut resolved: Vec<(String, &str)> = Vec::with_capacity(arguments.mapper().len());
        let mut seen: HashSet<String> = HashSet::new();
        for (key, raw) in arguments.mapper() {
            let name = command
                .resolve_key(key)
                .ok_or_else(|| Error::OptionNotRecognized {
                    command: command.name().to_owned(),
                    key: key.clone(),
                })?
                .to_owned();
            // `-n a --name=b` names one option twice.
            if !seen.insert(name.clone()) {
                return Err(Error::DuplicateOptionAssignment { key: key.clone() });
            }
            resolved.push((name, raw.as_str()));
        }
        for (name, raw) in resolved {
            if let Some(opt) = command.get_option_mut(&name) {
                opt.assign(raw)?;
            }
        }

        // ── Validating ────────────────────────────────────────────────────────
        self.enter(DispatchState::Validating);
        for opt in command.options() {
            opt.validate()?;
        }

        // ── Executing ─────────────────────────────────────────────────────────
        self.enter(DispatchState::Executing);
        command.run(self.manager, arguments)
    }
}
