//! Commands: a name, an ordered option set, and a handler.
//!
//! [`Command::run`] is the only place a handler panic is caught. The panic is
//! turned into [`Error::HandlerPanic`] carrying a call trace, so one
//! misbehaving command cannot take the dispatcher down.
//!
//! The trace is recorded by a panic hook, installed on first run and chained
//! in front of whatever hook was already set. The hook runs before the stack
//! unwinds, so the trace starts at the panic site.

use std::backtrace::Backtrace;
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, Once};

use indexmap::IndexMap;
use tracing::warn;

use crate::cli::arguments::Arguments;
use crate::cli::manager::Manager;
use crate::cli::option::CommandOption;
use crate::error::{Error, Result};

/// Callable invoked once a command's options are assigned and validated.
///
/// The `&Command` argument is the dispatcher's per-run copy, so option values
/// read through it are the ones parsed for this invocation.
pub type CommandHandler =
    Arc<dyn Fn(&Manager, &Arguments, &Command) -> anyhow::Result<()> + Send + Sync>;

#[derive(Clone, Default)]
pub struct Command {
    name: String,
    description: String,
    hidden: bool,
    handler: Option<CommandHandler>,
    // Long name → option, in declaration order.
    options: IndexMap<String, CommandOption>,
    // Long or short name → long name.
    keys: HashMap<String, String>,
}

impl fmt::Debug for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("description", &self.description)
            .field("hidden", &self.hidden)
            .field("handler", &self.handler.is_some())
            .field("options", &self.options.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        Command {
            name: name.into(),
            ..Command::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Hidden commands are left out of listings but still dispatch.
    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }

    pub fn with_handler<F>(mut self, handler: F) -> Self
    where
        F: Fn(&Manager, &Arguments, &Command) -> anyhow::Result<()> + Send + Sync + 'static,
    {
        self.handler = Some(Arc::new(handler));
        self
    }

    /// Builder form of [`add_option`](Self::add_option).
    pub fn with_options<I>(mut self, opts: I) -> Result<Self>
    where
        I: IntoIterator<Item = CommandOption>,
    {
        self.add_option(opts)?;
        Ok(self)
    }

    /// Registers options.
    ///
    /// Re-adding a long name replaces the earlier definition in place (its
    /// position in the listing order is kept) and logs a warning. A short name,
    /// or a long name, that is already bound to a different option is rejected
    /// with [`Error::InvalidDeclaration`].
    pub fn add_option<I>(&mut self, opts: I) -> Result<()>
    where
        I: IntoIterator<Item = CommandOption>,
    {
        for opt in opts {
            let name = opt.name().to_owned();

            if let Some(bound) = self.keys.get(&name) {
                if *bound != name {
                    return Err(Error::declaration(
                        &name,
                        format!("already used as short name of --{bound}"),
                    ));
                }
            }
            if let Some(c) = opt.short() {
                if let Some(bound) = self.keys.get(c.to_string().as_str()) {
                    if *bound != name {
                        return Err(Error::declaration(
                            &name,
                            format!("short name -{c} already bound to --{bound}"),
                        ));
                    }
                }
            }

            if let Some(previous) = self.options.get(&name) {
                warn!(command = %self.name, option = %name, "option redefined");
                if let Some(c) = previous.short() {
                    self.keys.remove(c.to_string().as_str());
                }
            }

            self.keys.insert(name.clone(), name.clone());
            if let Some(c) = opt.short() {
                self.keys.insert(c.to_string(), name.clone());
            }
            self.options.insert(name, opt);
        }
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn hidden(&self) -> bool {
        self.hidden
    }

    pub fn has_handler(&self) -> bool {
        self.handler.is_some()
    }

    /// Resolves a long or short name to the declared option.
    pub fn get_option(&self, key: &str) -> Option<&CommandOption> {
        self.keys.get(key).and_then(|name| self.options.get(name))
    }

    pub(crate) fn get_option_mut(&mut self, key: &str) -> Option<&mut CommandOption> {
        match self.keys.get(key) {
            Some(name) => self.options.get_mut(name),
            None => None,
        }
    }

    /// Like [`get_option`](Self::get_option) but reports an unknown key as
    /// [`Error::OptionNotRecognized`], for use with `?` inside handlers.
    pub fn option(&self, key: &str) -> Result<&CommandOption> {
        self.get_option(key).ok_or_else(|| Error::OptionNotRecognized {
            command: self.name.clone(),
            key: key.to_owned(),
        })
    }

    /// Long name of the option `key` refers to.
    pub fn resolve_key(&self, key: &str) -> Option<&str> {
        self.keys.get(key).map(String::as_str)
    }

    /// Declared options in declaration order.
    pub fn options(&self) -> impl Iterator<Item = &CommandOption> {
        self.options.values()
    }

    // ── Execution ─────────────────────────────────────────────────────────────

    /// Invokes the handler.
    ///
    /// A handler error that is already a crate [`Error`] is returned as is;
    /// any other error is wrapped in [`Error::Handler`]. A panic becomes
    /// [`Error::HandlerPanic`].
    pub fn run(&self, manager: &Manager, arguments: &Arguments) -> Result<()> {
        let handler = self.handler.as_ref().ok_or_else(|| Error::HandlerNotDefined {
            name: self.name.clone(),
        })?;

        install_panic_hook();
        PANIC_TRACE.with(|slot| slot.borrow_mut().take());

        match panic::catch_unwind(AssertUnwindSafe(|| handler(manager, arguments, self))) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(match err.downcast::<Error>() {
                Ok(own) => own,
                Err(source) => Error::Handler {
                    command: self.name.clone(),
                    source,
                },
            }),
            Err(payload) => Err(Error::HandlerPanic {
                command: self.name.clone(),
                message: panic_message(payload.as_ref()),
                // Falls back to a post-unwind capture if another hook replaced ours.
                trace: PANIC_TRACE
                    .with(|slot| slot.borrow_mut().take())
                    .unwrap_or_else(|| Backtrace::force_capture().to_string()),
            }),
        }
    }
}

thread_local! {
    // Location and backtrace of the last panic on this thread.
    static PANIC_TRACE: RefCell<Option<String>> = const { RefCell::new(None) };
}

static PANIC_HOOK: Once = Once::new();

fn install_panic_hook() {
    PANIC_HOOK.call_once(|| {
        let default_hook = panic::take_hook();
        panic::set_hook(Box::new(move |info| {
            let location = info
                .location()
                .map(|l| l.to_string())
                .unwrap_or_else(|| "<unknown>".to_owned());
            let trace = format!("panicked at {location}\n{}", Backtrace::force_capture());
            // Unavailable while the thread is tearing down its locals.
            let _ = PANIC_TRACE.try_with(|slot| *slot.borrow_mut() = Some(trace));
            default_hook(info);
        }));
    });
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_owned()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_owned()
    }
}
