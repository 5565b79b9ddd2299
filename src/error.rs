//! Error taxonomy for tokenizing, declaring and dispatching commands.
//!
//! Every failure is local to one invocation and terminal: the dispatcher
//! surfaces the first error it meets and stops. Nothing in this crate retries.

use thiserror::Error;

use crate::cli::value::ValueType;

/// Crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// A `None`-typed (presence-only) option was given a value.
    #[error("option not accept any value: {name}")]
    InvalidAssignment { name: String, value: String },

    /// A typed accessor was called against an option declared with another type.
    #[error("option type not matched on {requested}: {name}")]
    TypeMismatch {
        name: String,
        declared: ValueType,
        requested: ValueType,
    },

    /// The raw string (or the default) could not be converted to the declared type.
    #[error("option value convert to {target} failed: {name}")]
    ValueConversion {
        name: String,
        value: String,
        target: ValueType,
    },

    #[error("option is required: {name}")]
    MissingRequiredOption { name: String },

    /// A parsed key matches neither a long nor a short name on the command.
    #[error("option not recognized: {key}")]
    OptionNotRecognized { command: String, key: String },

    #[error("command not registered in manager: {name}")]
    CommandNotRegistered { name: String },

    /// The same key was supplied twice in one invocation.
    #[error("option can not specify twice: {key}")]
    DuplicateOptionAssignment { key: String },

    /// A handler panicked; `trace` holds the call trace captured at the
    /// recovery boundary.
    #[error("command panic on {command}: {message}")]
    HandlerPanic {
        command: String,
        message: String,
        trace: String,
    },

    #[error("command handler not defined: {name}")]
    HandlerNotDefined { name: String },

    #[error("can not add unnamed command to manager")]
    UnnamedCommand,

    #[error("command exists in manager: {name}")]
    CommandExists { name: String },

    /// An option schema is malformed (bad name, bad short name, default of the
    /// wrong type, or a short name already bound to another option).
    #[error("invalid option declaration {name:?}: {reason}")]
    InvalidDeclaration { name: String, reason: String },

    /// A handler returned an error that is not one of ours.
    #[error("command {command} failed: {source}")]
    Handler {
        command: String,
        #[source]
        source: anyhow::Error,
    },
}

impl Error {
    /// Returns the synthetic call trace for [`Error::HandlerPanic`], `None` otherwise.
    pub fn trace(&self) -> Option<&str> {
        match self {
            Error::HandlerPanic { trace, .. } => Some(trace.as_str()),
            _ => None,
        }
    }

    pub(crate) fn declaration(name: &str, reason: impl Into<String>) -> Self {
        Error::InvalidDeclaration {
            name: name.to_owned(),
            reason: reason.into(),
        }
    }
}
