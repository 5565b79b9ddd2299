//! Command-line framework core.
//!
//! This module organises the full dispatch pipeline:
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Help-command name, placeholder script name, option prefix. |
//! | [`arg_utils`] | Low-level token helpers: script-name patterns, option-name pattern, `name=value` split. |
//! | [`arguments`] | `Arguments`: tokenizer turning `argv` into script, selector and a key → raw value map. |
//! | [`value`]     | `ValueType`, typed defaults, and the one place strings are converted to typed values. |
//! | [`option`]    | `CommandOption`: a declared flag: identity, mode, type, default, and the per-run value. |
//! | [`command`]   | `Command`: named, ordered option set plus a handler, with the panic boundary. |
//! | [`manager`]   | `Manager` registry and the `Dispatch` resolve → assign → validate → execute state machine. |
//! | [`output`]    | Flat key → description listing renderer. |
//! | [`help`]      | Built-in hidden `help` command. |
//!
//! Typical call sequence: `Arguments::parse` → `Manager::run` → handler.

pub mod constants;
pub mod arg_utils;
pub mod arguments;
pub mod value;
pub mod option;
pub mod command;
pub mod manager;
pub mod output;
pub mod help;
