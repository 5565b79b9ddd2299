// cmdmux: command-line framework: argv tokenizer, typed option schema and
// command dispatcher.

pub mod config;
pub mod error;
pub mod cli;

// ── Version constants ─────────────────────────────────────────────────────────
pub const CMDMUX_VERSION_MAJOR: u32 = 3;
pub const CMDMUX_VERSION_MINOR: u32 = 0;
pub const CMDMUX_VERSION_RELEASE: u32 = 0;
pub const CMDMUX_VERSION_NUMBER: u32 =
    CMDMUX_VERSION_MAJOR * 100 * 100 + CMDMUX_VERSION_MINOR * 100 + CMDMUX_VERSION_RELEASE;

/// Returns the runtime version number (`major * 10000 + minor * 100 + release`).
pub fn version_number() -> u32 {
    CMDMUX_VERSION_NUMBER
}

/// Returns the runtime version string.
pub fn version_string() -> &'static str {
    config::VERSION
}

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use cli::arguments::Arguments;
pub use cli::command::{Command, CommandHandler};
pub use cli::manager::{Dispatch, DispatchState, Manager};
pub use cli::option::{CommandOption, Mode, OptionConfig};
pub use cli::value::{Value, ValueType};
pub use error::{Error, Result};
