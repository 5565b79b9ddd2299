// cli/constants.rs: Identity strings shared by the tokenizer, dispatcher and help.

/// Selector that names the built-in help command. An empty selector is
/// dispatched here, and it is the only selector that captures a second
/// positional token (the help selector).
pub const HELP_COMMAND: &str = "help";

/// Script name used when `argv[0]` is neither `./name` nor a bare identifier
/// (e.g. a `target/debug/...` path produced by `cargo run`).
pub const DEFAULT_SCRIPT: &str = "cargo run --";

/// Leading byte that marks a token as option-shaped.
pub const OPTION_PREFIX: u8 = b'-';

/// Separator between an option name and an inline value (`--name=value`).
pub const VALUE_SEPARATOR: char = '=';

/// Separator used when several positional tokens form one option value.
pub const VALUE_JOINER: &str = " ";
