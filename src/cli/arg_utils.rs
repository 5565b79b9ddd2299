// arg_utils.rs: token classification helpers used by the tokenizer.
//
// Option names follow `[a-zA-Z0-9][_a-zA-Z0-9-]*`. Script names are kept only
// when they look like `./name` or a bare `name` over `[_a-zA-Z0-9-]`.

use crate::cli::constants::{DEFAULT_SCRIPT, OPTION_PREFIX, VALUE_SEPARATOR};

/// How an option-shaped token should be read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OptionToken<'a> {
    /// `--name=value` or `-n=value`: key and value in one token.
    Pair { key: &'a str, value: &'a str },
    /// `-abc`: one pending key per character.
    Short(&'a str),
    /// `--name` (two or more dashes): a single pending key.
    Long(&'a str),
    /// Starts with `-` but matches no option form (`-`, `--`, `-@x`).
    Malformed,
}

/// Returns `true` when `token` starts with the option prefix.
pub fn is_option_token(token: &str) -> bool {
    token.as_bytes().first() == Some(&OPTION_PREFIX)
}

fn is_name_head(b: u8) -> bool {
    b.is_ascii_alphanumeric()
}

fn is_name_tail(b: u8) -> bool {
    b.is_ascii_alphanumeric() || b == b'_' || b == b'-'
}

/// Returns `true` if `name` is a valid option name (`[a-zA-Z0-9][_a-zA-Z0-9-]*`).
pub fn is_option_name(name: &str) -> bool {
    match name.as_bytes().split_first() {
        Some((&head, tail)) => is_name_head(head) && tail.iter().all(|&b| is_name_tail(b)),
        None => false,
    }
}

/// Returns `true` for a bare identifier (`[_a-zA-Z0-9-]+`).
pub fn is_bare_identifier(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(is_name_tail)
}

/// Returns `true` for a relative binary path of the form `./name`.
pub fn is_binary_path(s: &str) -> bool {
    s.strip_prefix("./").is_some_and(is_bare_identifier)
}

/// Normalizes `argv[0]` into the script name shown in usage lines.
///
/// `./demo` and `demo` are kept verbatim; anything else (absolute paths,
/// `target/debug/demo`, empty) falls back to [`DEFAULT_SCRIPT`].
pub fn normalize_script(argv0: &str) -> String {
    if is_binary_path(argv0) || is_bare_identifier(argv0) {
        argv0.to_owned()
    } else {
        DEFAULT_SCRIPT.to_owned()
    }
}

/// Classifies an option-shaped token.
///
/// The caller has already checked [`is_option_token`]. A `=` anywhere after a
/// valid name makes a [`OptionToken::Pair`], even with a single dash; only a
/// single-dash token without `=` is split into short keys.
pub fn classify(token: &str) -> OptionToken<'_> {
    let body = token.trim_start_matches(OPTION_PREFIX as char);
    let dashes = token.len() - body.len();
    if dashes == 0 {
        return OptionToken::Malformed;
    }

    if let Some((key, value)) = body.split_once(VALUE_SEPARATOR) {
        return if is_option_name(key) {
            OptionToken::Pair { key, value }
        } else {
            OptionToken::Malformed
        };
    }

    if !is_option_name(body) {
        return OptionToken::Malformed;
    }
    if dashes == 1 {
        OptionToken::Short(body)
    } else {
        OptionToken::Long(body)
    }
}
