//! Tokenizer for the process argument vector.
//!
//! [`Arguments::parse`] consumes the full `argv` (index 0 is the program path)
//! and produces the script name, the command selector, the optional help
//! selector, and a flat map of option key → raw string value.
//!
//! Accepted option forms:
//!
//! | Token          | Effect |
//! |----------------|--------|
//! | `--name=value` | `{name: value}` immediately |
//! | `-n=value`     | `{n: value}` immediately |
//! | `--name`       | pending key `name` |
//! | `-abc`         | pending keys `a`, `b`, `c` |
//!
//! Plain tokens that follow pending keys are joined with a single space and
//! become the value of the **last** pending key; the other keys of that
//! cluster receive an empty string. The next option token (or the end of
//! `argv`) flushes the cluster. An empty value means "present without value",
//! which is different from "absent".
//!
//! Plain tokens that follow no pending key are kept in [`Arguments::extras`]
//! and logged; they are never an error.

use indexmap::IndexMap;
use tracing::warn;

use crate::cli::arg_utils::{classify, is_option_token, normalize_script, OptionToken};
use crate::cli::constants::{HELP_COMMAND, VALUE_JOINER};
use crate::error::{Error, Result};

/// Parsed view of one invocation's argument vector.
///
/// Created fresh for each run and discarded after dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Arguments {
    script: String,
    selector: String,
    help_selector: String,
    mapper: IndexMap<String, String>,
    extras: Vec<String>,
}

// Keys seen since the last flush, and the plain tokens that followed them.
#[derive(Debug, Default)]
struct Cluster {
    keys: Vec<String>,
    values: Vec<String>,
}

impl Cluster {
    fn is_empty(&self) -> bool {
        self.keys.is_empty() && self.values.is_empty()
    }
}

impl Arguments {
    /// Parse an explicit argument vector. `tokens[0]` is the program path.
    ///
    /// Fails only with [`Error::DuplicateOptionAssignment`] when the same key
    /// is supplied twice.
    pub fn parse<I, S>(tokens: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut arguments = Arguments::default();
        let mut cluster = Cluster::default();

        for (index, token) in tokens.into_iter().enumerate() {
            let token = token.as_ref();

            // ── Script ────────────────────────────────────────────────────────
            if index == 0 {
                arguments.script = normalize_script(token);
                continue;
            }

            // ── Plain tokens: selector, help selector, or value text ─────────
            if !is_option_token(token) {
                if index == 1 {
                    arguments.selector = token.to_owned();
                } else if index == 2 && arguments.selector == HELP_COMMAND {
                    arguments.help_selector = token.to_owned();
                } else {
                    cluster.values.push(token.to_owned());
                }
                continue;
            }

            // ── Option tokens ─────────────────────────────────────────────────
            arguments.flush(&mut cluster)?;

            match classify(token) {
                OptionToken::Pair { key, value } => {
                    arguments.insert(key, value.to_owned())?;
                }
                OptionToken::Short(chars) => {
                    cluster.keys = chars.chars().map(String::from).collect();
                }
                OptionToken::Long(name) => {
                    cluster.keys = vec![name.to_owned()];
                }
                OptionToken::Malformed => {
                    warn!(token, "ignoring option-shaped token that names no option");
                }
            }
        }

        arguments.flush(&mut cluster)?;
        Ok(arguments)
    }

    /// Parse `std::env::args()`.
    pub fn from_env() -> Result<Self> {
        Self::parse(std::env::args())
    }

    /// Assign the pending cluster: the joined value goes to the last key, the
    /// others get an empty string.
    fn flush(&mut self, cluster: &mut Cluster) -> Result<()> {
        if cluster.is_empty() {
            return Ok(());
        }
        let Cluster { keys, values } = std::mem::take(cluster);

        if keys.is_empty() {
            warn!(?values, "positional tokens follow no option; keeping as extras");
            self.extras.extend(values);
            return Ok(());
        }

        let last = keys.len() - 1;
        let mut joined = Some(values.join(VALUE_JOINER));
        for (i, key) in keys.into_iter().enumerate() {
            let value = if i == last {
                joined.take().unwrap_or_default()
            } else {
                String::new()
            };
            self.insert(&key, value)?;
        }
        Ok(())
    }

    fn insert(&mut self, key: &str, value: String) -> Result<()> {
        if self.mapper.contains_key(key) {
            return Err(Error::DuplicateOptionAssignment {
                key: key.to_owned(),
            });
        }
        self.mapper.insert(key.to_owned(), value);
        Ok(())
    }

    // ── Accessors ─────────────────────────────────────────────────────────────

    /// Raw value for `key`; empty when the key is absent or present without value.
    pub fn get(&self, key: &str) -> &str {
        self.mapper.get(key).map(String::as_str).unwrap_or("")
    }

    /// Returns `true` if `key` was supplied, with or without a value.
    pub fn has(&self, key: &str) -> bool {
        self.mapper.contains_key(key)
    }

    /// Key → raw value map, in the order keys were supplied.
    pub fn mapper(&self) -> &IndexMap<String, String> {
        &self.mapper
    }

    pub fn script(&self) -> &str {
        &self.script
    }

    /// First positional token; empty when none was given.
    pub fn selector(&self) -> &str {
        &self.selector
    }

    /// Second positional token, captured only when the selector is `help`.
    pub fn help_selector(&self) -> &str {
        &self.help_selector
    }

    /// Positional tokens that attached to no option key.
    pub fn extras(&self) -> &[String] {
        &self.extras
    }
}
