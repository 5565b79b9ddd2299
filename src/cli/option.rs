//! Declared command options.
//!
//! A [`CommandOption`] is built once from an [`OptionConfig`] when a command
//! is declared. Its schema (names, mode, type, default, description) never
//! changes afterwards; the raw value and the `assigned` marker are written at
//! most once per dispatch, on the dispatcher's per-run copy of the command.

use std::fmt::Write as _;

use crate::cli::arg_utils::is_option_name;
use crate::cli::value::{convert, Value, ValueType};
use crate::error::{Error, Result};

/// Whether an option must be supplied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    #[default]
    Optional,
    Required,
}

/// Construction-time description of an option.
///
/// ```
/// use cmdmux::{CommandOption, Mode, OptionConfig, ValueType};
///
/// let name = CommandOption::new(OptionConfig {
///     short: Some('n'),
///     mode: Mode::Required,
///     description: "Name to greet".into(),
///     ..OptionConfig::new("name", ValueType::String)
/// })
/// .unwrap();
/// assert_eq!(name.label(), "-n, --name=<string>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct OptionConfig {
    /// Long name, unique within a command.
    pub name: String,
    /// Optional single-character alias.
    pub short: Option<char>,
    pub mode: Mode,
    pub value_type: ValueType,
    /// Typed fallback used when nothing was assigned. Must match `value_type`.
    pub default: Option<Value>,
    pub description: String,
}

impl OptionConfig {
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        OptionConfig {
            name: name.into(),
            value_type,
            ..OptionConfig::default()
        }
    }
}

#[derive(Debug, Clone)]
pub struct CommandOption {
    name: String,
    short: Option<char>,
    mode: Mode,
    value_type: ValueType,
    default: Option<Value>,
    descriptions: Vec<String>,
    value: String,
    assigned: bool,
}

impl CommandOption {
    /// Validates `config` and builds the option.
    ///
    /// Rejects names outside `[a-zA-Z0-9][_a-zA-Z0-9-]*`, non-alphanumeric
    /// short names, defaults whose type differs from `value_type`, and any
    /// default on a presence-only flag.
    pub fn new(config: OptionConfig) -> Result<Self> {
        let OptionConfig {
            name,
            short,
            mode,
            value_type,
            default,
            description,
        } = config;

        if !is_option_name(&name) {
            return Err(Error::declaration(&name, "name must match [a-zA-Z0-9][_a-zA-Z0-9-]*"));
        }
        if let Some(c) = short {
            if !c.is_ascii_alphanumeric() {
                return Err(Error::declaration(
                    &name,
                    format!("short name {c:?} is not alphanumeric"),
                ));
            }
        }
        if let Some(d) = &default {
            if d.value_type() != value_type {
                return Err(Error::declaration(
                    &name,
                    format!("default is {} but option is {}", d.value_type(), value_type),
                ));
            }
        }

        let descriptions = description
            .split_whitespace()
            .map(str::to_owned)
            .collect();

        Ok(CommandOption {
            name,
            short,
            mode,
            value_type,
            default,
            descriptions,
            value: String::new(),
            assigned: false,
        })
    }

    /// Optional option of `value_type` with no short name, default or description.
    pub fn optional(name: &str, value_type: ValueType) -> Result<Self> {
        Self::new(OptionConfig::new(name, value_type))
    }

    /// Required option of `value_type` with no short name, default or description.
    pub fn required(name: &str, value_type: ValueType) -> Result<Self> {
        Self::new(OptionConfig {
            mode: Mode::Required,
            ..OptionConfig::new(name, value_type)
        })
    }

    /// Presence-only flag with an optional short name.
    pub fn flag(name: &str, short: Option<char>) -> Result<Self> {
        Self::new(OptionConfig {
            short,
            ..OptionConfig::new(name, ValueType::None)
        })
    }

    // ── Schema accessors ──────────────────────────────────────────────────────

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn short(&self) -> Option<char> {
        self.short
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    pub fn value_type(&self) -> ValueType {
        self.value_type
    }

    pub fn default_value(&self) -> Option<&Value> {
        self.default.as_ref()
    }

    /// Description words followed by `(default: v)` when a default exists.
    pub fn description(&self) -> String {
        let mut s = self.descriptions.join(" ");
        if let Some(d) = &self.default {
            if !s.is_empty() {
                s.push(' ');
            }
            let _ = write!(s, "(default: {d})");
        }
        s
    }

    /// Listing label: `-s, --long[=type]` when optional, `-s, --long=<type>`
    /// when required, with the type part omitted for presence-only flags.
    /// Without a short name the `-s, ` column is padded with four spaces.
    pub fn label(&self) -> String {
        let mut label = match self.short {
            Some(c) => format!("-{c}, "),
            None => "    ".to_owned(),
        };
        let _ = write!(label, "--{}", self.name);
        if self.value_type.carries_value() {
            match self.mode {
                Mode::Optional => {
                    let _ = write!(label, "[={}]", self.value_type);
                }
                Mode::Required => {
                    let _ = write!(label, "=<{}>", self.value_type);
                }
            }
        }
        label
    }

    // ── Per-run state ─────────────────────────────────────────────────────────

    /// Stores the raw value from `argv`.
    ///
    /// A presence-only option accepts only the empty string; on error the
    /// option is left untouched.
    pub fn assign(&mut self, raw: &str) -> Result<()> {
        if !self.value_type.carries_value() && !raw.is_empty() {
            return Err(Error::InvalidAssignment {
                name: self.name.clone(),
                value: raw.to_owned(),
            });
        }
        self.value = raw.to_owned();
        self.assigned = true;
        Ok(())
    }

    /// Returns `true` once [`assign`](Self::assign) has succeeded.
    pub fn assigned(&self) -> bool {
        self.assigned
    }

    /// Raw assigned text; empty when unassigned or assigned without value.
    pub fn raw_value(&self) -> &str {
        &self.value
    }

    /// Checks the required-option contract.
    ///
    /// A required option passes when it has a non-empty assigned value or a
    /// non-empty default. A required presence-only flag passes when it was
    /// supplied.
    pub fn validate(&self) -> Result<()> {
        if self.mode == Mode::Optional {
            return Ok(());
        }
        let satisfied = if self.value_type.carries_value() {
            !self.value.is_empty() || self.default.as_ref().is_some_and(|d| !d.is_empty())
        } else {
            self.assigned
        };
        if satisfied {
            Ok(())
        } else {
            Err(Error::MissingRequiredOption {
                name: self.name.clone(),
            })
        }
    }

    // ── Typed accessors ───────────────────────────────────────────────────────

    /// Resolves the value as `requested`: assigned text first, then the
    /// default, then the type's zero value.
    fn resolve(&self, requested: ValueType) -> Result<Value> {
        if self.value_type != requested {
            return Err(Error::TypeMismatch {
                name: self.name.clone(),
                declared: self.value_type,
                requested,
            });
        }
        if !self.value.is_empty() {
            return convert(&self.value, requested).ok_or_else(|| Error::ValueConversion {
                name: self.name.clone(),
                value: self.value.clone(),
                target: requested,
            });
        }
        if let Some(d) = &self.default {
            return Ok(d.clone());
        }
        Value::zero(requested).ok_or_else(|| Error::ValueConversion {
            name: self.name.clone(),
            value: String::new(),
            target: requested,
        })
    }

    pub fn to_bool(&self) -> Result<bool> {
        match self.resolve(ValueType::Boolean)? {
            Value::Boolean(b) => Ok(b),
            other => Err(self.mismatch(other)),
        }
    }

    pub fn to_int(&self) -> Result<i64> {
        match self.resolve(ValueType::Integer)? {
            Value::Integer(i) => Ok(i),
            other => Err(self.mismatch(other)),
        }
    }

    pub fn to_float(&self) -> Result<f64> {
        match self.resolve(ValueType::Float)? {
            Value::Float(x) => Ok(x),
            other => Err(self.mismatch(other)),
        }
    }

    pub fn to_string_value(&self) -> Result<String> {
        match self.resolve(ValueType::String)? {
            Value::String(s) => Ok(s),
            other => Err(self.mismatch(other)),
        }
    }

    // Unreachable while `new` enforces default/type agreement.
    fn mismatch(&self, got: Value) -> Error {
        Error::ValueConversion {
            name: self.name.clone(),
            value: got.to_string(),
            target: self.value_type,
        }
    }
}
