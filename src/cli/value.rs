//! Value types and string → typed conversion.
//!
//! All branching on [`ValueType`] for conversion happens here; the typed
//! accessors on `CommandOption` only pick the target and delegate.

use std::fmt;

/// Declared type of an option's value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ValueType {
    #[default]
    String,
    Boolean,
    Integer,
    Float,
    /// Presence-only flag; never carries a value.
    None,
}

impl ValueType {
    /// Name used in labels and error messages. `None` has no display name in
    /// labels but still needs one for messages.
    pub fn as_str(self) -> &'static str {
        match self {
            ValueType::String => "string",
            ValueType::Boolean => "boolean",
            ValueType::Integer => "integer",
            ValueType::Float => "float",
            ValueType::None => "none",
        }
    }

    pub fn carries_value(self) -> bool {
        self != ValueType::None
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed option value, used for declared defaults and for converted results.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Boolean(bool),
    Integer(i64),
    Float(f64),
}

impl Value {
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::String(_) => ValueType::String,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Integer(_) => ValueType::Integer,
            Value::Float(_) => ValueType::Float,
        }
    }

    /// Returns `true` when the value is an empty string. Other variants are
    /// never empty.
    pub fn is_empty(&self) -> bool {
        matches!(self, Value::String(s) if s.is_empty())
    }

    /// Zero value of `value_type`, or `None` for presence-only flags.
    pub fn zero(value_type: ValueType) -> Option<Value> {
        match value_type {
            ValueType::String => Some(Value::String(String::new())),
            ValueType::Boolean => Some(Value::Boolean(false)),
            ValueType::Integer => Some(Value::Integer(0)),
            ValueType::Float => Some(Value::Float(0.0)),
            ValueType::None => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::String(s) => f.write_str(s),
            Value::Boolean(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_owned())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Boolean(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Integer(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Integer(i64::from(i))
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Value::Float(x)
    }
}

/// Parses a boolean the way most CLIs spell it:
/// `1 t T TRUE true True` and `0 f F FALSE false False`.
pub fn parse_bool(s: &str) -> Option<bool> {
    match s {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// Converts a raw string into `target`. Returns `None` when the text does not
/// parse, or when `target` is [`ValueType::None`].
pub fn convert(raw: &str, target: ValueType) -> Option<Value> {
    match target {
        ValueType::String => Some(Value::String(raw.to_owned())),
        ValueType::Boolean => parse_bool(raw).map(Value::Boolean),
        ValueType::Integer => raw.parse::<i64>().ok().map(Value::Integer),
        ValueType::Float => raw.parse::<f64>().ok().map(Value::Float),
        ValueType::None => None,
    }
}
