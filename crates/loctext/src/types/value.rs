use std::fmt::{Display, Formatter, Result as FmtResult};

/// A runtime value: a builtin argument or a caller-supplied positional value.
///
/// Literal arguments in expressions become `Int`, `Float`, `Bool` or
/// `String`; nested calls produce `String`. Callers may also pass
/// [`Value::Key`], a dotted key path that is looked up in the same store when
/// the positional is used.
///
/// # Example
///
/// ```
/// use loctext::Value;
///
/// let count: Value = 3.into();
/// assert_eq!(count.as_int(), Some(3));
///
/// let flag: Value = "true".into();
/// assert_eq!(flag.as_bool(), Some(true));
///
/// let key = Value::key("core.locale.ability.strength");
/// assert!(key.as_text().is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Int(i64),
    Float(f64),
    Bool(bool),
    String(String),
    /// A dotted key path, resolved through the store.
    Key(String),
}

impl Value {
    pub fn key(path: impl Into<String>) -> Self {
        Value::Key(path.into())
    }

    /// Coerce to an integer. Strings are parsed; floats must be whole.
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(n) => Some(*n),
            Value::Float(f) if f.fract() == 0.0 => Some(*f as i64),
            Value::String(s) => s.trim().parse().ok(),
            Value::Bool(_) | Value::Float(_) | Value::Key(_) => None,
        }
    }

    /// Coerce to a boolean. Integers are true when non-zero; strings must
    /// read `true` or `false`.
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            Value::Int(n) => Some(*n != 0),
            Value::String(s) => match s.trim() {
                "true" => Some(true),
                "false" => Some(false),
                _ => None,
            },
            Value::Float(_) | Value::Key(_) => None,
        }
    }

    /// Coerce to display text. Keys have no text until resolved.
    pub fn as_text(&self) -> Option<String> {
        match self {
            Value::Key(_) => None,
            other => Some(other.to_string()),
        }
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Value::Int(n) => write!(f, "{n}"),
            Value::Float(n) => write!(f, "{n}"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::String(s) | Value::Key(s) => write!(f, "{s}"),
        }
    }
}

impl From<i32> for Value {
    fn from(n: i32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Value::Int(n)
    }
}

impl From<u32> for Value {
    fn from(n: u32) -> Self {
        Value::Int(i64::from(n))
    }
}

impl From<f64> for Value {
    fn from(n: f64) -> Self {
        Value::Float(n)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}
