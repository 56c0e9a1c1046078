//! Bound argument values.
//!
//! Matchers always bind raw [`Value::Str`] tokens; validators may upgrade
//! entries in place to a typed representation during the validation pass
//! (e.g. `"8080"` → [`Value::Int`]).

use std::fmt;
use std::path::PathBuf;

use chrono::NaiveDate;

/// A value bound to an option during parsing.
///
/// # Examples
///
/// ```
/// use argtree_core::Value;
///
/// let raw = Value::Str("8080".into());
/// assert_eq!(raw.as_str(), Some("8080"));
/// assert_eq!(raw.to_string(), "8080");
///
/// let typed = Value::Int(8080);
/// assert_eq!(typed.as_str(), None);
/// assert_eq!(typed.to_string(), "8080");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Raw token text (the form every value starts in).
    Str(String),
    /// Integer, converted by a number validator.
    Int(i64),
    /// Decimal, converted by a number validator.
    Float(f64),
    /// Calendar date, converted by a date validator.
    Date(NaiveDate),
    /// Filesystem path, converted by a file validator.
    Path(PathBuf),
}

impl Value {
    /// Returns the raw text when the value has not been upgraded.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Str(text) => f.write_str(text),
            Value::Int(number) => write!(f, "{number}"),
            Value::Float(number) => write!(f, "{number}"),
            Value::Date(date) => write!(f, "{date}"),
            Value::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

impl From<String> for Value {
    fn from(text: String) -> Self {
        Value::Str(text)
    }
}

impl From<&str> for Value {
    fn from(text: &str) -> Self {
        Value::Str(text.to_string())
    }
}
