//! URL well-formedness validation.

use std::sync::LazyLock;

use regex::Regex;

use crate::validation::{InvalidValue, Validator};
use crate::value::Value;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?P<scheme>[A-Za-z][A-Za-z0-9+.-]*)://\S+$").expect("url pattern compiles")
});

/// Validates that each value looks like a URL, optionally pinned to one
/// scheme. Values stay as [`Value::Str`].
///
/// # Examples
///
/// ```
/// use argtree_core::validation::{UrlValidator, Validator};
/// use argtree_core::Value;
///
/// let validator = UrlValidator::new().with_scheme("https");
/// let mut values = vec![Value::from("https://example.org/x")];
/// validator.validate(&mut values).unwrap();
///
/// let mut values = vec![Value::from("ftp://example.org/x")];
/// assert!(validator.validate(&mut values).is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct UrlValidator {
    scheme: Option<String>,
}

impl UrlValidator {
    pub fn new() -> Self {
        UrlValidator::default()
    }

    /// Requires this exact scheme (case-insensitive).
    pub fn with_scheme(mut self, scheme: impl Into<String>) -> Self {
        self.scheme = Some(scheme.into());
        self
    }
}

impl Validator for UrlValidator {
    fn validate(&self, values: &mut Vec<Value>) -> Result<(), InvalidValue> {
        for value in values.iter() {
            let Some(text) = value.as_str() else {
                continue;
            };
            let Some(captures) = URL_PATTERN.captures(text) else {
                return Err(InvalidValue::new(text, "not a well-formed URL"));
            };
            if let Some(expected) = &self.scheme {
                let scheme = &captures["scheme"];
                if !scheme.eq_ignore_ascii_case(expected) {
                    return Err(InvalidValue::new(
                        text,
                        format!("URL scheme must be {expected}"),
                    ));
                }
            }
        }
        Ok(())
    }
}
