//! Pluggable value validation and conversion.
//!
//! A [`Validator`] runs during the validation pass, after all tokens have
//! been consumed. It receives the full ordered value list bound to one
//! argument and may replace [`Value::Str`] entries in place with a typed
//! representation. A rejection aborts the whole parse as an
//! invalid-argument-value failure carrying the offending literal.
//!
//! Shipped validators:
//!
//! - [`NumberValidator`] — integer/decimal parsing with optional bounds.
//! - [`DateValidator`] — format-string date parsing with optional bounds.
//! - [`FileValidator`] — filesystem existence and kind checks.
//! - [`EnumValidator`] — membership in a fixed set of literals.
//! - [`UrlValidator`] — URL well-formedness, optionally pinned to a scheme.

mod date;
mod enumeration;
mod file;
mod number;
mod url;

pub use date::DateValidator;
pub use enumeration::EnumValidator;
pub use file::FileValidator;
pub use number::NumberValidator;
pub use url::UrlValidator;

use std::fmt;

use thiserror::Error;

use crate::value::Value;

/// A rejected value, with the literal that failed and why.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{detail}: {value}")]
pub struct InvalidValue {
    /// The rejected literal.
    pub value: String,
    /// Short reason, suitable for embedding in a diagnostic.
    pub detail: String,
}

impl InvalidValue {
    pub fn new(value: impl Into<String>, detail: impl Into<String>) -> Self {
        InvalidValue {
            value: value.into(),
            detail: detail.into(),
        }
    }
}

/// Checks and optionally converts the values bound to one argument.
///
/// Implementations must leave already-converted (non-`Str`) entries alone so
/// that running a validator twice is harmless.
pub trait Validator: fmt::Debug + Send + Sync {
    fn validate(&self, values: &mut Vec<Value>) -> Result<(), InvalidValue>;
}
