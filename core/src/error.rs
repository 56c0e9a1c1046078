//! Error types for parsing and validation.
//!
//! Every failure carries the preferred name of the option node involved so a
//! presentation layer can render usage for exactly that node; the core never
//! embeds display-string catalogs.

use thiserror::Error;

/// Errors that abort a parse.
///
/// All variants are terminal for the invocation that raised them: the parser
/// never produces a partial result.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// Leftover input no option could claim.
    #[error("unexpected token while parsing {option}: {token}")]
    UnexpectedToken { option: String, token: String },

    /// An argument was bound fewer values than its minimum.
    #[error("missing value(s) for {option}")]
    MissingValue { option: String },

    /// An argument was bound more values than its maximum, or a singular
    /// query found several values.
    #[error("too many values for {option}: {value}")]
    UnexpectedValue { option: String, value: String },

    /// A required option was absent, or a group matched fewer children than
    /// its minimum. `choices` lists the group's alternatives when relevant.
    #[error("missing required option: {option}")]
    MissingOption { option: String, choices: Vec<String> },

    /// A group matched more children than its maximum; names the surplus
    /// option.
    #[error("unexpected option for {group}: {option}")]
    TooManyOptions { group: String, option: String },

    /// A validator rejected a bound value.
    #[error("invalid value for {option}: {value} ({detail})")]
    InvalidValue {
        option: String,
        value: String,
        detail: String,
    },

    /// The same switch was set twice.
    #[error("switch {option} was already set")]
    DuplicateSwitch { option: String },

    /// A combined short-form token could not be split against any burst
    /// alias.
    #[error("cannot burst token for {option}: {token}")]
    CannotBurst { option: String, token: String },
}

impl ParseError {
    /// Preferred name of the option node this error refers to.
    pub fn option(&self) -> &str {
        match self {
            ParseError::UnexpectedToken { option, .. }
            | ParseError::MissingValue { option }
            | ParseError::UnexpectedValue { option, .. }
            | ParseError::MissingOption { option, .. }
            | ParseError::InvalidValue { option, .. }
            | ParseError::DuplicateSwitch { option }
            | ParseError::CannotBurst { option, .. } => option,
            ParseError::TooManyOptions { group, .. } => group,
        }
    }
}

/// Convenience alias for results with [`ParseError`].
pub type Result<T> = std::result::Result<T, ParseError>;
