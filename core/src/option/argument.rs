//! Anonymous value arguments.

use std::sync::Arc;

use crate::commandline::CommandLine;
use crate::error::{ParseError, Result};
use crate::option::{OptionId, OptionNode};
use crate::tokens::Cursor;
use crate::validation::Validator;
use crate::value::Value;

/// An argument leaf: a run of plain value tokens.
///
/// Arguments appear inline on a [`Flag`](super::Flag)/[`Switch`](super::Switch)/
/// [`Command`](super::Command) (the values bind to that parent) or directly in
/// a [`Group`](super::Group), where they anonymously absorb tokens that no
/// option claims.
///
/// # Examples
///
/// ```
/// use argtree_core::{Argument, Flag, Group, Parser};
///
/// let grammar = Group::new("options").with_option(
///     Flag::new(Some("-f"), Some("--file"))
///         .with_argument(Argument::new("path").with_minimum(1).with_maximum(1)),
/// );
/// let line = Parser::new(&grammar).parse(["--file", "notes.txt"]).unwrap();
/// assert_eq!(line.value("--file").unwrap().unwrap().to_string(), "notes.txt");
/// ```
#[derive(Debug, Clone)]
pub struct Argument {
    pub(crate) id: OptionId,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) minimum: usize,
    pub(crate) maximum: usize,
    pub(crate) initial_separator: Option<char>,
    pub(crate) subsequent_separator: Option<char>,
    pub(crate) consume_remaining: Option<String>,
    pub(crate) validator: Option<Arc<dyn Validator>>,
    pub(crate) defaults: Vec<String>,
}

impl Argument {
    /// A new argument accepting any number of values, with `--` as the
    /// consume-remaining token.
    pub fn new(name: impl Into<String>) -> Self {
        Argument {
            id: OptionId::next(),
            name: name.into(),
            description: None,
            minimum: 0,
            maximum: usize::MAX,
            initial_separator: None,
            subsequent_separator: None,
            consume_remaining: Some("--".to_string()),
            validator: None,
            defaults: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Fewest values that must be bound for validation to pass.
    pub fn with_minimum(mut self, minimum: usize) -> Self {
        self.minimum = minimum;
        self
    }

    /// Most values that consumption will bind.
    pub fn with_maximum(mut self, maximum: usize) -> Self {
        self.maximum = maximum;
        self
    }

    /// Separator between the parent trigger and an attached first value,
    /// as in `-f=value`.
    pub fn with_initial_separator(mut self, separator: char) -> Self {
        self.initial_separator = Some(separator);
        self
    }

    /// Separator splitting one token into several values, as in `a,b,c`.
    pub fn with_subsequent_separator(mut self, separator: char) -> Self {
        self.subsequent_separator = Some(separator);
        self
    }

    /// Token after which every remaining token is consumed as a value,
    /// option-looking or not.
    pub fn with_consume_remaining(mut self, token: impl Into<String>) -> Self {
        self.consume_remaining = Some(token.into());
        self
    }

    pub fn without_consume_remaining(mut self) -> Self {
        self.consume_remaining = None;
        self
    }

    pub fn with_validator(mut self, validator: impl Validator + 'static) -> Self {
        self.validator = Some(Arc::new(validator));
        self
    }

    /// Values assumed when none are bound. Their count must satisfy the
    /// cardinality bounds.
    pub fn with_defaults<I, S>(mut self, defaults: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.defaults = defaults.into_iter().map(Into::into).collect();
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Panics on authoring mistakes. Called when the argument is attached
    /// to a parent or added to a group.
    pub(crate) fn assert_well_formed(&self) {
        assert!(
            self.minimum <= self.maximum,
            "argument {}: minimum {} exceeds maximum {}",
            self.name,
            self.minimum,
            self.maximum
        );
        if !self.defaults.is_empty() {
            assert!(
                self.defaults.len() >= self.minimum && self.defaults.len() <= self.maximum,
                "argument {}: {} default value(s) violate cardinality [{}, {}]",
                self.name,
                self.defaults.len(),
                self.minimum,
                self.maximum
            );
        }
    }

    /// Consumes value tokens for `owner` until the maximum is reached, a
    /// token looks like an option, or input runs out.
    pub(crate) fn process_values<'a>(
        &self,
        line: &mut CommandLine<'a>,
        cursor: &mut Cursor,
        owner: &'a OptionNode,
    ) -> Result<()> {
        let mut count = line.bound_value_count(owner.id());
        while count < self.maximum {
            let Some(raw) = cursor.peek().map(str::to_string) else {
                break;
            };

            if self.consume_remaining.as_deref() == Some(raw.as_str()) {
                cursor.remove_next();
                while let Some(rest) = cursor.take() {
                    line.add_value(owner, Value::Str(strip_boundary_quotes(&rest).to_string()));
                    count += 1;
                }
                break;
            }

            // checked against the raw token: a boundary-quoted value must
            // not read as an option
            if line.looks_like_option(&raw) {
                break;
            }
            let stripped = strip_boundary_quotes(&raw).to_string();

            if let Some(separator) = self.subsequent_separator {
                if stripped.contains(separator) {
                    cursor.remove_next();
                    for piece in split_limited(&stripped, separator, self.maximum - count) {
                        line.add_value(owner, Value::Str(piece));
                        count += 1;
                    }
                    continue;
                }
            }

            cursor.take();
            line.add_value(owner, Value::Str(stripped));
            count += 1;
        }
        Ok(())
    }

    /// Registers this argument's defaults against `owner`. The defaults map
    /// uses replace semantics, so repeating the pass changes nothing.
    pub(crate) fn default_values(&self, line: &mut CommandLine<'_>, owner: &OptionNode) {
        if self.defaults.is_empty() {
            return;
        }
        line.set_default_values(
            owner.id(),
            self.defaults.iter().map(|text| Value::Str(text.clone())).collect(),
        );
    }

    /// Checks cardinality against the effective (bound or defaulted) values
    /// and runs the validator over them.
    pub(crate) fn validate_for(&self, line: &mut CommandLine<'_>, owner: &OptionNode) -> Result<()> {
        let values = line.effective_values_by_id(owner.id());
        let count = values.len();
        if count < self.minimum {
            return Err(ParseError::MissingValue {
                option: owner.preferred_name().to_string(),
            });
        }
        if count > self.maximum {
            return Err(ParseError::UnexpectedValue {
                option: owner.preferred_name().to_string(),
                value: values[self.maximum].to_string(),
            });
        }
        if count > 0 {
            if let Some(validator) = &self.validator {
                validator
                    .validate(line.values_mut(owner.id()))
                    .map_err(|invalid| ParseError::InvalidValue {
                        option: owner.preferred_name().to_string(),
                        value: invalid.value,
                        detail: invalid.detail,
                    })?;
            }
        }
        Ok(())
    }
}

/// Removes one pair of boundary double quotes, if present.
fn strip_boundary_quotes(token: &str) -> &str {
    if token.len() >= 2 && token.starts_with('"') && token.ends_with('"') {
        &token[1..token.len() - 1]
    } else {
        token
    }
}

/// Splits on `separator` into at most `limit` pieces, skipping empty pieces;
/// the last piece keeps the unsplit remainder.
fn split_limited(text: &str, separator: char, limit: usize) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut rest = text;
    while pieces.len() + 1 < limit {
        let Some(index) = rest.find(separator) else {
            break;
        };
        let head = &rest[..index];
        rest = &rest[index + separator.len_utf8()..];
        if !head.is_empty() {
            pieces.push(head.to_string());
        }
    }
    if !rest.is_empty() && limit > 0 {
        pieces.push(rest.to_string());
    }
    pieces
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_boundary_quotes() {
        assert_eq!(strip_boundary_quotes("\"-x\""), "-x");
        assert_eq!(strip_boundary_quotes("plain"), "plain");
        assert_eq!(strip_boundary_quotes("\"half"), "\"half");
        assert_eq!(strip_boundary_quotes("\""), "\"");
    }

    #[test]
    fn test_split_limited_truncates_into_the_last_piece() {
        assert_eq!(split_limited("a:b:c:d", ':', 3), vec!["a", "b", "c:d"]);
        assert_eq!(split_limited("a:b", ':', 10), vec!["a", "b"]);
        assert_eq!(split_limited("a::b", ':', 10), vec!["a", "b"]);
        assert!(split_limited("", ':', 10).is_empty());
    }

    #[test]
    #[should_panic(expected = "minimum 2 exceeds maximum 1")]
    fn test_inverted_cardinality_is_an_authoring_error() {
        Argument::new("broken")
            .with_minimum(2)
            .with_maximum(1)
            .assert_well_formed();
    }

    #[test]
    #[should_panic(expected = "default value(s) violate cardinality")]
    fn test_default_count_must_fit_cardinality() {
        Argument::new("broken")
            .with_maximum(1)
            .with_defaults(["a", "b"])
            .assert_well_formed();
    }
}
