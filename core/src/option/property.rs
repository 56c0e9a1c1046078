//! Property definitions in the `-Dkey=value` style.

use crate::commandline::CommandLine;
use crate::error::{ParseError, Result};
use crate::option::OptionId;
use crate::tokens::Cursor;

/// Matches any token of the form `<trigger><key>=<value>` and records the
/// pair in the command line's property map. Without an `=` the value defaults
/// to `"true"`. A later definition of the same key wins.
///
/// # Examples
///
/// ```
/// use argtree_core::{Group, Parser, PropertyOption};
///
/// let grammar = Group::new("options").with_option(PropertyOption::new());
/// let line = Parser::new(&grammar)
///     .parse(["-Dcolor=red", "-Dverbose"])
///     .unwrap();
/// assert_eq!(line.property("color"), Some("red"));
/// assert_eq!(line.property("verbose"), Some("true"));
/// ```
#[derive(Debug, Clone)]
pub struct PropertyOption {
    pub(crate) id: OptionId,
    pub(crate) trigger: String,
    pub(crate) description: Option<String>,
}

impl PropertyOption {
    /// A property option with the conventional `-D` trigger.
    pub fn new() -> Self {
        PropertyOption::with_trigger("-D")
    }

    pub fn with_trigger(trigger: impl Into<String>) -> Self {
        let trigger = trigger.into();
        assert!(!trigger.is_empty(), "a property option needs a trigger");
        PropertyOption {
            id: OptionId::next(),
            trigger,
            description: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub(crate) fn can_process(&self, token: &str) -> bool {
        token.starts_with(&self.trigger) && token.len() > self.trigger.len()
    }

    /// Consumes the token and records the property. Properties write the
    /// key/value map only; they never join the matched-option list. A bare
    /// trigger with no key attached is rejected.
    pub(crate) fn process(&self, line: &mut CommandLine<'_>, cursor: &mut Cursor) -> Result<()> {
        let Some(token) = cursor.take() else {
            return Ok(());
        };
        if token.len() <= self.trigger.len() {
            return Err(ParseError::UnexpectedToken {
                option: self.trigger.clone(),
                token,
            });
        }
        let body = &token[self.trigger.len()..];
        let (key, value) = match body.find('=') {
            Some(index) => (&body[..index], &body[index + 1..]),
            None => (body, "true"),
        };
        line.add_property(key, value);
        Ok(())
    }
}

impl Default for PropertyOption {
    fn default() -> Self {
        PropertyOption::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bare_trigger_is_not_enough() {
        let property = PropertyOption::new();
        assert!(property.can_process("-Dkey=value"));
        assert!(property.can_process("-Dkey"));
        assert!(!property.can_process("-D"));
        assert!(!property.can_process("-X"));
    }
}
