//! The parse driver.

use tracing::debug;

use crate::commandline::CommandLine;
use crate::error::{ParseError, Result};
use crate::option::Group;
use crate::tokens::Cursor;

/// Drives one or more parses of argument vectors against a grammar.
///
/// The parser borrows the root [`Group`] and never modifies it, so one
/// grammar can back many parses.
///
/// # Examples
///
/// ```
/// use argtree_core::{Argument, Flag, Group, Parser};
///
/// let grammar = Group::new("options")
///     .with_option(Flag::new(Some("-v"), Some("--verbose")))
///     .with_option(
///         Flag::new(Some("-f"), Some("--file"))
///             .with_argument(Argument::new("path").with_minimum(1).with_maximum(1)),
///     );
///
/// let parser = Parser::new(&grammar);
/// let line = parser.parse(["-v", "--file", "notes.txt"]).unwrap();
/// assert!(line.has_option("--verbose"));
/// assert_eq!(line.value("-f").unwrap().unwrap().to_string(), "notes.txt");
/// ```
#[derive(Debug, Clone)]
pub struct Parser<'g> {
    group: &'g Group,
    help_trigger: Option<String>,
}

impl<'g> Parser<'g> {
    pub fn new(group: &'g Group) -> Self {
        Parser {
            group,
            help_trigger: None,
        }
    }

    /// Nominates a trigger (e.g. `--help`) whose presence skips the
    /// validation pass, so a bare help request on an invocation missing
    /// required options still parses.
    pub fn with_help_trigger(mut self, trigger: impl Into<String>) -> Self {
        self.help_trigger = Some(trigger.into());
        self
    }

    /// Parses an argument vector against the grammar.
    ///
    /// Runs the defaults pass, consumes tokens until the grammar stops
    /// accepting, rejects any leftover token, and validates the outcome
    /// (unless the help trigger was matched). The consumption loop carries a
    /// no-progress guard so a pathological grammar terminates instead of
    /// spinning.
    pub fn parse<I, S>(&self, arguments: I) -> Result<CommandLine<'g>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut cursor = Cursor::new(arguments);
        let mut line = CommandLine::new(self.group);

        self.group.defaults(&mut line);

        let mut previous = None;
        while cursor
            .peek()
            .is_some_and(|token| self.group.can_process_token(&line, token))
        {
            let here = cursor.mark();
            if previous == Some(here) {
                debug!(group = %self.group.name(), "no progress, stopping consumption");
                break;
            }
            previous = Some(here);
            self.group.process(&mut line, &mut cursor)?;
        }

        if let Some(token) = cursor.peek() {
            debug!(%token, "leftover token");
            return Err(ParseError::UnexpectedToken {
                option: self.group.name().to_string(),
                token: token.to_string(),
            });
        }

        if self.help_requested(&line) {
            debug!("help requested, skipping validation");
        } else {
            self.group.validate(&mut line)?;
        }
        Ok(line)
    }

    /// Whether the nominated help trigger was matched in `line`.
    pub fn help_requested(&self, line: &CommandLine<'_>) -> bool {
        self.help_trigger
            .as_deref()
            .is_some_and(|trigger| line.has_option(trigger))
    }

    /// Convenience wrapper: hands a failure to `report` and collapses both
    /// failure and a matched help trigger to `None`, leaving the caller a
    /// single "proceed or not" branch.
    pub fn parse_or_report<I, S, F>(&self, arguments: I, report: F) -> Option<CommandLine<'g>>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
        F: FnOnce(&ParseError),
    {
        match self.parse(arguments) {
            Ok(line) => {
                if self.help_requested(&line) {
                    return None;
                }
                Some(line)
            }
            Err(error) => {
                report(&error);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::Flag;

    fn grammar() -> Group {
        Group::new("options")
            .with_option(Flag::new(Some("-h"), Some("--help")))
            .with_option(Flag::new(Some("-v"), Some("--verbose")).required())
    }

    #[test]
    fn test_leftover_token_is_rejected() {
        let root = grammar();
        let error = Parser::new(&root).parse(["-v", "bogus"]).unwrap_err();
        assert_eq!(
            error,
            ParseError::UnexpectedToken {
                option: "options".to_string(),
                token: "bogus".to_string(),
            }
        );
    }

    #[test]
    fn test_help_trigger_skips_validation() {
        let root = grammar();
        let parser = Parser::new(&root).with_help_trigger("--help");

        // missing required -v would normally fail validation
        let line = parser.parse(["-h"]).unwrap();
        assert!(parser.help_requested(&line));

        assert!(Parser::new(&root).parse(["-h"]).is_err());
    }

    #[test]
    fn test_parse_or_report_hands_over_the_error() {
        let root = grammar();
        let mut reported = None;
        let outcome = Parser::new(&root).parse_or_report(["--bogus"], |error| {
            reported = Some(error.clone());
        });
        assert!(outcome.is_none());
        assert!(matches!(
            reported,
            Some(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_parse_or_report_collapses_help_to_none() {
        let root = grammar();
        let parser = Parser::new(&root).with_help_trigger("-h");
        let outcome = parser.parse_or_report(["-h"], |_| panic!("no error expected"));
        assert!(outcome.is_none());
    }
}
