//! Prefixed named options.

use crate::commandline::CommandLine;
use crate::error::{ParseError, Result};
use crate::option::parent::ParentCore;
use crate::option::{Argument, Group, OptionId, OptionNode};
use crate::tokens::Cursor;

/// A named option with a short form, a long form, or both.
///
/// The long form is the preferred name when present. Short forms participate
/// in burst matching: `-hv` expands to `-h` followed by `-v`, and when the
/// flag carries an argument, `-fvalue` binds `value` directly.
///
/// # Examples
///
/// ```
/// use argtree_core::{Flag, Group, Parser};
///
/// let grammar = Group::new("options")
///     .with_option(Flag::new(Some("-h"), Some("--help")))
///     .with_option(Flag::new(Some("-v"), Some("--verbose")));
///
/// let line = Parser::new(&grammar).parse(["-hv"]).unwrap();
/// assert!(line.has_option("--help"));
/// assert!(line.has_option("-v"));
/// ```
#[derive(Debug, Clone)]
pub struct Flag {
    pub(crate) id: OptionId,
    pub(crate) preferred_name: String,
    pub(crate) triggers: Vec<String>,
    pub(crate) burst_aliases: Vec<String>,
    pub(crate) short_prefix: String,
    pub(crate) long_prefix: String,
    pub(crate) burst_enabled: bool,
    pub(crate) required: bool,
    pub(crate) description: Option<String>,
    pub(crate) core: ParentCore,
}

impl Flag {
    /// A flag with the conventional `-` / `--` prefixes. At least one of
    /// `short` and `long` must be given, prefix included (`Some("-v")`,
    /// `Some("--verbose")`).
    pub fn new(short: Option<&str>, long: Option<&str>) -> Self {
        Flag::with_prefixes("-", "--", short, long)
    }

    /// A flag with custom prefixes, e.g. `/` and `//`.
    pub fn with_prefixes(
        short_prefix: &str,
        long_prefix: &str,
        short: Option<&str>,
        long: Option<&str>,
    ) -> Self {
        assert!(!short_prefix.is_empty(), "short prefix must not be empty");
        assert!(!long_prefix.is_empty(), "long prefix must not be empty");

        let preferred_name = match (long, short) {
            (Some(long), _) => long.to_string(),
            (None, Some(short)) => short.to_string(),
            (None, None) => panic!("a flag needs a short or a long name"),
        };

        let mut triggers = Vec::new();
        let mut burst_aliases = Vec::new();
        if let Some(short) = short {
            assert!(
                short.starts_with(short_prefix) && short.len() > short_prefix.len(),
                "short name {short} must start with the prefix {short_prefix}"
            );
            triggers.push(short.to_string());
            burst_aliases.push(short.to_string());
        }
        if let Some(long) = long {
            assert!(
                long.starts_with(long_prefix) && long.len() > long_prefix.len(),
                "long name {long} must start with the prefix {long_prefix}"
            );
            triggers.push(long.to_string());
        }

        Flag {
            id: OptionId::next(),
            preferred_name,
            triggers,
            burst_aliases,
            short_prefix: short_prefix.to_string(),
            long_prefix: long_prefix.to_string(),
            burst_enabled: true,
            required: false,
            description: None,
            core: ParentCore::default(),
        }
    }

    /// Adds an extra trigger. Short-prefixed aliases also join the burst
    /// alias set.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        if !alias.starts_with(&self.long_prefix) && alias.starts_with(&self.short_prefix) {
            self.burst_aliases.push(alias.clone());
        }
        self.triggers.push(alias);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Attaches an inline argument; its values bind to this flag.
    pub fn with_argument(mut self, argument: Argument) -> Self {
        argument.assert_well_formed();
        self.core.argument = Some(argument);
        self
    }

    /// Attaches a child group processed after this flag's own argument.
    pub fn with_children(mut self, children: Group) -> Self {
        self.core.children = Some(children);
        self
    }

    /// Disables combined short-form matching for this flag.
    pub fn without_burst(mut self) -> Self {
        self.burst_enabled = false;
        self
    }

    fn burst_length(&self) -> usize {
        self.short_prefix.len() + 1
    }

    fn burst_head<'t>(&self, token: &'t str) -> Option<(&'t str, &'t str)> {
        let length = self.burst_length();
        if !self.burst_enabled || token.len() < length || !token.is_char_boundary(length) {
            return None;
        }
        let (head, rest) = token.split_at(length);
        self.burst_aliases
            .iter()
            .any(|alias| alias == head)
            .then_some((head, rest))
    }

    pub(crate) fn can_process(&self, token: &str) -> bool {
        self.core.trigger_matches(&self.triggers, token) || self.burst_head(token).is_some()
    }

    /// Consumes the trigger token. An exact trigger is normalized to the
    /// preferred name; a burst head is split off, with the remainder pushed
    /// back as the next token (re-prefixed unless an argument will consume
    /// it).
    pub(crate) fn process_parent<'a>(
        &self,
        owner: &'a OptionNode,
        line: &mut CommandLine<'a>,
        cursor: &mut Cursor,
    ) -> Result<()> {
        let Some(token) = cursor.peek().map(str::to_string) else {
            return Ok(());
        };
        if self.triggers.iter().any(|trigger| trigger == &token) {
            line.add_option(owner);
            cursor.replace_next(self.preferred_name.clone());
            cursor.take();
            return Ok(());
        }
        if let Some((_, rest)) = self.burst_head(&token) {
            let rest = rest.to_string();
            line.add_option(owner);
            cursor.take();
            if self.core.argument.is_none() {
                cursor.insert_next(format!("{}{rest}", self.short_prefix));
            } else {
                cursor.insert_next(rest);
            }
            return Ok(());
        }
        Err(ParseError::CannotBurst {
            option: self.preferred_name.clone(),
            token,
        })
    }

    pub(crate) fn require_matched(&self, owner: &OptionNode, line: &CommandLine<'_>) -> Result<()> {
        if self.required && !line.has_node(owner) {
            return Err(ParseError::MissingOption {
                option: self.preferred_name.clone(),
                choices: Vec::new(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_burst_head_needs_an_alias_match() {
        let flag = Flag::new(Some("-h"), Some("--help"));
        assert_eq!(flag.burst_head("-hv"), Some(("-h", "v")));
        assert_eq!(flag.burst_head("-xv"), None);
        assert_eq!(flag.burst_head("-h"), Some(("-h", "")));
        assert_eq!(flag.burst_head("x"), None);
    }

    #[test]
    fn test_without_burst_disables_splitting() {
        let flag = Flag::new(Some("-h"), None).without_burst();
        assert!(flag.can_process("-h"));
        assert!(!flag.can_process("-hv"));
    }

    #[test]
    fn test_short_aliases_join_the_burst_set() {
        let flag = Flag::new(Some("-v"), Some("--verbose")).with_alias("-V");
        assert!(flag.can_process("-Vx"));
        assert!(flag.can_process("--verbose"));
    }

    #[test]
    #[should_panic(expected = "needs a short or a long name")]
    fn test_nameless_flag_is_an_authoring_error() {
        Flag::new(None, None);
    }

    #[test]
    #[should_panic(expected = "must start with the prefix")]
    fn test_unprefixed_name_is_an_authoring_error() {
        Flag::new(Some("v"), None);
    }
}
