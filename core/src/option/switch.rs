//! Enable/disable switches.

use crate::commandline::CommandLine;
use crate::error::{ParseError, Result};
use crate::option::parent::ParentCore;
use crate::option::{Argument, Group, OptionId, OptionNode};
use crate::tokens::Cursor;

/// A boolean option set by a prefix pair: `+display` enables, `-display`
/// disables. Setting the same switch twice in one invocation is an error.
///
/// # Examples
///
/// ```
/// use argtree_core::{Group, Parser, Switch};
///
/// let grammar = Group::new("options")
///     .with_option(Switch::new("display").with_default(false));
///
/// let line = Parser::new(&grammar).parse(["+display"]).unwrap();
/// assert_eq!(line.switch("+display"), Some(true));
///
/// let line = Parser::new(&grammar).parse(Vec::<String>::new()).unwrap();
/// assert_eq!(line.switch("+display"), Some(false));
/// ```
#[derive(Debug, Clone)]
pub struct Switch {
    pub(crate) id: OptionId,
    pub(crate) preferred_name: String,
    pub(crate) enabled_prefix: String,
    pub(crate) disabled_prefix: String,
    pub(crate) enabled_triggers: Vec<String>,
    pub(crate) disabled_triggers: Vec<String>,
    pub(crate) required: bool,
    pub(crate) default_state: Option<bool>,
    pub(crate) description: Option<String>,
    pub(crate) core: ParentCore,
}

impl Switch {
    /// A switch with the conventional `+` / `-` prefix pair. `name` is given
    /// bare, without a prefix.
    pub fn new(name: impl Into<String>) -> Self {
        Switch::with_prefixes("+", "-", name)
    }

    /// A switch with a custom prefix pair. Neither prefix may start with the
    /// other, or the two trigger forms would be ambiguous.
    pub fn with_prefixes(
        enabled_prefix: &str,
        disabled_prefix: &str,
        name: impl Into<String>,
    ) -> Self {
        assert!(!enabled_prefix.is_empty(), "enabled prefix must not be empty");
        assert!(!disabled_prefix.is_empty(), "disabled prefix must not be empty");
        assert!(
            !enabled_prefix.starts_with(disabled_prefix)
                && !disabled_prefix.starts_with(enabled_prefix),
            "switch prefixes {enabled_prefix} and {disabled_prefix} are ambiguous"
        );

        let name = name.into();
        assert!(!name.is_empty(), "a switch needs a name");
        Switch {
            id: OptionId::next(),
            preferred_name: format!("{enabled_prefix}{name}"),
            enabled_triggers: vec![format!("{enabled_prefix}{name}")],
            disabled_triggers: vec![format!("{disabled_prefix}{name}")],
            enabled_prefix: enabled_prefix.to_string(),
            disabled_prefix: disabled_prefix.to_string(),
            required: false,
            default_state: None,
            description: None,
            core: ParentCore::default(),
        }
    }

    /// Adds a bare alias name, matchable under both prefixes.
    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        let alias = alias.into();
        self.enabled_triggers.push(format!("{}{alias}", self.enabled_prefix));
        self.disabled_triggers.push(format!("{}{alias}", self.disabled_prefix));
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

    /// State assumed when the switch is never set.
    pub fn with_default(mut self, state: bool) -> Self {
        self.default_state = Some(state);
        self
    }

    pub fn with_argument(mut self, argument: Argument) -> Self {
        argument.assert_well_formed();
        self.core.argument = Some(argument);
        self
    }

    pub fn with_children(mut self, children: Group) -> Self {
        self.core.children = Some(children);
        self
    }

    pub(crate) fn can_process(&self, token: &str) -> bool {
        self.core.trigger_matches(&self.enabled_triggers, token)
            || self.core.trigger_matches(&self.disabled_triggers, token)
    }

    /// Consumes the trigger token and records the switch state. The token is
    /// normalized to the preferred (enabled) form.
    pub(crate) fn process_parent<'a>(
        &self,
        owner: &'a OptionNode,
        line: &mut CommandLine<'a>,
        cursor: &mut Cursor,
    ) -> Result<()> {
        let Some(token) = cursor.peek().map(str::to_string) else {
            return Ok(());
        };
        let state = if self.enabled_triggers.iter().any(|trigger| trigger == &token) {
            true
        } else if self.disabled_triggers.iter().any(|trigger| trigger == &token) {
            false
        } else {
            return Err(ParseError::UnexpectedToken {
                option: self.preferred_name.clone(),
                token,
            });
        };
        line.add_switch(owner, state)?;
        cursor.replace_next(self.preferred_name.clone());
        cursor.take();
        Ok(())
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
    fn test_both_trigger_forms_are_recognized() {
        let switch = Switch::new("display");
        assert!(switch.can_process("+display"));
        assert!(switch.can_process("-display"));
        assert!(!switch.can_process("display"));
        assert_eq!(switch.preferred_name, "+display");
    }

    #[test]
    fn test_aliases_get_both_prefixes() {
        let switch = Switch::new("display").with_alias("d");
        assert!(switch.can_process("+d"));
        assert!(switch.can_process("-d"));
    }

    #[test]
    #[should_panic(expected = "ambiguous")]
    fn test_nested_prefixes_are_an_authoring_error() {
        Switch::with_prefixes("--", "-", "display");
    }
}
