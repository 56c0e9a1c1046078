//! Unprefixed command triggers.

use crate::commandline::CommandLine;
use crate::error::{ParseError, Result};
use crate::option::parent::ParentCore;
use crate::option::{Argument, Group, OptionId, OptionNode};
use crate::tokens::Cursor;

/// An unprefixed trigger in the subcommand style: `start`, `stop`, `commit`.
///
/// Usually placed in a group with cardinality `[1, 1]` so exactly one command
/// is chosen, with its own argument and child group scoping the rest of the
/// invocation.
///
/// # Examples
///
/// ```
/// use argtree_core::{Argument, Command, Group, Parser};
///
/// let grammar = Group::new("commands").with_option(
///     Command::new("start")
///         .with_alias("go")
///         .with_argument(Argument::new("service").with_minimum(1).with_maximum(1)),
/// );
///
/// let line = Parser::new(&grammar).parse(["go", "web"]).unwrap();
/// assert!(line.has_option("start"));
/// assert_eq!(line.value("start").unwrap().unwrap().to_string(), "web");
/// ```
#[derive(Debug, Clone)]
pub struct Command {
    pub(crate) id: OptionId,
    pub(crate) preferred_name: String,
    pub(crate) triggers: Vec<String>,
    pub(crate) required: bool,
    pub(crate) description: Option<String>,
    pub(crate) core: ParentCore,
}

impl Command {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        assert!(!name.is_empty(), "a command needs a name");
        Command {
            id: OptionId::next(),
            preferred_name: name.clone(),
            triggers: vec![name],
            required: false,
            description: None,
            core: ParentCore::default(),
        }
    }

    pub fn with_alias(mut self, alias: impl Into<String>) -> Self {
        self.triggers.push(alias.into());
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
        self.core.trigger_matches(&self.triggers, token)
    }

    /// Consumes the trigger token, normalized to the command's primary name.
    pub(crate) fn process_parent<'a>(
        &self,
        owner: &'a OptionNode,
        line: &mut CommandLine<'a>,
        cursor: &mut Cursor,
    ) -> Result<()> {
        let Some(token) = cursor.peek().map(str::to_string) else {
            return Ok(());
        };
        if !self.triggers.iter().any(|trigger| trigger == &token) {
            return Err(ParseError::UnexpectedToken {
                option: self.preferred_name.clone(),
                token,
            });
        }
        line.add_option(owner);
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
