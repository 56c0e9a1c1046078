//! Option groups.

use tracing::debug;

use crate::commandline::CommandLine;
use crate::error::{ParseError, Result};
use crate::option::{OptionId, OptionNode};
use crate::tokens::Cursor;

/// An ordered collection of child nodes with matched-child cardinality
/// bounds.
///
/// A group is both the root of a grammar and a composition node: nested
/// groups express mutually exclusive or clustered alternatives. `Argument`
/// children are anonymous and absorb tokens that no option claims, in
/// declaration order.
///
/// # Examples
///
/// ```
/// use argtree_core::{Flag, Group, Parser};
///
/// // exactly one of --start / --stop
/// let action = Group::new("action")
///     .with_minimum(1)
///     .with_maximum(1)
///     .with_option(Flag::new(None, Some("--start")))
///     .with_option(Flag::new(None, Some("--stop")));
/// let grammar = Group::new("options").with_option(action);
///
/// let line = Parser::new(&grammar).parse(["--start"]).unwrap();
/// assert!(line.has_option("--start"));
/// assert!(Parser::new(&grammar).parse(["--start", "--stop"]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct Group {
    pub(crate) id: OptionId,
    pub(crate) name: String,
    pub(crate) description: Option<String>,
    pub(crate) minimum: usize,
    pub(crate) maximum: usize,
    pub(crate) children: Vec<OptionNode>,
    named: Vec<usize>,
    anonymous: Vec<usize>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Group {
            id: OptionId::next(),
            name: name.into(),
            description: None,
            minimum: 0,
            maximum: usize::MAX,
            children: Vec::new(),
            named: Vec::new(),
            anonymous: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Fewest named children that must match for validation to pass.
    pub fn with_minimum(mut self, minimum: usize) -> Self {
        self.minimum = minimum;
        self
    }

    /// Most named children that may match.
    pub fn with_maximum(mut self, maximum: usize) -> Self {
        self.maximum = maximum;
        self
    }

    /// Adds a child node. `Argument` children become anonymous absorbers;
    /// everything else is a named child counted against the cardinality
    /// bounds.
    pub fn with_option(mut self, option: impl Into<OptionNode>) -> Self {
        let node = option.into();
        let index = self.children.len();
        match &node {
            OptionNode::Argument(argument) => {
                argument.assert_well_formed();
                self.anonymous.push(index);
            }
            _ => self.named.push(index),
        }
        self.children.push(node);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn children(&self) -> &[OptionNode] {
        &self.children
    }

    /// Preferred names of the named children, for diagnostics.
    pub fn alternatives(&self) -> Vec<String> {
        self.named
            .iter()
            .map(|&index| self.children[index].preferred_name().to_string())
            .collect()
    }

    /// Whether this group would accept `token` next: an exact child trigger,
    /// a structural match on a named child, or any token at all when the
    /// group has anonymous arguments and the token does not look like an
    /// option.
    pub(crate) fn can_process_token(&self, line: &CommandLine<'_>, token: &str) -> bool {
        if self.children.iter().any(|child| child.matches_trigger(token)) {
            return true;
        }
        if self
            .named
            .iter()
            .any(|&index| self.children[index].can_process(line, token))
        {
            return true;
        }
        if self.anonymous_claims(token) {
            return true;
        }
        if line.looks_like_option(token) {
            return false;
        }
        !self.anonymous.is_empty()
    }

    /// Whether an anonymous argument treats `token` as its consume-remaining
    /// marker, which must get through the option-looking rejection.
    fn anonymous_claims(&self, token: &str) -> bool {
        self.anonymous.iter().any(|&index| match &self.children[index] {
            OptionNode::Argument(argument) => {
                argument.consume_remaining.as_deref() == Some(token)
            }
            _ => false,
        })
    }

    /// Consumption loop: exact trigger dispatch first, then declaration-order
    /// structural dispatch for option-looking tokens, then the anonymous
    /// arguments. Stops on the first token nothing claims, or when an
    /// iteration makes no progress.
    pub(crate) fn process<'a>(
        &'a self,
        line: &mut CommandLine<'a>,
        cursor: &mut Cursor,
    ) -> Result<()> {
        let mut previous = None;
        while cursor.has_next() {
            let here = cursor.mark();
            if previous == Some(here) {
                break;
            }
            previous = Some(here);

            let Some(token) = cursor.peek().map(str::to_string) else {
                break;
            };
            debug!(group = %self.name, %token, "group dispatch");

            if let Some(child) = self
                .children
                .iter()
                .find(|child| child.matches_trigger(&token))
            {
                child.process(line, cursor)?;
            } else if line.looks_like_option(&token) && !self.anonymous_claims(&token) {
                let Some(child) = self
                    .named
                    .iter()
                    .map(|&index| &self.children[index])
                    .find(|child| child.can_process(line, &token))
                else {
                    break;
                };
                child.process(line, cursor)?;
            } else if self.anonymous.is_empty() {
                break;
            } else {
                for &index in &self.anonymous {
                    if !cursor.has_next() {
                        break;
                    }
                    let child = &self.children[index];
                    child.process(line, cursor)?;
                }
            }
        }
        Ok(())
    }

    /// Counts matched named children against the cardinality bounds, then
    /// validates children. A named child is validated when it matched, is
    /// required, or is itself a group; anonymous arguments are always
    /// validated.
    pub(crate) fn validate(&self, line: &mut CommandLine<'_>) -> Result<()> {
        let mut present = 0usize;
        for &index in &self.named {
            let child = &self.children[index];
            let matched = line.has_node(child);
            if matched {
                present += 1;
                if present > self.maximum {
                    return Err(ParseError::TooManyOptions {
                        group: self.name.clone(),
                        option: child.preferred_name().to_string(),
                    });
                }
            }
            if matched || child.is_required() || matches!(child, OptionNode::Group(_)) {
                child.validate(line)?;
            }
        }
        if present < self.minimum {
            return Err(ParseError::MissingOption {
                option: self.name.clone(),
                choices: self.alternatives(),
            });
        }
        for &index in &self.anonymous {
            self.children[index].validate(line)?;
        }
        Ok(())
    }

    pub(crate) fn defaults(&self, line: &mut CommandLine<'_>) {
        for child in &self.children {
            child.defaults(line);
        }
    }

    pub(crate) fn find_option<'s>(&'s self, trigger: &str) -> Option<&'s OptionNode> {
        self.children.iter().find_map(|child| child.find_option(trigger))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{Argument, Flag};

    #[test]
    fn test_children_are_partitioned() {
        let group = Group::new("options")
            .with_option(Flag::new(Some("-v"), None))
            .with_option(Argument::new("target"))
            .with_option(Flag::new(Some("-q"), None));
        assert_eq!(group.named, vec![0, 2]);
        assert_eq!(group.anonymous, vec![1]);
        assert_eq!(group.alternatives(), vec!["-v", "-q"]);
    }

    #[test]
    fn test_acceptance_without_anonymous_children() {
        let group = Group::new("options").with_option(Flag::new(Some("-v"), None));
        let root = Group::new("root");
        let line = CommandLine::new(&root);
        // only prefixes of the queried tree matter here
        assert!(group.can_process_token(&line, "-v"));
        assert!(!group.can_process_token(&line, "plain"));
    }
}
