//! Shared machinery for nodes that own an argument and a child group.
//!
//! [`Flag`](super::Flag), [`Switch`](super::Switch) and
//! [`Command`](super::Command) all accept an optional inline argument and an
//! optional child group. The trigger handling differs per variant; everything
//! after the trigger is identical and lives here.

use std::collections::HashSet;

use crate::commandline::CommandLine;
use crate::error::Result;
use crate::option::{Argument, Group, OptionNode};
use crate::tokens::Cursor;

#[derive(Debug, Clone, Default)]
pub(crate) struct ParentCore {
    pub(crate) argument: Option<Argument>,
    pub(crate) children: Option<Group>,
}

impl ParentCore {
    /// Whether `token` is one of `triggers`, allowing for an attached value
    /// when the argument declares an initial separator (`-f=value` matches a
    /// `-f` trigger).
    pub(crate) fn trigger_matches(&self, triggers: &[String], token: &str) -> bool {
        if let Some(separator) = self.initial_separator() {
            if let Some(index) = token.find(separator) {
                if index > 0 {
                    return triggers.iter().any(|trigger| trigger == &token[..index]);
                }
            }
        }
        triggers.iter().any(|trigger| trigger == token)
    }

    /// Splits the next token at the argument's initial separator, leaving the
    /// trigger head in place and inserting the value right after it. A value
    /// that starts with `-` is boundary-quoted so it does not read as an
    /// option; the quotes come off again when the value is consumed.
    pub(crate) fn handle_initial_separator(&self, cursor: &mut Cursor) {
        let Some(separator) = self.initial_separator() else {
            return;
        };
        let Some(token) = cursor.peek() else {
            return;
        };
        let Some(index) = token.find(separator) else {
            return;
        };
        if index == 0 {
            return;
        }
        let head = token[..index].to_string();
        let value = &token[index + separator.len_utf8()..];
        let value = if value.starts_with('-') {
            format!("\"{value}\"")
        } else {
            value.to_string()
        };
        cursor.replace_next(head);
        cursor.insert_after_next(value);
    }

    /// Consumes the node's own argument values, then lets the child group
    /// take over for as long as it accepts the next token.
    pub(crate) fn process_tail<'a>(
        &'a self,
        owner: &'a OptionNode,
        line: &mut CommandLine<'a>,
        cursor: &mut Cursor,
    ) -> Result<()> {
        if !line.has_node(owner) {
            return Ok(());
        }
        if let Some(argument) = &self.argument {
            argument.process_values(line, cursor, owner)?;
        }
        if let Some(children) = &self.children {
            while cursor
                .peek()
                .is_some_and(|token| children.can_process_token(line, token))
            {
                let mark = cursor.mark();
                children.process(line, cursor)?;
                if cursor.mark() == mark {
                    break;
                }
            }
        }
        Ok(())
    }

    /// Validates the argument and child group, but only when the owner was
    /// actually matched.
    pub(crate) fn validate_tail(
        &self,
        owner: &OptionNode,
        line: &mut CommandLine<'_>,
    ) -> Result<()> {
        if !line.has_node(owner) {
            return Ok(());
        }
        if let Some(argument) = &self.argument {
            argument.validate_for(line, owner)?;
        }
        if let Some(children) = &self.children {
            children.validate(line)?;
        }
        Ok(())
    }

    /// Registers argument defaults against the owner and recurses into the
    /// child group.
    pub(crate) fn defaults_tail(&self, owner: &OptionNode, line: &mut CommandLine<'_>) {
        if let Some(argument) = &self.argument {
            argument.default_values(line, owner);
        }
        if let Some(children) = &self.children {
            children.defaults(line);
        }
    }

    pub(crate) fn find_option<'s>(&'s self, trigger: &str) -> Option<&'s OptionNode> {
        self.children.as_ref().and_then(|children| children.find_option(trigger))
    }

    pub(crate) fn collect_prefixes(&self, out: &mut HashSet<String>) {
        if let Some(children) = &self.children {
            for child in &children.children {
                child.collect_prefixes(out);
            }
        }
    }

    fn initial_separator(&self) -> Option<char> {
        self.argument.as_ref().and_then(|argument| argument.initial_separator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn core_with_separator() -> ParentCore {
        ParentCore {
            argument: Some(Argument::new("value").with_initial_separator('=')),
            children: None,
        }
    }

    #[test]
    fn test_initial_separator_splits_the_head_token() {
        let core = core_with_separator();
        let mut cursor = Cursor::new(["-f=out.txt", "rest"]);
        core.handle_initial_separator(&mut cursor);
        assert_eq!(cursor.take(), Some("-f".to_string()));
        assert_eq!(cursor.take(), Some("out.txt".to_string()));
        assert_eq!(cursor.take(), Some("rest".to_string()));
    }

    #[test]
    fn test_option_looking_values_get_boundary_quoted() {
        let core = core_with_separator();
        let mut cursor = Cursor::new(["-f=-x"]);
        core.handle_initial_separator(&mut cursor);
        assert_eq!(cursor.take(), Some("-f".to_string()));
        assert_eq!(cursor.take(), Some("\"-x\"".to_string()));
    }

    #[test]
    fn test_tokens_without_the_separator_are_left_alone() {
        let core = core_with_separator();
        let mut cursor = Cursor::new(["-f"]);
        core.handle_initial_separator(&mut cursor);
        assert_eq!(cursor.peek(), Some("-f"));
    }

    #[test]
    fn test_trigger_match_allows_attached_values() {
        let core = core_with_separator();
        let triggers = vec!["-f".to_string(), "--file".to_string()];
        assert!(core.trigger_matches(&triggers, "-f"));
        assert!(core.trigger_matches(&triggers, "-f=x"));
        assert!(core.trigger_matches(&triggers, "--file=x"));
        assert!(!core.trigger_matches(&triggers, "-g=x"));
        assert!(!core.trigger_matches(&triggers, "=x"));
    }
}
