//! The option tree model.
//!
//! A grammar is an immutable tree of [`OptionNode`]s built before parsing and
//! shareable across parses. The closed enum replaces an open class hierarchy:
//! every matcher the engine knows is a variant here, and the per-variant
//! behavior is dispatched in this module.
//!
//! - [`Flag`] — a prefixed named option (`-f` / `--file`), with combined
//!   short-form burst support.
//! - [`Switch`] — an enable/disable pair (`+display` / `-display`).
//! - [`Command`] — an unprefixed trigger (`start`), subcommand style.
//! - [`PropertyOption`] — `-Dkey=value` property definitions.
//! - [`Argument`] — an anonymous value leaf with cardinality bounds.
//! - [`Group`] — ordered children with matched-child cardinality bounds.

mod argument;
mod command;
mod flag;
mod group;
mod parent;
mod property;
mod switch;

pub use argument::Argument;
pub use command::Command;
pub use flag::Flag;
pub use group::Group;
pub use property::PropertyOption;
pub use switch::Switch;

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::commandline::CommandLine;
use crate::error::Result;
use crate::tokens::Cursor;

static NEXT_ID: AtomicU64 = AtomicU64::new(0);

/// Process-unique identity of one node in a grammar tree.
///
/// Assigned at construction time. Two nodes never share an id, even across
/// trees, so a [`CommandLine`] can key its maps by id while holding plain
/// shared references into the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OptionId(u64);

impl OptionId {
    pub(crate) fn next() -> Self {
        OptionId(NEXT_ID.fetch_add(1, Ordering::Relaxed))
    }
}

/// One node of an option grammar.
///
/// Constructed via [`From`] impls from the variant builders, usually
/// implicitly through [`Group::with_option`].
#[derive(Debug, Clone)]
pub enum OptionNode {
    Flag(Flag),
    Switch(Switch),
    Command(Command),
    Property(PropertyOption),
    Argument(Argument),
    Group(Group),
}

impl OptionNode {
    pub fn id(&self) -> OptionId {
        match self {
            OptionNode::Flag(flag) => flag.id,
            OptionNode::Switch(switch) => switch.id,
            OptionNode::Command(command) => command.id,
            OptionNode::Property(property) => property.id,
            OptionNode::Argument(argument) => argument.id,
            OptionNode::Group(group) => group.id,
        }
    }

    /// The canonical display name: the long form for flags, the enabled form
    /// for switches, the declared name otherwise.
    pub fn preferred_name(&self) -> &str {
        match self {
            OptionNode::Flag(flag) => &flag.preferred_name,
            OptionNode::Switch(switch) => &switch.preferred_name,
            OptionNode::Command(command) => &command.preferred_name,
            OptionNode::Property(property) => &property.trigger,
            OptionNode::Argument(argument) => &argument.name,
            OptionNode::Group(group) => &group.name,
        }
    }

    pub fn description(&self) -> Option<&str> {
        match self {
            OptionNode::Flag(flag) => flag.description.as_deref(),
            OptionNode::Switch(switch) => switch.description.as_deref(),
            OptionNode::Command(command) => command.description.as_deref(),
            OptionNode::Property(property) => property.description.as_deref(),
            OptionNode::Argument(argument) => argument.description.as_deref(),
            OptionNode::Group(group) => group.description.as_deref(),
        }
    }

    /// Whether validation demands this node be matched.
    pub fn is_required(&self) -> bool {
        match self {
            OptionNode::Flag(flag) => flag.required,
            OptionNode::Switch(switch) => switch.required,
            OptionNode::Command(command) => command.required,
            OptionNode::Property(_) => false,
            OptionNode::Argument(argument) => argument.minimum > 0,
            OptionNode::Group(group) => group.minimum > 0,
        }
    }

    /// All literal trigger tokens this node (or, for a group, any
    /// descendant) responds to.
    pub fn triggers(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_triggers(&mut out);
        out
    }

    pub(crate) fn collect_triggers(&self, out: &mut Vec<String>) {
        match self {
            OptionNode::Flag(flag) => out.extend(flag.triggers.iter().cloned()),
            OptionNode::Switch(switch) => {
                out.extend(switch.enabled_triggers.iter().cloned());
                out.extend(switch.disabled_triggers.iter().cloned());
            }
            OptionNode::Command(command) => out.extend(command.triggers.iter().cloned()),
            OptionNode::Property(property) => out.push(property.trigger.clone()),
            OptionNode::Argument(_) => {}
            OptionNode::Group(group) => {
                for child in &group.children {
                    child.collect_triggers(out);
                }
            }
        }
    }

    /// All option prefixes in use under this node.
    pub fn prefixes(&self) -> HashSet<String> {
        let mut out = HashSet::new();
        self.collect_prefixes(&mut out);
        out
    }

    pub(crate) fn collect_prefixes(&self, out: &mut HashSet<String>) {
        match self {
            OptionNode::Flag(flag) => {
                out.insert(flag.short_prefix.clone());
                out.insert(flag.long_prefix.clone());
                flag.core.collect_prefixes(out);
            }
            OptionNode::Switch(switch) => {
                out.insert(switch.enabled_prefix.clone());
                out.insert(switch.disabled_prefix.clone());
                switch.core.collect_prefixes(out);
            }
            OptionNode::Command(command) => command.core.collect_prefixes(out),
            OptionNode::Property(property) => {
                out.insert(property.trigger.clone());
            }
            OptionNode::Argument(_) => {}
            OptionNode::Group(group) => {
                for child in &group.children {
                    child.collect_prefixes(out);
                }
            }
        }
    }

    /// Whether `token` is an exact trigger of this node (or, for a group,
    /// of any descendant).
    pub(crate) fn matches_trigger(&self, token: &str) -> bool {
        match self {
            OptionNode::Flag(flag) => flag.triggers.iter().any(|trigger| trigger == token),
            OptionNode::Switch(switch) => {
                switch.enabled_triggers.iter().any(|trigger| trigger == token)
                    || switch.disabled_triggers.iter().any(|trigger| trigger == token)
            }
            OptionNode::Command(command) => {
                command.triggers.iter().any(|trigger| trigger == token)
            }
            OptionNode::Property(property) => property.trigger == token,
            OptionNode::Argument(_) => false,
            OptionNode::Group(group) => {
                group.children.iter().any(|child| child.matches_trigger(token))
            }
        }
    }

    /// Structural acceptance check: whether this node could start consuming
    /// at `token`. Looser than [`matches_trigger`](Self::matches_trigger) —
    /// it also admits burst forms, initial-separator forms, and property
    /// prefixes.
    pub(crate) fn can_process(&self, line: &CommandLine<'_>, token: &str) -> bool {
        match self {
            OptionNode::Flag(flag) => flag.can_process(token),
            OptionNode::Switch(switch) => switch.can_process(token),
            OptionNode::Command(command) => command.can_process(token),
            OptionNode::Property(property) => property.can_process(token),
            OptionNode::Argument(_) => true,
            OptionNode::Group(group) => group.can_process_token(line, token),
        }
    }

    /// Consumes this node's tokens from the cursor, recording matches into
    /// `line`. Only called after a positive
    /// [`can_process`](Self::can_process).
    pub(crate) fn process<'a>(
        &'a self,
        line: &mut CommandLine<'a>,
        cursor: &mut Cursor,
    ) -> Result<()> {
        match self {
            OptionNode::Flag(flag) => {
                flag.core.handle_initial_separator(cursor);
                flag.process_parent(self, line, cursor)?;
                flag.core.process_tail(self, line, cursor)
            }
            OptionNode::Switch(switch) => {
                switch.core.handle_initial_separator(cursor);
                switch.process_parent(self, line, cursor)?;
                switch.core.process_tail(self, line, cursor)
            }
            OptionNode::Command(command) => {
                command.core.handle_initial_separator(cursor);
                command.process_parent(self, line, cursor)?;
                command.core.process_tail(self, line, cursor)
            }
            OptionNode::Property(property) => property.process(line, cursor),
            OptionNode::Argument(argument) => argument.process_values(line, cursor, self),
            OptionNode::Group(group) => group.process(line, cursor),
        }
    }

    /// Records default values and switch states into `line`. Runs before
    /// any token is consumed; idempotent.
    pub(crate) fn defaults(&self, line: &mut CommandLine<'_>) {
        match self {
            OptionNode::Flag(flag) => flag.core.defaults_tail(self, line),
            OptionNode::Switch(switch) => {
                if let Some(state) = switch.default_state {
                    line.set_default_switch(switch.id, state);
                }
                switch.core.defaults_tail(self, line);
            }
            OptionNode::Command(command) => command.core.defaults_tail(self, line),
            OptionNode::Property(_) => {}
            OptionNode::Argument(argument) => argument.default_values(line, self),
            OptionNode::Group(group) => group.defaults(line),
        }
    }

    /// Post-consumption structural and value validation.
    pub(crate) fn validate(&self, line: &mut CommandLine<'_>) -> Result<()> {
        match self {
            OptionNode::Flag(flag) => {
                flag.require_matched(self, line)?;
                flag.core.validate_tail(self, line)
            }
            OptionNode::Switch(switch) => {
                switch.require_matched(self, line)?;
                switch.core.validate_tail(self, line)
            }
            OptionNode::Command(command) => {
                command.require_matched(self, line)?;
                command.core.validate_tail(self, line)
            }
            OptionNode::Property(_) => Ok(()),
            OptionNode::Argument(argument) => argument.validate_for(line, self),
            OptionNode::Group(group) => group.validate(line),
        }
    }

    /// Resolves a trigger string to the node it belongs to, searching this
    /// node and its descendants. Arguments resolve by their declared name.
    pub(crate) fn find_option<'s>(&'s self, trigger: &str) -> Option<&'s OptionNode> {
        match self {
            OptionNode::Flag(flag) => {
                if flag.triggers.iter().any(|candidate| candidate == trigger) {
                    return Some(self);
                }
                flag.core.find_option(trigger)
            }
            OptionNode::Switch(switch) => {
                if switch.enabled_triggers.iter().any(|candidate| candidate == trigger)
                    || switch.disabled_triggers.iter().any(|candidate| candidate == trigger)
                {
                    return Some(self);
                }
                switch.core.find_option(trigger)
            }
            OptionNode::Command(command) => {
                if command.triggers.iter().any(|candidate| candidate == trigger) {
                    return Some(self);
                }
                command.core.find_option(trigger)
            }
            OptionNode::Property(property) => (property.trigger == trigger).then_some(self),
            OptionNode::Argument(argument) => (argument.name == trigger).then_some(self),
            OptionNode::Group(group) => group.find_option(trigger),
        }
    }
}

impl From<Flag> for OptionNode {
    fn from(flag: Flag) -> Self {
        OptionNode::Flag(flag)
    }
}

impl From<Switch> for OptionNode {
    fn from(switch: Switch) -> Self {
        OptionNode::Switch(switch)
    }
}

impl From<Command> for OptionNode {
    fn from(command: Command) -> Self {
        OptionNode::Command(command)
    }
}

impl From<PropertyOption> for OptionNode {
    fn from(property: PropertyOption) -> Self {
        OptionNode::Property(property)
    }
}

impl From<Argument> for OptionNode {
    fn from(argument: Argument) -> Self {
        OptionNode::Argument(argument)
    }
}

impl From<Group> for OptionNode {
    fn from(group: Group) -> Self {
        OptionNode::Group(group)
    }
}
