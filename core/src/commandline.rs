//! The result of one parse.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::error::{ParseError, Result};
use crate::option::{Group, OptionId, OptionNode};
use crate::summary::ParseSummary;
use crate::value::Value;

/// Accumulates matches, values, switch states and properties during one
/// parse, then serves as the read-only query surface over the outcome.
///
/// Borrows the grammar tree; the tree itself is never modified and can back
/// any number of concurrent parses. Queries take any trigger string of the
/// node in question (`line.values("-f")` and `line.values("--file")` read the
/// same binding), resolved through the tree.
///
/// Defaults live in maps of their own: a read falls back to a default only
/// when no real value or state was bound, and re-running the defaults pass
/// replaces rather than accumulates.
#[derive(Debug, Clone)]
pub struct CommandLine<'a> {
    root: &'a Group,
    prefixes: HashSet<String>,
    matched: Vec<&'a OptionNode>,
    values: HashMap<OptionId, Vec<Value>>,
    default_values: HashMap<OptionId, Vec<Value>>,
    switches: HashMap<OptionId, bool>,
    default_switches: HashMap<OptionId, bool>,
    properties: BTreeMap<String, String>,
}

impl<'a> CommandLine<'a> {
    pub(crate) fn new(root: &'a Group) -> Self {
        let mut prefixes = HashSet::new();
        for child in root.children() {
            child.collect_prefixes(&mut prefixes);
        }
        CommandLine {
            root,
            prefixes,
            matched: Vec::new(),
            values: HashMap::new(),
            default_values: HashMap::new(),
            switches: HashMap::new(),
            default_switches: HashMap::new(),
            properties: BTreeMap::new(),
        }
    }

    /// Whether `token` starts with any option prefix of the grammar.
    pub fn looks_like_option(&self, token: &str) -> bool {
        self.prefixes.iter().any(|prefix| token.starts_with(prefix.as_str()))
    }

    pub(crate) fn add_option(&mut self, node: &'a OptionNode) {
        self.matched.push(node);
    }

    pub(crate) fn add_value(&mut self, node: &'a OptionNode, value: Value) {
        if !self.has_node(node) {
            self.matched.push(node);
        }
        self.values.entry(node.id()).or_default().push(value);
    }

    /// Records a switch state, registering the match. Set-once: a second
    /// state for the same node is an error.
    pub(crate) fn add_switch(&mut self, node: &'a OptionNode, state: bool) -> Result<()> {
        if self.switches.contains_key(&node.id()) {
            return Err(ParseError::DuplicateSwitch {
                option: node.preferred_name().to_string(),
            });
        }
        self.matched.push(node);
        self.switches.insert(node.id(), state);
        Ok(())
    }

    pub(crate) fn add_property(&mut self, key: &str, value: &str) {
        self.properties.insert(key.to_string(), value.to_string());
    }

    pub(crate) fn set_default_values(&mut self, id: OptionId, values: Vec<Value>) {
        self.default_values.insert(id, values);
    }

    pub(crate) fn set_default_switch(&mut self, id: OptionId, state: bool) {
        self.default_switches.insert(id, state);
    }

    pub(crate) fn has_node(&self, node: &OptionNode) -> bool {
        let id = node.id();
        self.matched.iter().any(|matched| matched.id() == id)
    }

    pub(crate) fn bound_value_count(&self, id: OptionId) -> usize {
        self.values.get(&id).map_or(0, Vec::len)
    }

    pub(crate) fn effective_values_by_id(&self, id: OptionId) -> &[Value] {
        if let Some(values) = self.values.get(&id) {
            if !values.is_empty() {
                return values;
            }
        }
        self.default_values.get(&id).map_or(&[], Vec::as_slice)
    }

    /// The list a validator should run over: real values when any were
    /// bound, else the registered defaults.
    pub(crate) fn values_mut(&mut self, id: OptionId) -> &mut Vec<Value> {
        if self.values.get(&id).is_some_and(|values| !values.is_empty()) {
            return self.values.entry(id).or_default();
        }
        if self.default_values.contains_key(&id) {
            return self.default_values.entry(id).or_default();
        }
        self.values.entry(id).or_default()
    }

    /// Resolves a trigger to its node, searching the whole tree.
    pub fn node(&self, trigger: &str) -> Option<&'a OptionNode> {
        self.root.find_option(trigger)
    }

    /// Whether the node with this trigger was matched.
    pub fn has_option(&self, trigger: &str) -> bool {
        self.node(trigger).is_some_and(|node| self.has_node(node))
    }

    /// How many times the node with this trigger was matched.
    pub fn option_count(&self, trigger: &str) -> usize {
        let Some(node) = self.node(trigger) else {
            return 0;
        };
        let id = node.id();
        self.matched.iter().filter(|matched| matched.id() == id).count()
    }

    /// The values bound to the node with this trigger, falling back to its
    /// defaults. Empty for unknown triggers.
    pub fn values(&self, trigger: &str) -> &[Value] {
        self.node(trigger)
            .map_or(&[], |node| self.effective_values_by_id(node.id()))
    }

    /// The single value bound to this trigger. `Ok(None)` when nothing is
    /// bound; an error when several values are.
    pub fn value(&self, trigger: &str) -> Result<Option<&Value>> {
        let values = self.values(trigger);
        if values.len() > 1 {
            return Err(ParseError::UnexpectedValue {
                option: trigger.to_string(),
                value: values[1].to_string(),
            });
        }
        Ok(values.first())
    }

    /// The state of the switch with this trigger, falling back to its
    /// default state.
    pub fn switch(&self, trigger: &str) -> Option<bool> {
        let node = self.node(trigger)?;
        let id = node.id();
        self.switches
            .get(&id)
            .or_else(|| self.default_switches.get(&id))
            .copied()
    }

    pub fn property(&self, key: &str) -> Option<&str> {
        self.properties.get(key).map(String::as_str)
    }

    pub fn properties(&self) -> &BTreeMap<String, String> {
        &self.properties
    }

    /// Matched nodes in match order, repeats included.
    pub fn options(&self) -> &[&'a OptionNode] {
        &self.matched
    }

    /// A serializable snapshot of the outcome.
    pub fn summary(&self) -> ParseSummary {
        let mut summary = ParseSummary::default();
        let mut seen = HashSet::new();
        for node in &self.matched {
            summary.options.push(node.preferred_name().to_string());
            if !seen.insert(node.id()) {
                continue;
            }
            let values = self.effective_values_by_id(node.id());
            if !values.is_empty() {
                summary.values.insert(
                    node.preferred_name().to_string(),
                    values.iter().map(Value::to_string).collect(),
                );
            }
            if let Some(state) = self.switches.get(&node.id()) {
                summary.switches.insert(node.preferred_name().to_string(), *state);
            }
        }
        summary.properties = self.properties.clone();
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::option::{Argument, Flag};

    fn grammar() -> Group {
        Group::new("options")
            .with_option(
                Flag::new(Some("-f"), Some("--file")).with_argument(Argument::new("path")),
            )
            .with_option(Argument::new("target").with_defaults(["all"]))
    }

    #[test]
    fn test_queries_resolve_through_any_trigger() {
        let root = grammar();
        let mut line = CommandLine::new(&root);
        let node = root.find_option("-f").unwrap();
        line.add_option(node);
        line.add_value(node, Value::from("notes.txt"));

        assert!(line.has_option("--file"));
        assert_eq!(line.values("--file"), line.values("-f"));
        assert_eq!(line.value("-f").unwrap().unwrap().to_string(), "notes.txt");
        assert_eq!(line.option_count("-f"), 1);
        assert!(!line.has_option("target"));
    }

    #[test]
    fn test_defaults_yield_to_real_values() {
        let root = grammar();
        let mut line = CommandLine::new(&root);
        let target = root.find_option("target").unwrap();
        line.set_default_values(target.id(), vec![Value::from("all")]);
        // registering again replaces rather than accumulates
        line.set_default_values(target.id(), vec![Value::from("all")]);
        assert_eq!(line.values("target"), &[Value::from("all")]);

        line.add_value(target, Value::from("docs"));
        assert_eq!(line.values("target"), &[Value::from("docs")]);
    }

    #[test]
    fn test_singular_query_rejects_multiple_values() {
        let root = grammar();
        let mut line = CommandLine::new(&root);
        let node = root.find_option("-f").unwrap();
        line.add_value(node, Value::from("a"));
        line.add_value(node, Value::from("b"));
        assert!(line.value("-f").is_err());
    }

    #[test]
    fn test_looks_like_option_uses_collected_prefixes() {
        let root = grammar();
        let line = CommandLine::new(&root);
        assert!(line.looks_like_option("-x"));
        assert!(line.looks_like_option("--anything"));
        assert!(!line.looks_like_option("plain"));
    }
}
