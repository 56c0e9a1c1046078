//! Serializable parse snapshots.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A plain-data snapshot of a finished parse, for emitting as JSON or
/// asserting against in tests.
///
/// Values are rendered in their canonical text form; maps are keyed by each
/// node's preferred name and sorted for stable output.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParseSummary {
    /// Preferred names of matched options, in match order, repeats included.
    pub options: Vec<String>,
    /// Effective values per matched option.
    pub values: BTreeMap<String, Vec<String>>,
    /// Explicitly set switch states.
    pub switches: BTreeMap<String, bool>,
    /// The property map.
    pub properties: BTreeMap<String, String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_trips_through_json() {
        let mut summary = ParseSummary::default();
        summary.options.push("--file".to_string());
        summary
            .values
            .insert("--file".to_string(), vec!["notes.txt".to_string()]);
        summary.switches.insert("+display".to_string(), true);
        summary
            .properties
            .insert("color".to_string(), "red".to_string());

        let json = serde_json::to_string(&summary).unwrap();
        let back: ParseSummary = serde_json::from_str(&json).unwrap();
        assert_eq!(back, summary);
    }
}
