//! Fixed-penalty-per-infraction rules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Infraction name → penalty per occurrence, in the metric's unit.
///
/// For a time metric the penalty is added to the elapsed time; for every
/// other metric it is subtracted from the measurement.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PenaltyRules {
    rules: BTreeMap<String, f64>,
}

impl PenaltyRules {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_rule(mut self, infraction: impl Into<String>, penalty: f64) -> Self {
        self.rules.insert(infraction.into(), penalty);
        self
    }

    /// Parses and validates rules from their JSON form (an object of
    /// infraction name → number).
    pub fn from_json(value: &serde_json::Value) -> Result<Self, String> {
        let rules: PenaltyRules = serde_json::from_value(value.clone())
            .map_err(|e| format!("malformed penalty rules: {e}"))?;
        rules.validate()?;
        Ok(rules)
    }

    pub fn validate(&self) -> Result<(), String> {
        for (name, &penalty) in &self.rules {
            if !penalty.is_finite() || penalty < 0.0 {
                return Err(format!(
                    "penalty for '{name}' must be a non-negative number, got {penalty}"
                ));
            }
        }
        Ok(())
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Penalty for a single occurrence, if the infraction is priced.
    pub fn penalty_for(&self, infraction: &str) -> Option<f64> {
        self.rules.get(infraction).copied()
    }

    /// Total penalty for a set of recorded infractions.
    ///
    /// Infractions with no configured rule cost nothing.
    pub fn total(&self, infractions: &BTreeMap<String, u32>) -> f64 {
        infractions
            .iter()
            .filter_map(|(name, &count)| self.penalty_for(name).map(|p| p * count as f64))
            .sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_total_penalty() {
        let rules = PenaltyRules::new()
            .with_rule("cone", 5.0)
            .with_rule("false_start", 10.0);
        let mut infractions = BTreeMap::new();
        infractions.insert("cone".to_string(), 3);
        infractions.insert("false_start".to_string(), 1);
        assert!((rules.total(&infractions) - 25.0).abs() < 1e-10);
    }

    #[test]
    fn test_unpriced_infraction_costs_nothing() {
        let rules = PenaltyRules::new().with_rule("cone", 5.0);
        let mut infractions = BTreeMap::new();
        infractions.insert("gate".to_string(), 4);
        assert_eq!(rules.total(&infractions), 0.0);
    }

    #[test]
    fn test_from_json() {
        let rules = PenaltyRules::from_json(&json!({"cone": 5, "gate": 2.5})).unwrap();
        assert_eq!(rules.penalty_for("cone"), Some(5.0));
        assert_eq!(rules.penalty_for("gate"), Some(2.5));
        assert_eq!(rules.penalty_for("rail"), None);
    }

    #[test]
    fn test_from_json_rejects_non_numeric() {
        let err = PenaltyRules::from_json(&json!({"cone": "five"})).unwrap_err();
        assert!(err.starts_with("malformed penalty rules"));
        assert!(PenaltyRules::from_json(&json!([1, 2])).is_err());
    }

    #[test]
    fn test_negative_penalty_rejected() {
        let err = PenaltyRules::from_json(&json!({"cone": -5})).unwrap_err();
        assert!(err.contains("cone"));
    }
}
