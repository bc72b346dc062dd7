//! Declarative scoring formulas parsed from competition configuration.

use super::table::PositionPointsTable;
use serde::{Deserialize, Serialize};

/// Parameters for top-N aggregation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TopNFormula {
    /// Number of best attempts summed.
    #[serde(rename = "topN")]
    pub top_n: u32,

    /// Closest-to-target mode: attempts are ordered ascending before taking
    /// the top N, and the smaller aggregate wins.
    #[serde(default)]
    pub reverse: bool,
}

impl TopNFormula {
    pub fn new(top_n: u32) -> Self {
        Self {
            top_n,
            reverse: false,
        }
    }

    pub fn reversed(mut self) -> Self {
        self.reverse = true;
        self
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.top_n == 0 {
            return Err("topN must be at least 1".into());
        }
        Ok(())
    }
}

/// A competition's scoring formula.
///
/// Parsed once when the competition definition is resolved; unknown
/// `type` tags and unknown fields are rejected there.
///
/// ```json
/// {"type": "position_points", "positions": [{"position": 1, "points": 10},
///                                           {"position": 2, "points": 5, "andAbove": true}]}
/// {"type": "top_n", "topN": 2, "reverse": true}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScoringFormula {
    /// Custom rank → team points table for this competition.
    PositionPoints(PositionPointsTable),

    /// Parameters for the `top_n` aggregation strategy.
    TopN(TopNFormula),
}

impl ScoringFormula {
    /// Parses and validates a formula from its JSON form.
    pub fn from_json(value: &serde_json::Value) -> Result<Self, String> {
        let formula: ScoringFormula = serde_json::from_value(value.clone())
            .map_err(|e| format!("malformed scoring formula: {e}"))?;
        formula.validate()?;
        Ok(formula)
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            ScoringFormula::PositionPoints(table) => table.validate(),
            ScoringFormula::TopN(top_n) => top_n.validate(),
        }
    }

    /// Returns the custom points table, if this formula defines one.
    pub fn points_table(&self) -> Option<&PositionPointsTable> {
        match self {
            ScoringFormula::PositionPoints(table) => Some(table),
            ScoringFormula::TopN(_) => None,
        }
    }

    /// Returns the top-N parameters, if this formula defines them.
    pub fn top_n(&self) -> Option<&TopNFormula> {
        match self {
            ScoringFormula::TopN(top_n) => Some(top_n),
            ScoringFormula::PositionPoints(_) => None,
        }
    }
}
