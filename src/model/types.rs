//! Closed enumerations shared by every stage.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Physical unit family of a raw measurement.
///
/// Determines which direction counts as better. Only [`MetricType::Time`]
/// is lower-is-better; the normalizer flips it so downstream stages always
/// see larger-is-better values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MetricType {
    Time,
    Points,
    Distance,
    Count,
    Accuracy,
}

impl MetricType {
    /// Returns `true` if a larger raw measurement is a better performance.
    pub fn higher_is_better(self) -> bool {
        !matches!(self, MetricType::Time)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            MetricType::Time => "time",
            MetricType::Points => "points",
            MetricType::Distance => "distance",
            MetricType::Count => "count",
            MetricType::Accuracy => "accuracy",
        }
    }
}

impl FromStr for MetricType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "time" => Ok(MetricType::Time),
            "points" => Ok(MetricType::Points),
            "distance" => Ok(MetricType::Distance),
            "count" => Ok(MetricType::Count),
            "accuracy" => Ok(MetricType::Accuracy),
            other => Err(format!("unknown metric type '{other}'")),
        }
    }
}

impl fmt::Display for MetricType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strategy for collapsing a competitor's attempts into one value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AggregationType {
    /// Sum of all valid comparable values.
    Sum,
    /// Maximum comparable value.
    BestAttempt,
    /// Mean over valid attempts only.
    Average,
    /// Sum of the N best values (parameters from the top-N formula).
    TopN,
    /// Sum minus the single worst value.
    DropWorst,
}

impl AggregationType {
    pub fn as_str(self) -> &'static str {
        match self {
            AggregationType::Sum => "sum",
            AggregationType::BestAttempt => "best_attempt",
            AggregationType::Average => "average",
            AggregationType::TopN => "top_n",
            AggregationType::DropWorst => "drop_worst",
        }
    }
}

impl FromStr for AggregationType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "sum" => Ok(AggregationType::Sum),
            "best_attempt" => Ok(AggregationType::BestAttempt),
            "average" => Ok(AggregationType::Average),
            "top_n" => Ok(AggregationType::TopN),
            "drop_worst" => Ok(AggregationType::DropWorst),
            other => Err(format!("unknown aggregation type '{other}'")),
        }
    }
}

impl fmt::Display for AggregationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Judging outcome of a single attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AttemptStatus {
    Valid,
    /// Did not start.
    Dns,
    /// Disqualified.
    Dq,
    /// Did not finish.
    Dnf,
}

impl AttemptStatus {
    pub fn is_valid(self) -> bool {
        matches!(self, AttemptStatus::Valid)
    }
}

impl fmt::Display for AttemptStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            AttemptStatus::Valid => "valid",
            AttemptStatus::Dns => "dns",
            AttemptStatus::Dq => "dq",
            AttemptStatus::Dnf => "dnf",
        })
    }
}

/// Secondary ordering applied when two aggregates are equal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreakRule {
    /// The smaller recorded key wins (e.g. distance from the target center).
    ///
    /// A competitor with a recorded key also ranks above a tied competitor
    /// without one. Only two keyless competitors stay tied.
    #[default]
    LowerKeyWins,
    /// Equal aggregates always share a rank.
    None,
}

impl FromStr for TieBreakRule {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "lower_key_wins" => Ok(TieBreakRule::LowerKeyWins),
            "none" => Ok(TieBreakRule::None),
            other => Err(format!("unknown tie-break rule '{other}'")),
        }
    }
}
