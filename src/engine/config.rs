//! Engine configuration.

use crate::formula::PositionPointsTable;
use crate::team::TeamTieBreak;
use serde::{Deserialize, Serialize};

/// How a competitor with fewer valid attempts than `attemptsCount` is
/// scored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingAttemptPolicy {
    /// Aggregate over whatever valid attempts exist.
    #[default]
    Proceed,

    /// Mark the result incomplete and leave it unranked.
    Reject,
}

/// Configuration for [`ScoringEngine`](super::ScoringEngine).
///
/// # Examples
///
/// ```
/// use u_standings::engine::{EngineConfig, MissingAttemptPolicy};
/// use u_standings::team::TeamTieBreak;
///
/// let config = EngineConfig::default()
///     .with_missing_attempts(MissingAttemptPolicy::Reject)
///     .with_team_tie_break(TeamTieBreak::MostFirstPlaces)
///     .with_epsilon(1e-6);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EngineConfig {
    /// Tolerance under which two aggregates count as equal.
    pub epsilon: f64,

    /// Points table for competitions that define none.
    pub default_points_table: PositionPointsTable,

    pub missing_attempts: MissingAttemptPolicy,

    /// Criteria separating equal event totals, applied in order.
    pub team_tie_breaks: Vec<TeamTieBreak>,

    /// Whether to score competitions in parallel using rayon. Only takes
    /// effect with the `parallel` feature.
    pub parallel: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epsilon: 1e-9,
            default_points_table: PositionPointsTable::default(),
            missing_attempts: MissingAttemptPolicy::default(),
            team_tie_breaks: Vec::new(),
            parallel: true,
        }
    }
}

impl EngineConfig {
    pub fn with_epsilon(mut self, eps: f64) -> Self {
        self.epsilon = eps;
        self
    }

    pub fn with_default_points_table(mut self, table: PositionPointsTable) -> Self {
        self.default_points_table = table;
        self
    }

    pub fn with_missing_attempts(mut self, policy: MissingAttemptPolicy) -> Self {
        self.missing_attempts = policy;
        self
    }

    pub fn with_team_tie_break(mut self, criterion: TeamTieBreak) -> Self {
        self.team_tie_breaks.push(criterion);
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), String> {
        if !self.epsilon.is_finite() || self.epsilon < 0.0 {
            return Err(format!(
                "epsilon must be a non-negative number, got {}",
                self.epsilon
            ));
        }
        self.default_points_table
            .validate()
            .map_err(|e| format!("default points table: {e}"))?;
        for (i, criterion) in self.team_tie_breaks.iter().enumerate() {
            if self.team_tie_breaks[..i].contains(criterion) {
                return Err(format!("team tie-break {criterion:?} listed twice"));
            }
        }
        Ok(())
    }
}
