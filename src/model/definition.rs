//! Competition definitions: raw configuration records and their validated form.

use super::types::{AggregationType, MetricType, TieBreakRule};
use crate::error::{Result, ScoringError};
use crate::formula::{PositionPointsTable, ScoringFormula, TopNFormula};
use crate::normalize::PenaltyRules;
use serde::{Deserialize, Serialize};

/// Competition configuration as supplied by the registration workflow.
///
/// Enum fields and the declarative formula blobs are kept raw here; they
/// are checked once by [`CompetitionDefinition::resolve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionRecord {
    pub id: String,

    #[serde(default)]
    pub name: Option<String>,

    pub metric_type: String,

    pub aggregation_type: String,

    /// Expected number of attempts. `None` means unbounded.
    #[serde(default)]
    pub attempts_count: Option<u32>,

    #[serde(default)]
    pub is_team_competition: bool,

    #[serde(default)]
    pub team_size: Option<u32>,

    #[serde(default)]
    pub scoring_formula: Option<serde_json::Value>,

    #[serde(default)]
    pub penalty_rules: Option<serde_json::Value>,

    /// `"lower_key_wins"` (default) or `"none"`.
    #[serde(default)]
    pub tie_break: Option<String>,
}

impl CompetitionRecord {
    pub fn new(
        id: impl Into<String>,
        metric_type: impl Into<String>,
        aggregation_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            metric_type: metric_type.into(),
            aggregation_type: aggregation_type.into(),
            attempts_count: None,
            is_team_competition: false,
            team_size: None,
            scoring_formula: None,
            penalty_rules: None,
            tie_break: None,
        }
    }

    pub fn with_attempts_count(mut self, n: u32) -> Self {
        self.attempts_count = Some(n);
        self
    }

    pub fn with_team_format(mut self, team_size: u32) -> Self {
        self.is_team_competition = true;
        self.team_size = Some(team_size);
        self
    }

    pub fn with_formula(mut self, formula: serde_json::Value) -> Self {
        self.scoring_formula = Some(formula);
        self
    }

    pub fn with_penalty_rules(mut self, rules: serde_json::Value) -> Self {
        self.penalty_rules = Some(rules);
        self
    }

    pub fn with_tie_break(mut self, rule: impl Into<String>) -> Self {
        self.tie_break = Some(rule.into());
        self
    }
}

/// A validated competition definition.
///
/// # Examples
///
/// ```
/// use u_standings::model::{AggregationType, CompetitionDefinition, MetricType};
///
/// let def = CompetitionDefinition::new("sprint", MetricType::Time, AggregationType::BestAttempt)
///     .with_attempts_count(3);
/// assert!(def.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitionDefinition {
    pub id: String,
    pub name: Option<String>,
    pub metric_type: MetricType,
    pub aggregation_type: AggregationType,
    pub attempts_count: Option<u32>,
    pub is_team_competition: bool,
    pub team_size: Option<u32>,
    pub scoring_formula: Option<ScoringFormula>,
    pub penalty_rules: PenaltyRules,
    pub tie_break: TieBreakRule,
}

impl CompetitionDefinition {
    pub fn new(
        id: impl Into<String>,
        metric_type: MetricType,
        aggregation_type: AggregationType,
    ) -> Self {
        Self {
            id: id.into(),
            name: None,
            metric_type,
            aggregation_type,
            attempts_count: None,
            is_team_competition: false,
            team_size: None,
            scoring_formula: None,
            penalty_rules: PenaltyRules::default(),
            tie_break: TieBreakRule::default(),
        }
    }

    pub fn with_attempts_count(mut self, n: u32) -> Self {
        self.attempts_count = Some(n);
        self
    }

    pub fn with_team_format(mut self, team_size: u32) -> Self {
        self.is_team_competition = true;
        self.team_size = Some(team_size);
        self
    }

    pub fn with_formula(mut self, formula: ScoringFormula) -> Self {
        self.scoring_formula = Some(formula);
        self
    }

    pub fn with_penalty_rules(mut self, rules: PenaltyRules) -> Self {
        self.penalty_rules = rules;
        self
    }

    pub fn with_tie_break(mut self, rule: TieBreakRule) -> Self {
        self.tie_break = rule;
        self
    }

    /// Resolves a raw record, rejecting unknown enum values and malformed
    /// formula or penalty JSON.
    pub fn resolve(record: &CompetitionRecord) -> Result<Self> {
        let id = record.id.as_str();
        let metric_type: MetricType = record
            .metric_type
            .parse()
            .map_err(|e: String| ScoringError::config(id, e))?;
        let aggregation_type: AggregationType = record
            .aggregation_type
            .parse()
            .map_err(|e: String| ScoringError::config(id, e))?;
        let tie_break = match record.tie_break.as_deref() {
            Some(rule) => rule
                .parse::<TieBreakRule>()
                .map_err(|e: String| ScoringError::config(id, e))?,
            None => TieBreakRule::default(),
        };
        let scoring_formula = match &record.scoring_formula {
            Some(value) => {
                Some(ScoringFormula::from_json(value).map_err(|e| ScoringError::config(id, e))?)
            }
            None => None,
        };
        let penalty_rules = match &record.penalty_rules {
            Some(value) => {
                PenaltyRules::from_json(value).map_err(|e| ScoringError::config(id, e))?
            }
            None => PenaltyRules::default(),
        };

        let definition = Self {
            id: record.id.clone(),
            name: record.name.clone(),
            metric_type,
            aggregation_type,
            attempts_count: record.attempts_count,
            is_team_competition: record.is_team_competition,
            team_size: record.team_size,
            scoring_formula,
            penalty_rules,
            tie_break,
        };
        definition
            .validate()
            .map_err(|e| ScoringError::config(id, e))?;
        Ok(definition)
    }

    /// Validates cross-field consistency.
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.id.trim().is_empty() {
            return Err("competition id must not be empty".into());
        }
        if self.attempts_count == Some(0) {
            return Err("attemptsCount must be at least 1 when set".into());
        }
        if self.is_team_competition && self.team_size == Some(0) {
            return Err("teamSize must be at least 1 for a team competition".into());
        }
        if let Some(formula) = &self.scoring_formula {
            formula.validate()?;
        }
        self.penalty_rules.validate()?;

        let has_top_n = self.top_n().is_some();
        match (self.aggregation_type, has_top_n) {
            (AggregationType::TopN, false) => {
                Err("top_n aggregation requires a top_n scoring formula".into())
            }
            (other, true) if other != AggregationType::TopN => Err(format!(
                "top_n scoring formula does not apply to {other} aggregation"
            )),
            _ => Ok(()),
        }
    }

    /// Top-N parameters, when the formula carries them.
    pub fn top_n(&self) -> Option<&TopNFormula> {
        self.scoring_formula.as_ref().and_then(|f| f.top_n())
    }

    /// Returns `true` if a smaller aggregate ranks higher
    /// (closest-to-target top-N).
    pub fn ranks_ascending(&self) -> bool {
        self.top_n().is_some_and(|t| t.reverse)
    }

    /// The table that converts this competition's ranks to team points.
    pub fn points_table<'a>(
        &'a self,
        default: &'a PositionPointsTable,
    ) -> &'a PositionPointsTable {
        self.scoring_formula
            .as_ref()
            .and_then(|f| f.points_table())
            .unwrap_or(default)
    }
}
