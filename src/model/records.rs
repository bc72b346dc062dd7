//! Input and output records exchanged with the surrounding application.
//!
//! Field names serialize in camelCase to match the registration and
//! reporting collaborators.

use super::types::AttemptStatus;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One measured attempt by an athlete, or by a team in a team competition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attempt {
    /// Athlete id, or team id for team competitions.
    #[serde(rename = "athleteOrTeamId")]
    pub competitor_id: String,

    pub competition_id: String,

    /// 1-based attempt number.
    pub attempt_number: u32,

    /// Raw measurement in the competition's metric unit. `None` until the
    /// judge enters it.
    #[serde(default)]
    pub raw_value: Option<f64>,

    pub status: AttemptStatus,

    /// Recorded infractions, by name, with their count. Priced by the
    /// competition's penalty rules.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub infractions: BTreeMap<String, u32>,

    /// Secondary measurement used only to break ties (e.g. distance from
    /// the target center in centimeters).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tie_break_key: Option<f64>,
}

impl Attempt {
    /// Creates a valid attempt with a recorded value.
    pub fn valid(
        competitor_id: impl Into<String>,
        competition_id: impl Into<String>,
        attempt_number: u32,
        raw_value: f64,
    ) -> Self {
        Self {
            competitor_id: competitor_id.into(),
            competition_id: competition_id.into(),
            attempt_number,
            raw_value: Some(raw_value),
            status: AttemptStatus::Valid,
            infractions: BTreeMap::new(),
            tie_break_key: None,
        }
    }

    /// Creates an attempt with the given status and no recorded value.
    pub fn excluded(
        competitor_id: impl Into<String>,
        competition_id: impl Into<String>,
        attempt_number: u32,
        status: AttemptStatus,
    ) -> Self {
        Self {
            competitor_id: competitor_id.into(),
            competition_id: competition_id.into(),
            attempt_number,
            raw_value: None,
            status,
            infractions: BTreeMap::new(),
            tie_break_key: None,
        }
    }

    pub fn with_infraction(mut self, name: impl Into<String>, count: u32) -> Self {
        self.infractions.insert(name.into(), count);
        self
    }

    pub fn with_tie_break_key(mut self, key: f64) -> Self {
        self.tie_break_key = Some(key);
        self
    }
}

/// A registered athlete and the team they compete for in the event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Athlete {
    pub id: String,
    pub display_name: String,
    pub team_id: String,
}

impl Athlete {
    pub fn new(
        id: impl Into<String>,
        display_name: impl Into<String>,
        team_id: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            team_id: team_id.into(),
        }
    }
}

/// Whether a competitor's result carries a rankable score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResultStatus {
    /// Aggregated and ranked.
    Scored,
    /// No valid attempt: every attempt was dns, dq, dnf or unrecorded.
    NoScore,
    /// Fewer valid attempts than required under the reject policy.
    Incomplete,
}

/// Derived per-competitor result for one competition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndividualResult {
    #[serde(rename = "athleteId")]
    pub competitor_id: String,

    pub competition_id: String,

    /// Aggregate in comparable-value space. `None` means "no score".
    pub aggregate_value: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tie_break_key: Option<f64>,

    /// 1-based standard competition rank. `None` for unranked results.
    pub rank: Option<u32>,

    pub status: ResultStatus,

    /// Number of attempts that contributed a value.
    pub valid_attempts: u32,
}

impl IndividualResult {
    pub fn is_ranked(&self) -> bool {
        self.rank.is_some()
    }
}

/// Team points for one competition, or for the whole event when
/// `competition_id` is `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamResult {
    pub team_id: String,
    pub competition_id: Option<String>,
    pub total_points: u32,
    pub position: u32,
}
