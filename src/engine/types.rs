//! Pipeline input and output types.

use crate::error::ScoringError;
use crate::model::{Athlete, Attempt, CompetitionRecord, IndividualResult, TeamResult};
use serde::{Deserialize, Serialize};

/// Everything the engine reads for one event.
///
/// The snapshot is read-only; results are derived from it in full on every
/// recompute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSnapshot {
    pub event_id: String,

    #[serde(default)]
    pub competitions: Vec<CompetitionRecord>,

    #[serde(default)]
    pub attempts: Vec<Attempt>,

    #[serde(default)]
    pub athletes: Vec<Athlete>,

    /// Teams entered in the event that have no athletes listed, for
    /// events made up of team-format competitions only.
    #[serde(default)]
    pub teams: Vec<String>,
}

impl EventSnapshot {
    pub fn new(event_id: impl Into<String>) -> Self {
        Self {
            event_id: event_id.into(),
            ..Self::default()
        }
    }

    pub fn with_competition(mut self, record: CompetitionRecord) -> Self {
        self.competitions.push(record);
        self
    }

    pub fn with_athlete(mut self, athlete: Athlete) -> Self {
        self.athletes.push(athlete);
        self
    }

    pub fn with_team(mut self, team_id: impl Into<String>) -> Self {
        self.teams.push(team_id.into());
        self
    }

    pub fn with_attempts(mut self, attempts: impl IntoIterator<Item = Attempt>) -> Self {
        self.attempts.extend(attempts);
        self
    }
}

/// A competition that could not be scored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompetitionFailure {
    pub competition_id: String,

    /// Human-readable cause, the `Display` form of `error`.
    pub reason: String,

    #[serde(skip)]
    pub error: ScoringError,
}

impl CompetitionFailure {
    pub fn new(competition_id: impl Into<String>, error: ScoringError) -> Self {
        Self {
            competition_id: competition_id.into(),
            reason: error.to_string(),
            error,
        }
    }
}

/// Output of one recompute.
///
/// Individual and team results are ordered by competition id, then rank,
/// then competitor id. Event standings are ordered by position, then team
/// id. Failed competitions contribute nothing to any of the three lists.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoringBatch {
    pub event_id: String,
    pub individual_results: Vec<IndividualResult>,
    pub team_results: Vec<TeamResult>,
    pub event_standings: Vec<TeamResult>,
    pub failed: Vec<CompetitionFailure>,
}

impl ScoringBatch {
    /// Returns `true` if every competition was scored.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    /// Individual results of one competition, best first.
    pub fn results_for<'a>(
        &'a self,
        competition_id: &'a str,
    ) -> impl Iterator<Item = &'a IndividualResult> + 'a {
        self.individual_results
            .iter()
            .filter(move |r| r.competition_id == competition_id)
    }

    /// Team results of one competition, best first.
    pub fn team_results_for<'a>(
        &'a self,
        competition_id: &'a str,
    ) -> impl Iterator<Item = &'a TeamResult> + 'a {
        self.team_results
            .iter()
            .filter(move |r| r.competition_id.as_deref() == Some(competition_id))
    }

    /// Event standing of one team.
    pub fn standing_of(&self, team_id: &str) -> Option<&TeamResult> {
        self.event_standings.iter().find(|r| r.team_id == team_id)
    }

    pub fn failure_for(&self, competition_id: &str) -> Option<&CompetitionFailure> {
        self.failed.iter().find(|f| f.competition_id == competition_id)
    }

    /// Serializes the batch to JSON.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_snapshot_from_json() {
        let snapshot: EventSnapshot = serde_json::from_value(json!({
            "eventId": "spring-games",
            "competitions": [
                {"id": "pistol", "metricType": "points", "aggregationType": "sum"}
            ],
            "attempts": [
                {
                    "athleteOrTeamId": "a1",
                    "competitionId": "pistol",
                    "attemptNumber": 1,
                    "rawValue": 9.5,
                    "status": "valid"
                }
            ],
            "athletes": [
                {"id": "a1", "displayName": "Ann", "teamId": "falcon"}
            ]
        }))
        .unwrap();

        assert_eq!(snapshot.event_id, "spring-games");
        assert_eq!(snapshot.competitions.len(), 1);
        assert_eq!(snapshot.attempts[0].raw_value, Some(9.5));
        assert!(snapshot.teams.is_empty());
    }

    #[test]
    fn test_failure_reason_from_error() {
        let failure = CompetitionFailure::new(
            "relay",
            ScoringError::UnknownCompetition {
                competition_id: "relay".into(),
            },
        );
        assert_eq!(failure.reason, "attempts reference unknown competition 'relay'");

        let value = serde_json::to_value(&failure).unwrap();
        assert_eq!(
            value,
            json!({
                "competitionId": "relay",
                "reason": "attempts reference unknown competition 'relay'"
            })
        );
    }

    #[test]
    fn test_empty_batch_is_complete() {
        let batch = ScoringBatch::default();
        assert!(batch.is_complete());
        assert!(batch.standing_of("falcon").is_none());
        assert_eq!(batch.results_for("pistol").count(), 0);
    }
}
