//! Rank → team points accumulation.

use super::criteria::{compare_standings, TeamStanding, TeamTieBreak};
use crate::error::{Result, ScoringError};
use crate::formula::PositionPointsTable;
use crate::model::{Athlete, CompetitionDefinition, IndividualResult, TeamResult};
use crate::ranking::Ranker;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::warn;

/// Team membership for one event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TeamRoster {
    athlete_team: BTreeMap<String, String>,
    teams: BTreeSet<String>,
}

impl TeamRoster {
    pub fn from_athletes(athletes: &[Athlete]) -> Self {
        let mut roster = Self::default();
        for athlete in athletes {
            roster
                .athlete_team
                .insert(athlete.id.clone(), athlete.team_id.clone());
            roster.teams.insert(athlete.team_id.clone());
        }
        roster
    }

    /// Registers a team that has no individual athletes listed.
    pub fn with_team(mut self, team_id: impl Into<String>) -> Self {
        self.teams.insert(team_id.into());
        self
    }

    pub fn team_of(&self, athlete_id: &str) -> Option<&str> {
        self.athlete_team.get(athlete_id).map(String::as_str)
    }

    pub fn has_team(&self, team_id: &str) -> bool {
        self.teams.contains(team_id)
    }

    /// All known team ids, sorted.
    pub fn teams(&self) -> impl Iterator<Item = &str> {
        self.teams.iter().map(String::as_str)
    }

    /// Team credited for a competitor's result, or `None` when the
    /// competitor belongs to no known team.
    fn owner<'a>(&'a self, competitor_id: &'a str, team_format: bool) -> Option<&'a str> {
        if team_format {
            self.has_team(competitor_id).then_some(competitor_id)
        } else {
            self.team_of(competitor_id)
        }
    }
}

/// Converts one competition's ranked results into per-team points.
///
/// Every ranked result earns `table.points_for(rank)` for its owning team.
/// In team-format competitions the competitor is the team itself. Teams
/// with a result but no points (all unranked) appear with zero points.
///
/// # Errors
///
/// [`ScoringError::InvalidConfiguration`] when a rank falls beyond a table
/// with no "and above" entry, or when a team's points overflow `u32`.
pub fn score_competition(
    definition: &CompetitionDefinition,
    results: &[IndividualResult],
    roster: &TeamRoster,
    table: &PositionPointsTable,
    ranker: &Ranker,
) -> Result<Vec<TeamResult>> {
    let mut points_by_team: BTreeMap<&str, u32> = BTreeMap::new();

    for result in results {
        let Some(team_id) = roster.owner(&result.competitor_id, definition.is_team_competition)
        else {
            warn!(
                competition = %definition.id,
                competitor = %result.competitor_id,
                "result has no owning team, skipped in team scoring"
            );
            continue;
        };
        let points = match result.rank {
            Some(rank) => table.points_for(rank).ok_or_else(|| {
                ScoringError::config(
                    &definition.id,
                    format!(
                        "rank {rank} exceeds the points table, which has no 'andAbove' entry"
                    ),
                )
            })?,
            None => 0,
        };
        let total = points_by_team.entry(team_id).or_insert(0);
        *total = total.checked_add(points).ok_or_else(|| {
            ScoringError::config(
                &definition.id,
                format!("team points overflow for team '{team_id}'"),
            )
        })?;
    }

    let totals: Vec<(&str, u32)> = points_by_team.into_iter().collect();
    let positions = ranker.rank(&totals, |(_, p)| f64::from(*p), |_, _| Ordering::Equal);

    let mut team_results: Vec<TeamResult> = totals
        .iter()
        .zip(positions)
        .map(|(&(team_id, total_points), position)| TeamResult {
            team_id: team_id.to_string(),
            competition_id: Some(definition.id.clone()),
            total_points,
            position,
        })
        .collect();
    team_results.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.team_id.cmp(&b.team_id)));
    Ok(team_results)
}

/// Sums per-competition team points into event standings.
///
/// Every roster team appears, with zero points if it scored nothing.
/// Equal totals are separated by `criteria` in order, else share a
/// position.
pub fn score_event(
    competition_results: &[TeamResult],
    roster: &TeamRoster,
    criteria: &[TeamTieBreak],
    ranker: &Ranker,
) -> Vec<TeamResult> {
    let mut standings: BTreeMap<&str, TeamStanding> = roster
        .teams()
        .map(|id| (id, TeamStanding::new(id)))
        .collect();

    for result in competition_results
        .iter()
        .filter(|r| r.competition_id.is_some())
    {
        standings
            .entry(result.team_id.as_str())
            .or_insert_with(|| TeamStanding::new(result.team_id.as_str()))
            .record(result.total_points, result.position);
    }

    let standings: Vec<TeamStanding> = standings.into_values().collect();
    let positions = ranker.rank(
        &standings,
        |s| f64::from(s.total_points),
        |a, b| compare_standings(criteria, a, b),
    );

    let mut event: Vec<TeamResult> = standings
        .into_iter()
        .zip(positions)
        .map(|(s, position)| TeamResult {
            team_id: s.team_id,
            competition_id: None,
            total_points: s.total_points,
            position,
        })
        .collect();
    event.sort_by(|a, b| a.position.cmp(&b.position).then_with(|| a.team_id.cmp(&b.team_id)));
    event
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::PositionEntry;
    use crate::model::{AggregationType, MetricType, ResultStatus};

    fn ranked(competitor: &str, competition: &str, rank: Option<u32>) -> IndividualResult {
        IndividualResult {
            competitor_id: competitor.to_string(),
            competition_id: competition.to_string(),
            aggregate_value: rank.map(|r| 100.0 - r as f64),
            tie_break_key: None,
            rank,
            status: if rank.is_some() {
                ResultStatus::Scored
            } else {
                ResultStatus::NoScore
            },
            valid_attempts: rank.map_or(0, |_| 1),
        }
    }

    fn roster() -> TeamRoster {
        TeamRoster::from_athletes(&[
            Athlete::new("A", "Athlete A", "Falcon"),
            Athlete::new("B", "Athlete B", "Hawk"),
            Athlete::new("D", "Athlete D", "Falcon"),
        ])
    }

    fn individual() -> CompetitionDefinition {
        CompetitionDefinition::new("shoot", MetricType::Points, AggregationType::Sum)
    }

    fn find<'a>(results: &'a [TeamResult], team: &str) -> &'a TeamResult {
        results.iter().find(|r| r.team_id == team).unwrap()
    }

    #[test]
    fn test_falcon_and_hawk() {
        let results = vec![
            ranked("A", "shoot", Some(2)),
            ranked("B", "shoot", Some(1)),
            ranked("D", "shoot", Some(3)),
        ];
        let teams = score_competition(
            &individual(),
            &results,
            &roster(),
            &PositionPointsTable::default(),
            &Ranker::new(),
        )
        .unwrap();

        assert_eq!(find(&teams, "Hawk").total_points, 15);
        assert_eq!(find(&teams, "Falcon").total_points, 24);
        assert_eq!(find(&teams, "Falcon").position, 1);
        assert_eq!(find(&teams, "Hawk").position, 2);
        assert!(teams.iter().all(|t| t.competition_id.as_deref() == Some("shoot")));
    }

    #[test]
    fn test_unranked_result_scores_zero() {
        let results = vec![ranked("B", "shoot", Some(1)), ranked("A", "shoot", None)];
        let teams = score_competition(
            &individual(),
            &results,
            &roster(),
            &PositionPointsTable::default(),
            &Ranker::new(),
        )
        .unwrap();
        assert_eq!(find(&teams, "Falcon").total_points, 0);
        assert_eq!(find(&teams, "Falcon").position, 2);
    }

    #[test]
    fn test_unknown_athlete_skipped() {
        let results = vec![ranked("ghost", "shoot", Some(1)), ranked("B", "shoot", Some(2))];
        let teams = score_competition(
            &individual(),
            &results,
            &roster(),
            &PositionPointsTable::default(),
            &Ranker::new(),
        )
        .unwrap();
        assert_eq!(teams.len(), 1);
        assert_eq!(find(&teams, "Hawk").total_points, 13);
    }

    #[test]
    fn test_team_format_credits_team_directly() {
        let def = individual().with_team_format(4);
        let results = vec![ranked("Hawk", "shoot", Some(1)), ranked("Falcon", "shoot", Some(2))];
        let teams = score_competition(
            &def,
            &results,
            &roster(),
            &PositionPointsTable::default(),
            &Ranker::new(),
        )
        .unwrap();
        assert_eq!(find(&teams, "Hawk").total_points, 15);
        assert_eq!(find(&teams, "Falcon").total_points, 13);
    }

    #[test]
    fn test_capped_table_overflow_is_config_error() {
        let table = PositionPointsTable::new(vec![PositionEntry::new(1, 3), PositionEntry::new(2, 1)]);
        let results = vec![
            ranked("A", "shoot", Some(1)),
            ranked("B", "shoot", Some(2)),
            ranked("D", "shoot", Some(3)),
        ];
        let err = score_competition(&individual(), &results, &roster(), &table, &Ranker::new())
            .unwrap_err();
        assert!(err.to_string().contains("rank 3"));
    }

    #[test]
    fn test_team_points_overflow_is_config_error() {
        let table = PositionPointsTable::new(vec![
            PositionEntry::new(1, 3_000_000_000),
            PositionEntry::and_above(2, 3_000_000_000),
        ]);
        let results = vec![ranked("A", "shoot", Some(1)), ranked("D", "shoot", Some(2))];
        let err = score_competition(&individual(), &results, &roster(), &table, &Ranker::new())
            .unwrap_err();
        assert!(matches!(err, ScoringError::InvalidConfiguration { .. }));
        assert!(err.to_string().contains("overflow"));
    }

    #[test]
    fn test_event_totals_saturate() {
        let per_competition = vec![
            TeamResult {
                team_id: "Falcon".into(),
                competition_id: Some("c1".into()),
                total_points: u32::MAX - 1,
                position: 1,
            },
            TeamResult {
                team_id: "Falcon".into(),
                competition_id: Some("c2".into()),
                total_points: 10,
                position: 1,
            },
        ];
        let event = score_event(&per_competition, &roster(), &[], &Ranker::new());
        assert_eq!(find(&event, "Falcon").total_points, u32::MAX);
        assert_eq!(find(&event, "Falcon").position, 1);
    }

    #[test]
    fn test_event_totals_sum_competitions() {
        let per_competition = vec![
            TeamResult {
                team_id: "Falcon".into(),
                competition_id: Some("shoot".into()),
                total_points: 24,
                position: 1,
            },
            TeamResult {
                team_id: "Hawk".into(),
                competition_id: Some("shoot".into()),
                total_points: 15,
                position: 2,
            },
            TeamResult {
                team_id: "Hawk".into(),
                competition_id: Some("sprint".into()),
                total_points: 15,
                position: 1,
            },
        ];
        let roster = roster().with_team("Eagle");
        let event = score_event(&per_competition, &roster, &[], &Ranker::new());

        assert_eq!(event.len(), 3);
        assert_eq!(event[0].team_id, "Hawk");
        assert_eq!(event[0].total_points, 30);
        assert_eq!(event[0].position, 1);
        assert_eq!(event[1].team_id, "Falcon");
        assert_eq!(event[1].position, 2);
        assert_eq!(event[2].team_id, "Eagle");
        assert_eq!(event[2].total_points, 0);
        assert!(event.iter().all(|t| t.competition_id.is_none()));
    }

    #[test]
    fn test_event_tie_shared_then_broken_by_criteria() {
        let per_competition = vec![
            TeamResult {
                team_id: "Falcon".into(),
                competition_id: Some("c1".into()),
                total_points: 15,
                position: 1,
            },
            TeamResult {
                team_id: "Hawk".into(),
                competition_id: Some("c1".into()),
                total_points: 13,
                position: 2,
            },
            TeamResult {
                team_id: "Hawk".into(),
                competition_id: Some("c2".into()),
                total_points: 2,
                position: 2,
            },
        ];
        let shared = score_event(&per_competition, &roster(), &[], &Ranker::new());
        assert!(shared.iter().all(|t| t.position == 1));

        let broken = score_event(
            &per_competition,
            &roster(),
            &[TeamTieBreak::MostFirstPlaces],
            &Ranker::new(),
        );
        assert_eq!(find(&broken, "Falcon").position, 1);
        assert_eq!(find(&broken, "Hawk").position, 2);
    }
}
