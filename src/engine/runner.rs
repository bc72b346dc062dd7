//! Full event recompute.
//!
//! [`ScoringEngine`] runs every competition of a snapshot through
//! normalize → aggregate → rank → team points, then folds the
//! per-competition team points into event standings.

use super::config::{EngineConfig, MissingAttemptPolicy};
use super::types::{CompetitionFailure, EventSnapshot, ScoringBatch};
use crate::aggregate::aggregate;
use crate::error::{Result, ScoringError};
use crate::model::{
    Attempt, CompetitionDefinition, CompetitionRecord, IndividualResult, ResultStatus, TeamResult,
};
use crate::normalize::normalize;
use crate::ranking::{resolve, Ranker};
use crate::team::{self, TeamRoster};
#[cfg(feature = "parallel")]
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, warn};

/// Results of one successfully scored competition.
#[derive(Debug, Clone, PartialEq)]
pub struct CompetitionOutcome {
    pub competition_id: String,

    /// Ranked results first (by rank, then competitor id), then unranked
    /// results by competitor id.
    pub individual_results: Vec<IndividualResult>,

    /// Team points for this competition, by position then team id.
    pub team_results: Vec<TeamResult>,
}

struct CompetitionJob<'a> {
    record: &'a CompetitionRecord,
    attempts: Vec<&'a Attempt>,
}

/// Scores events from read-only snapshots.
///
/// Each competition is scored independently. A competition whose
/// definition or attempt data is invalid is reported in
/// [`ScoringBatch::failed`] and the rest of the event is still scored.
///
/// # Examples
///
/// ```
/// use u_standings::engine::{EngineConfig, EventSnapshot, ScoringEngine};
/// use u_standings::model::{Athlete, Attempt, CompetitionRecord};
///
/// let snapshot = EventSnapshot::new("spring-games")
///     .with_competition(CompetitionRecord::new("pistol", "points", "sum"))
///     .with_athlete(Athlete::new("a", "Ann", "falcon"))
///     .with_athlete(Athlete::new("b", "Bo", "hawk"))
///     .with_attempts([
///         Attempt::valid("a", "pistol", 1, 9.0),
///         Attempt::valid("b", "pistol", 1, 10.0),
///     ]);
///
/// let engine = ScoringEngine::new(EngineConfig::default()).unwrap();
/// let batch = engine.recompute(&snapshot);
/// assert!(batch.is_complete());
/// assert_eq!(batch.standing_of("hawk").unwrap().total_points, 15);
/// assert_eq!(batch.standing_of("falcon").unwrap().total_points, 13);
/// ```
#[derive(Debug, Clone)]
pub struct ScoringEngine {
    config: EngineConfig,
    ranker: Ranker,
}

impl ScoringEngine {
    /// Creates an engine.
    ///
    /// # Errors
    ///
    /// [`ScoringError::InvalidEngineConfig`] if `config` does not validate.
    pub fn new(config: EngineConfig) -> Result<Self> {
        config.validate().map_err(ScoringError::InvalidEngineConfig)?;
        let ranker = Ranker::new().with_epsilon(config.epsilon);
        Ok(Self { config, ranker })
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Recomputes every result of the event from scratch.
    ///
    /// The output depends only on the snapshot's content, not on the order
    /// of its records, so repeated runs produce identical batches.
    pub fn recompute(&self, snapshot: &EventSnapshot) -> ScoringBatch {
        let roster = snapshot
            .teams
            .iter()
            .fold(TeamRoster::from_athletes(&snapshot.athletes), |roster, team| {
                roster.with_team(team.clone())
            });

        let mut records: BTreeMap<&str, Vec<&CompetitionRecord>> = BTreeMap::new();
        for record in &snapshot.competitions {
            records.entry(record.id.as_str()).or_default().push(record);
        }
        let mut attempts: BTreeMap<&str, Vec<&Attempt>> = BTreeMap::new();
        for attempt in &snapshot.attempts {
            attempts
                .entry(attempt.competition_id.as_str())
                .or_default()
                .push(attempt);
        }

        let mut failed: Vec<CompetitionFailure> = attempts
            .keys()
            .filter(|id| !records.contains_key(*id))
            .map(|id| {
                CompetitionFailure::new(
                    *id,
                    ScoringError::UnknownCompetition {
                        competition_id: id.to_string(),
                    },
                )
            })
            .collect();

        let mut jobs = Vec::with_capacity(records.len());
        for (id, defined) in &records {
            let [record] = defined.as_slice() else {
                failed.push(CompetitionFailure::new(
                    *id,
                    ScoringError::config(id, format!("defined {} times in the event", defined.len())),
                ));
                continue;
            };
            jobs.push(CompetitionJob {
                record: *record,
                attempts: attempts.remove(id).unwrap_or_default(),
            });
        }

        let mut batch = ScoringBatch {
            event_id: snapshot.event_id.clone(),
            ..ScoringBatch::default()
        };
        for (job, outcome) in jobs.iter().zip(self.fan_out(&jobs, &roster)) {
            match outcome {
                Ok(outcome) => {
                    batch.individual_results.extend(outcome.individual_results);
                    batch.team_results.extend(outcome.team_results);
                }
                Err(error) => failed.push(CompetitionFailure::new(&job.record.id, error)),
            }
        }

        failed.sort_by(|a, b| a.competition_id.cmp(&b.competition_id));
        for failure in &failed {
            warn!(
                event = %snapshot.event_id,
                competition = %failure.competition_id,
                reason = %failure.reason,
                "competition not scored"
            );
        }
        batch.failed = failed;

        batch.event_standings = team::score_event(
            &batch.team_results,
            &roster,
            &self.config.team_tie_breaks,
            &self.ranker,
        );

        info!(
            event = %snapshot.event_id,
            competitions = jobs.len(),
            failed = batch.failed.len(),
            results = batch.individual_results.len(),
            teams = batch.event_standings.len(),
            "event recomputed"
        );
        batch
    }

    /// Scores a single competition.
    ///
    /// Attempts for other competitions are ignored.
    ///
    /// # Errors
    ///
    /// - [`ScoringError::InvalidConfiguration`] for an unresolvable
    ///   definition or a points table that cannot answer a rank
    /// - [`ScoringError::InvalidAttempt`] for duplicate or out-of-range
    ///   attempt numbers and non-finite measurements
    pub fn score_competition(
        &self,
        record: &CompetitionRecord,
        attempts: &[Attempt],
        roster: &TeamRoster,
    ) -> Result<CompetitionOutcome> {
        let own: Vec<&Attempt> = attempts
            .iter()
            .filter(|a| a.competition_id == record.id)
            .collect();
        self.score_job(
            &CompetitionJob {
                record,
                attempts: own,
            },
            roster,
        )
    }

    #[cfg(feature = "parallel")]
    fn fan_out(
        &self,
        jobs: &[CompetitionJob<'_>],
        roster: &TeamRoster,
    ) -> Vec<Result<CompetitionOutcome>> {
        if self.config.parallel {
            jobs.par_iter().map(|job| self.score_job(job, roster)).collect()
        } else {
            jobs.iter().map(|job| self.score_job(job, roster)).collect()
        }
    }

    #[cfg(not(feature = "parallel"))]
    fn fan_out(
        &self,
        jobs: &[CompetitionJob<'_>],
        roster: &TeamRoster,
    ) -> Vec<Result<CompetitionOutcome>> {
        jobs.iter().map(|job| self.score_job(job, roster)).collect()
    }

    fn score_job(&self, job: &CompetitionJob<'_>, roster: &TeamRoster) -> Result<CompetitionOutcome> {
        let definition = CompetitionDefinition::resolve(job.record)?;
        check_attempts(&definition, &job.attempts)?;

        let mut by_competitor: BTreeMap<&str, Vec<&Attempt>> = BTreeMap::new();
        for &attempt in &job.attempts {
            by_competitor
                .entry(attempt.competitor_id.as_str())
                .or_default()
                .push(attempt);
        }

        let mut results = Vec::with_capacity(by_competitor.len());
        for (competitor_id, mut own) in by_competitor {
            own.sort_by_key(|a| a.attempt_number);
            results.push(self.score_competitor(&definition, competitor_id, &own)?);
        }
        self.assign_ranks(&definition, &mut results);

        let table = definition.points_table(&self.config.default_points_table);
        let team_results =
            team::score_competition(&definition, &results, roster, table, &self.ranker)?;

        debug!(
            competition = %definition.id,
            competitors = results.len(),
            ranked = results.iter().filter(|r| r.is_ranked()).count(),
            teams = team_results.len(),
            "competition scored"
        );
        Ok(CompetitionOutcome {
            competition_id: definition.id,
            individual_results: results,
            team_results,
        })
    }

    /// Normalizes and aggregates one competitor's attempts, in attempt
    /// order. The result is not ranked yet.
    fn score_competitor(
        &self,
        definition: &CompetitionDefinition,
        competitor_id: &str,
        attempts: &[&Attempt],
    ) -> Result<IndividualResult> {
        let mut values = Vec::with_capacity(attempts.len());
        let mut tie_break_key: Option<f64> = None;

        for attempt in attempts {
            match normalize(attempt, definition) {
                Ok(value) => {
                    values.push(value);
                    if let Some(key) = attempt.tie_break_key {
                        tie_break_key = Some(tie_break_key.map_or(key, |k| k.min(key)));
                    }
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => debug!(
                    competition = %definition.id,
                    competitor = competitor_id,
                    attempt = attempt.attempt_number,
                    reason = %e,
                    "attempt excluded"
                ),
            }
        }

        let aggregate_value = aggregate(&values, definition)?;
        let valid_attempts = values.len() as u32;
        let status = match aggregate_value {
            None => ResultStatus::NoScore,
            Some(_) => match self.shortfall(definition, competitor_id, valid_attempts) {
                Some(reason) => {
                    debug!(competition = %definition.id, %reason, "result left unranked");
                    ResultStatus::Incomplete
                }
                None => ResultStatus::Scored,
            },
        };

        Ok(IndividualResult {
            competitor_id: competitor_id.to_string(),
            competition_id: definition.id.clone(),
            aggregate_value,
            tie_break_key,
            rank: None,
            status,
            valid_attempts,
        })
    }

    /// Under the reject policy, the missing-attempt error for a competitor
    /// short of `attemptsCount` valid attempts.
    fn shortfall(
        &self,
        definition: &CompetitionDefinition,
        competitor_id: &str,
        valid_attempts: u32,
    ) -> Option<ScoringError> {
        if self.config.missing_attempts != MissingAttemptPolicy::Reject {
            return None;
        }
        let expected = definition.attempts_count?;
        (valid_attempts < expected).then(|| ScoringError::MissingAttempt {
            competitor_id: competitor_id.to_string(),
            detail: format!("{valid_attempts} of {expected} valid attempts"),
        })
    }

    /// Ranks scored results and orders the list ranked-first.
    fn assign_ranks(&self, definition: &CompetitionDefinition, results: &mut [IndividualResult]) {
        let scored: Vec<usize> = results
            .iter()
            .enumerate()
            .filter(|(_, r)| r.status == ResultStatus::Scored)
            .map(|(i, _)| i)
            .collect();

        let ascending = definition.ranks_ascending();
        let ranks = {
            let results = &*results;
            self.ranker.rank(
                &scored,
                |&i| {
                    let value = results[i].aggregate_value.unwrap_or(f64::NEG_INFINITY);
                    if ascending {
                        -value
                    } else {
                        value
                    }
                },
                |&a, &b| {
                    resolve(
                        definition.tie_break,
                        results[a].tie_break_key,
                        results[b].tie_break_key,
                    )
                },
            )
        };
        for (&i, rank) in scored.iter().zip(ranks) {
            results[i].rank = Some(rank);
        }

        results.sort_by(|a, b| {
            rank_order(a.rank, b.rank).then_with(|| a.competitor_id.cmp(&b.competitor_id))
        });
    }
}

/// Ranked before unranked, then by rank.
fn rank_order(a: Option<u32>, b: Option<u32>) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Rejects attempt sets that no aggregation can interpret: numbers outside
/// `1..=attemptsCount`, the same number twice for one competitor, and
/// non-finite tie-break keys.
fn check_attempts(definition: &CompetitionDefinition, attempts: &[&Attempt]) -> Result<()> {
    let mut seen: BTreeSet<(&str, u32)> = BTreeSet::new();
    for attempt in attempts {
        let competitor = attempt.competitor_id.as_str();
        let number = attempt.attempt_number;
        if number == 0 {
            return Err(ScoringError::attempt(
                &definition.id,
                format!("competitor '{competitor}' has attempt number 0, numbering starts at 1"),
            ));
        }
        if let Some(expected) = definition.attempts_count {
            if number > expected {
                return Err(ScoringError::attempt(
                    &definition.id,
                    format!(
                        "competitor '{competitor}' attempt {number} exceeds attemptsCount {expected}"
                    ),
                ));
            }
        }
        if !seen.insert((competitor, number)) {
            return Err(ScoringError::attempt(
                &definition.id,
                format!("competitor '{competitor}' has attempt {number} recorded twice"),
            ));
        }
        if attempt.tie_break_key.is_some_and(|k| !k.is_finite()) {
            return Err(ScoringError::attempt(
                &definition.id,
                format!("competitor '{competitor}' attempt {number} has a non-finite tie-break key"),
            ));
        }
    }
    Ok(())
}
