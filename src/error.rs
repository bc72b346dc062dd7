//! Error taxonomy for the scoring pipeline.
//!
//! Every error is scoped to a single competition. The pipeline reports
//! configuration and attempt errors per competition and keeps scoring the
//! rest of the event; [`ScoringError::MissingAttempt`] and
//! [`ScoringError::DisqualifiedOrAbsent`] are attempt-level outcomes that
//! never fail a competition.

use crate::model::AttemptStatus;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, ScoringError>;

/// Errors raised while resolving definitions or scoring attempts.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ScoringError {
    /// Unknown enum value, malformed formula JSON, or a points table that
    /// cannot answer a rank. Fatal for the competition.
    #[error("invalid configuration for competition '{competition_id}': {reason}")]
    InvalidConfiguration {
        competition_id: String,
        reason: String,
    },

    /// Attempt records that cannot be interpreted (duplicate
    /// attempt numbers, attempt numbers out of range). Fatal for the
    /// competition.
    #[error("invalid attempt data for competition '{competition_id}': {reason}")]
    InvalidAttempt {
        competition_id: String,
        reason: String,
    },

    /// Engine-wide configuration rejected before any competition is scored.
    #[error("invalid engine configuration: {0}")]
    InvalidEngineConfig(String),

    /// Attempts reference a competition that the snapshot does not define.
    #[error("attempts reference unknown competition '{competition_id}'")]
    UnknownCompetition { competition_id: String },

    /// A valid attempt carries no measurement, or a competitor has fewer
    /// valid attempts than the competition expects.
    #[error("competitor '{competitor_id}' is missing attempts: {detail}")]
    MissingAttempt {
        competitor_id: String,
        detail: String,
    },

    /// The attempt was not a valid performance (dns, dq, dnf).
    #[error("attempt excluded from scoring: {status}")]
    DisqualifiedOrAbsent { status: AttemptStatus },
}

impl ScoringError {
    pub(crate) fn config(competition_id: &str, reason: impl Into<String>) -> Self {
        ScoringError::InvalidConfiguration {
            competition_id: competition_id.to_string(),
            reason: reason.into(),
        }
    }

    pub(crate) fn attempt(competition_id: &str, reason: impl Into<String>) -> Self {
        ScoringError::InvalidAttempt {
            competition_id: competition_id.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns `true` if this error fails the whole competition rather than
    /// a single attempt or competitor.
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            ScoringError::InvalidConfiguration { .. }
                | ScoringError::InvalidEngineConfig(_)
                | ScoringError::InvalidAttempt { .. }
                | ScoringError::UnknownCompetition { .. }
        )
    }
}
