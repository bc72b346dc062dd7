//! Competition data model.
//!
//! - [`CompetitionRecord`] / [`CompetitionDefinition`]: raw and validated
//!   competition configuration
//! - [`Attempt`], [`Athlete`]: read-only inputs from the judging workflow
//! - [`IndividualResult`], [`TeamResult`]: derived outputs, recomputed in
//!   full on every run

mod definition;
mod records;
mod types;

pub use definition::{CompetitionDefinition, CompetitionRecord};
pub use records::{Athlete, Attempt, IndividualResult, ResultStatus, TeamResult};
pub use types::{AggregationType, AttemptStatus, MetricType, TieBreakRule};
