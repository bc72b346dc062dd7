//! Batch recompute pipeline.
//!
//! [`ScoringEngine::recompute`] takes an [`EventSnapshot`] (competition
//! records, attempts, athletes) and derives every result from scratch:
//!
//! 1. resolve each competition record into a validated definition
//! 2. normalize and aggregate each competitor's attempts
//! 3. rank competitors, resolving ties by the secondary key
//! 4. convert ranks into per-competition team points
//! 5. sum team points into event standings
//!
//! Steps 1 to 4 fan out per competition (on rayon with the `parallel`
//! feature). A competition that fails is listed in
//! [`ScoringBatch::failed`] and contributes nothing to the standings.
//!
//! # Key Types
//!
//! - [`EngineConfig`]: tie epsilon, default points table, missing-attempt
//!   policy, team tie-break criteria
//! - [`ScoringEngine`]: runs the pipeline
//! - [`ScoringBatch`]: succeeded results and per-competition failures

mod config;
mod runner;
mod types;

pub use config::{EngineConfig, MissingAttemptPolicy};
pub use runner::{CompetitionOutcome, ScoringEngine};
pub use types::{CompetitionFailure, EventSnapshot, ScoringBatch};
