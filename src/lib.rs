//! Competition scoring and ranking engine.
//!
//! Turns raw per-attempt measurements into individual results, resolves
//! ties, converts individual ranks into team points through a configurable
//! position-points table, and produces per-competition and event-level team
//! standings.
//!
//! - **Normalize** ([`normalize`]): penalties and metric direction, so
//!   larger is always better downstream.
//! - **Aggregate** ([`aggregate`]): sum, best attempt, average, top-N and
//!   drop-worst strategies.
//! - **Rank** ([`ranking`]): standard competition ranking with epsilon
//!   equality and secondary-key tie-breaks.
//! - **Formulas** ([`formula`]): declarative position-points tables and
//!   top-N parameters, parsed once from JSON.
//! - **Team** ([`team`]): rank-to-points conversion and event standings.
//! - **Engine** ([`engine`]): the batch recompute over a whole event.
//!
//! # Architecture
//!
//! The crate is a pure, synchronous library. It owns no storage and no
//! transport; callers hand it an [`engine::EventSnapshot`] and persist the
//! returned [`engine::ScoringBatch`]. Logging goes through `tracing`; the
//! caller installs the subscriber.

pub mod aggregate;
pub mod engine;
pub mod error;
pub mod formula;
pub mod model;
pub mod normalize;
pub mod ranking;
pub mod team;

pub use engine::{EngineConfig, EventSnapshot, ScoringBatch, ScoringEngine};
pub use error::{Result, ScoringError};
