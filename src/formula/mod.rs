//! Scoring formula resolution.
//!
//! Competitions carry their formula as declarative JSON. It is parsed into a
//! tagged [`ScoringFormula`] when the competition definition is resolved:
//!
//! - **Position points**: a custom [`PositionPointsTable`] mapping final
//!   rank to team points, optionally ending in an "and above" catch-all.
//! - **Top N**: [`TopNFormula`] parameters for the `top_n` aggregation.
//!
//! Competitions without a points table score with the engine-wide default
//! (`PositionPointsTable::default()`).

mod config;
mod table;

pub use config::{ScoringFormula, TopNFormula};
pub use table::{PositionEntry, PositionPointsTable};
