//! Team scoring.
//!
//! Each ranked result earns its team points from the competition's
//! [`PositionPointsTable`](crate::formula::PositionPointsTable)
//! ([`score_competition`]). Per-competition totals are then summed into
//! event standings and re-ranked like any other scalar ([`score_event`]),
//! with optional [`TeamTieBreak`] criteria for equal totals.

mod criteria;
mod scorer;

pub use criteria::{compare_standings, TeamStanding, TeamTieBreak};
pub use scorer::{score_competition, score_event, TeamRoster};
