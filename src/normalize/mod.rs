//! Metric normalization.
//!
//! Turns raw measurements into comparable values where **larger is always
//! better**. Time is the only lower-is-better metric and is negated here,
//! so aggregation and ranking never special-case direction again.
//! Penalties from [`PenaltyRules`] are applied in the metric's unit before
//! the sign flip.

mod normalizer;
mod penalty;

pub use normalizer::{comparable, normalize};
pub use penalty::PenaltyRules;
