//! Attempt aggregation.
//!
//! Collapses one competitor's attempts into a single aggregate in
//! comparable-value space (larger is better):
//!
//! - **sum**: every valid value; excluded attempts contribute nothing
//! - **best_attempt**: the maximum
//! - **average**: mean over valid attempts only
//! - **top_n**: the N best values, or the N smallest with `reverse`
//! - **drop_worst**: sum minus the single minimum
//!
//! Because the normalizer already flipped lower-is-better metrics, "best"
//! is the maximum here. Closest-to-target competitions are the exception:
//! their values arrive as `raw + penalty`, smaller is better, and reverse
//! top-N takes the smallest.

mod aggregator;

pub use aggregator::{aggregate, aggregate_values};
