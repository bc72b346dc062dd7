//! Individual ranking and tie resolution.
//!
//! [`Ranker`] orders direction-normalized scalars (larger first) into
//! standard competition ranks. Equal values go to a tie-break comparator;
//! [`resolve`] is the secondary-key comparator used for individual results.
//! Event team totals reuse the same ranker with team criteria.

mod ranker;
mod tie_break;

pub use ranker::Ranker;
pub use tie_break::resolve;
