//! Secondary-key tie resolution.

use crate::model::TieBreakRule;
use std::cmp::Ordering;

/// Orders two entries whose primary values are equal.
///
/// Returns [`Ordering::Less`] when `a` ranks above `b`. Under
/// [`TieBreakRule::LowerKeyWins`] the smaller key wins, regardless of the
/// primary metric's direction, and an entry with a recorded key ranks above
/// one without. Entries without keys, or under [`TieBreakRule::None`],
/// stay tied.
pub fn resolve(rule: TieBreakRule, a_key: Option<f64>, b_key: Option<f64>) -> Ordering {
    match (rule, a_key, b_key) {
        (TieBreakRule::None, _, _) => Ordering::Equal,
        (TieBreakRule::LowerKeyWins, Some(a), Some(b)) => a.total_cmp(&b),
        (TieBreakRule::LowerKeyWins, Some(_), None) => Ordering::Less,
        (TieBreakRule::LowerKeyWins, None, Some(_)) => Ordering::Greater,
        (TieBreakRule::LowerKeyWins, None, None) => Ordering::Equal,
    }
}
