//! Direction-normalized comparable values.

use crate::error::{Result, ScoringError};
use crate::model::{Attempt, CompetitionDefinition, MetricType};

/// Converts an attempt into a comparable value where larger is better.
///
/// - `points`, `distance`, `count`, `accuracy`: `raw - penalty`
/// - `time`: `-(raw + penalty)`, so a shorter time is a larger value
///
/// Competitions that rank ascending (closest-to-target top-N) use
/// `raw + penalty` for every metric instead: smaller is better there, and
/// a penalty moves the attempt away from the target.
///
/// # Errors
///
/// - [`ScoringError::DisqualifiedOrAbsent`] for dns, dq and dnf attempts
/// - [`ScoringError::MissingAttempt`] for a valid attempt with no recorded
///   value
/// - [`ScoringError::InvalidAttempt`] for a non-finite recorded value
///
/// Only the last one is fatal for the competition.
pub fn normalize(attempt: &Attempt, definition: &CompetitionDefinition) -> Result<f64> {
    if !attempt.status.is_valid() {
        return Err(ScoringError::DisqualifiedOrAbsent {
            status: attempt.status,
        });
    }
    let raw = attempt.raw_value.ok_or_else(|| ScoringError::MissingAttempt {
        competitor_id: attempt.competitor_id.clone(),
        detail: format!("attempt {} has no recorded value", attempt.attempt_number),
    })?;
    if !raw.is_finite() {
        return Err(ScoringError::attempt(
            &definition.id,
            format!(
                "competitor '{}' attempt {} has non-finite value {raw}",
                attempt.competitor_id, attempt.attempt_number
            ),
        ));
    }

    let penalty = definition.penalty_rules.total(&attempt.infractions);
    if definition.ranks_ascending() {
        return Ok(raw + penalty);
    }
    Ok(comparable(raw, penalty, definition.metric_type))
}

/// Applies the penalty and the direction convention to a raw value.
pub fn comparable(raw: f64, penalty: f64, metric: MetricType) -> f64 {
    if metric.higher_is_better() {
        raw - penalty
    } else {
        -(raw + penalty)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{AggregationType, AttemptStatus};
    use crate::formula::{ScoringFormula, TopNFormula};
    use crate::normalize::PenaltyRules;

    fn def(metric: MetricType) -> CompetitionDefinition {
        CompetitionDefinition::new("c", metric, AggregationType::Sum)
    }

    #[test]
    fn test_points_pass_through() {
        let a = Attempt::valid("a", "c", 1, 9.0);
        assert!((normalize(&a, &def(MetricType::Points)).unwrap() - 9.0).abs() < 1e-10);
    }

    #[test]
    fn test_time_is_negated() {
        let fast = Attempt::valid("a", "c", 1, 58.9);
        let slow = Attempt::valid("a", "c", 2, 61.2);
        let d = def(MetricType::Time);
        let vf = normalize(&fast, &d).unwrap();
        let vs = normalize(&slow, &d).unwrap();
        assert!((vf + 58.9).abs() < 1e-10);
        assert!(vf > vs);
    }

    #[test]
    fn test_penalty_subtracted_for_points() {
        let d = def(MetricType::Points).with_penalty_rules(PenaltyRules::new().with_rule("cone", 5.0));
        let a = Attempt::valid("a", "c", 1, 50.0).with_infraction("cone", 2);
        assert!((normalize(&a, &d).unwrap() - 40.0).abs() < 1e-10);
    }

    #[test]
    fn test_penalty_added_to_time() {
        let d = def(MetricType::Time).with_penalty_rules(PenaltyRules::new().with_rule("cone", 5.0));
        let a = Attempt::valid("a", "c", 1, 30.0).with_infraction("cone", 1);
        // 30s + 5s penalty = 35s elapsed
        assert!((normalize(&a, &d).unwrap() + 35.0).abs() < 1e-10);
    }

    #[test]
    fn test_closest_to_target_adds_penalty() {
        let d = CompetitionDefinition::new("darts", MetricType::Distance, AggregationType::TopN)
            .with_formula(ScoringFormula::TopN(TopNFormula::new(1).reversed()))
            .with_penalty_rules(PenaltyRules::new().with_rule("line_foul", 5.0));
        let fouled = Attempt::valid("a", "darts", 1, 6.0).with_infraction("line_foul", 1);
        let clean = Attempt::valid("b", "darts", 1, 4.0);
        assert!((normalize(&fouled, &d).unwrap() - 11.0).abs() < 1e-10);
        assert!((normalize(&clean, &d).unwrap() - 4.0).abs() < 1e-10);
    }

    #[test]
    fn test_closest_to_target_time_keeps_raw_sign() {
        let d = CompetitionDefinition::new("split", MetricType::Time, AggregationType::TopN)
            .with_formula(ScoringFormula::TopN(TopNFormula::new(2).reversed()));
        let a = Attempt::valid("a", "split", 1, 30.5);
        assert!((normalize(&a, &d).unwrap() - 30.5).abs() < 1e-10);
    }

    #[test]
    fn test_excluded_statuses() {
        for status in [AttemptStatus::Dns, AttemptStatus::Dq, AttemptStatus::Dnf] {
            let mut a = Attempt::excluded("a", "c", 1, status);
            a.raw_value = Some(100.0); // a recorded value never leaks through
            match normalize(&a, &def(MetricType::Points)) {
                Err(ScoringError::DisqualifiedOrAbsent { status: s }) => assert_eq!(s, status),
                other => panic!("expected DisqualifiedOrAbsent, got {other:?}"),
            }
        }
    }

    #[test]
    fn test_valid_without_value_is_missing() {
        let mut a = Attempt::valid("a", "c", 3, 0.0);
        a.raw_value = None;
        let err = normalize(&a, &def(MetricType::Count)).unwrap_err();
        assert!(matches!(err, ScoringError::MissingAttempt { .. }));
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_non_finite_is_fatal() {
        let a = Attempt::valid("a", "c", 1, f64::NAN);
        let err = normalize(&a, &def(MetricType::Distance)).unwrap_err();
        assert!(err.is_fatal());
    }
}
