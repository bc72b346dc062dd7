//! Aggregation strategies.

use crate::error::{Result, ScoringError};
use crate::formula::TopNFormula;
use crate::model::{AggregationType, CompetitionDefinition};

const MISSING_TOP_N: &str = "top_n aggregation requires a top_n scoring formula";

/// Collapses a competitor's comparable values using the competition's
/// aggregation strategy.
///
/// `values` holds the comparable values of valid attempts only, in attempt
/// order. Returns `Ok(None)` when there is nothing to aggregate.
///
/// # Errors
///
/// [`ScoringError::InvalidConfiguration`] when `top_n` aggregation has no
/// top-N parameters.
pub fn aggregate(values: &[f64], definition: &CompetitionDefinition) -> Result<Option<f64>> {
    aggregate_values(values, definition.aggregation_type, definition.top_n())
        .map_err(|e| ScoringError::config(&definition.id, e))
}

/// Strategy dispatch without competition context.
pub fn aggregate_values(
    values: &[f64],
    aggregation: AggregationType,
    top_n: Option<&TopNFormula>,
) -> std::result::Result<Option<f64>, String> {
    if aggregation == AggregationType::TopN && top_n.is_none() {
        return Err(MISSING_TOP_N.into());
    }
    if values.is_empty() {
        return Ok(None);
    }

    let value = match aggregation {
        AggregationType::Sum => sum(values),
        AggregationType::BestAttempt => best(values),
        AggregationType::Average => average(values),
        AggregationType::DropWorst => drop_worst(values),
        AggregationType::TopN => {
            let params = top_n.ok_or(MISSING_TOP_N)?;
            sum_top_n(values, params.top_n as usize, params.reverse)
        }
    };
    Ok(Some(value))
}

fn sum(values: &[f64]) -> f64 {
    values.iter().sum()
}

fn best(values: &[f64]) -> f64 {
    values.iter().copied().fold(f64::NEG_INFINITY, f64::max)
}

fn average(values: &[f64]) -> f64 {
    sum(values) / values.len() as f64
}

/// Sum minus the single worst value. A lone value drops to zero.
fn drop_worst(values: &[f64]) -> f64 {
    let worst = values.iter().copied().fold(f64::INFINITY, f64::min);
    sum(values) - worst
}

/// Sum of the `n` best values; with `reverse`, the `n` smallest.
fn sum_top_n(values: &[f64], n: usize, reverse: bool) -> f64 {
    let mut sorted = values.to_vec();
    if reverse {
        sorted.sort_by(|a, b| a.total_cmp(b));
    } else {
        sorted.sort_by(|a, b| b.total_cmp(a));
    }
    sorted.iter().take(n).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::ScoringFormula;
    use crate::model::MetricType;
    use crate::normalize::comparable;

    fn agg(values: &[f64], aggregation: AggregationType) -> f64 {
        aggregate_values(values, aggregation, None).unwrap().unwrap()
    }

    #[test]
    fn test_sum_pistol_and_rifle() {
        // pistol [8,9,10,9,8] + rifle [7,8,9,8,7]
        let values = [8.0, 9.0, 10.0, 9.0, 8.0, 7.0, 8.0, 9.0, 8.0, 7.0];
        assert!((agg(&values, AggregationType::Sum) - 83.0).abs() < 1e-10);
    }

    #[test]
    fn test_best_attempt_time_picks_fastest() {
        let values: Vec<f64> = [61.2, 58.9, 60.0]
            .iter()
            .map(|&t| comparable(t, 0.0, MetricType::Time))
            .collect();
        let best = agg(&values, AggregationType::BestAttempt);
        assert!((best + 58.9).abs() < 1e-10);
    }

    #[test]
    fn test_average_over_valid_only() {
        assert!((agg(&[6.0, 8.0], AggregationType::Average) - 7.0).abs() < 1e-10);
    }

    #[test]
    fn test_top_n_reverse_closest_to_target() {
        let params = TopNFormula::new(2).reversed();
        let result = aggregate_values(&[12.0, 4.0, 9.0, 30.0], AggregationType::TopN, Some(&params))
            .unwrap()
            .unwrap();
        assert!((result - 13.0).abs() < 1e-10);
    }

    #[test]
    fn test_top_n_descending() {
        let params = TopNFormula::new(2);
        let result = aggregate_values(&[12.0, 4.0, 9.0, 30.0], AggregationType::TopN, Some(&params))
            .unwrap()
            .unwrap();
        assert!((result - 42.0).abs() < 1e-10);
    }

    #[test]
    fn test_top_n_larger_than_attempts_sums_all() {
        let params = TopNFormula::new(5);
        let result = aggregate_values(&[1.0, 2.0], AggregationType::TopN, Some(&params))
            .unwrap()
            .unwrap();
        assert!((result - 3.0).abs() < 1e-10);
    }

    #[test]
    fn test_drop_worst() {
        assert!((agg(&[5.0, 7.0, 3.0, 8.0], AggregationType::DropWorst) - 20.0).abs() < 1e-10);
    }

    #[test]
    fn test_drop_worst_single_value() {
        assert_eq!(agg(&[5.0], AggregationType::DropWorst), 0.0);
    }

    #[test]
    fn test_empty_is_no_score() {
        for aggregation in [
            AggregationType::Sum,
            AggregationType::BestAttempt,
            AggregationType::Average,
            AggregationType::DropWorst,
        ] {
            assert_eq!(aggregate_values(&[], aggregation, None), Ok(None));
        }
    }

    #[test]
    fn test_top_n_without_params_is_config_error() {
        let mut def = CompetitionDefinition::new("darts", MetricType::Points, AggregationType::TopN);
        let err = aggregate(&[1.0], &def).unwrap_err();
        assert!(matches!(err, ScoringError::InvalidConfiguration { .. }));

        def = def.with_formula(ScoringFormula::TopN(TopNFormula::new(1)));
        assert_eq!(aggregate(&[1.0, 3.0], &def), Ok(Some(3.0)));
    }
}
