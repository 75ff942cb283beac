//! Fit scoring.
//!
//! A candidate curve is scored against the measured reference table as
//! the root of the summed squared relative errors:
//!
//! ```text
//! score = sqrt( Σᵢ ((predictedᵢ − measuredᵢ) / measuredᵢ)² )
//! ```
//!
//! The sum is deliberately not divided by the point count: scores are
//! only ever compared against the same table, and keeping the raw sum
//! preserves the historical score values reported for the measured
//! chips.

use opamp_core::types::{ReferenceTable, Score};
use opamp_models::logistic::GeneralisedLogistic;

/// Scores `curve` against every point of `reference`.
///
/// Lower is better; exactly 0 means the curve reproduces the table
/// bit-for-bit.
///
/// # Examples
///
/// ```rust
/// use opamp_core::types::ReferenceTable;
/// use opamp_models::logistic::{GeneralisedLogistic, LogisticParams};
/// use opamp_optimiser::scoring::score;
///
/// let table = ReferenceTable::from_pairs(&[(1.0, 10.0), (5.0, 5.0), (10.0, 1.0)]).unwrap();
/// let curve = GeneralisedLogistic::anchored(LogisticParams::reset(), &table);
/// assert!(score(&curve, &table).error > 0.0);
/// ```
pub fn score(curve: &GeneralisedLogistic, reference: &ReferenceTable) -> Score {
    let sum: f64 = reference
        .iter()
        .map(|point| {
            let relative = (curve.predict(point.vin) - point.vout) / point.vout;
            relative * relative
        })
        .sum();
    Score::new(sum.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use opamp_models::logistic::LogisticParams;

    #[test]
    fn test_exact_reproduction_scores_zero() {
        // q = 0 degenerates the logistic to a constant at Vmax, so a
        // table of constant Vout is reproduced exactly.
        let table =
            ReferenceTable::from_pairs(&[(1.0, 4.0), (2.0, 4.0), (3.0, 4.0)]).unwrap();
        let curve =
            GeneralisedLogistic::with_asymptotes(LogisticParams::new(0.0, 1.0, 1.0), 1.0, 4.0);
        let s = score(&curve, &table);
        assert!(s.is_perfect(), "score = {}", s);
    }

    #[test]
    fn test_known_relative_errors() {
        // Constant prediction of 4.0 against measurements (4.0, 2.0):
        // relative errors 0 and 1, score = sqrt(0 + 1) = 1.
        let table = ReferenceTable::from_pairs(&[(1.0, 4.0), (2.0, 2.0)]).unwrap();
        let curve =
            GeneralisedLogistic::with_asymptotes(LogisticParams::new(0.0, 1.0, 1.0), 1.0, 4.0);
        assert_relative_eq!(score(&curve, &table).error, 1.0);
    }

    #[test]
    fn test_sum_is_not_averaged() {
        // Three points each with relative error 1 give sqrt(3), not 1.
        let table =
            ReferenceTable::from_pairs(&[(1.0, 2.0), (2.0, 2.0), (3.0, 2.0)]).unwrap();
        let curve =
            GeneralisedLogistic::with_asymptotes(LogisticParams::new(0.0, 1.0, 1.0), 1.0, 4.0);
        assert_relative_eq!(score(&curve, &table).error, 3.0_f64.sqrt());
    }

    #[test]
    fn test_closer_curve_scores_lower() {
        let table =
            ReferenceTable::from_pairs(&[(0.81, 10.31), (4.54, 4.54), (10.31, 0.81)]).unwrap();
        let near = GeneralisedLogistic::anchored(
            LogisticParams::new(5.5285312141864937e-5, 2.1608922897100533, 0.67181935418132133),
            &table,
        );
        let far = GeneralisedLogistic::anchored(LogisticParams::reset(), &table);
        assert!(score(&near, &table).is_better_than(score(&far, &table)));
    }
}
