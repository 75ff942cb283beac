//! Random-walk parameter search.
//!
//! The fitter keeps a best-known (q, b, v) triple and repeatedly derives
//! a candidate from it: each parameter is independently selected by a
//! fair coin flip and, when selected, multiplied by a jitter factor
//! drawn from N(1, sigma). Candidates scoring no worse than the best are
//! adopted; adopting *equal* scores lets the search random-walk across
//! plateaus instead of pinning to the first point of a flat region.
//!
//! The search ends either when a candidate reproduces the table exactly
//! (score 0, [`FitOutcome::Converged`]) or when the iteration budget is
//! spent ([`FitOutcome::Exhausted`]); both carry the best fit found.

use rand_distr::Normal;

use opamp_core::types::{ReferenceTable, Score};
use opamp_models::logistic::{GeneralisedLogistic, LogisticParams};

use crate::error::OptimiserError;
use crate::rng::FitRng;
use crate::scoring::score;

/// Floor applied to q and v when a jitter pushes them non-positive.
///
/// The logistic is only well-formed for positive q and v; b may take
/// any sign, so it is never clamped.
const POSITIVITY_FLOOR: f64 = 1e-6;

/// Identity of one fitted parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamId {
    /// Asymptote-approach parameter q
    Q,
    /// Growth-rate parameter b
    B,
    /// Asymmetry exponent v
    V,
}

impl ParamId {
    /// All parameters, in candidate-generation order.
    pub const ALL: [ParamId; 3] = [ParamId::Q, ParamId::B, ParamId::V];

    /// Reads this parameter out of a triple.
    pub fn get(self, params: &LogisticParams) -> f64 {
        match self {
            ParamId::Q => params.q,
            ParamId::B => params.b,
            ParamId::V => params.v,
        }
    }

    /// Writes this parameter into a triple.
    pub fn set(self, params: &mut LogisticParams, value: f64) {
        match self {
            ParamId::Q => params.q = value,
            ParamId::B => params.b = value,
            ParamId::V => params.v = value,
        }
    }

    /// Whether the curve requires this parameter to stay positive.
    fn requires_positive(self) -> bool {
        !matches!(self, ParamId::B)
    }
}

impl std::fmt::Display for ParamId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParamId::Q => write!(f, "q"),
            ParamId::B => write!(f, "b"),
            ParamId::V => write!(f, "v"),
        }
    }
}

/// Search settings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonteCarloConfig {
    /// Hard budget on candidate evaluations.
    pub max_iterations: u64,
    /// Width of the multiplicative jitter N(1, sigma).
    pub sigma: f64,
}

impl Default for MonteCarloConfig {
    fn default() -> Self {
        Self {
            max_iterations: 10_000_000,
            sigma: 1e-4,
        }
    }
}

/// The best fit a search produced.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Fit {
    /// Best parameter triple found
    pub params: LogisticParams,
    /// Its score against the reference table
    pub score: Score,
    /// Candidate evaluations consumed
    pub iterations: u64,
}

/// How a search ended.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FitOutcome {
    /// A candidate reproduced the table exactly (score 0).
    Converged(Fit),
    /// The iteration budget ran out; the fit is the best found so far.
    Exhausted(Fit),
}

impl FitOutcome {
    /// The best fit, however the search ended.
    pub fn fit(&self) -> &Fit {
        match self {
            FitOutcome::Converged(fit) | FitOutcome::Exhausted(fit) => fit,
        }
    }

    /// Consumes the outcome, yielding the fit.
    pub fn into_fit(self) -> Fit {
        match self {
            FitOutcome::Converged(fit) | FitOutcome::Exhausted(fit) => fit,
        }
    }

    /// Whether the search hit an exact reproduction of the table.
    pub fn is_converged(&self) -> bool {
        matches!(self, FitOutcome::Converged(_))
    }
}

/// Observer of search progress; called on every strict improvement.
pub trait ProgressSink {
    /// A candidate strictly improved on the previous best.
    fn improved(&mut self, iteration: u64, params: &LogisticParams, score: Score);
}

/// Discards progress events.
pub struct NullSink;

impl ProgressSink for NullSink {
    fn improved(&mut self, _iteration: u64, _params: &LogisticParams, _score: Score) {}
}

/// Reports progress through `tracing` at INFO level.
pub struct TracingSink;

impl ProgressSink for TracingSink {
    fn improved(&mut self, iteration: u64, params: &LogisticParams, score: Score) {
        tracing::info!(
            iteration,
            q = params.q,
            b = params.b,
            v = params.v,
            score = %score,
            "new best fit"
        );
    }
}

/// The random-walk fitter.
///
/// # Examples
///
/// ```rust
/// use opamp_core::types::ReferenceTable;
/// use opamp_models::logistic::LogisticParams;
/// use opamp_optimiser::monte_carlo::{MonteCarloConfig, MonteCarloFitter, NullSink};
/// use opamp_optimiser::rng::FitRng;
///
/// let table = ReferenceTable::from_pairs(&[(1.0, 10.0), (5.0, 5.0), (10.0, 1.0)]).unwrap();
/// let config = MonteCarloConfig { max_iterations: 10_000, sigma: 0.01 };
/// let fitter = MonteCarloFitter::new(config).unwrap();
///
/// let mut rng = FitRng::from_seed(1);
/// let outcome = fitter.fit(&table, LogisticParams::reset(), &mut rng, &mut NullSink);
/// assert!(outcome.fit().score.error.is_finite());
/// ```
#[derive(Debug, Clone)]
pub struct MonteCarloFitter {
    config: MonteCarloConfig,
    jitter: Normal<f64>,
}

impl MonteCarloFitter {
    /// Builds a fitter, validating the configuration.
    pub fn new(config: MonteCarloConfig) -> Result<Self, OptimiserError> {
        if config.max_iterations == 0 {
            return Err(OptimiserError::ZeroBudget);
        }
        if !(config.sigma.is_finite() && config.sigma > 0.0) {
            return Err(OptimiserError::InvalidSigma {
                sigma: config.sigma,
            });
        }
        let jitter = Normal::new(1.0, config.sigma).map_err(|_| OptimiserError::InvalidSigma {
            sigma: config.sigma,
        })?;
        Ok(Self { config, jitter })
    }

    /// The settings in use.
    pub fn config(&self) -> MonteCarloConfig {
        self.config
    }

    /// Derives a candidate from `best`, guaranteed to touch at least
    /// one parameter.
    fn perturb(&self, best: LogisticParams, rng: &mut FitRng) -> LogisticParams {
        loop {
            let mut candidate = best;
            let mut changed = false;
            for id in ParamId::ALL {
                if !rng.coin_flip() {
                    continue;
                }
                let mut value = id.get(&candidate) * rng.sample(&self.jitter);
                if id.requires_positive() && value <= 0.0 {
                    value = POSITIVITY_FLOOR;
                }
                id.set(&mut candidate, value);
                changed = true;
            }
            if changed {
                return candidate;
            }
        }
    }

    /// Runs the search from `start` against `reference`.
    ///
    /// Every candidate is derived from the current best (not from the
    /// previous candidate), so the walk can only drift through
    /// parameter space via adopted candidates. The adopted score is
    /// monotonically non-increasing.
    pub fn fit(
        &self,
        reference: &ReferenceTable,
        start: LogisticParams,
        rng: &mut FitRng,
        sink: &mut dyn ProgressSink,
    ) -> FitOutcome {
        let mut best = start;
        let mut best_score = score(&GeneralisedLogistic::anchored(best, reference), reference);

        if best_score.is_perfect() {
            return FitOutcome::Converged(Fit {
                params: best,
                score: best_score,
                iterations: 0,
            });
        }

        for iteration in 1..=self.config.max_iterations {
            let candidate = self.perturb(best, rng);
            let candidate_score =
                score(&GeneralisedLogistic::anchored(candidate, reference), reference);

            // NaN scores fail this comparison and are discarded.
            if !(candidate_score.error <= best_score.error) {
                continue;
            }

            let strictly_better = candidate_score.is_better_than(best_score);
            best = candidate;
            best_score = candidate_score;

            if strictly_better {
                sink.improved(iteration, &best, best_score);
            }
            if best_score.is_perfect() {
                return FitOutcome::Converged(Fit {
                    params: best,
                    score: best_score,
                    iterations: iteration,
                });
            }
        }

        FitOutcome::Exhausted(Fit {
            params: best,
            score: best_score,
            iterations: self.config.max_iterations,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fitter(sigma: f64) -> MonteCarloFitter {
        MonteCarloFitter::new(MonteCarloConfig {
            max_iterations: 1_000,
            sigma,
        })
        .unwrap()
    }

    #[test]
    fn test_param_id_get_set_roundtrip() {
        let mut params = LogisticParams::new(0.5, -2.0, 3.0);
        for id in ParamId::ALL {
            let original = id.get(&params);
            id.set(&mut params, original * 2.0);
            assert_eq!(id.get(&params), original * 2.0);
        }
    }

    #[test]
    fn test_param_id_display() {
        let names: Vec<String> = ParamId::ALL.iter().map(|id| id.to_string()).collect();
        assert_eq!(names, ["q", "b", "v"]);
    }

    #[test]
    fn test_perturb_always_changes_something() {
        let fitter = fitter(0.01);
        let mut rng = FitRng::from_seed(3);
        let best = LogisticParams::reset();
        for _ in 0..1_000 {
            let candidate = fitter.perturb(best, &mut rng);
            assert_ne!(candidate, best);
        }
    }

    #[test]
    fn test_perturb_clamps_q_and_v_but_not_b() {
        // Start from non-positive q and v: the first jitter that touches
        // them lands non-positive and must be floored. b stays negative.
        let fitter = fitter(0.01);
        let mut rng = FitRng::from_seed(11);
        let best = LogisticParams::new(-1.0, -1.0, -1.0);
        let mut saw_q = false;
        let mut saw_v = false;
        while !(saw_q && saw_v) {
            let candidate = fitter.perturb(best, &mut rng);
            if candidate.q != best.q {
                assert_eq!(candidate.q, POSITIVITY_FLOOR);
                saw_q = true;
            }
            if candidate.v != best.v {
                assert_eq!(candidate.v, POSITIVITY_FLOOR);
                saw_v = true;
            }
            if candidate.b != best.b {
                assert!(candidate.b < 0.0, "b must not be clamped: {}", candidate.b);
            }
        }
    }

    #[test]
    fn test_perturb_is_deterministic_per_seed() {
        let fitter = fitter(0.01);
        let best = LogisticParams::reset();
        let mut a = FitRng::from_seed(21);
        let mut b = FitRng::from_seed(21);
        for _ in 0..100 {
            assert_eq!(fitter.perturb(best, &mut a), fitter.perturb(best, &mut b));
        }
    }

    #[test]
    fn test_config_validation() {
        assert_eq!(
            MonteCarloFitter::new(MonteCarloConfig {
                max_iterations: 0,
                sigma: 0.01
            })
            .unwrap_err(),
            OptimiserError::ZeroBudget
        );
        assert_eq!(
            MonteCarloFitter::new(MonteCarloConfig {
                max_iterations: 1,
                sigma: 0.0
            })
            .unwrap_err(),
            OptimiserError::InvalidSigma { sigma: 0.0 }
        );
        assert!(MonteCarloFitter::new(MonteCarloConfig {
            max_iterations: 1,
            sigma: f64::NAN
        })
        .is_err());
    }

    #[test]
    fn test_default_config() {
        let config = MonteCarloConfig::default();
        assert_eq!(config.max_iterations, 10_000_000);
        assert_eq!(config.sigma, 1e-4);
    }
}
