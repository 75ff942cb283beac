//! Solver configuration types.

use num_traits::Float;

/// Configuration for root-finding algorithms.
///
/// # Type Parameters
///
/// * `T` - Floating-point type for tolerance (e.g., `f64`)
///
/// # Example
///
/// ```
/// use opamp_core::math::solvers::SolverConfig;
///
/// // Use default configuration
/// let config: SolverConfig<f64> = SolverConfig::default();
/// assert!(config.tolerance < 1e-8);
///
/// // The loose tolerance used by the op-amp equilibrium solvers
/// let loose = SolverConfig::new(1e-4, 100);
/// assert_eq!(loose.max_iterations, 100);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverConfig<T: Float> {
    /// Convergence tolerance.
    ///
    /// The solver stops when the bracketing interval half-width (or the
    /// residual magnitude) falls below this value.
    pub tolerance: T,

    /// Maximum number of iterations before returning the best estimate.
    ///
    /// Exceeding the cap is reported through `RootSearch::converged`,
    /// not as an error.
    pub max_iterations: usize,
}

impl<T: Float> Default for SolverConfig<T> {
    /// Default values: `tolerance` 1e-10, `max_iterations` 100.
    fn default() -> Self {
        Self {
            tolerance: T::from(1e-10).unwrap(),
            max_iterations: 100,
        }
    }
}

impl<T: Float> SolverConfig<T> {
    /// Create a new configuration.
    ///
    /// # Panics
    ///
    /// Panics if `tolerance <= 0` or `max_iterations == 0`.
    pub fn new(tolerance: T, max_iterations: usize) -> Self {
        assert!(tolerance > T::zero(), "tolerance must be positive");
        assert!(max_iterations > 0, "max_iterations must be > 0");
        Self {
            tolerance,
            max_iterations,
        }
    }
}
