//! Brent's method root-finding solver.

use super::SolverConfig;
use crate::types::SolverError;
use num_traits::Float;

/// Outcome of a bracketed root search.
///
/// Always carries the best available estimate; `converged` records
/// whether the configured tolerance was met within the iteration cap.
/// Callers must treat `converged = false` results as lower-confidence
/// rather than as silent successes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootSearch<T: Float> {
    /// Best estimate of the root
    pub root: T,
    /// Iterations consumed
    pub iterations: usize,
    /// Whether the tolerance was met before the iteration cap
    pub converged: bool,
}

/// Brent's method root finder.
///
/// Combines bisection, secant, and inverse quadratic interpolation for
/// robust root finding without requiring derivatives. Guaranteed to make
/// progress for continuous functions with a valid bracket.
///
/// # Type Parameters
///
/// * `T` - Floating-point type (e.g., `f64`)
///
/// # Algorithm
///
/// Brent's method switches between:
/// - **Bisection**: guaranteed progress, slower convergence
/// - **Secant method**: faster convergence using linear approximation
/// - **Inverse quadratic interpolation**: even faster when applicable
///
/// The method falls back to bisection when other methods would be
/// unreliable.
///
/// # Example
///
/// ```
/// use opamp_core::math::solvers::{BrentSolver, SolverConfig};
///
/// let solver = BrentSolver::new(SolverConfig::default());
///
/// // Solve x² - 2 = 0 in bracket [0, 2]
/// let search = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
/// assert!((search.root - std::f64::consts::SQRT_2).abs() < 1e-9);
/// ```
#[derive(Debug, Clone)]
pub struct BrentSolver<T: Float> {
    /// Solver configuration
    config: SolverConfig<T>,
}

impl<T: Float> BrentSolver<T> {
    /// Create a new Brent solver with the given configuration.
    pub fn new(config: SolverConfig<T>) -> Self {
        Self { config }
    }

    /// Create a solver with default configuration.
    pub fn with_defaults() -> Self {
        Self {
            config: SolverConfig::default(),
        }
    }

    /// Find a root of `f` in the bracket [a, b].
    ///
    /// Requires that `f(a)` and `f(b)` have opposite signs (a valid
    /// bracket). A root lying exactly on an endpoint is accepted.
    ///
    /// # Arguments
    ///
    /// * `f` - Function to find a root of
    /// * `a` - Left bracket endpoint
    /// * `b` - Right bracket endpoint
    ///
    /// # Returns
    ///
    /// * `Ok(search)` - Best estimate; `search.converged` is false when
    ///   the iteration cap expired before the tolerance was met
    /// * `Err(SolverError::NoBracket)` - `f(a)` and `f(b)` have the same sign
    /// * `Err(SolverError::NonFinite)` - the objective produced NaN/∞
    pub fn find_root<F>(&self, f: F, a: T, b: T) -> Result<RootSearch<T>, SolverError>
    where
        F: Fn(T) -> T,
    {
        let mut a = a;
        let mut b = b;
        let mut fa = f(a);
        let mut fb = f(b);

        if !fa.is_finite() {
            return Err(SolverError::NonFinite {
                x: a.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !fb.is_finite() {
            return Err(SolverError::NonFinite {
                x: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        // An endpoint may already be a root (e.g. a rail voltage).
        if fa == T::zero() {
            return Ok(RootSearch {
                root: a,
                iterations: 0,
                converged: true,
            });
        }
        if fb == T::zero() {
            return Ok(RootSearch {
                root: b,
                iterations: 0,
                converged: true,
            });
        }

        if fa * fb > T::zero() {
            return Err(SolverError::NoBracket {
                a: a.to_f64().unwrap_or(f64::NAN),
                b: b.to_f64().unwrap_or(f64::NAN),
            });
        }

        // Ensure |f(a)| >= |f(b)| (swap if necessary)
        if fa.abs() < fb.abs() {
            std::mem::swap(&mut a, &mut b);
            std::mem::swap(&mut fa, &mut fb);
        }

        let mut c = a;
        let mut fc = fa;
        let mut d = b - a;
        let mut e = d;

        let two = T::from(2.0).unwrap();
        let three = T::from(3.0).unwrap();
        let tol = self.config.tolerance;

        for iteration in 0..self.config.max_iterations {
            if fb.abs() < tol {
                return Ok(RootSearch {
                    root: b,
                    iterations: iteration,
                    converged: true,
                });
            }

            // Interval-width convergence check
            let m = (c - b) / two;
            if m.abs() <= tol {
                return Ok(RootSearch {
                    root: b,
                    iterations: iteration,
                    converged: true,
                });
            }

            // Decide whether to use interpolation or bisection
            let use_bisection;

            if fa != fc && fb != fc {
                // Inverse quadratic interpolation
                let r = fb / fc;
                let s = fb / fa;
                let t = fa / fc;

                let p = s * (t * (r - t) * (c - b) - (T::one() - r) * (b - a));
                let q = (t - T::one()) * (r - T::one()) * (s - T::one());

                if p.abs() < (three * m * q).abs() / two && p.abs() < (e * q).abs() / two {
                    e = d;
                    d = p / q;
                    use_bisection = false;
                } else {
                    use_bisection = true;
                }
            } else if fb != fa {
                // Secant method
                let s = fb / fa;
                let p = two * m * s;
                let q = T::one() - s;

                if p.abs() < (three * m * q).abs() / two && p.abs() < (e * q).abs() / two {
                    e = d;
                    d = p / q;
                    use_bisection = false;
                } else {
                    use_bisection = true;
                }
            } else {
                use_bisection = true;
            }

            if use_bisection {
                d = m;
                e = m;
            }

            a = b;
            fa = fb;

            if d.abs() > tol {
                b = b + d;
            } else {
                // Minimum step
                b = b + if m > T::zero() { tol } else { -tol };
            }

            fb = f(b);
            if !fb.is_finite() {
                return Err(SolverError::NonFinite {
                    x: b.to_f64().unwrap_or(f64::NAN),
                });
            }

            // Keep bracket valid: ensure f(b) and f(c) have opposite signs
            if (fb > T::zero() && fc > T::zero()) || (fb < T::zero() && fc < T::zero()) {
                c = a;
                fc = fa;
                d = b - a;
                e = d;
            }

            // Ensure |f(c)| >= |f(b)|
            if fc.abs() < fb.abs() {
                a = b;
                b = c;
                c = a;
                fa = fb;
                fb = fc;
                fc = fa;
            }
        }

        // Iteration cap expired: hand back the best estimate, flagged.
        Ok(RootSearch {
            root: b,
            iterations: self.config.max_iterations,
            converged: false,
        })
    }

    /// Returns a reference to the solver configuration.
    pub fn config(&self) -> &SolverConfig<T> {
        &self.config
    }
}
