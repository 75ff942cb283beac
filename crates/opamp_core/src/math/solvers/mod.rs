//! Bracketed 1-D root finding.
//!
//! This module provides the root finder used by the numeric op-amp
//! equilibrium solvers to resolve Kirchhoff's-current-law balance
//! equations that have no closed-form inverse (the EKV and
//! sub-threshold device models).
//!
//! ## Available Solvers
//!
//! - [`BrentSolver`]: Robust bracketing method without derivative
//!   requirement, combining bisection, secant steps, and inverse
//!   quadratic interpolation.
//!
//! ## Configuration
//!
//! Solvers use [`SolverConfig`] for configuring:
//! - `tolerance`: interval-width convergence tolerance (default: 1e-10)
//! - `max_iterations`: maximum iteration count (default: 100)
//!
//! ## Non-convergence contract
//!
//! Hitting the iteration cap is not an error: the solver returns its
//! best estimate in a [`RootSearch`] with `converged = false`, so
//! callers can surface lower-confidence results distinctly instead of
//! silently treating them as successes.
//!
//! ## Example
//!
//! ```
//! use opamp_core::math::solvers::{BrentSolver, SolverConfig};
//!
//! // Solve x³ - x - 2 = 0 in bracket [1, 2]
//! let solver = BrentSolver::new(SolverConfig::default());
//! let search = solver.find_root(|x: f64| x * x * x - x - 2.0, 1.0, 2.0).unwrap();
//!
//! assert!(search.converged);
//! assert!((search.root.powi(3) - search.root - 2.0).abs() < 1e-9);
//! ```

mod brent;
mod config;

pub use brent::{BrentSolver, RootSearch};
pub use config::SolverConfig;
