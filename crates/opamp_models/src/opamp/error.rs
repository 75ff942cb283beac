//! Model-specific error types.

use opamp_core::types::SolverError;
use thiserror::Error;

/// Errors from the op-amp equilibrium solvers.
///
/// Operating-region and discriminant failures mean the analytic
/// approximation's validity domain was exceeded, not that a recoverable
/// numerical hiccup occurred, so they abort the whole solve.
///
/// # Examples
/// ```
/// use opamp_models::opamp::ModelError;
///
/// let err = ModelError::OperatingRegion {
///     quantity: "follower driver overdrive Vo - Vt",
///     value: -0.5,
/// };
/// assert!(format!("{}", err).contains("Vo - Vt"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A terminal-voltage ordering assumption of the closed-form stage
    /// solution no longer holds (e.g. Vgs ≤ Vt on a device assumed to
    /// conduct).
    #[error("operating-region precondition violated: {quantity} = {value} (must be positive)")]
    OperatingRegion {
        /// Which assumed-positive quantity went non-positive
        quantity: &'static str,
        /// Its offending value (V)
        value: f64,
    },

    /// The closed quadratic stage solution has no real root.
    #[error("no real stage solution at Vin = {vin}: discriminant = {discriminant}")]
    NegativeDiscriminant {
        /// Input voltage of the failed solve
        vin: f64,
        /// The negative discriminant value
        discriminant: f64,
    },

    /// The analytic fixed-point iteration hit its cap without meeting
    /// the convergence tolerance.
    #[error("fixed point did not converge at Vin = {vin} within {iterations} iterations")]
    FixedPointDivergence {
        /// Input voltage of the failed solve
        vin: f64,
        /// The iteration cap that expired
        iterations: usize,
    },

    /// Wrapped root-finder error (invalid bracket, non-finite residual).
    #[error("solver error: {0}")]
    Solver(#[from] SolverError),
}
