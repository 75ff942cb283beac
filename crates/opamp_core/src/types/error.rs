//! Error types for structured error handling.
//!
//! This module provides:
//! - `SolverError`: Errors from root-finding solvers
//! - `ReferenceError`: Errors from reference table construction

use thiserror::Error;

/// Errors from root-finding solvers.
///
/// # Variants
/// - `NoBracket`: The supplied interval does not bracket a sign change
/// - `NonFinite`: The objective produced a non-finite value inside the bracket
///
/// Iteration-cap expiry is deliberately *not* an error: the solver
/// returns its best estimate with a `converged = false` flag so callers
/// can treat the result as lower-confidence (see `RootSearch`).
///
/// # Examples
/// ```
/// use opamp_core::types::SolverError;
///
/// let err = SolverError::NoBracket { a: 1.0, b: 2.0 };
/// assert!(format!("{}", err).contains("bracket"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SolverError {
    /// f(a) and f(b) have the same sign; no root is bracketed.
    #[error("no bracket: f({a}) and f({b}) have the same sign")]
    NoBracket {
        /// Left bracket endpoint
        a: f64,
        /// Right bracket endpoint
        b: f64,
    },

    /// The objective returned NaN or infinity at the given abscissa.
    #[error("objective is not finite at x = {x}")]
    NonFinite {
        /// Abscissa where the objective failed
        x: f64,
    },
}

/// Errors from reference table construction.
///
/// # Variants
/// - `Empty`: No calibration points supplied
/// - `Unordered`: Points are not strictly ascending by Vin
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ReferenceError {
    /// The table must contain at least one point (the asymptote anchor).
    #[error("reference table is empty")]
    Empty,

    /// Points must be strictly ascending by input voltage.
    #[error("reference table not strictly ascending by Vin at index {index}")]
    Unordered {
        /// Index of the first out-of-order point
        index: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_bracket_display() {
        let err = SolverError::NoBracket { a: 0.5, b: 1.5 };
        let display = format!("{}", err);
        assert!(display.contains("0.5"));
        assert!(display.contains("1.5"));
    }

    #[test]
    fn test_non_finite_display() {
        let err = SolverError::NonFinite { x: 3.0 };
        assert!(format!("{}", err).contains("3"));
    }

    #[test]
    fn test_reference_unordered_display() {
        let err = ReferenceError::Unordered { index: 4 };
        assert!(format!("{}", err).contains("4"));
    }

    #[test]
    fn test_error_trait_implementation() {
        let err = SolverError::NoBracket { a: 0.0, b: 1.0 };
        let _: &dyn std::error::Error = &err;
    }

    #[test]
    fn test_clone_and_equality() {
        let err1 = SolverError::NonFinite { x: 1.0 };
        let err2 = err1.clone();
        assert_eq!(err1, err2);
    }
}
