//! Optimiser error types.

use thiserror::Error;

/// Errors raised while configuring or running a fit.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OptimiserError {
    /// The jitter width must be a positive finite number.
    #[error("invalid jitter sigma {sigma}: must be positive and finite")]
    InvalidSigma {
        /// The offending sigma value
        sigma: f64,
    },

    /// A zero iteration budget cannot make progress.
    #[error("iteration budget must be at least 1")]
    ZeroBudget,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = OptimiserError::InvalidSigma { sigma: -0.5 };
        assert!(err.to_string().contains("-0.5"));
        assert_eq!(
            OptimiserError::ZeroBudget.to_string(),
            "iteration budget must be at least 1"
        );
    }
}
