//! CLI error types

use thiserror::Error;

/// Convenient result alias for command implementations.
pub type Result<T> = std::result::Result<T, CliError>;

/// Errors surfaced to the command line.
#[derive(Debug, Error)]
pub enum CliError {
    /// A command argument failed validation.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The optimiser rejected its configuration.
    #[error(transparent)]
    Optimiser(#[from] opamp_optimiser::OptimiserError),

    /// An equilibrium solve failed during a sweep.
    #[error(transparent)]
    Model(#[from] opamp_models::opamp::ModelError),

    /// A reference table failed validation.
    #[error(transparent)]
    Reference(#[from] opamp_core::types::ReferenceError),

    /// Writing the fit report failed.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialising the fit report failed.
    #[error("serialisation error: {0}")]
    Serialisation(#[from] serde_json::Error),
}
