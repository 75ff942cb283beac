//! Shared value types for the op-amp calibration workspace.
//!
//! This module provides:
//! - [`ReferencePoint`] / [`ReferenceTable`]: measured (Vin, Vout) calibration data
//! - [`Score`]: RMS-relative-error fit quality with "lower is better" ordering
//! - [`SolverError`]: errors from root-finding solvers

mod error;
mod reference;
mod score;

pub use error::{ReferenceError, SolverError};
pub use reference::{ReferencePoint, ReferenceTable};
pub use score::Score;
