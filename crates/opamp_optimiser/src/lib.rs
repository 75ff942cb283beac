//! # opamp_optimiser
//!
//! Monte-Carlo calibration of the generalised-logistic transfer curve
//! against measured chip data.
//!
//! ## Architecture Position
//!
//! Layer 3 of the workspace. Depends on `opamp_core` (L1) for the
//! reference-table and score types and on `opamp_models` (L2) for the
//! curve being fitted.
//!
//! ## Modules
//!
//! - `scoring`: RMS relative-error score of a curve against a table
//! - `rng`: seeded, reproducible random source for the search
//! - `monte_carlo`: the random-walk parameter search itself
//!
//! ## Example
//!
//! ```rust
//! use opamp_core::types::ReferenceTable;
//! use opamp_models::logistic::LogisticParams;
//! use opamp_optimiser::monte_carlo::{MonteCarloConfig, MonteCarloFitter, NullSink};
//! use opamp_optimiser::rng::FitRng;
//!
//! let table = ReferenceTable::from_pairs(&[(1.0, 10.0), (5.0, 5.0), (10.0, 1.0)]).unwrap();
//! let config = MonteCarloConfig { max_iterations: 1_000, ..Default::default() };
//! let fitter = MonteCarloFitter::new(config).unwrap();
//!
//! let mut rng = FitRng::from_seed(42);
//! let outcome = fitter.fit(&table, LogisticParams::reset(), &mut rng, &mut NullSink);
//! assert!(outcome.fit().score.error.is_finite());
//! ```

#![deny(missing_docs)]
#![warn(rustdoc::broken_intra_doc_links)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod monte_carlo;
pub mod rng;
pub mod scoring;

mod error;

pub use error::OptimiserError;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::monte_carlo::*;
    pub use crate::rng::FitRng;
    pub use crate::scoring::score;
    pub use crate::OptimiserError;
}
