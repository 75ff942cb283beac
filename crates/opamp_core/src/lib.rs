//! # opamp_core: Foundation for SID Op-Amp Calibration
//!
//! ## Layer 1 (Foundation) Role
//!
//! opamp_core serves as the bottom layer of the workspace, providing:
//! - Measured reference data types: `ReferencePoint`, `ReferenceTable` (`types`)
//! - Fit quality type: `Score` (`types`)
//! - Error types: `SolverError` (`types::error`)
//! - Bracketed root-finding: `BrentSolver`, `SolverConfig` (`math::solvers`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other opamp_* crates, with minimal
//! external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - thiserror: Structured error types
//! - serde: Serialisation support (optional)
//!
//! ## Usage Example
//!
//! ```rust
//! use opamp_core::math::solvers::{BrentSolver, SolverConfig};
//! use opamp_core::types::{ReferencePoint, ReferenceTable};
//!
//! // Root finding
//! let solver = BrentSolver::new(SolverConfig::default());
//! let search = solver.find_root(|x: f64| x * x - 2.0, 0.0, 2.0).unwrap();
//! assert!(search.converged);
//!
//! // Reference data
//! let table = ReferenceTable::new(vec![
//!     ReferencePoint::new(0.81, 10.31),
//!     ReferencePoint::new(4.54, 4.54),
//! ]).unwrap();
//! assert_eq!(table.vmax(), 10.31);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod math;
pub mod types;

#[cfg(test)]
mod tests {
    #[test]
    fn it_works() {
        assert_eq!(2 + 2, 4);
    }
}
