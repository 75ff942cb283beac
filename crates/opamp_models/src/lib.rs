//! # Op-Amp Models (L2: Circuit Physics)
//!
//! Nonlinear DC models of the two-stage MOS "op-amp" found in the
//! MOS 6581 / CSG 8580 SID filter, plus the compact closed-form curve
//! used to approximate its measured transfer function.
//!
//! This crate provides:
//! - MOS drain-current models: square-law, sub-threshold logistic, EKV
//!   (`device`)
//! - Equilibrium solvers resolving the coupled two-stage feedback
//!   network to a fixed point (`opamp`)
//! - A lazy transfer-curve sampler sweeping the solver over input
//!   voltages (`opamp::sweep`)
//! - The 3-parameter generalised-logistic curve model (`logistic`)
//!
//! ## Design Principles
//!
//! - **Trait-based device models** so the same Kirchhoff balance
//!   residual serves any current equation
//! - **Explicit iteration caps** on all fixed-point loops; cap expiry is
//!   surfaced (error or `converged = false`), never silent
//! - **Operating-region preconditions are fatal** for the analytic
//!   variants: a negative discriminant means the approximation left its
//!   validity domain and must not be clamped over

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod device;
pub mod logistic;
pub mod opamp;
