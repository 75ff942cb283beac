//! Two-stage MOS op-amp equilibrium solvers.
//!
//! The "op-amp" is a self-biased NMOS inverter: a saturated-load NMOS
//! inverter output stage driven by a buffer/bias input stage (a variable
//! saturated-load inverter), with the output fed back to the input
//! stage's driver gate. Provided a reasonably high input impedance and a
//! reasonably low output impedance it can be modelled as a DC voltage
//! transfer function.
//!
//! Solving one input point means finding the pair (Vx, Vo), internal
//! node and output voltage, that satisfies both stages' Kirchhoff
//! current-balance equations simultaneously. Both solvers here iterate
//! the same fixed-point scheme: solve stage A for Vx given (Vin, Vo),
//! solve stage B for Vo given (Vdd, Vx), repeat until Vo stops moving.
//!
//! - [`AnalyticOpAmp`]: closed-form quadratic stage solutions under the
//!   square-law device model; 1e-6 V fixed-point tolerance.
//! - [`NumericOpAmp`]: bracketed root finding of the balance residual
//!   for any [`DrainCurrent`] model (EKV, sub-threshold); 1e-4 V
//!   tolerance inherited from the root finder.

mod analytic;
mod error;
mod numeric;
mod sweep;

pub use analytic::AnalyticOpAmp;
pub use error::ModelError;
pub use numeric::NumericOpAmp;
pub use sweep::{CurveSample, TransferCurve};

/// W/L geometry ratios of one inverter/follower stage.
///
/// Each stage pairs a saturated load transistor (gate tied high) with a
/// driver transistor; the ratio of their current-drive strengths sets
/// the stage's transfer characteristic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StageGeometry {
    /// W/L of the load transistor (T1)
    pub wl_load: f64,
    /// W/L of the driver transistor (T2)
    pub wl_driver: f64,
}

impl StageGeometry {
    /// Builds a stage from load and driver geometry ratios.
    pub const fn new(wl_load: f64, wl_driver: f64) -> Self {
        Self { wl_load, wl_driver }
    }

    /// Sum of the two ratios (quadratic-form denominator).
    pub fn wl_sum(&self) -> f64 {
        self.wl_load + self.wl_driver
    }
}

/// Full op-amp topology: two stages plus supply and threshold voltages.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OpAmpGeometry {
    /// Input buffer/bias stage (T1a load, T2a driver)
    pub follower: StageGeometry,
    /// Output inverter stage (T1b load, T2b driver)
    pub inverter: StageGeometry,
    /// Supply voltage (V), including the measured rail skew
    pub vdd: f64,
    /// Threshold voltage (V), common to all four devices
    pub vt: f64,
}

/// Measured rail skew of the 6581 die relative to the nominal 12 V supply.
const VOLTAGE_SKEW: f64 = 1.015;

impl OpAmpGeometry {
    /// Geometry measured on a MOS 6581R4AR die.
    ///
    /// T1a ≈ 20/80, T2a ≈ 70/25, T1b ≈ 20/40, T2b ≈ 20/1000,
    /// Vdd = 12 V · 1.015, Vt = 1.31 V.
    pub fn mos6581() -> Self {
        Self {
            follower: StageGeometry::new(20.0 / 80.0, 70.0 / 25.0),
            inverter: StageGeometry::new(20.0 / 40.0, 20.0 / 1000.0),
            vdd: 12.0 * VOLTAGE_SKEW,
            vt: 1.31,
        }
    }
}

impl Default for OpAmpGeometry {
    fn default() -> Self {
        Self::mos6581()
    }
}

/// A mutually consistent pair of node voltages for one input point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EquilibriumPoint {
    /// Internal node voltage between the two stages (V)
    pub vx: f64,
    /// Output voltage (V)
    pub vo: f64,
    /// Fixed-point iterations consumed
    pub iterations: usize,
    /// False when an iteration cap expired and the values are the best
    /// available estimate rather than a converged fixed point
    pub converged: bool,
}

/// A solvable op-amp model: maps an input voltage (plus an initial
/// output guess) to an equilibrium point.
///
/// The guess matters: sweeps carry the previous point's converged Vo
/// forward, which keeps the fixed-point iteration on the same solution
/// branch and speeds up convergence.
pub trait OpAmp {
    /// Solves for the equilibrium at `vin`, starting the fixed-point
    /// iteration from `vo_guess`.
    fn solve(&self, vin: f64, vo_guess: f64) -> Result<EquilibriumPoint, ModelError>;

    /// The circuit topology in use.
    fn geometry(&self) -> &OpAmpGeometry;
}
