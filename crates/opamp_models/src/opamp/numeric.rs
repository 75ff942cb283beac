//! Root-finding equilibrium solver for continuous device models.
//!
//! Device models without a closed-form stage inverse (EKV, the
//! sub-threshold logistic) are handled by bracketing each stage's
//! Kirchhoff current-balance residual over the rail interval [0, Vdd]
//! and running Brent's method on it.

use opamp_core::math::solvers::{BrentSolver, SolverConfig};

use super::{EquilibriumPoint, ModelError, OpAmp, OpAmpGeometry};
use crate::device::{DrainCurrent, TransistorState};

/// Interval tolerance for the per-stage root searches (V).
///
/// Looser than the closed-form variant's 1e-6: the fixed-point loop's
/// effective accuracy is inherited from here, so tightening one without
/// the other buys nothing.
const ROOT_TOLERANCE: f64 = 1e-4;

/// Absolute fixed-point tolerance on Vo (V).
const FIXED_POINT_TOLERANCE: f64 = 1e-4;

/// Cap on fixed-point iterations.
const ITERATION_CAP: usize = 50;

/// Equilibrium solver driving an arbitrary drain-current model through
/// the bracketed root finder.
///
/// Per input voltage, alternates two Brent searches (stage A's balance
/// for the internal node Vx given (Vin, Vo), then stage B's for Vo
/// given (Vdd, Vx)) until Vo stops moving. Cap expiry (of either the root
/// finder or the outer loop) yields the best estimate with
/// `converged = false` rather than an error: the result is usable but
/// lower-confidence.
///
/// # Examples
/// ```
/// use opamp_models::device::Ekv;
/// use opamp_models::opamp::{NumericOpAmp, OpAmp, OpAmpGeometry};
///
/// let opamp = NumericOpAmp::new(Ekv::default(), OpAmpGeometry::mos6581());
/// let vdd = opamp.geometry().vdd;
/// let point = opamp.solve(4.54, vdd).unwrap();
/// assert!(point.vo >= 0.0 && point.vo <= vdd);
/// ```
#[derive(Debug, Clone)]
pub struct NumericOpAmp<M: DrainCurrent> {
    model: M,
    geometry: OpAmpGeometry,
    root_finder: BrentSolver<f64>,
}

impl<M: DrainCurrent> NumericOpAmp<M> {
    /// Builds a solver for the given device model and topology.
    pub fn new(model: M, geometry: OpAmpGeometry) -> Self {
        Self {
            model,
            geometry,
            root_finder: BrentSolver::new(SolverConfig::new(ROOT_TOLERANCE, 100)),
        }
    }

    /// The device model in use.
    pub fn model(&self) -> &M {
        &self.model
    }

    /// Stage A balance residual at a trial internal-node voltage `vx`:
    /// load current (T1a, gate at Vin) minus driver current (T2a, gate
    /// at the fed-back Vo).
    fn follower_residual(&self, vin: f64, vo: f64, vx: f64) -> f64 {
        let g = &self.geometry;
        let load = TransistorState::new(vin, g.vdd, vx, g.vt, g.follower.wl_load);
        let driver = TransistorState::new(vo, vx, 0.0, g.vt, g.follower.wl_driver);
        self.model.drain_current(&load) - self.model.drain_current(&driver)
    }

    /// Stage B balance residual at a trial output voltage `vo`: load
    /// current (T1b, gate tied to Vdd) minus driver current (T2b, gate
    /// at the internal node Vx).
    fn inverter_residual(&self, vx: f64, vo: f64) -> f64 {
        let g = &self.geometry;
        let load = TransistorState::new(g.vdd, g.vdd, vo, g.vt, g.inverter.wl_load);
        let driver = TransistorState::new(vx, vo, 0.0, g.vt, g.inverter.wl_driver);
        self.model.drain_current(&load) - self.model.drain_current(&driver)
    }
}

impl<M: DrainCurrent> OpAmp for NumericOpAmp<M> {
    fn solve(&self, vin: f64, vo_guess: f64) -> Result<EquilibriumPoint, ModelError> {
        let vdd = self.geometry.vdd;
        let mut vo = vo_guess;
        let mut vx = 0.0;
        let mut roots_converged = true;

        for iteration in 1..=ITERATION_CAP {
            let vx_search = self
                .root_finder
                .find_root(|x| self.follower_residual(vin, vo, x), 0.0, vdd)?;
            let vo_search = self
                .root_finder
                .find_root(|x| self.inverter_residual(vx_search.root, x), 0.0, vdd)?;
            roots_converged &= vx_search.converged && vo_search.converged;
            vx = vx_search.root;

            let delta = (vo_search.root - vo).abs();
            vo = vo_search.root;

            if delta < FIXED_POINT_TOLERANCE {
                return Ok(EquilibriumPoint {
                    vx,
                    vo,
                    iterations: iteration,
                    converged: roots_converged,
                });
            }
        }

        Ok(EquilibriumPoint {
            vx,
            vo,
            iterations: ITERATION_CAP,
            converged: false,
        })
    }

    fn geometry(&self) -> &OpAmpGeometry {
        &self.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::{Ekv, SubthresholdLogistic};

    fn ekv_opamp() -> NumericOpAmp<Ekv> {
        NumericOpAmp::new(Ekv::default(), OpAmpGeometry::mos6581())
    }

    #[test]
    fn test_solution_stays_between_rails() {
        let opamp = ekv_opamp();
        let vdd = opamp.geometry().vdd;
        let point = opamp.solve(4.54, vdd).unwrap();
        assert!(point.vo >= 0.0 && point.vo <= vdd, "vo = {}", point.vo);
        assert!(point.vx >= 0.0 && point.vx <= vdd, "vx = {}", point.vx);
    }

    #[test]
    fn test_determinism() {
        let opamp = ekv_opamp();
        let first = opamp.solve(4.54, 12.18).unwrap();
        let second = opamp.solve(4.54, 12.18).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_residual_brackets_at_rails() {
        // KCL residual sign change across [0, Vdd]: load wins at the
        // bottom rail, driver wins at the top.
        let opamp = ekv_opamp();
        let vdd = opamp.geometry().vdd;
        assert!(opamp.follower_residual(4.54, vdd, 0.0) > 0.0);
        assert!(opamp.follower_residual(4.54, vdd, vdd) < 0.0);
        assert!(opamp.inverter_residual(5.0, 0.0) > 0.0);
        assert!(opamp.inverter_residual(5.0, vdd) < 0.0);
    }

    #[test]
    fn test_reference_inputs_solve_between_rails() {
        // Every measured 6581 calibration input must produce a bounded
        // solution under continuation from the top rail.
        let opamp = ekv_opamp();
        let vdd = opamp.geometry().vdd;
        let mut guess = vdd;
        for vin in [
            0.81, 2.40, 3.00, 3.50, 4.00, 4.54, 4.90, 5.20, 6.00, 7.00, 8.50, 10.31,
        ] {
            let point = opamp
                .solve(vin, guess)
                .unwrap_or_else(|e| panic!("failed at Vin = {}: {}", vin, e));
            assert!(point.vo >= 0.0 && point.vo <= vdd);
            guess = point.vo;
        }
    }

    #[test]
    fn test_subthreshold_model_also_solves() {
        let opamp = NumericOpAmp::new(SubthresholdLogistic::default(), OpAmpGeometry::mos6581());
        let vdd = opamp.geometry().vdd;
        let point = opamp.solve(4.54, vdd).unwrap();
        assert!(point.vo >= 0.0 && point.vo <= vdd);
    }

    #[test]
    fn test_iterations_bounded_by_cap() {
        let opamp = ekv_opamp();
        let point = opamp.solve(3.0, 12.18).unwrap();
        assert!(point.iterations >= 1 && point.iterations <= ITERATION_CAP);
    }
}
