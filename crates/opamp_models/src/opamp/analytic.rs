//! Closed-form equilibrium solver under the square-law device model.
//!
//! With quadratic drain currents, each stage's Kirchhoff balance
//! equation is a quadratic in the unknown node voltage and solves in
//! closed form.
//!
//! Stage A (push/pull node between T1a and T2a), with k = W/L of the
//! load, m = W/L of the driver, a = Vin − Vt, b = Vo − Vt, c = Vdd:
//!
//! ```text
//! k((a − x)² − (a − c)²) + m((b − x)² − b²) = 0
//! x = (2ka + 2mb + sqrt((2ka + 2mb)² − 4(k + m)(2a − c)·k·c)) / 2(k + m)
//! ```
//!
//! Stage B (source-follower node of the saturated-load inverter), with
//! a = Vx − Vt, b = Vdd − Vt:
//!
//! ```text
//! k(b − x)² + m((a − x)² − a²) = 0
//! x = (kb + ma + sqrt(m(2kab + ma² − kb²))) / (k + m)
//! ```
//!
//! Both take the positive branch. The forms assume every device
//! conducts (a > 0, b > 0) and a real root exists; violating either is
//! a fatal operating-region failure.

use super::{EquilibriumPoint, ModelError, OpAmp, OpAmpGeometry};

/// Absolute fixed-point tolerance on Vo for the closed-form variant (V).
const FIXED_POINT_TOLERANCE: f64 = 1e-6;

/// Default cap on fixed-point iterations.
///
/// The original derivation iterated without a cap; a bound with an
/// explicit divergence error keeps non-termination observable.
const DEFAULT_ITERATION_CAP: usize = 200;

/// Closed-form (square-law) equilibrium solver.
///
/// # Examples
/// ```
/// use opamp_models::opamp::{AnalyticOpAmp, OpAmp, OpAmpGeometry};
///
/// let opamp = AnalyticOpAmp::new(OpAmpGeometry::mos6581());
/// let point = opamp.solve(4.54, 4.54).unwrap();
/// assert!(point.converged);
/// assert!(point.vo > 0.0);
/// ```
#[derive(Debug, Clone)]
pub struct AnalyticOpAmp {
    geometry: OpAmpGeometry,
    iteration_cap: usize,
}

impl AnalyticOpAmp {
    /// Builds a solver for the given topology.
    pub fn new(geometry: OpAmpGeometry) -> Self {
        Self {
            geometry,
            iteration_cap: DEFAULT_ITERATION_CAP,
        }
    }

    /// Overrides the fixed-point iteration cap.
    pub fn with_iteration_cap(mut self, cap: usize) -> Self {
        assert!(cap > 0, "iteration cap must be > 0");
        self.iteration_cap = cap;
        self
    }

    /// Stage A: solve the push/pull balance for the internal node Vx.
    fn solve_follower(&self, vin: f64, vo: f64) -> Result<f64, ModelError> {
        let stage = &self.geometry.follower;
        let vdd = self.geometry.vdd;

        let vit = vin - self.geometry.vt;
        if vit <= 0.0 {
            return Err(ModelError::OperatingRegion {
                quantity: "follower input overdrive Vin - Vt",
                value: vit,
            });
        }
        let vot = vo - self.geometry.vt;
        if vot <= 0.0 {
            return Err(ModelError::OperatingRegion {
                quantity: "follower driver overdrive Vo - Vt",
                value: vot,
            });
        }

        let term = 2.0 * (stage.wl_load * vit + stage.wl_driver * vot);
        let discriminant =
            term * term - 4.0 * stage.wl_sum() * (2.0 * vit - vdd) * stage.wl_load * vdd;
        if discriminant < 0.0 {
            return Err(ModelError::NegativeDiscriminant { vin, discriminant });
        }

        Ok((term + discriminant.sqrt()) / (2.0 * stage.wl_sum()))
    }

    /// Stage B: solve the saturated-load inverter balance for Vo.
    fn solve_inverter(&self, vin: f64, vx: f64) -> Result<f64, ModelError> {
        let stage = &self.geometry.inverter;

        let vddt = self.geometry.vdd - self.geometry.vt;
        let vxt = vx - self.geometry.vt;
        if vxt <= 0.0 {
            return Err(ModelError::OperatingRegion {
                quantity: "inverter driver overdrive Vx - Vt",
                value: vxt,
            });
        }

        let k = stage.wl_load;
        let m = stage.wl_driver;
        let discriminant = m * (2.0 * k * vddt * vxt + m * vxt * vxt - k * vddt * vddt);
        if discriminant < 0.0 {
            return Err(ModelError::NegativeDiscriminant { vin, discriminant });
        }

        Ok((k * vddt + m * vxt + discriminant.sqrt()) / stage.wl_sum())
    }
}

impl OpAmp for AnalyticOpAmp {
    fn solve(&self, vin: f64, vo_guess: f64) -> Result<EquilibriumPoint, ModelError> {
        let mut vo = vo_guess;

        for iteration in 1..=self.iteration_cap {
            let vx = self.solve_follower(vin, vo)?;
            let vo_new = self.solve_inverter(vin, vx)?;
            let delta = (vo_new - vo).abs();
            vo = vo_new;

            if delta < FIXED_POINT_TOLERANCE {
                return Ok(EquilibriumPoint {
                    vx,
                    vo,
                    iterations: iteration,
                    converged: true,
                });
            }
        }

        Err(ModelError::FixedPointDivergence {
            vin,
            iterations: self.iteration_cap,
        })
    }

    fn geometry(&self) -> &OpAmpGeometry {
        &self.geometry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn opamp() -> AnalyticOpAmp {
        AnalyticOpAmp::new(OpAmpGeometry::mos6581())
    }

    // ========================================
    // Convergence Tests
    // ========================================

    #[test]
    fn test_working_point_converges() {
        // The documented working point of the measured 6581 transfer
        // curve (Vin = Vo = 4.54 V) as the starting guess.
        let point = opamp().solve(4.54, 4.54).unwrap();
        assert!(point.converged);
        assert!(point.iterations <= DEFAULT_ITERATION_CAP);
        assert!(point.vo.is_finite() && point.vx.is_finite());
        assert!(point.vo > 0.0);
    }

    #[test]
    fn test_rail_guess_converges_across_sweep() {
        let opamp = opamp();
        let vdd = opamp.geometry().vdd;
        let mut guess = vdd;
        let mut vin = 2.0;
        while vin < 7.0 {
            let point = opamp
                .solve(vin, guess)
                .unwrap_or_else(|e| panic!("failed at Vin = {}: {}", vin, e));
            assert!(point.converged, "not converged at Vin = {}", vin);
            guess = point.vo;
            vin += 0.1;
        }
    }

    #[test]
    fn test_determinism() {
        let opamp = opamp();
        let first = opamp.solve(4.54, 4.54).unwrap();
        let second = opamp.solve(4.54, 4.54).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_fixed_point_is_self_consistent() {
        // Re-solving from the converged Vo must stay put.
        let opamp = opamp();
        let point = opamp.solve(4.54, 4.54).unwrap();
        let again = opamp.solve(4.54, point.vo).unwrap();
        assert_relative_eq!(again.vo, point.vo, epsilon = 1e-5);
        assert!(again.iterations <= point.iterations);
    }

    // ========================================
    // Precondition Tests
    // ========================================

    #[test]
    fn test_input_below_threshold_is_fatal() {
        let err = opamp().solve(1.0, 12.18).unwrap_err();
        assert!(matches!(err, ModelError::OperatingRegion { .. }));
    }

    #[test]
    fn test_low_guess_leaves_validity_domain() {
        // A low starting Vo drives stage B's discriminant negative:
        // the approximation is invalid there and must say so.
        let err = opamp().solve(2.0, 2.0).unwrap_err();
        assert!(matches!(
            err,
            ModelError::NegativeDiscriminant { .. } | ModelError::OperatingRegion { .. }
        ));
    }

    #[test]
    fn test_tiny_cap_reports_divergence() {
        let opamp = AnalyticOpAmp::new(OpAmpGeometry::mos6581()).with_iteration_cap(1);
        let err = opamp.solve(4.54, 4.54).unwrap_err();
        assert_eq!(
            err,
            ModelError::FixedPointDivergence {
                vin: 4.54,
                iterations: 1
            }
        );
    }
}
