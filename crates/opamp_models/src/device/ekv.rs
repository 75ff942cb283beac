//! EKV (Enz–Krummenacher–Vittoz) continuous drain-current model.

use super::{softplus, thermal_voltage, DrainCurrent, TransistorState};

/// EKV all-region drain-current model.
///
/// Ids = Is · (i_f − i_r), with
///
/// - Is = 2 · n · uCox · W/L · Ut²
/// - i_f = sp((Vp − Vs) / 2Ut)², i_r = sp((Vp − Vd) / 2Ut)²
/// - Vp = (Vg − Vt) / n (pinch-off voltage)
/// - sp = ln(1 + eˣ), Ut = kT/q at the configured temperature
///
/// Continuous across weak, moderate, and strong inversion (no hard
/// triode/saturation switch), which makes it the physically faithful
/// variant. Its balance equations have no closed-form inverse, so the
/// equilibrium solver resolves them with the bracketed root finder.
///
/// # Examples
/// ```
/// use opamp_models::device::{DrainCurrent, Ekv, TransistorState};
///
/// let model = Ekv::default();
/// let on = TransistorState::new(4.0, 12.0, 0.0, 1.31, 1.0);
/// let off = TransistorState::new(0.0, 12.0, 0.0, 1.31, 1.0);
/// assert!(model.drain_current(&on) > model.drain_current(&off));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Ekv {
    /// Slope factor n (dimensionless, typically 1.2–1.6)
    pub n: f64,
    /// Process transconductance uCox (A/V²); a pure scale here
    pub ucox: f64,
    /// Absolute temperature (K)
    pub temperature: f64,
}

impl Ekv {
    /// Builds an EKV model.
    pub fn new(n: f64, ucox: f64, temperature: f64) -> Self {
        Self {
            n,
            ucox,
            temperature,
        }
    }

    /// Thermal voltage kT/q at the configured temperature (V).
    pub fn ut(&self) -> f64 {
        thermal_voltage(self.temperature)
    }

    /// Pinch-off voltage Vp = (Vg − Vt) / n, relative to the source rail.
    pub fn pinch_off(&self, vg: f64, vt: f64) -> f64 {
        (vg - vt) / self.n
    }
}

impl Default for Ekv {
    /// NMOS defaults for the 6581 die: n = 1.4, uCox = 20 µA/V², 300 K.
    fn default() -> Self {
        Self::new(1.4, 20e-6, 300.0)
    }
}

impl DrainCurrent for Ekv {
    fn drain_current(&self, state: &TransistorState) -> f64 {
        let ut = self.ut();
        let two_ut = 2.0 * ut;
        let vp = self.pinch_off(state.vg, state.vt);

        let i_f = softplus((vp - state.vs) / two_ut);
        let i_r = softplus((vp - state.vd) / two_ut);

        let is = 2.0 * self.n * self.ucox * state.wl * ut * ut;
        is * (i_f * i_f - i_r * i_r)
    }
}
