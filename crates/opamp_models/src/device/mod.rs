//! MOS drain-current models.
//!
//! Three interchangeable current equations for the transistors of the
//! op-amp stages. Callers only rely on relative magnitude and
//! zero-crossing behaviour of the returned current, not on an absolute
//! calibrated value, so each model is free to scale by its own constant.
//!
//! - [`Quadratic`]: square-law triode/saturation model (closed-form
//!   stage solutions exist; see `opamp::AnalyticOpAmp`)
//! - [`SubthresholdLogistic`]: softplus-squared weak-inversion model
//! - [`Ekv`]: Enz–Krummenacher–Vittoz all-region continuous model (no
//!   closed-form inverse; requires the root finder)

mod ekv;
mod quadratic;
mod subthreshold;

pub use ekv::Ekv;
pub use quadratic::Quadratic;
pub use subthreshold::SubthresholdLogistic;

/// Boltzmann constant (J/K).
pub const BOLTZMANN: f64 = 1.380649e-23;

/// Elementary charge (C).
pub const ELEMENTARY_CHARGE: f64 = 1.602176634e-19;

/// Thermal voltage kT/q at the given temperature (K).
pub fn thermal_voltage(temperature: f64) -> f64 {
    BOLTZMANN * temperature / ELEMENTARY_CHARGE
}

/// Instantaneous terminal state of one transistor.
///
/// Ephemeral: constructed per evaluation inside the balance residuals,
/// never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransistorState {
    /// Gate voltage (V)
    pub vg: f64,
    /// Drain voltage (V)
    pub vd: f64,
    /// Source voltage (V)
    pub vs: f64,
    /// Threshold voltage (V)
    pub vt: f64,
    /// Width/length geometry ratio (current-drive strength)
    pub wl: f64,
}

impl TransistorState {
    /// Builds a terminal state for a device with threshold `vt` and
    /// geometry ratio `wl`.
    pub const fn new(vg: f64, vd: f64, vs: f64, vt: f64, wl: f64) -> Self {
        Self { vg, vd, vs, vt, wl }
    }

    /// Gate-source overdrive Vgs − Vt.
    pub fn vgst(&self) -> f64 {
        self.vg - self.vs - self.vt
    }

    /// Gate-drain overdrive Vgd − Vt.
    pub fn vgdt(&self) -> f64 {
        self.vg - self.vd - self.vt
    }
}

/// A drain-current equation.
///
/// Returns a proxy proportional to the drain current for the given
/// terminal state. Positive current flows drain → source; swapping
/// drain and source negates the result in every implementation, which
/// is what lets the Kirchhoff balance residuals treat reverse
/// conduction uniformly.
pub trait DrainCurrent {
    /// Drain current proxy for the given terminal state.
    fn drain_current(&self, state: &TransistorState) -> f64;
}

/// Numerically safe softplus ln(1 + eˣ).
///
/// For large arguments the closed form overflows long before the value
/// stops being representable; above the cutoff softplus(x) = x to
/// machine precision.
pub(crate) fn softplus(x: f64) -> f64 {
    if x > 34.0 {
        x
    } else {
        x.exp().ln_1p()
    }
}
