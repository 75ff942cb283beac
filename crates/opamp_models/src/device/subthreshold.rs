//! Sub-threshold (weak inversion) logistic drain-current model.

use super::{softplus, thermal_voltage, DrainCurrent, TransistorState};

/// Sub-threshold logistic drain-current model.
///
/// Ids ∝ W/L · Ut² · (sp(Vgst / 2Ut)² − sp(Vgdt / 2Ut)²), sp = ln(1+eˣ).
///
/// The softplus-squared terms reproduce the exponential weak-inversion
/// characteristic below threshold and blend smoothly into a quadratic
/// above it, so the balance residuals stay continuous across the whole
/// sweep range, unlike the hard-switched square law.
///
/// # Examples
/// ```
/// use opamp_models::device::{DrainCurrent, SubthresholdLogistic, TransistorState};
///
/// let model = SubthresholdLogistic::at_temperature(300.0);
/// let below = TransistorState::new(1.0, 12.0, 0.0, 1.31, 1.0);
/// // Conducts weakly below threshold instead of switching off.
/// let i = model.drain_current(&below);
/// assert!(i > 0.0 && i < 1e-3);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct SubthresholdLogistic {
    /// Thermal voltage kT/q (V)
    ut: f64,
}

impl SubthresholdLogistic {
    /// Model at an explicit thermal voltage.
    pub fn new(ut: f64) -> Self {
        Self { ut }
    }

    /// Model at the given absolute temperature (K).
    pub fn at_temperature(temperature: f64) -> Self {
        Self::new(thermal_voltage(temperature))
    }

    /// The thermal voltage in use (V).
    pub fn ut(&self) -> f64 {
        self.ut
    }
}

impl Default for SubthresholdLogistic {
    /// Room temperature (300 K).
    fn default() -> Self {
        Self::at_temperature(300.0)
    }
}

impl DrainCurrent for SubthresholdLogistic {
    fn drain_current(&self, state: &TransistorState) -> f64 {
        let two_ut = 2.0 * self.ut;
        let forward = softplus(state.vgst() / two_ut);
        let reverse = softplus(state.vgdt() / two_ut);
        state.wl * self.ut * self.ut * (forward * forward - reverse * reverse)
    }
}
