//! Square-law (quadratic) MOS drain-current model.

use super::{DrainCurrent, TransistorState};

/// Square-law triode/saturation drain-current model.
///
/// Ids ∝ W/L · (Vgst⁺² − Vgdt⁺²), where x⁺ = max(x, 0).
///
/// The clamped squares encode the operating regions: the Vgdt term
/// vanishes in saturation (Vgdt ≤ 0) and the whole current vanishes
/// below threshold (Vgst ≤ 0). Because Vgst and Vgdt swap roles when
/// drain and source swap, reverse conduction comes out negative without
/// a special case.
///
/// # Examples
/// ```
/// use opamp_models::device::{DrainCurrent, Quadratic, TransistorState};
///
/// let model = Quadratic;
/// // Saturated: drain far above gate, only the Vgst term contributes.
/// let sat = TransistorState::new(4.0, 12.0, 0.0, 1.31, 1.0);
/// assert!(model.drain_current(&sat) > 0.0);
///
/// // Off: gate below threshold.
/// let off = TransistorState::new(1.0, 12.0, 0.0, 1.31, 1.0);
/// assert_eq!(model.drain_current(&off), 0.0);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct Quadratic;

impl DrainCurrent for Quadratic {
    fn drain_current(&self, state: &TransistorState) -> f64 {
        let forward = clamped_square(state.vgst());
        let reverse = clamped_square(state.vgdt());
        state.wl * (forward - reverse)
    }
}

fn clamped_square(x: f64) -> f64 {
    if x > 0.0 {
        x * x
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const VT: f64 = 1.31;

    #[test]
    fn test_saturation_ignores_drain() {
        let model = Quadratic;
        let a = TransistorState::new(4.0, 10.0, 0.0, VT, 2.0);
        let b = TransistorState::new(4.0, 12.0, 0.0, VT, 2.0);
        // Both drains keep Vgdt <= 0: identical saturated current.
        assert_relative_eq!(model.drain_current(&a), model.drain_current(&b));
        let vgst = 4.0 - VT;
        assert_relative_eq!(model.drain_current(&a), 2.0 * vgst * vgst);
    }

    #[test]
    fn test_triode_subtracts_drain_term() {
        let model = Quadratic;
        let state = TransistorState::new(5.0, 1.0, 0.0, VT, 1.0);
        let vgst = 5.0 - VT;
        let vgdt = 5.0 - 1.0 - VT;
        assert_relative_eq!(model.drain_current(&state), vgst * vgst - vgdt * vgdt);
    }

    #[test]
    fn test_off_below_threshold() {
        let model = Quadratic;
        let state = TransistorState::new(1.0, 12.0, 0.0, VT, 3.0);
        assert_eq!(model.drain_current(&state), 0.0);
    }

    #[test]
    fn test_reverse_conduction_is_negative() {
        let model = Quadratic;
        let forward = TransistorState::new(5.0, 3.0, 1.0, VT, 1.0);
        let reversed = TransistorState::new(5.0, 1.0, 3.0, VT, 1.0);
        assert_relative_eq!(
            model.drain_current(&forward),
            -model.drain_current(&reversed)
        );
    }

    #[test]
    fn test_zero_vds_zero_current() {
        let model = Quadratic;
        let state = TransistorState::new(5.0, 2.0, 2.0, VT, 1.0);
        assert_relative_eq!(model.drain_current(&state), 0.0);
    }
}
