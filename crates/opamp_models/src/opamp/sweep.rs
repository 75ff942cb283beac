//! Transfer-curve sampling.
//!
//! Sweeps an equilibrium solver across a range of input voltages,
//! producing the simulated DC transfer curve. Each sample seeds the
//! next solve with its converged Vo (monotonic continuation), which
//! keeps the fixed-point iteration on the same solution branch and is
//! markedly faster than independent per-point solves.

use super::{EquilibriumPoint, ModelError, OpAmp};

/// One sampled point of the simulated transfer curve.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CurveSample {
    /// Input voltage (V)
    pub vin: f64,
    /// The equilibrium solved at this input
    pub point: EquilibriumPoint,
}

enum Inputs {
    Range {
        start: f64,
        end: f64,
        step: f64,
        index: usize,
    },
    Points(std::vec::IntoIter<f64>),
}

impl Inputs {
    fn next(&mut self) -> Option<f64> {
        match self {
            Inputs::Range {
                start,
                end,
                step,
                index,
            } => {
                // Index-based stepping avoids accumulated rounding drift
                // at the interval boundary.
                let vin = *start + (*index as f64) * *step;
                if vin < *end {
                    *index += 1;
                    Some(vin)
                } else {
                    None
                }
            }
            Inputs::Points(iter) => iter.next(),
        }
    }
}

/// Lazy, finite transfer-curve sampler.
///
/// A plain `Iterator`: samples are computed on demand and the sweep is
/// consumed by iteration (re-drive it from scratch to restart). After
/// the first solver error the iterator fuses.
///
/// # Examples
/// ```
/// use opamp_models::opamp::{AnalyticOpAmp, OpAmp, OpAmpGeometry, TransferCurve};
///
/// let opamp = AnalyticOpAmp::new(OpAmpGeometry::mos6581());
/// let vdd = opamp.geometry().vdd;
///
/// // 0.1 V steps over [2.0, 7.0), seeded from the top rail.
/// let curve: Vec<_> = TransferCurve::sweep(&opamp, 2.0, 7.0, 0.1, vdd)
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(curve.len(), 50);
/// ```
pub struct TransferCurve<'a, A: OpAmp> {
    opamp: &'a A,
    inputs: Inputs,
    guess: f64,
    done: bool,
}

impl<'a, A: OpAmp> TransferCurve<'a, A> {
    /// Sweep with a fixed step over the half-open interval [start, end).
    ///
    /// `initial_guess` seeds the first solve; every later solve is
    /// seeded with the previous sample's converged Vo.
    pub fn sweep(opamp: &'a A, start: f64, end: f64, step: f64, initial_guess: f64) -> Self {
        assert!(step > 0.0, "step must be positive");
        Self {
            opamp,
            inputs: Inputs::Range {
                start,
                end,
                step,
                index: 0,
            },
            guess: initial_guess,
            done: false,
        }
    }

    /// Sample at an explicit list of input voltages (e.g. the Vin
    /// column of a measured reference table).
    pub fn at_points(opamp: &'a A, points: Vec<f64>, initial_guess: f64) -> Self {
        Self {
            opamp,
            inputs: Inputs::Points(points.into_iter()),
            guess: initial_guess,
            done: false,
        }
    }
}

impl<A: OpAmp> Iterator for TransferCurve<'_, A> {
    type Item = Result<CurveSample, ModelError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let vin = self.inputs.next()?;
        match self.opamp.solve(vin, self.guess) {
            Ok(point) => {
                self.guess = point.vo;
                Some(Ok(CurveSample { vin, point }))
            }
            Err(err) => {
                self.done = true;
                Some(Err(err))
            }
        }
    }
}
