//! Measured calibration data types.
//!
//! A [`ReferenceTable`] is an immutable, ascending-by-Vin sequence of
//! measured (Vin, Vout) pairs from a physical chip. Its first point
//! doubles as the asymptote anchor (vmin, vmax) of the fitted curve.

use super::ReferenceError;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// A single measured (Vin, Vout) calibration pair.
///
/// Immutable once constructed; voltages are in volts.
///
/// # Examples
/// ```
/// use opamp_core::types::ReferencePoint;
///
/// let working_point = ReferencePoint::new(4.54, 4.54);
/// assert_eq!(working_point.vin, working_point.vout);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ReferencePoint {
    /// Measured input voltage (V)
    pub vin: f64,
    /// Measured output voltage (V)
    pub vout: f64,
}

impl ReferencePoint {
    /// Creates a new measured pair.
    pub const fn new(vin: f64, vout: f64) -> Self {
        Self { vin, vout }
    }
}

/// An immutable, pre-sorted table of measured calibration points.
///
/// Invariants enforced at construction:
/// - at least one point,
/// - strictly ascending by `vin`.
///
/// The first point's (vin, vout) serve as the (vmin, vmax) asymptote
/// anchor of the generalised-logistic curve model. This is a deliberate
/// simplification inherited from the measurement data: the first
/// calibration point anchors the curve's asymptotes.
///
/// # Examples
/// ```
/// use opamp_core::types::{ReferencePoint, ReferenceTable};
///
/// let table = ReferenceTable::new(vec![
///     ReferencePoint::new(0.81, 10.31),
///     ReferencePoint::new(4.54, 4.54),
///     ReferencePoint::new(10.31, 0.81),
/// ]).unwrap();
///
/// assert_eq!(table.vmin(), 0.81);
/// assert_eq!(table.vmax(), 10.31);
/// assert_eq!(table.len(), 3);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ReferenceTable {
    points: Vec<ReferencePoint>,
}

impl ReferenceTable {
    /// Builds a table from measured points, validating the invariants.
    ///
    /// # Errors
    /// - [`ReferenceError::Empty`] if no points are supplied
    /// - [`ReferenceError::Unordered`] if `vin` is not strictly ascending
    pub fn new(points: Vec<ReferencePoint>) -> Result<Self, ReferenceError> {
        if points.is_empty() {
            return Err(ReferenceError::Empty);
        }
        for (index, pair) in points.windows(2).enumerate() {
            if pair[1].vin <= pair[0].vin {
                return Err(ReferenceError::Unordered { index: index + 1 });
            }
        }
        Ok(Self { points })
    }

    /// Builds a table from raw (vin, vout) tuples.
    ///
    /// Convenience wrapper over [`ReferenceTable::new`], used by the
    /// drivers that hold calibration data as constant arrays.
    pub fn from_pairs(pairs: &[(f64, f64)]) -> Result<Self, ReferenceError> {
        Self::new(
            pairs
                .iter()
                .map(|&(vin, vout)| ReferencePoint::new(vin, vout))
                .collect(),
        )
    }

    /// The asymptotic minimum of the fitted curve (first point's vin).
    pub fn vmin(&self) -> f64 {
        self.points[0].vin
    }

    /// The asymptotic maximum of the fitted curve (first point's vout).
    pub fn vmax(&self) -> f64 {
        self.points[0].vout
    }

    /// Number of calibration points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the table is empty (never true for a constructed table).
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// The calibration points, ascending by vin.
    pub fn points(&self) -> &[ReferencePoint] {
        &self.points
    }

    /// Iterates over the calibration points.
    pub fn iter(&self) -> std::slice::Iter<'_, ReferencePoint> {
        self.points.iter()
    }
}

impl<'a> IntoIterator for &'a ReferenceTable {
    type Item = &'a ReferencePoint;
    type IntoIter = std::slice::Iter<'a, ReferencePoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.points.iter()
    }
}
