//! Fit quality type.

use std::fmt;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Aggregate fit error: RMS relative error over a reference table.
///
/// Total order by "lower is better". Equality is significant: the
/// optimiser adopts equal-scoring candidates to random-walk across
/// plateaus of equally good solutions. A score of exactly 0 is a
/// perfect fit and terminates the search.
///
/// # Examples
/// ```
/// use opamp_core::types::Score;
///
/// let a = Score::new(1.2889);
/// let b = Score::new(0.4771);
/// assert!(b.is_better_than(a));
/// assert!(!a.is_perfect());
/// assert!(Score::new(0.0).is_perfect());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Score {
    /// RMS relative error (non-negative)
    pub error: f64,
}

impl Score {
    /// Wraps an error value.
    pub const fn new(error: f64) -> Self {
        Self { error }
    }

    /// Whether this score is strictly better (lower) than `other`.
    pub fn is_better_than(self, other: Score) -> bool {
        self.error < other.error
    }

    /// Whether this score is exactly zero (terminal success).
    pub fn is_perfect(self) -> bool {
        self.error == 0.0
    }
}

impl fmt::Display for Score {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Full round-trip precision, matching the reporting style of the
        // measured-data tooling.
        write!(f, "{:.17e}", self.error)
    }
}
