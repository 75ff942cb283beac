//! Measured chip data.
//!
//! DC transfer functions measured on CAP1B/CAP1A of real dies. The
//! tables are the calibration targets; the best-known parameter triples
//! are the default starting points of the search, so a run resumes from
//! the best fit found to date unless `--fresh` resets it.

use std::fmt;
use std::str::FromStr;

use opamp_core::types::{ReferenceError, ReferenceTable};
use opamp_models::logistic::LogisticParams;

use crate::CliError;

/// Chip whose measured transfer function is being fitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Chip {
    /// MOS 6581 (measured on a die marked MOS 6581R4AR 0687 14)
    Mos6581,
    /// CSG 8580 (measured on a die marked CSG 8580R5 1690 25)
    Mos8580,
}

impl FromStr for Chip {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "6581" => Ok(Chip::Mos6581),
            "8580" => Ok(Chip::Mos8580),
            other => Err(CliError::InvalidArgument(format!(
                "unknown chip: {}. Supported: 6581, 8580",
                other
            ))),
        }
    }
}

impl fmt::Display for Chip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Chip::Mos6581 => write!(f, "6581"),
            Chip::Mos8580 => write!(f, "8580"),
        }
    }
}

/// 6581 op-amp voltage transfer function. All measured 6581 op-amps
/// have output (and thus input) voltages within 0.81 V - 10.31 V.
const OPAMP_VOLTAGE_6581: [(f64, f64); 33] = [
    (0.81, 10.31), // Approximate start of actual range
    (2.40, 10.31),
    (2.60, 10.30),
    (2.70, 10.29),
    (2.80, 10.26),
    (2.90, 10.17),
    (3.00, 10.04),
    (3.10, 9.83),
    (3.20, 9.58),
    (3.30, 9.32),
    (3.50, 8.69),
    (3.70, 8.00),
    (4.00, 6.89),
    (4.40, 5.21),
    (4.54, 4.54), // Working point (vi = vo)
    (4.60, 4.19),
    (4.80, 3.00),
    (4.90, 2.30), // Change of curvature
    (4.95, 2.03),
    (5.00, 1.88),
    (5.05, 1.77),
    (5.10, 1.69),
    (5.20, 1.58),
    (5.40, 1.44),
    (5.60, 1.33),
    (5.80, 1.26),
    (6.00, 1.21),
    (6.40, 1.12),
    (7.00, 1.02),
    (7.50, 0.97),
    (8.50, 0.89),
    (10.00, 0.81),
    (10.31, 0.81), // Approximate end of actual range
];

/// 8580 op-amp voltage transfer function.
const OPAMP_VOLTAGE_8580: [(f64, f64); 21] = [
    (1.30, 8.91), // Approximate start of actual range
    (4.76, 8.91),
    (4.77, 8.90),
    (4.78, 8.88),
    (4.785, 8.86),
    (4.79, 8.80),
    (4.795, 8.60),
    (4.80, 8.25),
    (4.805, 7.50),
    (4.81, 6.10),
    (4.815, 4.05), // Change of curvature
    (4.82, 2.27),
    (4.825, 1.65),
    (4.83, 1.55),
    (4.84, 1.47),
    (4.85, 1.43),
    (4.87, 1.37),
    (4.90, 1.34),
    (5.00, 1.30),
    (5.10, 1.30),
    (8.91, 1.30), // Approximate end of actual range
];

impl Chip {
    /// The measured reference table for this chip.
    pub fn reference_table(self) -> Result<ReferenceTable, ReferenceError> {
        match self {
            Chip::Mos6581 => ReferenceTable::from_pairs(&OPAMP_VOLTAGE_6581),
            Chip::Mos8580 => ReferenceTable::from_pairs(&OPAMP_VOLTAGE_8580),
        }
    }

    /// Best fit found to date for this chip; the default search seed.
    pub fn best_known(self) -> LogisticParams {
        match self {
            Chip::Mos6581 => LogisticParams::new(
                5.5285312141864937e-5,
                2.1608922897100533,
                0.67181935418132133,
            ),
            Chip::Mos8580 => LogisticParams::new(
                2.4325259082487039e-310,
                147.10522534153901,
                0.010293750527798712,
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chip_parsing() {
        assert_eq!("6581".parse::<Chip>().unwrap(), Chip::Mos6581);
        assert_eq!("8580".parse::<Chip>().unwrap(), Chip::Mos8580);
        assert!("6582".parse::<Chip>().is_err());
        assert!("".parse::<Chip>().is_err());
    }

    #[test]
    fn test_chip_display_roundtrip() {
        for chip in [Chip::Mos6581, Chip::Mos8580] {
            assert_eq!(chip.to_string().parse::<Chip>().unwrap(), chip);
        }
    }

    #[test]
    fn test_tables_validate() {
        // The constructor enforces strictly ascending Vin, so building
        // the tables is itself the ordering check.
        let table_6581 = Chip::Mos6581.reference_table().unwrap();
        let table_8580 = Chip::Mos8580.reference_table().unwrap();
        assert_eq!(table_6581.len(), 33);
        assert_eq!(table_8580.len(), 21);
    }

    #[test]
    fn test_6581_working_point_is_on_the_diagonal() {
        let table = Chip::Mos6581.reference_table().unwrap();
        assert!(table
            .iter()
            .any(|point| point.vin == 4.54 && point.vout == 4.54));
    }

    #[test]
    fn test_table_anchors() {
        let table = Chip::Mos6581.reference_table().unwrap();
        assert_eq!(table.vmin(), 0.81);
        assert_eq!(table.vmax(), 10.31);

        let table = Chip::Mos8580.reference_table().unwrap();
        assert_eq!(table.vmin(), 1.30);
        assert_eq!(table.vmax(), 8.91);
    }

    #[test]
    fn test_best_known_params_are_well_formed() {
        for chip in [Chip::Mos6581, Chip::Mos8580] {
            let params = chip.best_known();
            assert!(params.q > 0.0);
            assert!(params.v > 0.0);
        }
    }
}
