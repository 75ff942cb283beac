//! Sweep command implementation
//!
//! Drives an equilibrium solver across an input-voltage range and prints
//! the simulated transfer curve, one sample per line.

use tracing::info;

use opamp_models::device::{Ekv, SubthresholdLogistic};
use opamp_models::opamp::{AnalyticOpAmp, NumericOpAmp, OpAmp, OpAmpGeometry, TransferCurve};

use crate::{CliError, Result};

/// Run the sweep command
pub fn run(model: &str, from: f64, to: f64, step: f64) -> Result<()> {
    if !(step > 0.0) {
        return Err(CliError::InvalidArgument(format!(
            "step must be positive, got {}",
            step
        )));
    }
    if from >= to {
        return Err(CliError::InvalidArgument(format!(
            "empty sweep range: [{}, {})",
            from, to
        )));
    }

    let geometry = OpAmpGeometry::mos6581();
    let guess = geometry.vdd;

    info!(model, from, to, step, "sweeping transfer curve");
    println!("# Vin Vx Vo iterations converged");

    match model {
        "quadratic" => print_curve(TransferCurve::sweep(
            &AnalyticOpAmp::new(geometry),
            from,
            to,
            step,
            guess,
        )),
        "subthreshold" => print_curve(TransferCurve::sweep(
            &NumericOpAmp::new(SubthresholdLogistic::default(), geometry),
            from,
            to,
            step,
            guess,
        )),
        "ekv" => print_curve(TransferCurve::sweep(
            &NumericOpAmp::new(Ekv::default(), geometry),
            from,
            to,
            step,
            guess,
        )),
        other => Err(CliError::InvalidArgument(format!(
            "unknown model: {}. Supported: quadratic, subthreshold, ekv",
            other
        ))),
    }
}

fn print_curve<A: OpAmp>(curve: TransferCurve<'_, A>) -> Result<()> {
    for sample in curve {
        let sample = sample?;
        println!(
            "{} {} {} {} {}",
            sample.vin,
            sample.point.vx,
            sample.point.vo,
            sample.point.iterations,
            sample.point.converged
        );
    }
    Ok(())
}
