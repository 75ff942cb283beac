//! Fit command implementation
//!
//! Runs the Monte-Carlo search against a chip's measured table, printing
//! the per-point breakdown before and after the walk.

use serde::Serialize;
use tracing::info;

use opamp_core::types::ReferenceTable;
use opamp_models::logistic::{GeneralisedLogistic, LogisticParams};
use opamp_optimiser::monte_carlo::{FitOutcome, MonteCarloConfig, MonteCarloFitter, TracingSink};
use opamp_optimiser::rng::FitRng;
use opamp_optimiser::scoring::score;

use crate::data::Chip;
use crate::Result;

/// Final fit as written by `--output`.
#[derive(Serialize)]
struct FitReport {
    chip: String,
    q: f64,
    b: f64,
    v: f64,
    score: f64,
    iterations: u64,
    converged: bool,
}

/// Run the fit command
pub fn run(
    chip: &str,
    seed: Option<u64>,
    max_iterations: u64,
    sigma: f64,
    fresh: bool,
    output: Option<&str>,
) -> Result<()> {
    let chip: Chip = chip.parse()?;
    let table = chip.reference_table()?;

    let start = if fresh {
        LogisticParams::reset()
    } else {
        chip.best_known()
    };

    print_breakdown(&GeneralisedLogistic::anchored(start, &table), &table);
    let initial = score(&GeneralisedLogistic::anchored(start, &table), &table);
    println!("# initial score {}", initial);
    print_params(&start);

    let fitter = MonteCarloFitter::new(MonteCarloConfig {
        max_iterations,
        sigma,
    })?;
    let mut rng = seed.map(FitRng::from_seed).unwrap_or_else(FitRng::from_entropy);
    info!(
        chip = %chip,
        seed = ?rng.seed(),
        max_iterations,
        sigma,
        fresh,
        "starting fit"
    );

    let outcome = fitter.fit(&table, start, &mut rng, &mut TracingSink);
    let fit = outcome.fit();
    match outcome {
        FitOutcome::Converged(_) => info!(iterations = fit.iterations, "exact fit found"),
        FitOutcome::Exhausted(_) => info!(iterations = fit.iterations, "iteration budget spent"),
    }

    print_breakdown(&GeneralisedLogistic::anchored(fit.params, &table), &table);
    println!("# final score {}", fit.score);
    print_params(&fit.params);

    if let Some(path) = output {
        let report = FitReport {
            chip: chip.to_string(),
            q: fit.params.q,
            b: fit.params.b,
            v: fit.params.v,
            score: fit.score.error,
            iterations: fit.iterations,
            converged: outcome.is_converged(),
        };
        let file = std::fs::File::create(path)?;
        serde_json::to_writer_pretty(file, &report)?;
        info!("Wrote fit report to: {}", path);
    }

    Ok(())
}

/// Per-point breakdown: predicted, measured, squared relative error.
fn print_breakdown(curve: &GeneralisedLogistic, table: &ReferenceTable) {
    for point in table.iter() {
        let predicted = curve.predict(point.vin);
        let relative = (predicted - point.vout) / point.vout;
        println!("{} {} ({})", predicted, point.vout, relative * relative);
    }
}

fn print_params(params: &LogisticParams) {
    println!("q = {}", params.q);
    println!("b = {}", params.b);
    println!("v = {}", params.v);
    println!();
}
