//! Run projections for every preset in a CSV batch file
//!
//! Outputs one summary row per preset

use anyhow::{Context, Result};
use clap::Parser;
use log::{info, warn};
use serde::Serialize;
use std::path::PathBuf;
use std::time::Instant;

use dca_projection::preset::load_presets;
use dca_projection::price::DEFAULT_FALLBACK_PRICE;
use dca_projection::ScenarioRunner;

#[derive(Debug, Parser)]
#[command(name = "run_batch", about = "Project every preset in a CSV batch file")]
struct Args {
    /// Preset file with header name,initial,dca,years,growth,price
    presets: PathBuf,

    /// Summary output file
    #[arg(default_value = "batch_summary.csv")]
    output: PathBuf,

    /// Starting price for presets whose price column is 0
    #[arg(long, default_value_t = DEFAULT_FALLBACK_PRICE)]
    default_price: f64,
}

/// One output row per preset
#[derive(Debug, Serialize)]
struct SummaryRow<'a> {
    name: &'a str,
    initial: f64,
    dca: f64,
    years: u32,
    growth: f64,
    starting_price: f64,
    total_contributed: f64,
    total_asset_quantity: f64,
    total_sub_units: u64,
    final_price: f64,
    final_portfolio_value: f64,
    unrealized_gain: f64,
    return_multiple: f64,
}

fn main() -> Result<()> {
    env_logger::init();

    let args = Args::parse();
    let start = Instant::now();

    let presets = load_presets(&args.presets)
        .with_context(|| format!("loading presets from {}", args.presets.display()))?;
    info!("loaded {} presets in {:?}", presets.len(), start.elapsed());

    let inputs: Vec<_> = presets
        .iter()
        .map(|preset| {
            if preset.inputs.has_price() {
                preset.inputs.clone()
            } else {
                warn!("preset {} has no price, using {}", preset.name, args.default_price);
                preset.inputs.clone().with_price(args.default_price)
            }
        })
        .collect();

    let proj_start = Instant::now();
    let runner = ScenarioRunner::new();
    let results = runner.run_batch(&inputs);
    info!("projections complete in {:?}", proj_start.elapsed());

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    for ((preset, input), result) in presets.iter().zip(&inputs).zip(&results) {
        let summary = result.summary();
        writer.serialize(SummaryRow {
            name: &preset.name,
            initial: input.initial_investment,
            dca: input.periodic_contribution,
            years: input.horizon_years,
            growth: input.annual_growth_rate_percent,
            starting_price: input.starting_price,
            total_contributed: summary.total_contributed,
            total_asset_quantity: summary.total_asset_quantity,
            total_sub_units: summary.total_sub_units,
            final_price: summary.final_price,
            final_portfolio_value: summary.final_portfolio_value,
            unrealized_gain: summary.unrealized_gain,
            return_multiple: summary.return_multiple,
        })?;
    }
    writer.flush()?;

    println!(
        "Wrote {} summaries to {} in {:?}",
        results.len(),
        args.output.display(),
        start.elapsed()
    );
    Ok(())
}
