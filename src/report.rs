//! Series export and console tables

use std::fs::File;
use std::io::Write;
use std::path::Path;

use thiserror::Error;

use crate::format::{format_asset, format_fiat};
use crate::projection::SimulationStep;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write a series as CSV with a header row
pub fn write_series_csv<W: Write>(writer: W, steps: &[SimulationStep]) -> Result<(), ReportError> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for step in steps {
        csv_writer.serialize(step)?;
    }
    csv_writer.flush()?;
    Ok(())
}

/// Write a series to a CSV file, replacing any existing file
pub fn write_series_csv_path<P: AsRef<Path>>(path: P, steps: &[SimulationStep]) -> Result<(), ReportError> {
    let file = File::create(path)?;
    write_series_csv(file, steps)
}

/// Fixed-width table of a series, one row per step
pub fn render_table(steps: &[SimulationStep]) -> String {
    let mut out = format!(
        "{:<10} {:>16} {:>16} {:>16} {:>18} {:>18}\n",
        "Year", "BTC Stacked", "Total Invested", "Avg Cost Basis", "Projected Price", "Estimated Value"
    );
    out.push_str(&"-".repeat(99));
    out.push('\n');

    for step in steps {
        out.push_str(&format!(
            "{:<10} {:>16} {:>16} {:>16} {:>18} {:>18}\n",
            step.label,
            format_asset(step.asset_quantity),
            format_fiat(step.total_contributed),
            format_fiat(step.avg_cost_basis),
            format_fiat(step.price),
            format_fiat(step.portfolio_value),
        ));
    }

    out
}
