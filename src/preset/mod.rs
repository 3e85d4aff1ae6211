//! Input presets: shareable query parameters and CSV batch files

pub mod loader;
mod query;

use thiserror::Error;

use crate::projection::ProjectionInputs;

pub use loader::{load_presets, load_presets_from_reader, NamedPreset};
pub use query::{
    from_lookup, from_query, parse_leading_number, price_override, share_url, to_query,
    DEFAULT_SHARE_BASE_URL, KEY_DCA, KEY_GROWTH, KEY_INITIAL, KEY_PRICE, KEY_YEARS,
};

/// Longest horizon the calculator offers
pub const MAX_HORIZON_YEARS: u32 = 30;

/// Longest horizon any entry point will project
pub const MAX_PROJECTION_YEARS: u32 = 100;

/// Errors raised while reading authored preset files
#[derive(Debug, Error)]
pub enum PresetError {
    #[error("failed to read presets: {0}")]
    Csv(#[from] csv::Error),

    #[error("preset row {row}: {reason}")]
    InvalidRow { row: usize, reason: String },
}

/// Check that inputs lie in the engine's documented domain.
///
/// The engine itself never fails; rejecting bad values is the input
/// layer's job.
pub fn validate(inputs: &ProjectionInputs) -> Result<(), String> {
    let non_negative = [
        ("initial", inputs.initial_investment),
        ("dca", inputs.periodic_contribution),
        ("price", inputs.starting_price),
    ];
    for (field, value) in non_negative {
        if !value.is_finite() || value < 0.0 {
            return Err(format!("{} must be a non-negative number, got {}", field, value));
        }
    }

    if !(1..=MAX_PROJECTION_YEARS).contains(&inputs.horizon_years) {
        return Err(format!(
            "years must be between 1 and {}, got {}",
            MAX_PROJECTION_YEARS, inputs.horizon_years
        ));
    }

    let growth = inputs.annual_growth_rate_percent;
    if !growth.is_finite() || growth <= -100.0 {
        return Err(format!("growth must be greater than -100%, got {}", growth));
    }

    Ok(())
}

/// Clamp the horizon into the range the calculator offers
pub fn clamp_horizon(mut inputs: ProjectionInputs) -> ProjectionInputs {
    inputs.horizon_years = inputs.horizon_years.clamp(1, MAX_HORIZON_YEARS);
    inputs
}

/// Inputs and optional manual price for one calculator request.
///
/// The horizon is clamped to the calculator's range before validation.
pub fn from_request<'a, F>(lookup: F) -> Result<(ProjectionInputs, Option<f64>), String>
where
    F: Fn(&str) -> Option<&'a str>,
{
    let inputs = clamp_horizon(from_lookup(&lookup));
    validate(&inputs)?;
    let price = price_override(&lookup)?;
    Ok((inputs, price))
}
