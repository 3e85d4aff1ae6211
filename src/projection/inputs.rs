//! Parameters for a single projection run

use serde::{Deserialize, Serialize};

use super::rates::MONTHS_PER_YEAR;

/// Default one-time contribution (fiat)
pub const DEFAULT_INITIAL_INVESTMENT: f64 = 100.0;

/// Default monthly contribution (fiat)
pub const DEFAULT_PERIODIC_CONTRIBUTION: f64 = 500.0;

/// Default simulation length in years
pub const DEFAULT_HORIZON_YEARS: u32 = 10;

/// Default compound annual growth rate, in percent
pub const DEFAULT_ANNUAL_GROWTH_RATE_PERCENT: f64 = 20.0;

/// Inputs to a projection. Immutable for the duration of a run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionInputs {
    /// One-time contribution at period 0, in fiat
    pub initial_investment: f64,

    /// Fiat contributed every month
    pub periodic_contribution: f64,

    /// Simulation length in years
    pub horizon_years: u32,

    /// Assumed CAGR as a percentage (20.0 means 20%/year)
    pub annual_growth_rate_percent: f64,

    /// Fiat price of one unit at period 0. Zero means "price not yet known".
    pub starting_price: f64,
}

impl ProjectionInputs {
    pub fn new(
        initial_investment: f64,
        periodic_contribution: f64,
        horizon_years: u32,
        annual_growth_rate_percent: f64,
        starting_price: f64,
    ) -> Self {
        Self {
            initial_investment,
            periodic_contribution,
            horizon_years,
            annual_growth_rate_percent,
            starting_price,
        }
    }

    /// Same parameters with a resolved starting price
    pub fn with_price(mut self, starting_price: f64) -> Self {
        self.starting_price = starting_price;
        self
    }

    /// Number of monthly steps after period 0, or None when the horizon
    /// is too long to count in months
    pub fn total_months(&self) -> Option<u32> {
        self.horizon_years.checked_mul(MONTHS_PER_YEAR)
    }

    /// Whether the price source has produced a usable value
    pub fn has_price(&self) -> bool {
        self.starting_price > 0.0
    }
}

impl Default for ProjectionInputs {
    fn default() -> Self {
        Self {
            initial_investment: DEFAULT_INITIAL_INVESTMENT,
            periodic_contribution: DEFAULT_PERIODIC_CONTRIBUTION,
            horizon_years: DEFAULT_HORIZON_YEARS,
            annual_growth_rate_percent: DEFAULT_ANNUAL_GROWTH_RATE_PERCENT,
            starting_price: 0.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_total_months() {
        assert_eq!(ProjectionInputs::default().total_months(), Some(120));
        let long = ProjectionInputs { horizon_years: 400_000_000, ..Default::default() };
        assert_eq!(long.total_months(), None);
    }
}
