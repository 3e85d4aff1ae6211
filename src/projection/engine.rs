//! Core projection engine for monthly DCA accumulation

use chrono::Datelike;
use log::{debug, trace, warn};

use super::inputs::ProjectionInputs;
use super::rates::{monthly_rate, MONTHS_PER_YEAR};
use super::state::AccumulationState;
use super::steps::ProjectionResult;

/// Label of the period-0 step in the monthly series
pub const START_LABEL: &str = "Start";

/// Configuration for a projection run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectionConfig {
    /// Calendar year of period 0. Yearly labels are offset from it.
    pub base_year: i32,
}

impl ProjectionConfig {
    pub fn with_base_year(base_year: i32) -> Self {
        Self { base_year }
    }
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            base_year: chrono::Local::now().year(),
        }
    }
}

/// Main projection engine
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Calendar year reached at the end of the horizon
    pub fn projected_year(&self, inputs: &ProjectionInputs) -> i32 {
        self.config.base_year + inputs.horizon_years as i32
    }

    /// Run a projection.
    ///
    /// Returns the empty result when the starting price is unknown (<= 0)
    /// or the horizon cannot be counted in months.
    pub fn project(&self, inputs: &ProjectionInputs) -> ProjectionResult {
        if !(inputs.starting_price > 0.0) {
            debug!(
                "starting price {} unresolved, returning empty projection",
                inputs.starting_price
            );
            return ProjectionResult::empty();
        }

        let monthly_rate = monthly_rate(inputs.annual_growth_rate_percent);
        trace!(
            "annual growth {}% -> monthly rate {:.10}",
            inputs.annual_growth_rate_percent,
            monthly_rate
        );

        let Some(total_months) = inputs.total_months() else {
            warn!(
                "horizon of {} years overflows the month counter, returning empty projection",
                inputs.horizon_years
            );
            return ProjectionResult::empty();
        };
        let mut result =
            ProjectionResult::with_capacity(total_months as usize, inputs.horizon_years as usize);
        let mut state = AccumulationState::start(inputs);

        result.add_monthly(state.record(0, START_LABEL.to_string()));
        result.add_yearly(state.record(0, self.year_label(0)));

        for _month in 1..=total_months {
            state.advance_month(monthly_rate, inputs.periodic_contribution);

            let month = state.month;
            result.add_monthly(state.record(month, format!("Month {}", month)));

            if month % MONTHS_PER_YEAR == 0 {
                let year = month / MONTHS_PER_YEAR;
                result.add_yearly(state.record(year, self.year_label(year)));
            }
        }

        result.finalize();
        result
    }

    fn year_label(&self, year_offset: u32) -> String {
        (self.config.base_year + year_offset as i32).to_string()
    }
}

/// Project with the default configuration (current calendar year)
pub fn project(inputs: &ProjectionInputs) -> ProjectionResult {
    ProjectionEngine::default().project(inputs)
}
