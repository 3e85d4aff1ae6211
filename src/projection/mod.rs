//! Dollar-cost-averaging projection engine

mod inputs;
mod rates;
mod state;
mod engine;
mod steps;

pub use inputs::{
    ProjectionInputs, DEFAULT_ANNUAL_GROWTH_RATE_PERCENT, DEFAULT_HORIZON_YEARS,
    DEFAULT_INITIAL_INVESTMENT, DEFAULT_PERIODIC_CONTRIBUTION,
};
pub use rates::{compound, monthly_rate, MONTHS_PER_YEAR};
pub use state::AccumulationState;
pub use engine::{project, ProjectionConfig, ProjectionEngine, START_LABEL};
pub use steps::{sub_units, ProjectionResult, ProjectionSummary, SimulationStep};

/// Sub-units per whole unit of the asset (satoshis per bitcoin)
pub const SUB_UNITS_PER_UNIT: f64 = 100_000_000.0;
