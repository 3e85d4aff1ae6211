//! DCA Projection - dollar-cost-averaging accumulation projections
//!
//! This library provides:
//! - A pure, deterministic monthly/yearly projection engine
//! - Shareable preset parsing (URL query parameters) and CSV batch presets
//! - Display formatting for fiat, asset and sub-unit amounts
//! - Starting-price resolution with provider fallback
//! - CSV export, console tables and batch scenario runs

pub mod projection;
pub mod preset;
pub mod format;
pub mod price;
pub mod report;
pub mod scenario;

// Re-export commonly used types
pub use projection::{
    project, ProjectionConfig, ProjectionEngine, ProjectionInputs, ProjectionResult,
    ProjectionSummary, SimulationStep,
};
pub use price::{PriceFeed, PriceFeedConfig, PriceOrigin, PriceQuote};
pub use scenario::ScenarioRunner;
