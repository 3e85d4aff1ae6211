//! Scenario runner for batch projections
//!
//! Holds one engine (and so one base year) and runs many input sets
//! against it, in parallel where there is more than one.

use rayon::prelude::*;

use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionInputs, ProjectionResult};

/// Runs many projections against a shared configuration
///
/// # Example
/// ```
/// use dca_projection::{ProjectionConfig, ProjectionInputs, ScenarioRunner};
///
/// let runner = ScenarioRunner::with_config(ProjectionConfig::with_base_year(2026));
/// let base = ProjectionInputs::new(100.0, 500.0, 10, 20.0, 135_000.0);
/// let results = runner.sweep_growth(&base, &[10.0, 20.0, 40.0]);
/// assert_eq!(results.len(), 3);
/// ```
#[derive(Debug, Clone, Default)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
}

impl ScenarioRunner {
    /// Create runner with the default configuration (current year)
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
        }
    }

    /// Run a single projection
    pub fn run(&self, inputs: &ProjectionInputs) -> ProjectionResult {
        self.engine.project(inputs)
    }

    /// Run projections for many input sets, preserving order
    pub fn run_batch(&self, inputs: &[ProjectionInputs]) -> Vec<ProjectionResult> {
        inputs.par_iter().map(|i| self.engine.project(i)).collect()
    }

    /// Run the same inputs under several growth rates (percent)
    pub fn sweep_growth(&self, base: &ProjectionInputs, rates_percent: &[f64]) -> Vec<ProjectionResult> {
        let scenarios: Vec<ProjectionInputs> = rates_percent
            .iter()
            .map(|&rate| ProjectionInputs {
                annual_growth_rate_percent: rate,
                ..base.clone()
            })
            .collect();
        self.run_batch(&scenarios)
    }
}
