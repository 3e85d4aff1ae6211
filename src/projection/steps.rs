//! Series and result structures for projections

use serde::{Deserialize, Serialize};

use super::SUB_UNITS_PER_UNIT;

/// Distance from an integer (in sub-units) treated as binary representation
/// error rather than a real fractional sub-unit.
const SUB_UNIT_SNAP_TOLERANCE: f64 = 1e-6;

/// A single recorded period of a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationStep {
    /// Month index or year index, depending on the series
    pub period: u32,

    /// Human-readable period tag ("Start", "Month 7", "2031")
    pub label: String,

    /// Cumulative units of the asset held
    pub asset_quantity: f64,

    /// Cumulative fiat contributed
    pub total_contributed: f64,

    /// Asset price at this period
    pub price: f64,

    /// asset_quantity * price
    pub portfolio_value: f64,

    /// total_contributed / asset_quantity, or the market price with no holdings
    pub avg_cost_basis: f64,
}

impl SimulationStep {
    /// True when both steps carry bit-identical numeric state.
    /// Period and label are ignored.
    pub fn same_state(&self, other: &SimulationStep) -> bool {
        self.asset_quantity.to_bits() == other.asset_quantity.to_bits()
            && self.total_contributed.to_bits() == other.total_contributed.to_bits()
            && self.price.to_bits() == other.price.to_bits()
            && self.portfolio_value.to_bits() == other.portfolio_value.to_bits()
            && self.avg_cost_basis.to_bits() == other.avg_cost_basis.to_bits()
    }

    /// Unrealized gain at this period
    pub fn gain(&self) -> f64 {
        self.portfolio_value - self.total_contributed
    }
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Units held after the last month
    pub total_asset_quantity: f64,

    /// Fiat contributed over the whole horizon
    pub total_contributed: f64,

    /// Market value of holdings after the last month
    pub final_portfolio_value: f64,

    /// Asset price after the last month
    pub final_price: f64,

    /// total_asset_quantity in sub-units, truncated
    pub total_sub_units: u64,

    /// One step per month, starting at period 0
    pub monthly_series: Vec<SimulationStep>,

    /// Period 0 plus one step per completed year
    pub yearly_series: Vec<SimulationStep>,
}

impl ProjectionResult {
    /// The zero result returned when no projection is possible
    pub fn empty() -> Self {
        Self {
            total_asset_quantity: 0.0,
            total_contributed: 0.0,
            final_portfolio_value: 0.0,
            final_price: 0.0,
            total_sub_units: 0,
            monthly_series: Vec::new(),
            yearly_series: Vec::new(),
        }
    }

    pub(crate) fn with_capacity(months: usize, years: usize) -> Self {
        Self {
            monthly_series: Vec::with_capacity(months + 1),
            yearly_series: Vec::with_capacity(years + 1),
            ..Self::empty()
        }
    }

    pub(crate) fn add_monthly(&mut self, step: SimulationStep) {
        self.monthly_series.push(step);
    }

    pub(crate) fn add_yearly(&mut self, step: SimulationStep) {
        self.yearly_series.push(step);
    }

    /// Take the aggregate scalars from the last monthly step
    pub(crate) fn finalize(&mut self) {
        if let Some(last) = self.monthly_series.last() {
            self.total_asset_quantity = last.asset_quantity;
            self.total_contributed = last.total_contributed;
            self.final_portfolio_value = last.portfolio_value;
            self.final_price = last.price;
            self.total_sub_units = sub_units(last.asset_quantity);
        }
    }

    /// True for the sentinel result (price unknown)
    pub fn is_empty(&self) -> bool {
        self.monthly_series.is_empty()
    }

    pub fn final_step(&self) -> Option<&SimulationStep> {
        self.monthly_series.last()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let unrealized_gain = self.final_step().map_or(0.0, SimulationStep::gain);
        let return_multiple = if self.total_contributed > 0.0 {
            self.final_portfolio_value / self.total_contributed
        } else {
            0.0
        };

        ProjectionSummary {
            total_months: self.monthly_series.len().saturating_sub(1) as u32,
            total_contributed: self.total_contributed,
            total_asset_quantity: self.total_asset_quantity,
            total_sub_units: self.total_sub_units,
            final_price: self.final_price,
            final_portfolio_value: self.final_portfolio_value,
            unrealized_gain,
            return_multiple,
            avg_cost_basis: self.final_step().map(|s| s.avg_cost_basis).unwrap_or(0.0),
        }
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub total_contributed: f64,
    pub total_asset_quantity: f64,
    pub total_sub_units: u64,
    pub final_price: f64,
    pub final_portfolio_value: f64,
    pub unrealized_gain: f64,
    pub return_multiple: f64,
    pub avg_cost_basis: f64,
}

/// Convert a quantity of whole units to sub-units, truncating.
///
/// Products within a millionth of a sub-unit of an integer snap to it, so
/// that 0.122 held as 0.12199999999999998 still counts 12,200,000 sub-units.
/// Anything further from an integer is floored, never rounded up.
pub fn sub_units(quantity: f64) -> u64 {
    let raw = quantity * SUB_UNITS_PER_UNIT;
    if !(raw > 0.0) {
        return 0;
    }

    let nearest = raw.round();
    if (raw - nearest).abs() <= SUB_UNIT_SNAP_TOLERANCE {
        nearest as u64
    } else {
        raw.floor() as u64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn step(quantity: f64, contributed: f64, price: f64) -> SimulationStep {
        SimulationStep {
            period: 0,
            label: "Start".to_string(),
            asset_quantity: quantity,
            total_contributed: contributed,
            price,
            portfolio_value: quantity * price,
            avg_cost_basis: contributed / quantity,
        }
    }

    #[test]
    fn test_sub_units_truncates() {
        // 1.75 sub-units
        assert_eq!(sub_units(0.000_000_017_5), 1);
        // 12,345,678.9 sub-units
        assert_eq!(sub_units(0.123_456_789), 12_345_678);
        assert_eq!(sub_units(0.000_000_009_9), 0);
    }

    #[test]
    fn test_sub_units_absorbs_representation_error() {
        let mut quantity = 100.0 / 50_000.0;
        for _ in 0..12 {
            quantity += 500.0 / 50_000.0;
        }
        assert!(quantity < 0.122);
        assert_eq!(sub_units(quantity), 12_200_000);
    }

    #[test]
    fn test_sub_units_of_nothing() {
        assert_eq!(sub_units(0.0), 0);
        assert_eq!(sub_units(f64::NAN), 0);
    }

    #[test]
    fn test_empty_result_summary() {
        let result = ProjectionResult::empty();
        assert!(result.is_empty());

        let summary = result.summary();
        assert_eq!(summary.total_months, 0);
        assert_eq!(summary.return_multiple, 0.0);
        assert_eq!(summary.avg_cost_basis, 0.0);
        assert_eq!(summary.unrealized_gain, 0.0);
    }

    #[test]
    fn test_finalize_takes_last_step() {
        let mut result = ProjectionResult::with_capacity(1, 0);
        result.add_monthly(step(1.0, 100.0, 100.0));
        result.add_monthly(step(2.0, 150.0, 120.0));
        result.finalize();

        assert_eq!(result.total_asset_quantity, 2.0);
        assert_eq!(result.total_contributed, 150.0);
        assert_eq!(result.final_price, 120.0);
        assert_eq!(result.final_portfolio_value, 240.0);
        assert_eq!(result.total_sub_units, 200_000_000);

        let summary = result.summary();
        assert_eq!(summary.total_months, 1);
        assert_eq!(summary.unrealized_gain, 90.0);
        assert_eq!(summary.return_multiple, 1.6);
        assert_eq!(summary.avg_cost_basis, 75.0);
    }

    #[test]
    fn test_gain_per_step() {
        assert_eq!(step(2.0, 150.0, 120.0).gain(), 90.0);
        assert_eq!(step(1.0, 100.0, 50.0).gain(), -50.0);
    }

    #[test]
    fn test_same_state_ignores_labels() {
        let a = step(1.0, 100.0, 100.0);
        let mut b = a.clone();
        b.period = 3;
        b.label = "2029".to_string();
        assert!(a.same_state(&b));

        b.price = 100.5;
        assert!(!a.same_state(&b));
    }
}
