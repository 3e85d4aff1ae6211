//! Running accumulation state for a projection

use super::inputs::ProjectionInputs;
use super::steps::SimulationStep;

/// Holdings and price at a point in time during projection
#[derive(Debug, Clone)]
pub struct AccumulationState {
    /// Current projection month (0 = start)
    pub month: u32,

    /// Asset price in effect this month
    pub price: f64,

    /// Cumulative units of the asset held
    pub asset_quantity: f64,

    /// Cumulative fiat contributed
    pub total_contributed: f64,
}

impl AccumulationState {
    /// Initialize state at period 0.
    ///
    /// The initial investment, if any, buys at the raw starting price.
    pub fn start(inputs: &ProjectionInputs) -> Self {
        let mut state = Self {
            month: 0,
            price: inputs.starting_price,
            asset_quantity: 0.0,
            total_contributed: 0.0,
        };

        if inputs.initial_investment > 0.0 {
            state.buy(inputs.initial_investment);
        }

        state
    }

    /// Advance to next month: compound the price, then buy at the new price
    pub fn advance_month(&mut self, monthly_rate: f64, contribution: f64) {
        self.month += 1;
        self.price *= 1.0 + monthly_rate;
        self.buy(contribution);
    }

    fn buy(&mut self, amount: f64) {
        self.asset_quantity += amount / self.price;
        self.total_contributed += amount;
    }

    /// Market value of current holdings
    pub fn portfolio_value(&self) -> f64 {
        self.asset_quantity * self.price
    }

    /// Break-even price of current holdings.
    ///
    /// With no holdings this reports the market price (entry price).
    pub fn avg_cost_basis(&self) -> f64 {
        if self.asset_quantity > 0.0 {
            self.total_contributed / self.asset_quantity
        } else {
            self.price
        }
    }

    /// Snapshot the state as a series step
    pub fn record(&self, period: u32, label: String) -> SimulationStep {
        SimulationStep {
            period,
            label,
            asset_quantity: self.asset_quantity,
            total_contributed: self.total_contributed,
            price: self.price,
            portfolio_value: self.portfolio_value(),
            avg_cost_basis: self.avg_cost_basis(),
        }
    }
}
