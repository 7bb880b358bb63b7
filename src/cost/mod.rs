//! Cloud networking cost estimates.
//!
//! - [`rates`] - provider rate table and regional multipliers
//! - [`estimate`] - monthly estimate and savings heuristics

mod estimate;
mod rates;

pub use estimate::{
    estimate_costs, savings_opportunities, CostBreakdown, CostEstimate, CostInput, MONTHLY_HOURS,
};
pub use rates::{Provider, ProviderRates, RateTable};
