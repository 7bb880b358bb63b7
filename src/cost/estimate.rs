//! Monthly cost estimate from a rate table.

use super::rates::{Provider, RateTable};
use crate::error::CostError;
use serde::{Deserialize, Serialize};

pub const MONTHLY_HOURS: f64 = 24.0 * 30.0;
/// Storage provisioned per instance, in GB.
pub const STORAGE_GB_PER_INSTANCE: f64 = 50.0;
/// Above this much monthly transfer a CDN is assumed to save 15%.
pub const CDN_SAVINGS_THRESHOLD_GB: f64 = 5000.0;
pub const CDN_SAVINGS_RATE: f64 = 0.15;
/// Reserved instances are assumed to save 30% on any bill.
pub const RESERVED_SAVINGS_RATE: f64 = 0.30;

const CDN_RECOMMENDATION_GB: f64 = 10_000.0;
const RESERVED_RECOMMENDATION_INSTANCES: u32 = 10;
const NAT_INSTANCE_RATE: f64 = 0.04;

/// What the user wants priced.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostInput {
    pub provider: Provider,
    pub region: String,
    pub instance_count: u32,
    /// Monthly outbound transfer in GB.
    pub data_transfer_gb: f64,
    pub az_count: u32,
}

#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub compute: f64,
    pub networking: f64,
    pub storage: f64,
    pub load_balancer: f64,
    pub nat_gateway: f64,
}

impl CostBreakdown {
    pub fn total(&self) -> f64 {
        self.compute + self.networking + self.storage + self.load_balancer + self.nat_gateway
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CostEstimate {
    pub provider: Provider,
    pub region: String,
    /// `None` when the region is not in the rate table and base rates were used.
    pub region_multiplier: Option<f64>,
    pub monthly_data_transfer: f64,
    pub breakdown: CostBreakdown,
    pub estimated_cost: f64,
    pub recommendations: Vec<String>,
    pub savings_opportunities: f64,
}

/// Price `input` against `table`.
pub fn estimate_costs(input: &CostInput, table: &RateTable) -> Result<CostEstimate, CostError> {
    if !input.data_transfer_gb.is_finite() || input.data_transfer_gb < 0.0 {
        return Err(CostError::InvalidDataTransfer(input.data_transfer_gb));
    }
    let rates = table.rates_for(input.provider, &input.region)?;
    let instances = f64::from(input.instance_count);
    let zones = f64::from(input.az_count);

    let breakdown = CostBreakdown {
        compute: rates.compute * instances * MONTHLY_HOURS,
        networking: rates.networking * input.data_transfer_gb,
        storage: rates.storage * instances * STORAGE_GB_PER_INSTANCE,
        load_balancer: rates.load_balancer * MONTHLY_HOURS * zones,
        nat_gateway: rates.nat_gateway * MONTHLY_HOURS * zones,
    };
    let estimated_cost = breakdown.total();

    let mut recommendations = Vec::new();
    if input.data_transfer_gb > CDN_RECOMMENDATION_GB {
        recommendations
            .push("Consider implementing CloudFront/CDN for high data transfer volumes".to_string());
    }
    if input.instance_count > RESERVED_RECOMMENDATION_INSTANCES {
        recommendations.push("Evaluate Reserved Instances for potential 30-60% savings".to_string());
    }
    if rates.nat_gateway > NAT_INSTANCE_RATE {
        recommendations
            .push("Consider NAT instance instead of NAT Gateway for cost optimization".to_string());
    }

    Ok(CostEstimate {
        provider: input.provider,
        region: input.region.clone(),
        region_multiplier: table.region_multiplier(&input.region),
        monthly_data_transfer: input.data_transfer_gb,
        breakdown,
        estimated_cost,
        recommendations,
        savings_opportunities: savings_opportunities(estimated_cost, input.data_transfer_gb),
    })
}

/// Potential monthly savings for a bill of `total_cost`.
pub fn savings_opportunities(total_cost: f64, data_transfer_gb: f64) -> f64 {
    let mut savings = total_cost * RESERVED_SAVINGS_RATE;
    if data_transfer_gb > CDN_SAVINGS_THRESHOLD_GB {
        savings += total_cost * CDN_SAVINGS_RATE;
    }
    savings
}
