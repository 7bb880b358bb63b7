//! Built-in reference architectures and their address plans.

use super::tiers::{allocate_tiers, TierAllocation, TierRequest};
use crate::error::SubnetError;
use crate::models::Ipv4;
use serde::Serialize;

/// One tier of a reference architecture.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioTier {
    pub purpose: &'static str,
    pub hosts: u64,
}

/// A reference architecture with its tiers.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Scenario {
    pub name: &'static str,
    pub description: &'static str,
    pub tiers: Vec<ScenarioTier>,
    /// Estimated monthly savings in USD from right-sizing, as advertised.
    pub estimated_savings: u32,
}

impl Scenario {
    pub fn tier_requests(&self) -> Vec<TierRequest> {
        self.tiers
            .iter()
            .map(|t| TierRequest::new(t.purpose, t.hosts))
            .collect()
    }

    /// Sum of every tier's host count.
    pub fn total_hosts(&self) -> u64 {
        self.tiers.iter().map(|t| t.hosts).sum()
    }
}

/// A scenario laid out inside a concrete parent block.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioPlan {
    pub scenario: &'static str,
    pub parent: Ipv4,
    pub allocations: Vec<TierAllocation>,
    pub addresses_used: u64,
    /// Share of the parent block handed out to tiers, in percent.
    pub parent_utilization: f64,
}

fn tier(purpose: &'static str, hosts: u64) -> ScenarioTier {
    ScenarioTier { purpose, hosts }
}

/// The reference architectures offered by the calculator.
pub fn builtin_scenarios() -> Vec<Scenario> {
    vec![
        Scenario {
            name: "Multi-Tier Web Application",
            description: "Optimized for web, app, and database tiers with security segmentation",
            tiers: vec![
                tier("Web Tier (Public)", 62),
                tier("Application Tier (Private)", 126),
                tier("Database Tier (Private)", 30),
            ],
            estimated_savings: 1200,
        },
        Scenario {
            name: "Microservices Architecture",
            description: "Container-optimized subnetting for Kubernetes/ECS workloads",
            tiers: vec![
                tier("Container Nodes", 254),
                tier("Load Balancers", 62),
                tier("Management", 14),
            ],
            estimated_savings: 800,
        },
        Scenario {
            name: "Hybrid Cloud Connectivity",
            description: "Optimized for on-premises integration with dedicated connectivity",
            tiers: vec![
                tier("Hybrid Workloads", 126),
                tier("VPN Gateway", 30),
                tier("Directory Services", 14),
            ],
            estimated_savings: 2000,
        },
    ]
}

/// Find a built-in scenario by case-insensitive name prefix, e.g. `micro`.
pub fn find_scenario(name: &str) -> Option<Scenario> {
    let needle = name.trim().to_ascii_lowercase();
    if needle.is_empty() {
        return None;
    }
    builtin_scenarios()
        .into_iter()
        .find(|s| s.name.to_ascii_lowercase().starts_with(&needle))
}

/// Lay out `scenario` inside `parent`.
pub fn plan_scenario(scenario: &Scenario, parent: Ipv4) -> Result<ScenarioPlan, SubnetError> {
    let parent = parent.network();
    let allocations = allocate_tiers(parent, &scenario.tier_requests())?;
    let addresses_used: u64 = allocations.iter().map(|a| a.subnet.total_ips()).sum();
    Ok(ScenarioPlan {
        scenario: scenario.name,
        parent,
        parent_utilization: addresses_used as f64 / parent.total_ips() as f64 * 100.0,
        addresses_used,
        allocations,
    })
}
