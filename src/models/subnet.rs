//! Subnet calculation result.

use super::{ComplianceTier, VlsmBlock, VlsmRecommendation};
use serde::Serialize;
use std::net::Ipv4Addr;

/// First and last assignable address of a subnet.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct UsableRange {
    pub first: Ipv4Addr,
    pub last: Ipv4Addr,
}

impl std::fmt::Display for UsableRange {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{} - {}", self.first, self.last)
    }
}

/// Full descriptor of a subnet plus the advisory outputs.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubnetReport {
    pub network_address: Ipv4Addr,
    pub broadcast_address: Ipv4Addr,
    pub subnet_mask: Ipv4Addr,
    /// Prefix length, e.g. 24 for /24.
    pub cidr: u8,
    #[serde(rename = "totalIPs")]
    pub total_ips: u64,
    pub usable_hosts: u64,
    /// `None` for /31 and /32.
    pub usable_range: Option<UsableRange>,
    pub hosts_required: u64,
    /// Percentage of usable hosts the request occupies, `None` when nothing is usable.
    pub utilization: Option<f64>,
    pub vlsm_recommendation: VlsmRecommendation,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub vlsm_blocks: Option<Vec<VlsmBlock>>,
    pub security_score: u8,
    pub az_count: u32,
    pub compliance_tier: ComplianceTier,
}

impl SubnetReport {
    /// `network/prefix`, e.g. `192.168.1.0/28`.
    pub fn cidr_notation(&self) -> String {
        format!("{}/{}", self.network_address, self.cidr)
    }
}
