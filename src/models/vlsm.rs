//! VLSM sizing advice and sub-blocks.

use serde::Serialize;
use std::net::Ipv4Addr;

/// Tightest prefix for a requested host count, compared to the requested prefix.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VlsmRecommendation {
    pub optimal_prefix: u8,
    /// Usable hosts in a block of `optimal_prefix`.
    pub optimal_host_count: u64,
    pub is_optimal: bool,
    pub message: String,
}

impl std::fmt::Display for VlsmRecommendation {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

/// One equally sized block carved out of the parent subnet.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct VlsmBlock {
    pub network: Ipv4Addr,
    pub cidr: u8,
    pub mask: Ipv4Addr,
    pub host_capacity: u64,
}

impl std::fmt::Display for VlsmBlock {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.network, self.cidr)
    }
}
