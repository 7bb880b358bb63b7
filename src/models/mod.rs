//! Domain models for subnet calculations.
//!
//! - [`Ipv4`] - IPv4 CIDR block and the address arithmetic behind it
//! - [`SubnetReport`] - result of one subnet calculation
//! - [`VlsmRecommendation`] and [`VlsmBlock`] - VLSM sizing advice
//! - [`ComplianceTier`] - compliance level used by the security score

mod compliance;
mod ipv4;
mod subnet;
mod vlsm;

// Re-export public types
pub use compliance::ComplianceTier;
pub use ipv4::{
    get_cidr_mask, host_bits_for, netmask_addr, offset_addr, total_ips, usable_hosts, Ipv4,
    MAX_LENGTH,
};
pub use subnet::{SubnetReport, UsableRange};
pub use vlsm::{VlsmBlock, VlsmRecommendation};
