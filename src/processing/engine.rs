//! Subnet engine: validated inputs in, [`SubnetReport`] out.
//!
//! Pure computation. Nothing here logs, stores state or talks to a sink; the
//! same query always yields the same report.

use super::security::security_score;
use super::vlsm::{decompose_blocks, recommend, OffsetArithmetic};
use crate::error::SubnetError;
use crate::models::{ComplianceTier, Ipv4, SubnetReport, UsableRange};
use crate::validation::{
    parse_host_count, parse_ipv4, parse_prefix_length, validate_host_count,
    validate_prefix_length,
};
use serde::Serialize;
use std::net::Ipv4Addr;

/// A fully validated calculation request.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SubnetQuery {
    pub ip_address: Ipv4Addr,
    pub prefix_length: u8,
    pub hosts_required: u64,
    pub az_count: u32,
    pub compliance_tier: ComplianceTier,
}

impl SubnetQuery {
    /// Validate numeric inputs. The address is still text since that is
    /// where most user mistakes are.
    pub fn new(
        ip: &str,
        prefix_length: i64,
        hosts_required: i64,
        az_count: u32,
        compliance_tier: ComplianceTier,
    ) -> Result<SubnetQuery, SubnetError> {
        Ok(SubnetQuery {
            ip_address: parse_ipv4(ip)?,
            prefix_length: validate_prefix_length(prefix_length)?,
            hosts_required: validate_host_count(hosts_required)?,
            az_count,
            compliance_tier,
        })
    }

    /// Validate raw text as typed into a form or passed on the command line.
    pub fn parse(
        ip: &str,
        prefix_length: &str,
        hosts_required: &str,
        az_count: u32,
        compliance_tier: ComplianceTier,
    ) -> Result<SubnetQuery, SubnetError> {
        Ok(SubnetQuery {
            ip_address: parse_ipv4(ip)?,
            prefix_length: parse_prefix_length(prefix_length)?,
            hosts_required: parse_host_count(hosts_required)?,
            az_count,
            compliance_tier,
        })
    }
}

/// Validate the inputs and compute the subnet report.
///
/// # Examples
/// ```
/// use subnet_advisor::compute_subnet;
/// use subnet_advisor::models::ComplianceTier;
///
/// let report = compute_subnet("192.168.1.10", 28, 10, 2, ComplianceTier::Standard).unwrap();
/// assert_eq!(report.network_address.to_string(), "192.168.1.0");
/// assert_eq!(report.usable_hosts, 14);
/// ```
pub fn compute_subnet(
    ip: &str,
    prefix_length: i64,
    hosts_required: i64,
    az_count: u32,
    compliance_tier: ComplianceTier,
) -> Result<SubnetReport, SubnetError> {
    let query = SubnetQuery::new(ip, prefix_length, hosts_required, az_count, compliance_tier)?;
    calculate(&query)
}

/// Same as [`compute_subnet`] with every numeric field still in text form.
pub fn compute_subnet_from_text(
    ip: &str,
    prefix_length: &str,
    hosts_required: &str,
    az_count: u32,
    compliance_tier: ComplianceTier,
) -> Result<SubnetReport, SubnetError> {
    let query = SubnetQuery::parse(ip, prefix_length, hosts_required, az_count, compliance_tier)?;
    calculate(&query)
}

/// Compute the report for an already validated query.
pub fn calculate(query: &SubnetQuery) -> Result<SubnetReport, SubnetError> {
    let subnet = Ipv4::from_parts(query.ip_address, query.prefix_length)?.network();
    let usable_hosts = subnet.usable_hosts();
    let hosts_required = query.hosts_required;

    let usable_range = subnet
        .first_usable()
        .zip(subnet.last_usable())
        .map(|(first, last)| UsableRange { first, last });

    let utilization = if usable_hosts > 0 {
        Some(hosts_required as f64 / usable_hosts as f64 * 100.0)
    } else {
        None
    };

    let vlsm_recommendation = recommend(hosts_required, subnet.mask())?;

    let vlsm_blocks = if hosts_required < usable_hosts {
        Some(decompose_blocks(
            subnet,
            vlsm_recommendation.optimal_prefix,
            OffsetArithmetic::Carry,
        )?)
    } else {
        None
    };

    Ok(SubnetReport {
        network_address: subnet.lo(),
        broadcast_address: subnet.hi(),
        subnet_mask: subnet.netmask(),
        cidr: subnet.mask(),
        total_ips: subnet.total_ips(),
        usable_hosts,
        usable_range,
        hosts_required,
        utilization,
        vlsm_recommendation,
        vlsm_blocks,
        security_score: security_score(
            subnet.mask(),
            query.az_count,
            query.compliance_tier,
        ),
        az_count: query.az_count,
        compliance_tier: query.compliance_tier,
    })
}
