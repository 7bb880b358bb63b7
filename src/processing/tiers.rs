//! Multi-tier VLSM allocation inside a parent block.
//!
//! Tiers are placed largest first, each at the next address aligned to its own
//! block size, so no space is lost to alignment between tiers.

use super::vlsm::optimal_prefix;
use crate::error::SubnetError;
use crate::models::{Ipv4, UsableRange};
use crate::validation::validate_host_count;
use serde::{Deserialize, Serialize};
use std::net::Ipv4Addr;

/// A named group of hosts that needs its own subnet.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct TierRequest {
    pub name: String,
    pub hosts: u64,
}

impl TierRequest {
    pub fn new(name: &str, hosts: u64) -> TierRequest {
        TierRequest {
            name: name.to_string(),
            hosts,
        }
    }
}

/// The subnet handed to one tier.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TierAllocation {
    pub name: String,
    pub hosts_required: u64,
    pub subnet: Ipv4,
    pub broadcast: Ipv4Addr,
    pub host_capacity: u64,
    pub usable_range: Option<UsableRange>,
}

/// Allocate one subnet per tier inside `parent`.
///
/// Allocations come back in placement order (largest tier first).
pub fn allocate_tiers(parent: Ipv4, tiers: &[TierRequest]) -> Result<Vec<TierAllocation>, SubnetError> {
    let parent = parent.network();
    let mut order: Vec<&TierRequest> = tiers.iter().collect();
    // stable sort keeps the caller's order between equal tiers
    order.sort_by(|a, b| b.hosts.cmp(&a.hosts));

    let end = u64::from(u32::from(parent.hi()));
    let mut cursor = u64::from(u32::from(parent.lo()));
    let mut allocations = Vec::with_capacity(order.len());

    for tier in order {
        let hosts = validate_host_count(i64::try_from(tier.hosts).unwrap_or(i64::MAX))?;
        let prefix = optimal_prefix(hosts)?;
        let size = 1u64 << (32 - prefix);
        let start = cursor.div_ceil(size) * size;

        if prefix < parent.mask() || start + size - 1 > end {
            return Err(SubnetError::TierDoesNotFit {
                tier: tier.name.clone(),
                prefix,
                parent: parent.to_string(),
            });
        }

        // start <= end, so it fits in 32 bits
        let subnet = Ipv4::from_parts(Ipv4Addr::from(start as u32), prefix)?;
        allocations.push(TierAllocation {
            name: tier.name.clone(),
            hosts_required: hosts,
            subnet,
            broadcast: subnet.hi(),
            host_capacity: subnet.usable_hosts(),
            usable_range: subnet
                .first_usable()
                .zip(subnet.last_usable())
                .map(|(first, last)| UsableRange { first, last }),
        });
        cursor = start + size;
    }

    Ok(allocations)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allocate_tiers_largest_first() {
        let parent = Ipv4::new("10.0.0.0/24").unwrap();
        let tiers = vec![
            TierRequest::new("web", 62),
            TierRequest::new("app", 126),
            TierRequest::new("db", 30),
        ];
        let allocations = allocate_tiers(parent, &tiers).unwrap();
        let got: Vec<(String, String)> = allocations
            .iter()
            .map(|a| (a.name.clone(), a.subnet.to_string()))
            .collect();
        assert_eq!(
            got,
            vec![
                ("app".to_string(), "10.0.0.0/25".to_string()),
                ("web".to_string(), "10.0.0.128/26".to_string()),
                ("db".to_string(), "10.0.0.192/27".to_string()),
            ]
        );
        assert_eq!(allocations[0].host_capacity, 126);
        assert_eq!(allocations[2].broadcast, Ipv4Addr::new(10, 0, 0, 223));
    }

    #[test]
    fn test_allocate_tiers_crosses_octets() {
        let parent = Ipv4::new("10.5.0.0/22").unwrap();
        let tiers = vec![
            TierRequest::new("nodes", 254),
            TierRequest::new("pods", 500),
            TierRequest::new("mgmt", 14),
        ];
        let allocations = allocate_tiers(parent, &tiers).unwrap();
        assert_eq!(allocations[0].subnet, Ipv4::new("10.5.0.0/23").unwrap());
        assert_eq!(allocations[1].subnet, Ipv4::new("10.5.2.0/24").unwrap());
        assert_eq!(allocations[2].subnet, Ipv4::new("10.5.3.0/28").unwrap());
        let range = allocations[0].usable_range.unwrap();
        assert_eq!(range.last, Ipv4Addr::new(10, 5, 1, 254));
    }

    #[test]
    fn test_allocate_tiers_normalises_parent() {
        let parent = Ipv4::new("10.0.0.99/24").unwrap();
        let allocations = allocate_tiers(parent, &[TierRequest::new("a", 10)]).unwrap();
        assert_eq!(allocations[0].subnet, Ipv4::new("10.0.0.0/28").unwrap());
    }

    #[test]
    fn test_allocate_tiers_does_not_fit() {
        let parent = Ipv4::new("10.0.0.0/24").unwrap();
        let tiers = vec![
            TierRequest::new("nodes", 254),
            TierRequest::new("lb", 62),
        ];
        let err = allocate_tiers(parent, &tiers).unwrap_err();
        assert_eq!(
            err,
            SubnetError::TierDoesNotFit {
                tier: "lb".to_string(),
                prefix: 26,
                parent: "10.0.0.0/24".to_string()
            }
        );

        let err = allocate_tiers(parent, &[TierRequest::new("big", 300)]).unwrap_err();
        assert_eq!(err.field(), "tiers");
    }

    #[test]
    fn test_allocate_tiers_rejects_zero_hosts() {
        let parent = Ipv4::new("10.0.0.0/24").unwrap();
        let err = allocate_tiers(parent, &[TierRequest::new("empty", 0)]).unwrap_err();
        assert!(matches!(err, SubnetError::InvalidHostCount(_)));
    }

    #[test]
    fn test_allocate_tiers_top_of_address_space() {
        let parent = Ipv4::new("255.255.255.0/24").unwrap();
        let allocations = allocate_tiers(
            parent,
            &[TierRequest::new("a", 126), TierRequest::new("b", 126)],
        )
        .unwrap();
        assert_eq!(allocations[1].broadcast, Ipv4Addr::new(255, 255, 255, 255));
    }
}
