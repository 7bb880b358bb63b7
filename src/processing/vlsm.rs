//! VLSM sizing and sub-block decomposition.

use crate::error::{SubnetError, MAX_HOSTS_REQUIRED};
use crate::models::{
    host_bits_for, netmask_addr, offset_addr, total_ips, usable_hosts, Ipv4, VlsmBlock,
    VlsmRecommendation, MAX_LENGTH,
};
use crate::validation::validate_host_count;
use std::net::Ipv4Addr;

/// Most blocks shown in a decomposition.
pub const MAX_VLSM_BLOCKS: u64 = 4;

/// How block offsets are added to the parent network address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OffsetArithmetic {
    /// Full 32-bit addition, offsets carry into higher octets.
    #[default]
    Carry,
    /// Offsets only touch the fourth octet, modulo 256. Blocks of 256
    /// addresses or more all collapse onto the parent network address.
    FourthOctetOnly,
}

/// Smallest prefix whose usable host count covers `hosts_required`.
///
/// Host counts outside `1..=16777214` are rejected like user input.
///
/// # Examples
/// ```
/// use subnet_advisor::processing::optimal_prefix;
/// assert_eq!(optimal_prefix(254).unwrap(), 24);
/// assert_eq!(optimal_prefix(255).unwrap(), 23);
/// assert!(optimal_prefix(u64::MAX).is_err());
/// ```
pub fn optimal_prefix(hosts_required: u64) -> Result<u8, SubnetError> {
    let hosts = validate_host_count(i64::try_from(hosts_required).unwrap_or(i64::MAX))?;
    let bits = host_bits_for(hosts).ok_or_else(|| {
        SubnetError::InvalidHostCount(format!(
            "Hosts needed must not exceed {MAX_HOSTS_REQUIRED}"
        ))
    })?;
    Ok(MAX_LENGTH - bits)
}

/// Compare the requested prefix with the tightest fit for `hosts_required`.
pub fn recommend(hosts_required: u64, current_prefix: u8) -> Result<VlsmRecommendation, SubnetError> {
    let optimal = optimal_prefix(hosts_required)?;
    let optimal_host_count = usable_hosts(optimal)?;
    let is_optimal = optimal == current_prefix;
    let message = if is_optimal {
        "Current CIDR is optimal for requirements".to_string()
    } else {
        format!("Consider using /{optimal} for optimal IP utilization ({optimal_host_count} hosts)")
    };
    Ok(VlsmRecommendation {
        optimal_prefix: optimal,
        optimal_host_count,
        is_optimal,
        message,
    })
}

/// Carve up to [`MAX_VLSM_BLOCKS`] contiguous `/block_prefix` blocks out of `parent`.
///
/// Returns an empty list when a single block is bigger than the parent.
pub fn decompose_blocks(
    parent: Ipv4,
    block_prefix: u8,
    arithmetic: OffsetArithmetic,
) -> Result<Vec<VlsmBlock>, SubnetError> {
    let block_size = total_ips(block_prefix)?;
    let block_count = MAX_VLSM_BLOCKS.min(parent.total_ips() / block_size);
    let mask = netmask_addr(block_prefix)?;
    let host_capacity = usable_hosts(block_prefix)?;
    let start = parent.lo();

    (0..block_count)
        .map(|i| {
            let offset = i * block_size;
            let network = match arithmetic {
                OffsetArithmetic::Carry => offset_addr(start, offset)?,
                OffsetArithmetic::FourthOctetOnly => {
                    let mut octets = start.octets();
                    octets[3] = ((u64::from(octets[3]) + offset) % 256) as u8;
                    Ipv4Addr::from(octets)
                }
            };
            Ok(VlsmBlock {
                network,
                cidr: block_prefix,
                mask,
                host_capacity,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_optimal_prefix_is_tightest_fit() {
        for hosts in [1u64, 2, 3, 14, 15, 30, 62, 100, 126, 127, 254, 255, 1000, 65534, 16_777_214] {
            let prefix = optimal_prefix(hosts).unwrap();
            let capacity = (1u64 << (32 - prefix)) - 2;
            assert!(capacity >= hosts, "/{prefix} too small for {hosts}");
            let tighter = (1u64 << (32 - (prefix + 1))).saturating_sub(2);
            assert!(tighter < hosts, "/{} would also fit {hosts}", prefix + 1);
        }
    }

    #[test]
    fn test_optimal_prefix_power_of_two_boundary() {
        // hosts + 2 == 2^n must not round up to the next size
        assert_eq!(optimal_prefix(14).unwrap(), 28);
        assert_eq!(optimal_prefix(62).unwrap(), 26);
        assert_eq!(optimal_prefix(254).unwrap(), 24);
        assert_eq!(optimal_prefix(16_777_214).unwrap(), 8);
        assert_eq!(optimal_prefix(15).unwrap(), 27);
        assert_eq!(optimal_prefix(1).unwrap(), 30);
    }

    #[test]
    fn test_optimal_prefix_rejects_out_of_range_hosts() {
        assert!(matches!(optimal_prefix(0), Err(SubnetError::InvalidHostCount(_))));
        assert!(matches!(
            optimal_prefix(16_777_215),
            Err(SubnetError::InvalidHostCount(_))
        ));
        assert!(optimal_prefix(5_000_000_000).is_err());
        assert!(optimal_prefix(u64::MAX - 1).is_err());
        assert!(optimal_prefix(u64::MAX).is_err());
        assert!(recommend(u64::MAX, 24).is_err());
    }

    #[test]
    fn test_recommend_optimal() {
        let rec = recommend(254, 24).unwrap();
        assert!(rec.is_optimal);
        assert_eq!(rec.optimal_prefix, 24);
        assert_eq!(rec.optimal_host_count, 254);
        assert_eq!(rec.message, "Current CIDR is optimal for requirements");
    }

    #[test]
    fn test_recommend_other_prefix() {
        let rec = recommend(100, 24).unwrap();
        assert!(!rec.is_optimal);
        assert_eq!(rec.optimal_prefix, 25);
        assert_eq!(
            rec.to_string(),
            "Consider using /25 for optimal IP utilization (126 hosts)"
        );

        let rec = recommend(500, 24).unwrap();
        assert_eq!(rec.optimal_prefix, 23);
        assert_eq!(rec.optimal_host_count, 510);
    }

    #[test]
    fn test_decompose_blocks_within_24() {
        let parent = Ipv4::new("192.168.1.0/24").unwrap();
        let blocks = decompose_blocks(parent, 26, OffsetArithmetic::Carry).unwrap();
        let networks: Vec<String> = blocks.iter().map(|b| b.to_string()).collect();
        assert_eq!(
            networks,
            vec![
                "192.168.1.0/26",
                "192.168.1.64/26",
                "192.168.1.128/26",
                "192.168.1.192/26"
            ]
        );
        assert!(blocks.iter().all(|b| b.host_capacity == 62));
        assert!(blocks
            .iter()
            .all(|b| b.mask == Ipv4Addr::new(255, 255, 255, 192)));

        // same answer either way when nothing crosses an octet
        let legacy = decompose_blocks(parent, 26, OffsetArithmetic::FourthOctetOnly).unwrap();
        assert_eq!(blocks, legacy);
    }

    #[test]
    fn test_decompose_blocks_caps_at_four() {
        let parent = Ipv4::new("10.0.0.0/24").unwrap();
        let blocks = decompose_blocks(parent, 30, OffsetArithmetic::Carry).unwrap();
        assert_eq!(blocks.len(), 4);
        assert_eq!(blocks[3].network, Ipv4Addr::new(10, 0, 0, 12));
    }

    #[test]
    fn test_decompose_blocks_fewer_than_four() {
        let parent = Ipv4::new("10.0.0.0/24").unwrap();
        let blocks = decompose_blocks(parent, 25, OffsetArithmetic::Carry).unwrap();
        assert_eq!(blocks.len(), 2);
        assert!(decompose_blocks(parent, 23, OffsetArithmetic::Carry)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_decompose_blocks_carry_into_third_octet() {
        let parent = Ipv4::new("10.0.0.0/16").unwrap();
        let blocks = decompose_blocks(parent, 22, OffsetArithmetic::Carry).unwrap();
        let networks: Vec<Ipv4Addr> = blocks.iter().map(|b| b.network).collect();
        assert_eq!(
            networks,
            vec![
                Ipv4Addr::new(10, 0, 0, 0),
                Ipv4Addr::new(10, 0, 4, 0),
                Ipv4Addr::new(10, 0, 8, 0),
                Ipv4Addr::new(10, 0, 12, 0),
            ]
        );
    }

    #[test]
    fn test_decompose_blocks_fourth_octet_only_collapses() {
        let parent = Ipv4::new("10.0.0.0/16").unwrap();
        let blocks = decompose_blocks(parent, 22, OffsetArithmetic::FourthOctetOnly).unwrap();
        assert_eq!(blocks.len(), 4);
        assert!(blocks
            .iter()
            .all(|b| b.network == Ipv4Addr::new(10, 0, 0, 0)));

        // /25 blocks inside a /23 wrap within the fourth octet
        let parent = Ipv4::new("10.0.0.0/23").unwrap();
        let blocks = decompose_blocks(parent, 25, OffsetArithmetic::FourthOctetOnly).unwrap();
        let networks: Vec<Ipv4Addr> = blocks.iter().map(|b| b.network).collect();
        assert_eq!(
            networks,
            vec![
                Ipv4Addr::new(10, 0, 0, 0),
                Ipv4Addr::new(10, 0, 0, 128),
                Ipv4Addr::new(10, 0, 0, 0),
                Ipv4Addr::new(10, 0, 0, 128),
            ]
        );
    }
}
