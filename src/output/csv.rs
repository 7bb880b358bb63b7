//! CSV output for VLSM blocks and tier allocations.

use super::terminal::format_field;
use crate::models::VlsmBlock;
use crate::processing::TierAllocation;
use std::fmt::Write;

/// Render VLSM blocks as CSV, one block per line after a header.
pub fn blocks_csv(blocks: &[VlsmBlock]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"  "cnt",        "network", "cidr",            "mask", "hosts""#
    );
    for (i, block) in blocks.iter().enumerate() {
        let _ = writeln!(
            out,
            "{cnt},{network},{cidr},{mask},{hosts}",
            cnt = format_field(i + 1, 7),
            network = format_field(block.network, 17),
            cidr = format_field(format!("/{}", block.cidr), 7),
            mask = format_field(block.mask, 17),
            hosts = format_field(block.host_capacity, 8),
        );
    }
    out
}

/// Render tier allocations as CSV.
pub fn allocations_csv(allocations: &[TierAllocation]) -> String {
    let mut out = String::new();
    let _ = writeln!(
        out,
        r#"  "cnt",         "subnet_cidr",       "broadcast", "hosts",                         "tier""#
    );
    for (i, a) in allocations.iter().enumerate() {
        let _ = writeln!(
            out,
            "{cnt},{subnet},{broadcast},{hosts},{tier}",
            cnt = format_field(i + 1, 7),
            subnet = format_field(a.subnet, 21),
            broadcast = format_field(a.broadcast, 17),
            hosts = format_field(format!("{}/{}", a.hosts_required, a.host_capacity), 8),
            tier = format_field(&a.name, 30),
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Ipv4;
    use crate::processing::{allocate_tiers, decompose_blocks, OffsetArithmetic, TierRequest};

    #[test]
    fn test_blocks_csv() {
        let parent = Ipv4::new("10.0.0.0/24").unwrap();
        let blocks = decompose_blocks(parent, 26, OffsetArithmetic::Carry).unwrap();
        let csv = blocks_csv(&blocks);
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(lines.len(), 5);
        assert_eq!(
            lines[2],
            r#"    "2",      "10.0.0.64",  "/26","255.255.255.192",    "62""#
        );
    }

    #[test]
    fn test_allocations_csv() {
        let parent = Ipv4::new("10.0.0.0/24").unwrap();
        let allocations = allocate_tiers(parent, &[TierRequest::new("db", 30)]).unwrap();
        let csv = allocations_csv(&allocations);
        let row = csv.lines().nth(1).unwrap();
        assert!(row.contains(r#""10.0.0.0/27""#));
        assert!(row.contains(r#""10.0.0.31""#));
        assert!(row.contains(r#""30/30""#));
        assert!(row.ends_with(r#""db""#));
    }
}
