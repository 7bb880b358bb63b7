//! Heuristic security score.
//!
//! Smaller subnets, more availability zones and a stricter compliance tier
//! each raise the score. This is advice for the UI, not a compliance audit.

use crate::models::ComplianceTier;

const BASE_SCORE: i32 = 50;
pub const MAX_SCORE: u8 = 100;

fn prefix_points(prefix: u8) -> i32 {
    match prefix {
        28.. => 25,
        26..=27 => 15,
        24..=25 => 10,
        _ => 0,
    }
}

fn zone_points(az_count: u32) -> i32 {
    match az_count {
        3.. => 15,
        2 => 10,
        _ => 0,
    }
}

fn compliance_points(tier: ComplianceTier) -> i32 {
    match tier {
        ComplianceTier::Strict => 10,
        ComplianceTier::Enhanced => 5,
        ComplianceTier::Standard => 0,
    }
}

/// Score in `0..=100` for a subnet layout.
pub fn security_score(prefix: u8, az_count: u32, tier: ComplianceTier) -> u8 {
    let score = BASE_SCORE + prefix_points(prefix) + zone_points(az_count) + compliance_points(tier);
    score.clamp(0, i32::from(MAX_SCORE)) as u8
}
