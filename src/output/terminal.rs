//! Terminal output with colours.

use crate::cost::CostEstimate;
use crate::models::SubnetReport;
use crate::processing::ScenarioPlan;
use colored::Colorize;
use std::fmt::Write;

/// Format a value as a quoted, right-aligned field.
///
/// Values wider than `width` are returned quoted but untruncated.
pub fn format_field<T: ToString>(value: T, width: usize) -> String {
    let quoted = format!("\"{}\"", value.to_string());
    format!("{quoted:>width$}")
}

fn label(name: &str) -> String {
    format!("{:<20}", format!("{name}:")).bold().to_string()
}

fn score_colored(score: u8) -> String {
    let text = format!("{score}/100");
    match score {
        90.. => text.green().to_string(),
        70..=89 => text.yellow().to_string(),
        _ => text.red().to_string(),
    }
}

/// Human readable summary of a subnet report.
pub fn render_report(report: &SubnetReport) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{}", report.cidr_notation().on_blue());
    let _ = writeln!(out, "{}{}", label("Network address"), report.network_address);
    let _ = writeln!(out, "{}{}", label("Broadcast address"), report.broadcast_address);
    let _ = writeln!(out, "{}{}", label("Subnet mask"), report.subnet_mask);
    let _ = writeln!(out, "{}{}", label("Total IPs"), report.total_ips);
    let _ = writeln!(out, "{}{}", label("Usable hosts"), report.usable_hosts);
    match &report.usable_range {
        Some(range) => {
            let _ = writeln!(out, "{}{range}", label("Usable range"));
        }
        None => {
            let _ = writeln!(out, "{}{}", label("Usable range"), "none".dimmed());
        }
    }
    if let Some(utilization) = report.utilization {
        let _ = writeln!(
            out,
            "{}{:.1}% ({} of {})",
            label("Utilization"),
            utilization,
            report.hosts_required,
            report.usable_hosts
        );
    }
    let _ = writeln!(out, "{}{}", label("VLSM"), report.vlsm_recommendation);
    let _ = writeln!(
        out,
        "{}{} ({} AZ, {})",
        label("Security score"),
        score_colored(report.security_score),
        report.az_count,
        report.compliance_tier
    );
    if let Some(blocks) = &report.vlsm_blocks {
        let _ = writeln!(out, "{}", "VLSM blocks:".bold());
        for block in blocks {
            let _ = writeln!(
                out,
                "  {:<18} mask {:<15} {} hosts",
                block.to_string(),
                block.mask,
                block.host_capacity
            );
        }
    }
    out
}

/// Human readable cost estimate.
pub fn render_estimate(estimate: &CostEstimate) -> String {
    let mut out = String::new();
    let region = match estimate.region_multiplier {
        Some(m) => format!("{} (x{m})", estimate.region),
        None => format!("{} ({})", estimate.region, "base rates".yellow()),
    };
    let _ = writeln!(out, "{} {}", estimate.provider.to_string().on_blue(), region);
    let b = &estimate.breakdown;
    for (name, value) in [
        ("Compute", b.compute),
        ("Networking", b.networking),
        ("Storage", b.storage),
        ("Load balancer", b.load_balancer),
        ("NAT gateway", b.nat_gateway),
    ] {
        let _ = writeln!(out, "{}${value:>10.2}", label(name));
    }
    let _ = writeln!(
        out,
        "{}{}",
        label("Monthly total"),
        format!("${:>10.2}", estimate.estimated_cost).bold()
    );
    let _ = writeln!(
        out,
        "{}{}",
        label("Potential savings"),
        format!("${:>10.2}", estimate.savings_opportunities).green()
    );
    for rec in &estimate.recommendations {
        let _ = writeln!(out, "  - {rec}");
    }
    out
}

/// Human readable scenario plan.
pub fn render_plan(plan: &ScenarioPlan) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} in {}", plan.scenario.bold(), plan.parent.to_string().on_blue());
    for a in &plan.allocations {
        let _ = writeln!(
            out,
            "  {:<18} {:>5}/{:<5} {}",
            a.subnet.to_string(),
            a.hosts_required,
            a.host_capacity,
            a.name
        );
    }
    let _ = writeln!(
        out,
        "{}{} addresses ({:.1}%)",
        label("Allocated"),
        plan.addresses_used,
        plan.parent_utilization
    );
    out
}
