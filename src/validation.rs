//! Input validation for subnet calculations.
//!
//! Inputs arrive as text from a form or command line. Each parser either
//! returns the typed value or a [`SubnetError`] whose message can be shown to
//! the user as-is.

use crate::error::{SubnetError, MAX_HOSTS_REQUIRED};
use regex::Regex;
use std::net::Ipv4Addr;
use std::sync::OnceLock;

/// Smallest prefix accepted from users. Larger networks are out of scope for
/// the calculator, not invalid IPv4.
pub const MIN_PREFIX_LENGTH: u8 = 8;
pub const MAX_PREFIX_LENGTH: u8 = 32;

static DOTTED_QUAD_REGEX: OnceLock<Regex> = OnceLock::new();
static INTEGER_REGEX: OnceLock<Regex> = OnceLock::new();

fn get_dotted_quad_regex() -> &'static Regex {
    DOTTED_QUAD_REGEX.get_or_init(|| {
        Regex::new(r"^([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})\.([0-9]{1,3})$")
            .expect("Invalid Regex")
    })
}

fn get_integer_regex() -> &'static Regex {
    INTEGER_REGEX.get_or_init(|| Regex::new(r"^[+-]?[0-9]+$").expect("Invalid Regex"))
}

/// Parse a dotted-decimal IPv4 address.
///
/// # Examples
/// ```
/// use subnet_advisor::validation::parse_ipv4;
/// assert_eq!(parse_ipv4("10.0.0.1").unwrap().octets(), [10, 0, 0, 1]);
/// assert!(parse_ipv4("10.0.0.256").is_err());
/// ```
pub fn parse_ipv4(input: &str) -> Result<Ipv4Addr, SubnetError> {
    let ip = input.trim();
    if ip.is_empty() {
        return Err(SubnetError::InvalidIpFormat(
            "IP address is required".to_string(),
        ));
    }

    if let Some(caps) = get_dotted_quad_regex().captures(ip) {
        let mut octets = [0u8; 4];
        for (i, octet) in octets.iter_mut().enumerate() {
            let segment = &caps[i + 1];
            *octet = segment
                .parse()
                .map_err(|_| SubnetError::OctetOutOfRange {
                    octet: i + 1,
                    value: segment.to_string(),
                })?;
        }
        return Ok(Ipv4Addr::from(octets));
    }

    Err(diagnose_ipv4(ip))
}

/// Explain why `ip` is not a dotted quad.
fn diagnose_ipv4(ip: &str) -> SubnetError {
    let segments: Vec<&str> = ip.split('.').collect();
    if segments.len() != 4 {
        return SubnetError::InvalidIpFormat(format!(
            "Invalid IP format: expected 4 octets, got {}. Use xxx.xxx.xxx.xxx (e.g., 192.168.1.0)",
            segments.len()
        ));
    }
    for (i, segment) in segments.iter().enumerate() {
        if segment.is_empty() {
            return SubnetError::InvalidIpFormat(format!("Octet {} is empty", i + 1));
        }
        if !segment.bytes().all(|b| b.is_ascii_digit()) {
            return SubnetError::InvalidIpFormat(format!(
                "Octet {} is not a number (got '{segment}')",
                i + 1
            ));
        }
        if segment.len() > 3 {
            // all digits, so a failed parse means the value is huge
            let in_range = segment.parse::<u64>().map_or(false, |v| v <= 255);
            if in_range {
                return SubnetError::InvalidIpFormat(format!(
                    "Octet {} has more than 3 digits (got '{segment}')",
                    i + 1
                ));
            }
            return SubnetError::OctetOutOfRange {
                octet: i + 1,
                value: segment.to_string(),
            };
        }
    }
    SubnetError::InvalidIpFormat(format!("Invalid IP format '{ip}'"))
}

/// Parse a prefix length such as `24` or `/24`.
pub fn parse_prefix_length(input: &str) -> Result<u8, SubnetError> {
    let cidr = input.trim();
    let cidr = cidr.strip_prefix('/').unwrap_or(cidr);
    if cidr.is_empty() {
        return Err(SubnetError::InvalidPrefixLength(
            "CIDR is required".to_string(),
        ));
    }
    if !get_integer_regex().is_match(cidr) {
        return Err(SubnetError::InvalidPrefixLength(format!(
            "CIDR must be a valid number (got '{cidr}')"
        )));
    }
    // Digits that overflow i64 are out of range anyway.
    let value = cidr.parse::<i64>().unwrap_or(i64::MAX);
    validate_prefix_length(value)
}

/// Check a numeric prefix length against the accepted `/8`-`/32` window.
pub fn validate_prefix_length(value: i64) -> Result<u8, SubnetError> {
    if value < i64::from(MIN_PREFIX_LENGTH) || value > i64::from(MAX_PREFIX_LENGTH) {
        return Err(SubnetError::InvalidPrefixLength(format!(
            "CIDR must be between /{MIN_PREFIX_LENGTH} and /{MAX_PREFIX_LENGTH} (got /{value})"
        )));
    }
    Ok(value as u8)
}

/// Parse the number of hosts the subnet must hold.
pub fn parse_host_count(input: &str) -> Result<u64, SubnetError> {
    let hosts = input.trim();
    if hosts.is_empty() {
        return Err(SubnetError::InvalidHostCount(
            "Hosts needed is required".to_string(),
        ));
    }
    if get_integer_regex().is_match(hosts) {
        let value = hosts.parse::<i64>().unwrap_or(if hosts.starts_with('-') {
            i64::MIN
        } else {
            i64::MAX
        });
        return validate_host_count(value);
    }
    match hosts.parse::<f64>() {
        Ok(v) if v.is_finite() => Err(SubnetError::InvalidHostCount(format!(
            "Hosts needed must be a whole number (got {hosts})"
        ))),
        _ => Err(SubnetError::InvalidHostCount(format!(
            "Hosts needed must be a valid number (got '{hosts}')"
        ))),
    }
}

/// Check a host count against `1..=16777214`.
pub fn validate_host_count(value: i64) -> Result<u64, SubnetError> {
    if value < 0 {
        return Err(SubnetError::InvalidHostCount(
            "Hosts needed must be positive".to_string(),
        ));
    }
    if value == 0 {
        return Err(SubnetError::InvalidHostCount(
            "Hosts needed must be at least 1".to_string(),
        ));
    }
    let value = value as u64;
    if value > MAX_HOSTS_REQUIRED {
        return Err(SubnetError::InvalidHostCount(format!(
            "Hosts needed must not exceed {MAX_HOSTS_REQUIRED}"
        )));
    }
    Ok(value)
}
