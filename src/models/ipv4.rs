//! IPv4 address and CIDR arithmetic.
//!
//! Free functions work on `Ipv4Addr` + prefix length pairs; [`Ipv4`] bundles the
//! two into a validated CIDR block.

use crate::error::SubnetError;
use serde::de;
use serde::{Deserialize, Deserializer, Serialize};
use std::net::Ipv4Addr;
use std::str::FromStr;

/// Maximum length for an IPv4 subnet mask (32 bits).
pub const MAX_LENGTH: u8 = 32;

/// Convert a CIDR prefix length to a subnet mask as u32.
///
/// # Examples
/// ```
/// use subnet_advisor::models::get_cidr_mask;
/// assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
/// ```
pub fn get_cidr_mask(len: u8) -> Result<u32, SubnetError> {
    if len > MAX_LENGTH {
        return Err(SubnetError::PrefixTooLong(len));
    }
    // Shifting a u32 by 32 is an overflow, /0 has no network bits.
    Ok(u32::MAX
        .checked_shl(u32::from(MAX_LENGTH - len))
        .unwrap_or(0))
}

/// Dotted-decimal subnet mask for a prefix length, e.g. /26 -> 255.255.255.192.
pub fn netmask_addr(len: u8) -> Result<Ipv4Addr, SubnetError> {
    Ok(Ipv4Addr::from(get_cidr_mask(len)?))
}

/// Add `offset` to an address, carrying across octets.
pub fn offset_addr(addr: Ipv4Addr, offset: u64) -> Result<Ipv4Addr, SubnetError> {
    let bits = u64::from(u32::from(addr)) + offset;
    u32::try_from(bits)
        .map(Ipv4Addr::from)
        .map_err(|_| SubnetError::AddressOverflow)
}

/// Number of addresses covered by a prefix, network and broadcast included.
pub fn total_ips(len: u8) -> Result<u64, SubnetError> {
    if len > MAX_LENGTH {
        return Err(SubnetError::PrefixTooLong(len));
    }
    Ok(1u64 << (MAX_LENGTH - len))
}

/// Assignable host addresses for a prefix. /31 and /32 have none.
pub fn usable_hosts(len: u8) -> Result<u64, SubnetError> {
    Ok(total_ips(len)?.saturating_sub(2))
}

/// Smallest number of host bits that fits `hosts` plus network and broadcast.
///
/// Equivalent to `ceil(log2(hosts + 2))` without floating point. `None` when
/// no IPv4 block is large enough.
pub fn host_bits_for(hosts: u64) -> Option<u8> {
    let bits = hosts
        .checked_add(2)?
        .checked_next_power_of_two()?
        .trailing_zeros() as u8;
    (bits <= MAX_LENGTH).then_some(bits)
}

/// IPv4 CIDR block such as `10.0.0.0/24`.
///
/// The address is kept as given, so `10.0.0.250/24` is a valid value whose
/// [`Ipv4::lo`] is `10.0.0.0`.
#[derive(Eq, Ord, Debug, Copy, Clone, Hash)]
pub struct Ipv4 {
    addr: Ipv4Addr,
    mask: u8,
}

impl Serialize for Ipv4 {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::ser::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Ipv4 {
    fn deserialize<D>(deserializer: D) -> Result<Ipv4, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ipv4::new(&s).map_err(|e| de::Error::custom(format!("invalid CIDR {s}: {e}")))
    }
}

impl FromStr for Ipv4 {
    type Err = SubnetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ipv4::new(s)
    }
}

impl Ipv4 {
    /// Create a new [`Ipv4`] from a CIDR string (e.g., "10.0.0.0/24").
    pub fn new(addr_cidr: &str) -> Result<Ipv4, SubnetError> {
        let addr_cidr = addr_cidr.trim();
        let (addr, mask) = addr_cidr.split_once('/').ok_or_else(|| {
            SubnetError::InvalidIpFormat(format!(
                "Invalid CIDR block '{addr_cidr}'. Use a.b.c.d/n (e.g., 10.0.0.0/16)"
            ))
        })?;
        let addr: Ipv4Addr = addr
            .parse()
            .map_err(|_| SubnetError::InvalidIpFormat(format!("Invalid address {addr}")))?;
        let mask: u8 = mask.parse().map_err(|_| {
            SubnetError::InvalidPrefixLength(format!("Invalid prefix length /{mask}"))
        })?;
        Ipv4::from_parts(addr, mask)
    }

    /// Build a block from an address and prefix length.
    pub fn from_parts(addr: Ipv4Addr, mask: u8) -> Result<Ipv4, SubnetError> {
        if mask > MAX_LENGTH {
            return Err(SubnetError::PrefixTooLong(mask));
        }
        Ok(Ipv4 { addr, mask })
    }

    pub fn addr(&self) -> Ipv4Addr {
        self.addr
    }

    pub fn mask(&self) -> u8 {
        self.mask
    }

    fn mask_bits(&self) -> u32 {
        // mask <= 32 is guaranteed by the constructors.
        get_cidr_mask(self.mask).unwrap_or(u32::MAX)
    }

    /// Get the lowest (network) address in the subnet.
    pub fn lo(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.addr) & self.mask_bits())
    }

    /// Get the highest (broadcast) address in the subnet.
    pub fn hi(&self) -> Ipv4Addr {
        Ipv4Addr::from(u32::from(self.lo()) | !self.mask_bits())
    }

    pub fn netmask(&self) -> Ipv4Addr {
        Ipv4Addr::from(self.mask_bits())
    }

    /// The same block with its address normalised to the network address.
    pub fn network(&self) -> Ipv4 {
        Ipv4 {
            addr: self.lo(),
            mask: self.mask,
        }
    }

    pub fn total_ips(&self) -> u64 {
        1u64 << (MAX_LENGTH - self.mask)
    }

    pub fn usable_hosts(&self) -> u64 {
        self.total_ips().saturating_sub(2)
    }

    /// First assignable address, `None` for /31 and /32.
    pub fn first_usable(&self) -> Option<Ipv4Addr> {
        if self.usable_hosts() == 0 {
            return None;
        }
        u32::from(self.lo()).checked_add(1).map(Ipv4Addr::from)
    }

    /// Last assignable address, `None` for /31 and /32.
    pub fn last_usable(&self) -> Option<Ipv4Addr> {
        if self.usable_hosts() == 0 {
            return None;
        }
        u32::from(self.hi()).checked_sub(1).map(Ipv4Addr::from)
    }

    pub fn contains(&self, ip: Ipv4Addr) -> bool {
        self.lo() <= ip && ip <= self.hi()
    }

}

impl std::fmt::Display for Ipv4 {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(f, "{}/{}", self.addr, self.mask)
    }
}

impl PartialEq for Ipv4 {
    fn eq(&self, other: &Ipv4) -> bool {
        self.addr == other.addr && self.mask == other.mask
    }
}

impl PartialOrd for Ipv4 {
    fn partial_cmp(&self, other: &Ipv4) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_cidr_mask() {
        assert_eq!(get_cidr_mask(0).unwrap(), 0x00000000);
        assert_eq!(get_cidr_mask(8).unwrap(), 0xFF000000);
        assert_eq!(get_cidr_mask(16).unwrap(), 0xFFFF0000);
        assert_eq!(get_cidr_mask(24).unwrap(), 0xFFFFFF00);
        assert_eq!(get_cidr_mask(26).unwrap(), 0xFFFFFFC0);
        assert_eq!(get_cidr_mask(32).unwrap(), 0xFFFFFFFF);
        assert_eq!(get_cidr_mask(33), Err(SubnetError::PrefixTooLong(33)));
    }

    #[test]
    fn test_netmask_addr() {
        assert_eq!(netmask_addr(24).unwrap(), Ipv4Addr::new(255, 255, 255, 0));
        assert_eq!(netmask_addr(26).unwrap(), Ipv4Addr::new(255, 255, 255, 192));
        assert_eq!(netmask_addr(8).unwrap(), Ipv4Addr::new(255, 0, 0, 0));
        assert_eq!(netmask_addr(32).unwrap(), Ipv4Addr::new(255, 255, 255, 255));
    }

    #[test]
    fn test_ipv4_network_and_broadcast() {
        let ip = Ipv4::new("192.168.1.42/28").unwrap();
        assert_eq!(ip.lo(), Ipv4Addr::new(192, 168, 1, 32));
        assert_eq!(ip.hi(), Ipv4Addr::new(192, 168, 1, 47));
        let ip = Ipv4::new("192.168.1.42/8").unwrap();
        assert_eq!(ip.lo(), Ipv4Addr::new(192, 0, 0, 0));
        assert_eq!(ip.hi(), Ipv4Addr::new(192, 255, 255, 255));
        let ip = Ipv4::new("255.255.255.255/24").unwrap();
        assert_eq!(ip.hi(), Ipv4Addr::new(255, 255, 255, 255));
        let ip = Ipv4::new("10.0.0.9/32").unwrap();
        assert_eq!(ip.lo(), ip.hi());
    }

    #[test]
    fn test_offset_addr_carries() {
        let ip = Ipv4Addr::new(10, 0, 0, 255);
        assert_eq!(offset_addr(ip, 1).unwrap(), Ipv4Addr::new(10, 0, 1, 0));
        let ip = Ipv4Addr::new(10, 0, 255, 255);
        assert_eq!(offset_addr(ip, 1).unwrap(), Ipv4Addr::new(10, 1, 0, 0));
        assert!(offset_addr(Ipv4Addr::new(255, 255, 255, 255), 1).is_err());
    }

    #[test]
    fn test_host_counts() {
        assert_eq!(total_ips(24).unwrap(), 256);
        assert_eq!(total_ips(8).unwrap(), 16_777_216);
        assert_eq!(total_ips(0).unwrap(), 4_294_967_296);
        assert_eq!(usable_hosts(24).unwrap(), 254);
        assert_eq!(usable_hosts(30).unwrap(), 2);
        assert_eq!(usable_hosts(31).unwrap(), 0);
        assert_eq!(usable_hosts(32).unwrap(), 0);
        assert!(usable_hosts(33).is_err());
    }

    #[test]
    fn test_host_bits_for() {
        assert_eq!(host_bits_for(1), Some(2));
        assert_eq!(host_bits_for(2), Some(2));
        assert_eq!(host_bits_for(3), Some(3));
        // 254 + 2 is exactly 2^8
        assert_eq!(host_bits_for(254), Some(8));
        assert_eq!(host_bits_for(255), Some(9));
        assert_eq!(host_bits_for(16_777_214), Some(24));
    }

    #[test]
    fn test_host_bits_for_beyond_ipv4() {
        assert_eq!(host_bits_for(4_294_967_294), Some(32));
        assert_eq!(host_bits_for(4_294_967_295), None);
        assert_eq!(host_bits_for(5_000_000_000), None);
        assert_eq!(host_bits_for(u64::MAX - 1), None);
        assert_eq!(host_bits_for(u64::MAX), None);
    }

    #[test]
    fn test_ipv4_new() {
        let ip = Ipv4::new(" 10.1.2.3/16 ").unwrap();
        assert_eq!(ip.addr(), Ipv4Addr::new(10, 1, 2, 3));
        assert_eq!(ip.mask(), 16);
        assert_eq!(ip.to_string(), "10.1.2.3/16");
        assert!(Ipv4::new("10.1.2.3").is_err());
        assert!(Ipv4::new("10.1.2/16").is_err());
        assert_eq!(
            Ipv4::new("10.1.2.3/40"),
            Err(SubnetError::PrefixTooLong(40))
        );
    }

    #[test]
    fn test_ipv4_lo_hi() {
        let ip = Ipv4::new("10.0.10.77/26").unwrap();
        assert_eq!(ip.lo(), Ipv4Addr::new(10, 0, 10, 64));
        assert_eq!(ip.hi(), Ipv4Addr::new(10, 0, 10, 127));
        assert_eq!(ip.netmask(), Ipv4Addr::new(255, 255, 255, 192));
        assert_eq!(ip.network(), Ipv4::new("10.0.10.64/26").unwrap());
        assert!(ip.contains(Ipv4Addr::new(10, 0, 10, 100)));
        assert!(!ip.contains(Ipv4Addr::new(10, 0, 10, 128)));
    }

    #[test]
    fn test_usable_range_carries_across_octets() {
        let ip = Ipv4::new("10.0.0.0/23").unwrap();
        assert_eq!(ip.first_usable(), Some(Ipv4Addr::new(10, 0, 0, 1)));
        assert_eq!(ip.last_usable(), Some(Ipv4Addr::new(10, 0, 1, 254)));

        let ip = Ipv4::new("10.0.1.0/31").unwrap();
        assert_eq!(ip.first_usable(), None);
        assert_eq!(ip.last_usable(), None);
    }

    #[test]
    fn test_ip4_cmp() {
        let ip1 = Ipv4::new("10.0.0.1/24").unwrap();
        let ip2 = Ipv4::new("10.0.0.2/24").unwrap();
        let ip3 = Ipv4::new("10.0.0.1/24").unwrap();

        assert!(ip1 < ip2);
        assert!(ip1 == ip3);
        assert!(ip2 > ip1);
        assert!(ip2 >= ip3);
    }

    #[test]
    fn test_serde_round_trip_as_string() {
        let ip = Ipv4::new("172.16.0.0/12").unwrap();
        let json = serde_json::to_string(&ip).unwrap();
        assert_eq!(json, r#""172.16.0.0/12""#);
        let back: Ipv4 = serde_json::from_str(&json).unwrap();
        assert_eq!(back, ip);
        assert!(serde_json::from_str::<Ipv4>(r#""172.16.0.0""#).is_err());
    }
}
