use crate::core::errors::{Error, Result};
use ipnetwork::{IpNetwork, IpNetworkError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

/*-------------------------------------------------------------------------------------------------
  IP Block
-------------------------------------------------------------------------------------------------*/

/// Identifier of an IP block owned by the account, usually in CIDR form (`91.121.78.23/32`).
///
/// The identifier is opaque to the service API: it is only ever used as a lookup key, so it is
/// kept as the exact string the service returned.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IpBlock(String);

impl IpBlock {
    pub fn new(block: impl Into<String>) -> Self {
        IpBlock(block.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The single-host block containing only `address` (`/32` for IPv4, `/128` for IPv6).
    pub fn single_host(address: IpAddr) -> Self {
        let prefix = match address {
            IpAddr::V4(_) => 32,
            IpAddr::V6(_) => 128,
        };
        IpBlock(format!("{address}/{prefix}"))
    }

    /// True for IPv6 blocks.
    pub fn is_ipv6(&self) -> bool {
        self.0.contains(':')
    }

    /// Parse the block as a CIDR network. The prefix length is required.
    pub fn network(&self) -> Result<IpNetwork> {
        if !self.0.contains('/') {
            return Err(Error::InvalidFormat {
                input: self.0.clone(),
                source: IpNetworkError::InvalidCidrFormat(format!(
                    "missing prefix length in `{}`",
                    self.0
                )),
            });
        }
        self.0.parse().map_err(|source| Error::InvalidFormat {
            input: self.0.clone(),
            source,
        })
    }

    /// Every address covered by the block, network and broadcast addresses included, in
    /// ascending order.
    ///
    /// ```
    /// let block = ipblocks::IpBlock::new("192.168.1.0/30");
    /// let addresses: Vec<String> = block
    ///     .addresses()?
    ///     .map(|address| address.to_string())
    ///     .collect();
    ///
    /// assert_eq!(addresses, ["192.168.1.0", "192.168.1.1", "192.168.1.2", "192.168.1.3"]);
    /// # Ok::<(), ipblocks::Error>(())
    /// ```
    pub fn addresses(&self) -> Result<AddressRange> {
        self.network().map(AddressRange::new)
    }
}

impl fmt::Display for IpBlock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for IpBlock {
    fn from(block: &str) -> Self {
        IpBlock::new(block)
    }
}

impl From<String> for IpBlock {
    fn from(block: String) -> Self {
        IpBlock(block)
    }
}

impl AsRef<str> for IpBlock {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/*-------------------------------------------------------------------------------------------------
  Address Enumeration
-------------------------------------------------------------------------------------------------*/

/// Parse `cidr` and enumerate every address it covers.
///
/// Fails with [Error::InvalidFormat] before producing anything when `cidr` is not a valid CIDR
/// expression.
pub fn enumerate_addresses(cidr: &str) -> Result<AddressRange> {
    IpBlock::new(cidr).addresses()
}

/// Lazy, ascending sequence of the addresses in a network.
///
/// Clone the range (or call [IpBlock::addresses] again) to restart the enumeration.
#[derive(Clone, Debug)]
pub struct AddressRange {
    network: IpNetwork,
    next: Option<IpAddr>,
}

impl AddressRange {
    pub fn new(network: IpNetwork) -> Self {
        let first = match network {
            IpNetwork::V4(ipv4_network) => IpAddr::V4(ipv4_network.network()),
            IpNetwork::V6(ipv6_network) => IpAddr::V6(ipv6_network.network()),
        };
        Self {
            network,
            next: Some(first),
        }
    }

    pub fn network(&self) -> IpNetwork {
        self.network
    }
}

impl Iterator for AddressRange {
    type Item = IpAddr;

    fn next(&mut self) -> Option<IpAddr> {
        let current = self.next?;
        self.next = increment(current).filter(|address| self.network.contains(*address));
        Some(current)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let Some(next) = self.next else {
            return (0, Some(0));
        };
        let remaining = match (self.network, next) {
            (IpNetwork::V4(network), IpAddr::V4(next)) => {
                u128::from(u32::from(network.broadcast()) - u32::from(next)) + 1
            }
            (IpNetwork::V6(network), IpAddr::V6(next)) => {
                let last = u128::from(network.network()) | !u128::from(network.mask());
                match (last - u128::from(next)).checked_add(1) {
                    Some(remaining) => remaining,
                    None => return (usize::MAX, None),
                }
            }
            _ => return (0, None),
        };
        match usize::try_from(remaining) {
            Ok(remaining) => (remaining, Some(remaining)),
            Err(_) => (usize::MAX, None),
        }
    }
}

/*--------------------------------------------------------------------------------------
  Address Increment
--------------------------------------------------------------------------------------*/

/// Big-endian increment over the address octets, carrying leftward on overflow. Returns `None`
/// when the carry runs off the most significant octet.
fn increment(address: IpAddr) -> Option<IpAddr> {
    match address {
        IpAddr::V4(address) => {
            let mut octets = address.octets();
            increment_octets(&mut octets).then(|| IpAddr::V4(Ipv4Addr::from(octets)))
        }
        IpAddr::V6(address) => {
            let mut octets = address.octets();
            increment_octets(&mut octets).then(|| IpAddr::V6(Ipv6Addr::from(octets)))
        }
    }
}

fn increment_octets(octets: &mut [u8]) -> bool {
    for octet in octets.iter_mut().rev() {
        *octet = octet.wrapping_add(1);
        if *octet != 0 {
            return true;
        }
    }
    false
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
mod tests {
    use super::*;

    fn enumerate(cidr: &str) -> Vec<String> {
        enumerate_addresses(cidr)
            .unwrap()
            .map(|address| address.to_string())
            .collect()
    }

    /*----------------------------------------------------------------------------------
      IpBlock
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_single_host_block() {
        let ipv4 = IpBlock::single_host("198.51.100.9".parse().unwrap());
        assert_eq!(ipv4.as_str(), "198.51.100.9/32");
        assert!(!ipv4.is_ipv6());

        let ipv6 = IpBlock::single_host("2001:db8::1".parse().unwrap());
        assert_eq!(ipv6.as_str(), "2001:db8::1/128");
        assert!(ipv6.is_ipv6());
    }

    #[test]
    fn test_ip_block_serializes_as_plain_string() {
        let block: IpBlock = serde_json::from_str(r#""91.121.78.23/32""#).unwrap();
        assert_eq!(block, IpBlock::from("91.121.78.23/32"));
        assert_eq!(serde_json::to_string(&block).unwrap(), r#""91.121.78.23/32""#);
    }

    /*----------------------------------------------------------------------------------
      Address Enumeration
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_enumerate_slash_30() {
        assert_eq!(
            enumerate("192.168.1.0/30"),
            ["192.168.1.0", "192.168.1.1", "192.168.1.2", "192.168.1.3"]
        );
    }

    #[test]
    fn test_enumerate_starts_at_masked_network_address() {
        assert_eq!(
            enumerate("10.0.0.6/30"),
            ["10.0.0.4", "10.0.0.5", "10.0.0.6", "10.0.0.7"]
        );
    }

    #[test]
    fn test_enumerate_single_host() {
        assert_eq!(enumerate("91.121.78.23/32"), ["91.121.78.23"]);
    }

    #[test]
    fn test_enumerate_carries_across_octets() {
        let addresses = enumerate("10.0.0.0/23");
        assert_eq!(addresses.len(), 512);
        assert_eq!(addresses[255], "10.0.0.255");
        assert_eq!(addresses[256], "10.0.1.0");
        assert_eq!(addresses[511], "10.0.1.255");
    }

    #[test]
    fn test_enumerate_count_and_order() {
        for prefix in 20..=32u32 {
            let cidr = format!("172.16.0.0/{prefix}");
            let addresses: Vec<IpAddr> = enumerate_addresses(&cidr).unwrap().collect();
            assert_eq!(addresses.len(), 1 << (32 - prefix), "{cidr}");
            assert!(addresses.windows(2).all(|pair| pair[0] < pair[1]), "{cidr}");
        }
    }

    #[test]
    fn test_enumerate_stops_at_top_of_address_space() {
        assert_eq!(
            enumerate("255.255.255.252/30"),
            [
                "255.255.255.252",
                "255.255.255.253",
                "255.255.255.254",
                "255.255.255.255"
            ]
        );
    }

    #[test]
    fn test_enumerate_ipv6() {
        assert_eq!(
            enumerate("2001:db8::fe/127"),
            ["2001:db8::fe", "2001:db8::ff"]
        );
    }

    #[test]
    fn test_enumerate_is_restartable() {
        let range = enumerate_addresses("192.0.2.0/29").unwrap();
        assert_eq!(range.size_hint(), (8, Some(8)));

        let first_pass: Vec<IpAddr> = range.clone().collect();
        let second_pass: Vec<IpAddr> = range.collect();
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn test_enumerate_invalid_cidr() {
        for input in [
            "not-a-cidr",
            "10.0.0.0/33",
            "300.1.1.1/24",
            "",
            "10.0.0.1",
            "2001:db8::1",
        ] {
            let result = enumerate_addresses(input);
            assert!(matches!(result, Err(Error::InvalidFormat { .. })), "{input}");
        }
    }
}
