use crate::core::errors::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/*-------------------------------------------------------------------------------------------------
  IP Type
-------------------------------------------------------------------------------------------------*/

/// Type tag of an IP block (the service family the block belongs to).
///
/// Tags the service may add in the future decode as [IpType::Other] and are written back
/// verbatim, so a record always round-trips unchanged.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum IpType {
    Cdn,
    Dedicated,
    HostedSsl,
    LoadBalancing,
    Mail,
    Pcc,
    Pci,
    Vpn,
    Vps,
    Xdsl,
    Other(String),
}

impl IpType {
    /// The tags known to this crate, in wire order.
    pub const ALL: &'static [IpType] = &[
        IpType::Cdn,
        IpType::Dedicated,
        IpType::HostedSsl,
        IpType::LoadBalancing,
        IpType::Mail,
        IpType::Pcc,
        IpType::Pci,
        IpType::Vpn,
        IpType::Vps,
        IpType::Xdsl,
    ];

    /// Wire representation of the tag.
    pub fn as_str(&self) -> &str {
        match self {
            IpType::Cdn => "cdn",
            IpType::Dedicated => "dedicated",
            IpType::HostedSsl => "hosted_ssl",
            IpType::LoadBalancing => "loadBalancing",
            IpType::Mail => "mail",
            IpType::Pcc => "pcc",
            IpType::Pci => "pci",
            IpType::Vpn => "vpn",
            IpType::Vps => "vps",
            IpType::Xdsl => "xdsl",
            IpType::Other(value) => value,
        }
    }

    /// Parse a tag, rejecting anything outside [IpType::ALL].
    ///
    /// ```
    /// use ipblocks::IpType;
    ///
    /// assert_eq!(IpType::known("vps").unwrap(), IpType::Vps);
    /// assert!(IpType::known("mainframe").is_err());
    /// ```
    pub fn known(value: &str) -> Result<IpType> {
        match IpType::from(value) {
            IpType::Other(value) => {
                let allowed: Vec<&str> = IpType::ALL.iter().map(IpType::as_str).collect();
                Err(Error::validation("IP type", &value, &allowed))
            }
            ip_type => Ok(ip_type),
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, IpType::Other(_))
    }
}

/*--------------------------------------------------------------------------------------
  Conversions
--------------------------------------------------------------------------------------*/

impl From<&str> for IpType {
    fn from(value: &str) -> Self {
        match value {
            "cdn" => IpType::Cdn,
            "dedicated" => IpType::Dedicated,
            "hosted_ssl" => IpType::HostedSsl,
            "loadBalancing" => IpType::LoadBalancing,
            "mail" => IpType::Mail,
            "pcc" => IpType::Pcc,
            "pci" => IpType::Pci,
            "vpn" => IpType::Vpn,
            "vps" => IpType::Vps,
            "xdsl" => IpType::Xdsl,
            other => IpType::Other(other.to_string()),
        }
    }
}

impl From<String> for IpType {
    fn from(value: String) -> Self {
        match IpType::from(value.as_str()) {
            IpType::Other(_) => IpType::Other(value),
            ip_type => ip_type,
        }
    }
}

impl From<IpType> for String {
    fn from(ip_type: IpType) -> Self {
        match ip_type {
            IpType::Other(value) => value,
            ip_type => ip_type.as_str().to_string(),
        }
    }
}

impl FromStr for IpType {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        IpType::known(value)
    }
}

impl fmt::Display for IpType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
