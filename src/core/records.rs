use crate::core::ip_block::IpBlock;
use crate::core::ip_type::IpType;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::IpAddr;

/*-------------------------------------------------------------------------------------------------
  IP Block Record
-------------------------------------------------------------------------------------------------*/

/// Properties of an IP block as returned by the service.
///
/// Only [IpBlockRecord::description] can be changed by the client (see
/// [crate::Client::update_block_description]); every other field is read-only.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpBlockRecord {
    /// Organisation the block is registered to.
    #[serde(default)]
    pub organisation_id: Option<String>,

    /// Country the block is geolocated in.
    #[serde(default)]
    pub country: Option<String>,

    /// Service the block is currently routed to.
    #[serde(default)]
    pub routed_to: RoutedTo,

    /// The block identifier.
    pub ip: IpBlock,

    /// Whether the block can be terminated on its own.
    #[serde(default)]
    pub can_be_terminated: bool,

    /// Service family of the block; absent when the service sends no tag.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub ip_type: Option<IpType>,

    /// Free-text description set by the account owner.
    #[serde(default)]
    pub description: Option<String>,
}

/// Service an IP block is routed to.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutedTo {
    #[serde(default)]
    pub service_name: Option<String>,
}

impl IpBlockRecord {
    /// Wire name of the type tag, or `""` when the record carries none.
    pub fn type_or_empty(&self) -> &str {
        self.ip_type.as_ref().map_or("", IpType::as_str)
    }
}

impl fmt::Display for IpBlockRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Block: {}", self.ip)?;
        writeln!(f, "Description: {}", display_or_empty(&self.description))?;
        writeln!(
            f,
            "Routed To: {}",
            display_or_empty(&self.routed_to.service_name)
        )?;
        writeln!(f, "Type: {}", self.type_or_empty())?;
        writeln!(f, "Country: {}", display_or_empty(&self.country))?;
        writeln!(
            f,
            "Organisation: {}",
            display_or_empty(&self.organisation_id)
        )?;
        write!(f, "Can be terminated: {}", self.can_be_terminated)
    }
}

/*-------------------------------------------------------------------------------------------------
  Updatable Properties
-------------------------------------------------------------------------------------------------*/

/// Partial-update payload for an IP block. Unset fields are left out of the request body
/// entirely so the service leaves them untouched.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct UpdatableProperties {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl UpdatableProperties {
    /// Update payload carrying `description`; an empty description is treated as unset.
    pub fn description(description: &str) -> Self {
        Self {
            description: (!description.is_empty()).then(|| description.to_string()),
        }
    }
}

/*-------------------------------------------------------------------------------------------------
  Reverse Record
-------------------------------------------------------------------------------------------------*/

/// Reverse-DNS entry of a single IP address.
///
/// The address is kept as the text the service sent, so a confirmation naming some other (or a
/// malformed) address still decodes and can be compared against the request.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReverseRecord {
    pub ip_reverse: String,
    pub reverse: String,
}

impl ReverseRecord {
    pub fn new(ip_reverse: IpAddr, reverse: impl Into<String>) -> Self {
        Self {
            ip_reverse: ip_reverse.to_string(),
            reverse: reverse.into(),
        }
    }

    /// The confirmation the service sends back for a write of `self`: same address, reverse
    /// name terminated by exactly one trailing dot.
    pub fn expected_confirmation(&self) -> ReverseRecord {
        ReverseRecord {
            ip_reverse: self.ip_reverse.clone(),
            reverse: format!("{}.", self.reverse),
        }
    }
}

impl fmt::Display for ReverseRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IP: {}", self.ip_reverse)?;
        write!(f, "Reverse: {}", self.reverse)
    }
}

/*--------------------------------------------------------------------------------------
  Helper Functions
--------------------------------------------------------------------------------------*/

pub(crate) fn display_or_empty(value: &Option<String>) -> &str {
    value.as_deref().unwrap_or("")
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use serde_json::{from_str, json, to_value};

    /*----------------------------------------------------------------------------------
      Test Helper Functions
    ----------------------------------------------------------------------------------*/

    pub(crate) fn test_ip_block_json() -> serde_json::Value {
        json!({
            "organisationId": "ORG-12345",
            "country": "fr",
            "routedTo": { "serviceName": "ns3001234.ip-91-121-78.eu" },
            "ip": "91.121.78.23/32",
            "canBeTerminated": false,
            "type": "dedicated",
            "description": "web frontend"
        })
    }

    pub(crate) fn test_ip_block_record() -> IpBlockRecord {
        IpBlockRecord {
            organisation_id: Some("ORG-12345".to_string()),
            country: Some("fr".to_string()),
            routed_to: RoutedTo {
                service_name: Some("ns3001234.ip-91-121-78.eu".to_string()),
            },
            ip: IpBlock::from("91.121.78.23/32"),
            can_be_terminated: false,
            ip_type: Some(IpType::Dedicated),
            description: Some("web frontend".to_string()),
        }
    }

    /*----------------------------------------------------------------------------------
      IpBlockRecord
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_ip_block_record_decode() {
        let record: IpBlockRecord = serde_json::from_value(test_ip_block_json()).unwrap();
        assert_eq!(record, test_ip_block_record());
        assert_eq!(to_value(&record).unwrap(), test_ip_block_json());
    }

    #[test]
    fn test_ip_block_record_decode_nulls() {
        let record: IpBlockRecord = from_str(
            r#"{
              "organisationId": null,
              "country": null,
              "routedTo": { "serviceName": null },
              "ip": "2001:41d0:1:2300::/56",
              "canBeTerminated": true,
              "type": "failover",
              "description": null
            }"#,
        )
        .unwrap();

        assert_eq!(record.routed_to, RoutedTo::default());
        assert_eq!(record.ip_type, Some(IpType::Other("failover".to_string())));
        assert_eq!(record.description, None);
        assert!(record.ip.is_ipv6());
    }

    #[test]
    fn test_ip_block_record_display() {
        let rendered = test_ip_block_record().to_string();
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(
            lines,
            [
                "Block: 91.121.78.23/32",
                "Description: web frontend",
                "Routed To: ns3001234.ip-91-121-78.eu",
                "Type: dedicated",
                "Country: fr",
                "Organisation: ORG-12345",
                "Can be terminated: false",
            ]
        );
    }

    #[test]
    fn test_ip_block_record_missing_or_null_type() {
        for body in [
            r#"{"ip": "10.0.0.0/24", "description": "x"}"#,
            r#"{"ip": "10.0.0.0/24", "description": "x", "type": null}"#,
        ] {
            let record: IpBlockRecord = from_str(body).unwrap();
            assert_eq!(record.ip_type, None, "{body}");
            assert_eq!(record.type_or_empty(), "");
            assert!(record.to_string().contains("\nType: \n"));
        }

        let empty: IpBlockRecord = from_str(r#"{"ip": "10.0.0.0/24", "type": ""}"#).unwrap();
        assert_eq!(empty.ip_type, Some(IpType::Other(String::new())));
    }

    /*----------------------------------------------------------------------------------
      UpdatableProperties
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_updatable_properties_omit_empty_description() {
        let payload = serde_json::to_string(&UpdatableProperties::description("")).unwrap();
        assert_eq!(payload, "{}");
    }

    #[test]
    fn test_updatable_properties_description() {
        let payload = serde_json::to_string(&UpdatableProperties::description("db")).unwrap();
        assert_eq!(payload, r#"{"description":"db"}"#);
    }

    /*----------------------------------------------------------------------------------
      ReverseRecord
    ----------------------------------------------------------------------------------*/

    #[test]
    fn test_reverse_record_wire_names() {
        let record = ReverseRecord::new("203.0.113.5".parse().unwrap(), "host.example.com");
        assert_eq!(
            to_value(&record).unwrap(),
            json!({ "ipReverse": "203.0.113.5", "reverse": "host.example.com" })
        );
    }

    #[test]
    fn test_reverse_record_decodes_any_address_text() {
        let record: ReverseRecord =
            from_str(r#"{"ipReverse": "", "reverse": "host.example.com."}"#).unwrap();
        assert_eq!(record.ip_reverse, "");
    }

    #[test]
    fn test_reverse_record_expected_confirmation() {
        let record = ReverseRecord::new("203.0.113.5".parse().unwrap(), "host.example.com");
        assert_eq!(
            record.expected_confirmation().reverse,
            "host.example.com."
        );
        assert_eq!(
            record.to_string(),
            "IP: 203.0.113.5\nReverse: host.example.com"
        );
    }
}
