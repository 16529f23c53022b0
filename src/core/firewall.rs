use crate::core::client::{block_path, encode, segment, Client};
use crate::core::errors::{Error, Result};
use crate::core::ip_block::IpBlock;
use crate::core::records::display_or_empty;
use crate::core::transport::Transport;
use chrono::{DateTime, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/*-------------------------------------------------------------------------------------------------
  Firewall Operations
-------------------------------------------------------------------------------------------------*/

impl<T: Transport> Client<T> {
    /// List the addresses of `block` under firewall protection.
    pub fn firewall_ips(&self, block: &IpBlock) -> Result<Vec<Ipv4Addr>> {
        self.transport()
            .get(&firewall_path(block))?
            .expect_status(&[200])?
            .json()
    }

    /// Put `address` under firewall protection.
    pub fn firewall_add_ip(&self, block: &IpBlock, address: Ipv4Addr) -> Result<()> {
        let payload = encode(&FirewallIpRequest {
            ip_on_firewall: address,
        })?;
        info!("Add {address} to the firewall of {block}");
        self.transport()
            .post(&firewall_path(block), payload)?
            .expect_status(&[200])?;
        Ok(())
    }

    /// Remove `address` from firewall protection.
    pub fn firewall_remove_ip(&self, block: &IpBlock, address: Ipv4Addr) -> Result<()> {
        info!("Remove {address} from the firewall of {block}");
        self.transport()
            .delete(&firewall_ip_path(block, address))?
            .expect_status(&[200])?;
        Ok(())
    }

    pub fn firewall_ip(&self, block: &IpBlock, address: Ipv4Addr) -> Result<FirewalledIp> {
        self.transport()
            .get(&firewall_ip_path(block, address))?
            .expect_status(&[200])?
            .json()
    }

    /// Enable or disable the firewall for `address`.
    pub fn firewall_update_ip(
        &self,
        block: &IpBlock,
        address: Ipv4Addr,
        enabled: bool,
    ) -> Result<()> {
        let payload = encode(&FirewallIpUpdate { enabled })?;
        info!("Set firewall of {address} enabled={enabled}");
        self.transport()
            .put(&firewall_ip_path(block, address), payload)?
            .expect_status(&[200])?;
        Ok(())
    }

    /*-------------------------------------------------------------------------
      Rules
    -------------------------------------------------------------------------*/

    pub fn firewall_add_rule(
        &self,
        block: &IpBlock,
        address: Ipv4Addr,
        rule: &FirewallRuleRequest,
    ) -> Result<()> {
        let payload = encode(rule)?;
        info!(
            "Add firewall rule {} for {address}: {} {}",
            rule.sequence, rule.action, rule.protocol
        );
        self.transport()
            .post(&rules_path(block, address), payload)?
            .expect_status(&[200])?;
        Ok(())
    }

    /// List the sequence numbers of the rules of `address`, optionally only those in `state`.
    pub fn firewall_rules(
        &self,
        block: &IpBlock,
        address: Ipv4Addr,
        state: Option<FirewallRuleState>,
    ) -> Result<Vec<u32>> {
        let mut path = rules_path(block, address);
        if let Some(state) = state {
            path = format!("{path}?state={}", segment(state.as_str()));
        }
        self.transport().get(&path)?.expect_status(&[200])?.json()
    }

    pub fn firewall_rule(
        &self,
        block: &IpBlock,
        address: Ipv4Addr,
        sequence: u32,
    ) -> Result<FirewallRule> {
        self.transport()
            .get(&rule_path(block, address, sequence))?
            .expect_status(&[200])?
            .json()
    }

    pub fn firewall_remove_rule(
        &self,
        block: &IpBlock,
        address: Ipv4Addr,
        sequence: u32,
    ) -> Result<()> {
        info!("Remove firewall rule {sequence} of {address}");
        self.transport()
            .delete(&rule_path(block, address, sequence))?
            .expect_status(&[200])?;
        Ok(())
    }
}

/*--------------------------------------------------------------------------------------
  Paths
--------------------------------------------------------------------------------------*/

fn firewall_path(block: &IpBlock) -> String {
    format!("{}/firewall", block_path(block))
}

fn firewall_ip_path(block: &IpBlock, address: Ipv4Addr) -> String {
    format!("{}/{}", firewall_path(block), segment(&address.to_string()))
}

fn rules_path(block: &IpBlock, address: Ipv4Addr) -> String {
    format!("{}/rule", firewall_ip_path(block, address))
}

fn rule_path(block: &IpBlock, address: Ipv4Addr, sequence: u32) -> String {
    format!("{}/{sequence}", rules_path(block, address))
}

/*-------------------------------------------------------------------------------------------------
  Firewall Rule State
-------------------------------------------------------------------------------------------------*/

/// Provisioning state of a firewall rule.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum FirewallRuleState {
    CreationPending,
    Ok,
    RemovalPending,
}

impl FirewallRuleState {
    pub const ALL: [FirewallRuleState; 3] = [
        FirewallRuleState::CreationPending,
        FirewallRuleState::Ok,
        FirewallRuleState::RemovalPending,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            FirewallRuleState::CreationPending => "creationPending",
            FirewallRuleState::Ok => "ok",
            FirewallRuleState::RemovalPending => "removalPending",
        }
    }
}

impl FromStr for FirewallRuleState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(|state| state.as_str()).collect();
                Error::validation("state", s, &allowed)
            })
    }
}

impl fmt::Display for FirewallRuleState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/*-------------------------------------------------------------------------------------------------
  Firewall Records
-------------------------------------------------------------------------------------------------*/

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct FirewallIpRequest {
    ip_on_firewall: Ipv4Addr,
}

#[derive(Serialize)]
struct FirewallIpUpdate {
    enabled: bool,
}

/// An address under firewall protection.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewalledIp {
    pub ip_on_firewall: Ipv4Addr,
    pub enabled: bool,
    pub state: String,
}

impl fmt::Display for FirewalledIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IP: {}", self.ip_on_firewall)?;
        writeln!(f, "Enabled: {}", self.enabled)?;
        write!(f, "State: {}", self.state)
    }
}

/*--------------------------------------------------------------------------------------
  Rule Request
--------------------------------------------------------------------------------------*/

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirewallAction {
    Deny,
    Permit,
}

impl fmt::Display for FirewallAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FirewallAction::Deny => "deny",
            FirewallAction::Permit => "permit",
        })
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FirewallProtocol {
    Ah,
    Esp,
    Gre,
    Icmp,
    Ipv4,
    Tcp,
    Udp,
}

impl fmt::Display for FirewallProtocol {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FirewallProtocol::Ah => "ah",
            FirewallProtocol::Esp => "esp",
            FirewallProtocol::Gre => "gre",
            FirewallProtocol::Icmp => "icmp",
            FirewallProtocol::Ipv4 => "ipv4",
            FirewallProtocol::Tcp => "tcp",
            FirewallProtocol::Udp => "udp",
        })
    }
}

/// TCP matching options of a rule.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
pub struct TcpOption {
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fragments: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
}

/// A rule to add to the firewall of an address. Unset optional fields are left out of the
/// request body.
///
/// ```
/// use ipblocks::{FirewallAction, FirewallProtocol, FirewallRuleRequest};
///
/// let mut rule = FirewallRuleRequest::new(0, FirewallAction::Permit, FirewallProtocol::Tcp);
/// rule.destination_port = Some(443);
///
/// assert_eq!(
///     serde_json::to_string(&rule)?,
///     r#"{"action":"permit","destinationPort":443,"protocol":"tcp","sequence":0}"#
/// );
/// # Ok::<(), serde_json::Error>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallRuleRequest {
    pub action: FirewallAction,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub destination_port: Option<u16>,
    pub protocol: FirewallProtocol,
    pub sequence: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_port: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tcp_option: Option<TcpOption>,
}

impl FirewallRuleRequest {
    pub fn new(sequence: u32, action: FirewallAction, protocol: FirewallProtocol) -> Self {
        Self {
            action,
            destination_port: None,
            protocol,
            sequence,
            source: None,
            source_port: None,
            tcp_option: None,
        }
    }
}

/*--------------------------------------------------------------------------------------
  Rule
--------------------------------------------------------------------------------------*/

/// A firewall rule as stored by the service. Ports and TCP options come back as display
/// strings (`eq 443`, `established`).
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirewallRule {
    pub sequence: u32,
    pub action: String,
    pub protocol: String,
    #[serde(default)]
    pub source: Option<String>,
    #[serde(default)]
    pub source_port: Option<String>,
    #[serde(default)]
    pub destination: Option<String>,
    #[serde(default)]
    pub destination_port: Option<String>,
    #[serde(default)]
    pub tcp_option: Option<String>,
    #[serde(default)]
    pub fragments: Option<bool>,
    pub rule: String,
    pub state: FirewallRuleState,
    pub creation_date: DateTime<Utc>,
}

impl fmt::Display for FirewallRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sequence: {}", self.sequence)?;
        writeln!(f, "Rule: {}", self.rule)?;
        writeln!(f, "Action: {}", self.action)?;
        writeln!(f, "Protocol: {}", self.protocol)?;
        writeln!(f, "Source: {}", display_or_empty(&self.source))?;
        writeln!(f, "Source port: {}", display_or_empty(&self.source_port))?;
        writeln!(f, "Destination: {}", display_or_empty(&self.destination))?;
        writeln!(
            f,
            "Destination port: {}",
            display_or_empty(&self.destination_port)
        )?;
        writeln!(f, "TCP option: {}", display_or_empty(&self.tcp_option))?;
        writeln!(f, "Fragments: {}", self.fragments.unwrap_or(false))?;
        writeln!(f, "State: {}", self.state)?;
        write!(f, "Created: {}", self.creation_date.to_rfc3339())
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
