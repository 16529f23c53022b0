use crate::core::client::{block_path, segment, Client};
use crate::core::errors::{Error, Result};
use crate::core::filter::BlockFilter;
use crate::core::ip_block::IpBlock;
use crate::core::transport::Transport;
use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::net::Ipv4Addr;
use std::str::FromStr;

/*-------------------------------------------------------------------------------------------------
  Spam Operations
-------------------------------------------------------------------------------------------------*/

impl<T: Transport> Client<T> {
    /// List the addresses of `block` with an anti-spam history, optionally only those in `state`.
    pub fn spamming_ips(
        &self,
        block: &IpBlock,
        state: Option<SpamState>,
    ) -> Result<Vec<Ipv4Addr>> {
        let mut path = spam_path(block);
        if let Some(state) = state {
            path = format!("{path}?state={}", segment(state.as_str()));
        }
        self.transport().get(&path)?.expect_status(&[200])?.json()
    }

    pub fn spam_ip(&self, block: &IpBlock, address: Ipv4Addr) -> Result<SpamIp> {
        self.transport()
            .get(&spam_ip_path(block, address))?
            .expect_status(&[200])?
            .json()
    }

    /// Spam statistics of `address` over the `[from, to]` window; `None` when the service has
    /// nothing for that window.
    pub fn spam_stats(
        &self,
        block: &IpBlock,
        address: Ipv4Addr,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Option<SpamStats>> {
        let path = format!(
            "{}/stats?from={}&to={}",
            spam_ip_path(block, address),
            segment(&from.to_rfc3339_opts(SecondsFormat::Secs, true)),
            segment(&to.to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        let stats: Vec<SpamStats> = self.transport().get(&path)?.expect_status(&[200])?.json()?;
        Ok(stats.into_iter().next())
    }

    /// Ask the service to lift the anti-spam block of `address`.
    pub fn unblock_spam_ip(&self, block: &IpBlock, address: Ipv4Addr) -> Result<()> {
        info!("Unblock {address} of {block}");
        self.transport()
            .post(
                &format!("{}/unblock", spam_ip_path(block, address)),
                Vec::new(),
            )?
            .expect_status(&[200])?;
        Ok(())
    }

    /// Every address of the account currently blocked for spam.
    ///
    /// Walks all IPv4 blocks (IPv6 blocks have no anti-spam service). Blocks the service answers
    /// `404` (no anti-spam service) or `460` (service expired) for are skipped; any other error
    /// aborts the walk.
    pub fn blocked_for_spam(&self) -> Result<Vec<Ipv4Addr>> {
        let mut blocked = Vec::new();

        for block in self.list_block_ids(&BlockFilter::default())? {
            if block.is_ipv6() {
                continue;
            }
            match self.spamming_ips(&block, Some(SpamState::BlockedForSpam)) {
                Ok(addresses) => blocked.extend(addresses),
                Err(error) if error.is_status(404) || error.is_status(460) => {
                    debug!("Skipping {block}: {error}");
                }
                Err(error) => return Err(error),
            }
        }

        Ok(blocked)
    }
}

fn spam_path(block: &IpBlock) -> String {
    format!("{}/spam", block_path(block))
}

fn spam_ip_path(block: &IpBlock, address: Ipv4Addr) -> String {
    format!("{}/{}", spam_path(block), segment(&address.to_string()))
}

/*-------------------------------------------------------------------------------------------------
  Spam State
-------------------------------------------------------------------------------------------------*/

/// Anti-spam state of an address.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SpamState {
    /// Currently blocked.
    BlockedForSpam,
    /// Unblock requested.
    Unblocking,
    /// Blocked in the past.
    Unblocked,
}

impl SpamState {
    pub const ALL: [SpamState; 3] = [
        SpamState::BlockedForSpam,
        SpamState::Unblocking,
        SpamState::Unblocked,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SpamState::BlockedForSpam => "blockedForSpam",
            SpamState::Unblocking => "unblocking",
            SpamState::Unblocked => "unblocked",
        }
    }
}

impl FromStr for SpamState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|state| state.as_str() == s)
            .ok_or_else(|| {
                let allowed: Vec<&str> = Self::ALL.iter().map(|state| state.as_str()).collect();
                Error::validation("spam state", s, &allowed)
            })
    }
}

impl fmt::Display for SpamState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/*-------------------------------------------------------------------------------------------------
  Spam Records
-------------------------------------------------------------------------------------------------*/

/// Anti-spam status of one address.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpamIp {
    pub ip_spamming: Ipv4Addr,
    /// Seconds the address stays blocked.
    pub time: u64,
    /// Last time the address was blocked.
    pub date: DateTime<Utc>,
    pub state: SpamState,
}

impl fmt::Display for SpamIp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "IP: {}", self.ip_spamming)?;
        writeln!(f, "Blocked for: {} seconds", self.time)?;
        writeln!(f, "Last blocked: {}", self.date.to_rfc3339())?;
        write!(f, "State: {}", self.state)
    }
}

/// One email flagged as spam.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpamTarget {
    pub destination_ip: String,
    pub message_id: String,
    #[serde(with = "chrono::serde::ts_seconds")]
    pub date: DateTime<Utc>,
    pub spamscore: i64,
}

impl fmt::Display for SpamTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Destination: {}", self.destination_ip)?;
        writeln!(f, "Date: {}", self.date.to_rfc3339())?;
        writeln!(f, "Message-id: {}", self.message_id)?;
        write!(f, "Score: {}", self.spamscore)
    }
}

/// Anti-spam statistics of an address.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpamStats {
    /// When the address was blocked.
    #[serde(with = "chrono::serde::ts_seconds")]
    pub timestamp: DateTime<Utc>,
    #[serde(default)]
    pub detected_spams: Vec<SpamTarget>,
    pub average_spamscore: i64,
    /// Emails sent.
    pub total: u64,
    pub number_of_spams: u64,
}

impl fmt::Display for SpamStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Blocked: {}", self.timestamp.to_rfc3339())?;
        writeln!(f, "Email total: {}", self.total)?;
        writeln!(f, "Number of spams: {}", self.number_of_spams)?;
        write!(f, "Average score: {}", self.average_spamscore)?;
        for spam in &self.detected_spams {
            write!(f, "\n\n{spam}")?;
        }
        Ok(())
    }
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
