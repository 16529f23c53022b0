use crate::core::errors::{Error, Result};
use crate::core::filter::BlockFilter;
use crate::core::ip_block::IpBlock;
use crate::core::records::{IpBlockRecord, ReverseRecord, UpdatableProperties};
use crate::core::transport::{HttpTransport, Transport};
use log::{debug, info, warn};
use serde::Serialize;
use std::env;
use std::net::IpAddr;
use std::time::Duration;

/*-------------------------------------------------------------------------------------------------
  Client Builder
-------------------------------------------------------------------------------------------------*/

/// Default API root.
pub const DEFAULT_ENDPOINT: &str = "https://eu.api.ovh.com/1.0";

/// A builder for a [Client] talking to the service over HTTPS. The [ClientBuilder] struct
/// provides setters for each configuration value and a [ClientBuilder::build] method to create
/// the [Client].
///
/// ```
/// let client = ipblocks::ClientBuilder::default()
///     .endpoint("https://ca.api.ovh.com/1.0")
///     .token("my-oauth2-access-token")
///     .timeout(5000) // 5 seconds
///     .build()?;
/// # Ok::<(), ipblocks::Error>(())
/// ```
///
/// The [ClientBuilder::new] method attempts to source configuration values from environment
/// variables when set and uses default values when the environment variables are not set.
///
/// If you want to use the default configuration values, ignoring any environment variables, use
/// the [ClientBuilder::default] method to create a new [ClientBuilder] instance.
#[derive(Clone)]
pub struct ClientBuilder {
    endpoint: String,
    token: Option<String>,
    timeout: u64,
}

/*--------------------------------------------------------------------------------------
  Client Builder Implementation
--------------------------------------------------------------------------------------*/

impl Default for ClientBuilder {
    /// Create a new [ClientBuilder] with default configuration values.
    ///
    /// ```
    /// let builder = ipblocks::ClientBuilder::default();
    ///
    /// assert_eq!(builder.get_endpoint(), "https://eu.api.ovh.com/1.0");
    /// assert_eq!(builder.get_token(), None);
    /// assert_eq!(builder.get_timeout(), 10000);
    /// ```
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            token: None,
            timeout: 10_000, // 10 seconds
        }
    }
}

impl ClientBuilder {
    /// Create a new [ClientBuilder] reading initial configuration values from
    /// environment variables when set and default values when the environment
    /// variables are not set.
    ///
    /// The environment variables used to set the initial configuration values
    /// are:
    /// - `IPBLOCKS_ENDPOINT`
    /// - `IPBLOCKS_TOKEN`
    /// - `IPBLOCKS_TIMEOUT`
    pub fn new() -> Self {
        let default = ClientBuilder::default();

        let token = env::var("IPBLOCKS_TOKEN")
            .ok()
            .filter(|token| !token.is_empty())
            .inspect(|_| info!("Using IPBLOCKS_TOKEN"));

        Self {
            endpoint: get_env_var("IPBLOCKS_ENDPOINT", default.endpoint),
            token: token.or(default.token),
            timeout: get_env_var("IPBLOCKS_TIMEOUT", default.timeout),
        }
    }

    /*-------------------------------------------------------------------------
      Setters
    -------------------------------------------------------------------------*/

    /// Set the API root all request paths are relative to; defaults to
    /// `https://eu.api.ovh.com/1.0`.
    pub fn endpoint(&mut self, endpoint: &str) -> &mut Self {
        self.endpoint = endpoint.to_string();
        self
    }

    /// Set the bearer token sent with every request; unset by default.
    pub fn token(&mut self, token: &str) -> &mut Self {
        self.token = Some(token.to_string());
        self
    }

    /// Set the request timeout (in milliseconds); defaults to `10000` milliseconds
    /// (10 seconds).
    pub fn timeout(&mut self, timeout: u64) -> &mut Self {
        self.timeout = timeout;
        self
    }

    /*-------------------------------------------------------------------------
      Getters
    -------------------------------------------------------------------------*/

    pub fn get_endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    pub fn get_timeout(&self) -> u64 {
        self.timeout
    }

    /*-------------------------------------------------------------------------
      Build Method
    -------------------------------------------------------------------------*/

    pub fn build(&self) -> Result<Client<HttpTransport>> {
        let transport = HttpTransport::new(
            &self.endpoint,
            self.token.as_deref(),
            Duration::from_millis(self.timeout),
        )?;
        Ok(Client::with_transport(transport))
    }
}

impl std::fmt::Debug for ClientBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClientBuilder")
            .field("endpoint", &self.endpoint)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .finish()
    }
}

/*-------------------------------------------------------------------------------------------------
  Client
-------------------------------------------------------------------------------------------------*/

/// Client for the IP block endpoints of the service API.
///
/// Every operation is exactly one HTTP exchange through the wrapped [Transport]; nothing is
/// retried or cached, and the client holds no state besides the transport.
///
/// ```no_run
/// use ipblocks::{BlockFilterBuilder, IpType};
///
/// let client = ipblocks::ClientBuilder::new().build()?;
///
/// let filter = BlockFilterBuilder::new().ip_type(IpType::Dedicated).build();
/// for record in client.list_blocks(&filter)? {
///     println!("{record}\n");
/// }
///
/// client.set_reverse("203.0.113.5".parse().unwrap(), "host.example.com")?;
/// # Ok::<(), ipblocks::Error>(())
/// ```
#[derive(Clone, Debug)]
pub struct Client<T = HttpTransport> {
    transport: T,
}

/*--------------------------------------------------------------------------------------
  Client Implementation
--------------------------------------------------------------------------------------*/

impl<T: Transport> Client<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /*-------------------------------------------------------------------------
      IP Blocks
    -------------------------------------------------------------------------*/

    /// List the account's IP blocks matching `filter`, in the order the service returns them.
    pub fn list_blocks(&self, filter: &BlockFilter) -> Result<Vec<IpBlockRecord>> {
        let path = format!("ip{}", filter.query_string());
        self.transport.get(&path)?.expect_status(&[200])?.json()
    }

    /// List only the identifiers of the account's IP blocks matching `filter`.
    pub fn list_block_ids(&self, filter: &BlockFilter) -> Result<Vec<IpBlock>> {
        let path = format!("ip{}", filter.query_string());
        self.transport.get(&path)?.expect_status(&[200])?.json()
    }

    /// Get the properties of `block`.
    pub fn get_block_properties(&self, block: &IpBlock) -> Result<IpBlockRecord> {
        self.transport
            .get(&block_path(block))?
            .expect_status(&[200])?
            .json()
    }

    /// Replace the description of `block`. An empty `description` sends an empty update (the
    /// field is left out of the payload).
    pub fn update_block_description(&self, block: &IpBlock, description: &str) -> Result<()> {
        let payload = encode(&UpdatableProperties::description(description))?;
        info!("Update description of {block}");
        self.transport
            .put(&block_path(block), payload)?
            .expect_status(&[200])?;
        Ok(())
    }

    /*-------------------------------------------------------------------------
      Reverse DNS
    -------------------------------------------------------------------------*/

    /// Get the reverse-DNS name of `address`.
    pub fn get_reverse(&self, address: IpAddr) -> Result<String> {
        let path = format!(
            "{}/{}",
            reverse_path(address),
            urlencoding::encode(&address.to_string())
        );
        let record: ReverseRecord = self.transport.get(&path)?.expect_status(&[200])?.json()?;
        Ok(record.reverse)
    }

    /// Set the reverse-DNS name of `address` and check the service's confirmation.
    ///
    /// The service echoes the record it stored, with the name terminated by a `.`. Any other
    /// confirmation fails with [Error::Consistency]: the write was accepted, but not as asked.
    pub fn set_reverse(&self, address: IpAddr, reverse: &str) -> Result<ReverseRecord> {
        let request = ReverseRecord::new(address, reverse);
        let payload = encode(&request)?;
        info!("Set reverse of {address} to {reverse}");

        let confirmation: ReverseRecord = self
            .transport
            .post(&reverse_path(address), payload)?
            .expect_status(&[200])?
            .json()?;

        let expected = request.expected_confirmation();
        if confirmation != expected {
            return Err(Error::Consistency {
                expected,
                actual: confirmation,
            });
        }
        debug!("Reverse of {address} confirmed");
        Ok(confirmation)
    }
}

/*-------------------------------------------------------------------------------------------------
  Helper Functions
-------------------------------------------------------------------------------------------------*/

/// Escaped path of a block resource.
pub(crate) fn block_path(block: &IpBlock) -> String {
    format!("ip/{}", urlencoding::encode(block.as_str()))
}

/// Escaped path of the reverse-DNS collection of the single-host block holding `address`.
fn reverse_path(address: IpAddr) -> String {
    format!("{}/reverse", block_path(&IpBlock::single_host(address)))
}

/// Escape one path segment.
pub(crate) fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Serialize a request payload.
pub(crate) fn encode<P: Serialize>(payload: &P) -> Result<Vec<u8>> {
    serde_json::to_vec(payload).map_err(Error::Encode)
}

/// Get and parse an environment variable value or return a default value.
fn get_env_var<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    env::var(env_var)
        .ok()
        .and_then(|value| {
            value
                .parse::<T>()
                .inspect(|_| info!("Using {}: {}", env_var, value))
                .inspect_err(|_| warn!("Invalid {}: {}", env_var, value))
                .ok()
        })
        .unwrap_or(default)
}

/*-------------------------------------------------------------------------------------------------
  Unit Tests
-------------------------------------------------------------------------------------------------*/
