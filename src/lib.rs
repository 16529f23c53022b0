/*!
Client for the IP block endpoints of a REST IP-management API, plus an offline CIDR address
enumerator.

The [Client] maps each remote operation to exactly one HTTP exchange: list the account's IP
blocks, read or update a block's description, and read or set the reverse-DNS name of an
address. Setting a reverse name also checks the confirmation the service echoes back and reports
a mismatch as [Error::Consistency].

```no_run
use ipblocks::{BlockFilterBuilder, IpType};

let client = ipblocks::ClientBuilder::new().build()?;

let filter = BlockFilterBuilder::new().ip_type(IpType::Vps).build();
for block in client.list_blocks(&filter)? {
    println!("{}: {}", block.ip, block.description.unwrap_or_default());
}
# Ok::<(), ipblocks::Error>(())
```

Address enumeration needs no client:

```
let addresses: Vec<String> = ipblocks::enumerate_addresses("192.168.1.0/30")?
    .map(|address| address.to_string())
    .collect();

assert_eq!(addresses, ["192.168.1.0", "192.168.1.1", "192.168.1.2", "192.168.1.3"]);
# Ok::<(), ipblocks::Error>(())
```

Configuration (see [ClientBuilder::new]) is read from the `IPBLOCKS_ENDPOINT`, `IPBLOCKS_TOKEN`,
and `IPBLOCKS_TIMEOUT` environment variables.
*/

mod core;

/*-------------------------------------------------------------------------------------------------
  Library Interface
-------------------------------------------------------------------------------------------------*/

pub use crate::core::client::{Client, ClientBuilder, DEFAULT_ENDPOINT};
pub use crate::core::errors::{Error, Result};
pub use crate::core::filter::{BlockFilter, BlockFilterBuilder};
pub use crate::core::firewall::{
    FirewallAction, FirewallProtocol, FirewallRule, FirewallRuleRequest, FirewallRuleState,
    FirewalledIp, TcpOption,
};
pub use crate::core::ip_block::{enumerate_addresses, AddressRange, IpBlock};
pub use crate::core::ip_type::IpType;
pub use crate::core::records::{IpBlockRecord, ReverseRecord, RoutedTo, UpdatableProperties};
pub use crate::core::spam::{SpamIp, SpamState, SpamStats, SpamTarget};
pub use crate::core::transport::{HttpTransport, Method, Response, Transport};

pub use ipnetwork;
