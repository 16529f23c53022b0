/*-------------------------------------------------------------------------------------------------
  Core Modules
-------------------------------------------------------------------------------------------------*/

pub mod client;
pub mod errors;
pub mod filter;
pub mod firewall;
pub mod ip_block;
pub mod ip_type;
pub mod load_balancing;
pub mod records;
pub mod spam;
pub mod transport;
