use crate::cli;
use ipblocks::{BlockFilter, BlockFilterBuilder, Client, ClientBuilder};

/*-------------------------------------------------------------------------------------------------
  Core functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Build API client from CLI arguments
--------------------------------------------------------------------------------------*/

pub fn build_client(args: &cli::Args) -> ipblocks::Result<Client> {
    let mut builder = ClientBuilder::new();
    if let Some(endpoint) = &args.endpoint {
        builder.endpoint(endpoint);
    }
    builder.build()
}

/*--------------------------------------------------------------------------------------
  Build block filter from CLI arguments
--------------------------------------------------------------------------------------*/

pub fn build_filter(args: &cli::ListArgs) -> BlockFilter {
    let mut builder = BlockFilterBuilder::new();

    if let Some(description) = &args.description {
        builder = builder.description(description);
    }
    if let Some(ip) = &args.ip {
        builder = builder.ip(ip);
    }
    if let Some(routed_to) = &args.routed_to {
        builder = builder.routed_to(routed_to);
    }
    if let Some(ip_type) = &args.ip_type {
        builder = builder.ip_type(ip_type.clone());
    }

    builder.build()
}
