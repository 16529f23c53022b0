use ipblocks::{BlockFilter, IpBlockRecord};
use log::{info, warn};

/*-------------------------------------------------------------------------------------------------
  Logging Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  List Results
--------------------------------------------------------------------------------------*/

pub fn list_results(filter: &BlockFilter, records: &[IpBlockRecord]) {
    let count_blocks = records.len();
    info!("Found {count_blocks} IP block(s)");

    if count_blocks == 0 && !filter.is_empty() {
        warn!("No IP blocks match the filter `{}`", filter.query_string());
    }

    for record in records {
        match &record.ip_type {
            Some(ip_type) if !ip_type.is_known() => {
                warn!("IP block {} has an unrecognized type `{ip_type}`", record.ip)
            }
            None => warn!("IP block {} has no type", record.ip),
            _ => {}
        }
    }
}
