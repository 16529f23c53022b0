use crate::cli::Result;
use ipblocks::IpBlockRecord;
use std::path::Path;

/*-------------------------------------------------------------------------------------------------
  Save IP Blocks to CSV File
-------------------------------------------------------------------------------------------------*/

pub fn save(records: &[IpBlockRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)?;

    // Write header
    writer.serialize([
        "IP Block",
        "Type",
        "Description",
        "Routed To",
        "Country",
        "Organisation",
        "Can Be Terminated",
    ])?;

    // Write block records
    for record in records {
        writer.serialize((
            record.ip.as_str(),
            record.type_or_empty(),
            record.description.as_deref().unwrap_or(""),
            record.routed_to.service_name.as_deref().unwrap_or(""),
            record.country.as_deref().unwrap_or(""),
            record.organisation_id.as_deref().unwrap_or(""),
            record.can_be_terminated,
        ))?;
    }

    writer.flush()?;

    Ok(())
}
