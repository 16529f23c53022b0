use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::{NOTHING, UTF8_FULL};
use comfy_table::*;
use ipblocks::{IpBlockRecord, IpType};
use std::collections::BTreeSet;

/*-------------------------------------------------------------------------------------------------
  Output Functions
-------------------------------------------------------------------------------------------------*/

/*--------------------------------------------------------------------------------------
  Block Table
--------------------------------------------------------------------------------------*/

pub fn block_table(records: &[IpBlockRecord]) {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(
        ["IP Block", "Type", "Description", "Routed To", "Country"]
            .into_iter()
            .map(|header| {
                Cell::new(header)
                    .add_attribute(Attribute::Bold)
                    .fg(Color::Green)
            }),
    );

    for record in records {
        table.add_row(vec![
            Cell::new(&record.ip).add_attribute(Attribute::Bold),
            Cell::new(record.type_or_empty()),
            Cell::new(record.description.as_deref().unwrap_or("")),
            Cell::new(record.routed_to.service_name.as_deref().unwrap_or("")),
            Cell::new(record.country.as_deref().unwrap_or("")),
        ]);
    }

    // Right-align the IP Block column
    if let Some(column) = table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    println!("{table}");

    // Print block-table summary
    let block_count = records.len();
    let type_count = records
        .iter()
        .filter_map(|record| record.ip_type.as_ref())
        .map(IpType::as_str)
        .collect::<BTreeSet<&str>>()
        .len();

    let mut summary_table = Table::new();
    summary_table
        .load_preset(NOTHING)
        .set_content_arrangement(ContentArrangement::Dynamic);

    summary_table.add_row(vec![Cell::new(block_count), Cell::new("IP Blocks")]);
    summary_table.add_row(vec![Cell::new(type_count), Cell::new("IP Types")]);

    if let Some(column) = summary_table.column_mut(0) {
        column.set_cell_alignment(CellAlignment::Right);
    }

    println!("{summary_table}");
}

/*--------------------------------------------------------------------------------------
  Block Identifiers
--------------------------------------------------------------------------------------*/

pub fn blocks(records: &[IpBlockRecord]) {
    for record in records {
        println!("{}", record.ip);
    }
}
