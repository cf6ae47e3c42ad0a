// insiders/src/commands/schema.rs
//
// USE CASE: Show uploaders what an admissible file looks like.

use comfy_table::presets::UTF8_FULL;
use comfy_table::{ContentArrangement, Table};

use insiders_core::domain::dataset::{ExpectedSchema, SAMPLE_ROWS};

pub fn execute() {
    println!("📋 Expected schema");
    println!("{}", schema_table());
    println!("\n🧾 Sample dataset");
    println!("{}", sample_table());
}

fn schema_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(vec!["Column", "Data type", "Description"]);

    for column in ExpectedSchema::columns() {
        table.add_row(vec![
            column.raw_name,
            column.semantic_type.as_str(),
            column.description,
        ]);
    }
    table
}

fn sample_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_header(ExpectedSchema::columns().iter().map(|c| c.raw_name));
    for row in SAMPLE_ROWS {
        table.add_row(row);
    }
    table
}
