//! CLI command implementations.

pub mod donors;
pub mod banks;
pub mod desk;
pub mod db;
pub mod config;

use comfy_table::{Table, presets::UTF8_FULL, modifiers::UTF8_ROUND_CORNERS, ContentArrangement};

use donor_core::config::AppConfig;
use donor_core::constants::RESULT_COLUMNS;
use donor_core::error::DonorResult;
use donor_models::{Database, DonorListing};

/// Open the configured database and insert any missing seed blood banks.
pub fn init_database(config: &AppConfig) -> DonorResult<Database> {
    let db_path = config.effective_db_path()?;
    let db = Database::init(&db_path, &config.database)?;
    db.bootstrap_blood_banks(&config.blood_banks)?;
    Ok(db)
}

/// Render donor rows as a results table.
pub fn donor_table(rows: &[DonorListing]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.set_header(RESULT_COLUMNS.to_vec());
    for row in rows {
        table.add_row(row.cells().to_vec());
    }
    table
}

/// Print donor rows as a table or a JSON array.
pub fn print_donors(rows: &[DonorListing], format: crate::OutputFormat) -> DonorResult<()> {
    match format {
        crate::OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(rows)?);
        }
        crate::OutputFormat::Text => {
            if rows.is_empty() {
                println!("No donors found.");
            } else {
                println!("{}", donor_table(rows));
                println!("\n{} donor(s) shown", rows.len());
            }
        }
    }
    Ok(())
}
