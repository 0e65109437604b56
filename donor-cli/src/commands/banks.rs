//! Choice listings for the registration form.

use comfy_table::{Table, presets::UTF8_FULL, modifiers::UTF8_ROUND_CORNERS, ContentArrangement};
use console::style;

use donor_core::config::AppConfig;
use donor_core::error::DonorResult;
use donor_models::BloodGroup;
use donor_services::DonorStore;

use crate::OutputFormat;

/// List the configured blood bank choices next to the stored blood banks.
pub fn banks(config: &AppConfig, format: OutputFormat) -> DonorResult<()> {
    let db = super::init_database(config)?;
    let stored = db.list_blood_banks()?;
    let choices = &config.form.blood_bank_choices;

    match format {
        OutputFormat::Json => {
            let json: Vec<_> = choices
                .iter()
                .map(|name| {
                    let bank = stored.iter().find(|b| &b.name == name);
                    serde_json::json!({
                        "name": name,
                        "id": bank.map(|b| b.id),
                        "location": bank.map(|b| b.location.clone()),
                    })
                })
                .collect();
            println!("{}", serde_json::to_string_pretty(&json)?);
        }
        OutputFormat::Text => {
            let mut table = Table::new();
            table
                .load_preset(UTF8_FULL)
                .apply_modifier(UTF8_ROUND_CORNERS)
                .set_content_arrangement(ContentArrangement::Dynamic);
            table.set_header(vec!["Blood Bank", "ID", "Location"]);

            for name in choices {
                match stored.iter().find(|b| &b.name == name) {
                    Some(bank) => table.add_row(vec![
                        name.clone(),
                        bank.id.to_string(),
                        bank.location.clone(),
                    ]),
                    None => table.add_row(vec![name.clone(), "-".into(), "not stored".into()]),
                };
            }
            println!("{table}");

            let missing = choices
                .iter()
                .filter(|name| !stored.iter().any(|b| &b.name == *name))
                .count();
            if missing > 0 {
                println!(
                    "\n{} {missing} choice(s) have no stored blood bank; add them under [[blood_banks]] in the config.",
                    style("WARN").yellow().bold()
                );
            }
        }
    }
    Ok(())
}

/// List the blood groups in form order.
pub fn groups(format: OutputFormat) -> DonorResult<()> {
    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string(&BloodGroup::ALL)?);
        }
        OutputFormat::Text => {
            for group in BloodGroup::ALL {
                println!("{group}");
            }
        }
    }
    Ok(())
}
