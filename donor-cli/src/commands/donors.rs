//! Donor commands: register, search, and delete.

use console::style;

use donor_core::config::AppConfig;
use donor_core::error::DonorResult;
use donor_services::{registrar, remover, search, Registration};

use crate::OutputFormat;

pub fn register(
    config: &AppConfig,
    name: String,
    contact: String,
    blood_group: Option<String>,
    bank: Option<String>,
    format: OutputFormat,
) -> DonorResult<()> {
    let db = super::init_database(config)?;

    let registration = Registration {
        name,
        contact,
        blood_group: blood_group.unwrap_or_else(|| config.form.default_blood_group.clone()),
        blood_bank: bank
            .or_else(|| config.form.default_blood_bank().map(str::to_string))
            .unwrap_or_default(),
    };
    let donor = registrar::register(&db, &registration)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&donor)?);
        }
        OutputFormat::Text => {
            println!(
                "{} Registered {} ({}) at {} as donor {}.",
                style("OK").green().bold(),
                donor.name,
                donor.blood_group,
                registration.blood_bank,
                donor.id.unwrap_or_default()
            );
        }
    }
    Ok(())
}

pub fn search(config: &AppConfig, criteria: &str, format: OutputFormat) -> DonorResult<()> {
    let db = super::init_database(config)?;
    let rows = search::search(&db, criteria)?;
    super::print_donors(&rows, format)
}

/// Delete a donor, then show the remaining donors.
pub fn delete(config: &AppConfig, id: Option<i64>, format: OutputFormat) -> DonorResult<()> {
    let db = super::init_database(config)?;
    let deleted = remover::remove(&db, id)?;

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::json!({ "deleted": deleted }));
        }
        OutputFormat::Text => {
            println!("{} Deleted donor {deleted}.\n", style("OK").green().bold());
            let rows = search::search(&db, "")?;
            super::print_donors(&rows, format)?;
        }
    }
    Ok(())
}
