//! Database management commands.

use clap::Subcommand;
use comfy_table::{Table, presets::UTF8_FULL, modifiers::UTF8_ROUND_CORNERS, ContentArrangement};
use console::style;
use dialoguer::Confirm;

use donor_core::config::AppConfig;
use donor_core::error::{DonorError, DonorResult};
use donor_models::{migrations, queries};

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum DbAction {
    /// Show row counts and donors per blood group.
    Stats,
    /// Run integrity and foreign key checks.
    Check,
    /// Reset the database (WARNING: deletes all donors and blood banks).
    Reset,
    /// Show the database file path.
    Path,
}

pub fn run(config: &AppConfig, action: DbAction, format: OutputFormat) -> DonorResult<()> {
    let db_path = config.effective_db_path()?;

    match action {
        DbAction::Stats => {
            let db = super::init_database(config)?;
            let stats = db.stats()?;
            let conn = db.conn()?;
            let by_group = queries::count_by_blood_group(&conn)?;
            let schema_version = migrations::get_schema_version(&conn)?;
            let journal_mode: String = conn
                .query_row("PRAGMA journal_mode", [], |row| row.get(0))
                .unwrap_or_else(|_| "unknown".to_string());
            let file_size = std::fs::metadata(&db_path).ok().map(|m| m.len());

            match format {
                OutputFormat::Json => {
                    let groups: serde_json::Map<String, serde_json::Value> = by_group
                        .iter()
                        .map(|(group, count)| (group.to_string(), (*count).into()))
                        .collect();
                    println!("{}", serde_json::json!({
                        "path": db_path.display().to_string(),
                        "schema_version": schema_version,
                        "journal_mode": journal_mode,
                        "file_size_bytes": file_size,
                        "tables": {
                            "blood_banks": stats.blood_banks,
                            "donors": stats.donors,
                        },
                        "donors_by_blood_group": groups,
                    }));
                }
                OutputFormat::Text => {
                    println!("{}", style("Database Statistics").bold().underlined());
                    println!("  Path:            {}", db_path.display());
                    println!("  Schema version:  {schema_version}");
                    println!("  Journal mode:    {journal_mode}");
                    if let Some(size) = file_size {
                        println!("  File size:       {size} bytes");
                    }
                    println!();

                    let mut table = Table::new();
                    table
                        .load_preset(UTF8_FULL)
                        .apply_modifier(UTF8_ROUND_CORNERS)
                        .set_content_arrangement(ContentArrangement::Dynamic);
                    table.set_header(vec!["Table", "Row Count"]);
                    table.add_row(vec!["blood_banks".to_string(), stats.blood_banks.to_string()]);
                    table.add_row(vec!["donors".to_string(), stats.donors.to_string()]);
                    println!("{table}");

                    println!();
                    let mut groups = Table::new();
                    groups
                        .load_preset(UTF8_FULL)
                        .apply_modifier(UTF8_ROUND_CORNERS)
                        .set_content_arrangement(ContentArrangement::Dynamic);
                    groups.set_header(vec!["Blood Group", "Donors"]);
                    for (group, count) in &by_group {
                        groups.add_row(vec![group.to_string(), count.to_string()]);
                    }
                    println!("{groups}");
                }
            }
        }
        DbAction::Check => {
            println!("  {} Running integrity check...", style("...").dim());
            let db = super::init_database(config)?;

            let integrity_ok = match db.run_integrity_check() {
                Ok(()) => {
                    println!("  {} Integrity check passed.", style("OK").green().bold());
                    true
                }
                Err(e) => {
                    println!("  {} Integrity check failed: {e}", style("FAIL").red().bold());
                    false
                }
            };

            let violations = db.foreign_key_violations()?;
            if violations.is_empty() {
                println!("  {} Foreign key constraints OK.", style("OK").green().bold());
            } else {
                println!(
                    "  {} {} foreign key violation(s):",
                    style("WARN").yellow().bold(),
                    violations.len()
                );
                for v in violations.iter().take(10) {
                    println!("    - {v}");
                }
                if violations.len() > 10 {
                    println!("    ... and {} more", violations.len() - 10);
                }
            }

            if !integrity_ok {
                return Err(DonorError::IntegrityCheck(db_path.display().to_string()));
            }
        }
        DbAction::Reset => {
            println!(
                "  {} This will delete ALL donors and blood banks.",
                style("WARNING").red().bold()
            );
            println!("  Database: {}", db_path.display());

            let confirmed = Confirm::new()
                .with_prompt("  Are you sure you want to reset the database?")
                .default(false)
                .interact()
                .unwrap_or(false);

            if !confirmed {
                println!("  Reset cancelled.");
                return Ok(());
            }

            let db = super::init_database(config)?;
            db.reset()?;
            let seeded = db.bootstrap_blood_banks(&config.blood_banks)?;
            println!(
                "  {} Database reset complete ({seeded} blood bank(s) re-seeded).",
                style("OK").green().bold()
            );
        }
        DbAction::Path => match format {
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "path": db_path.display().to_string() }));
            }
            OutputFormat::Text => {
                println!("{}", db_path.display());
            }
        },
    }

    Ok(())
}
