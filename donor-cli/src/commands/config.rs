//! Configuration commands.

use std::path::Path;

use clap::Subcommand;
use console::style;

use donor_core::config::{AppConfig, BloodBankSeed};
use donor_core::constants::DEFAULT_BLOOD_BANK_CHOICES;
use donor_core::error::DonorResult;

use crate::OutputFormat;

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show the effective configuration.
    Show,
    /// Show the configuration file path.
    Path,
    /// Write a starter configuration file with the default blood banks.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

pub fn run(config: &AppConfig, path: &Path, action: ConfigAction, format: OutputFormat) -> DonorResult<()> {
    match action {
        ConfigAction::Show => match format {
            OutputFormat::Json => {
                println!("{}", serde_json::to_string_pretty(config)?);
            }
            OutputFormat::Text => {
                print_config_text(config)?;
            }
        },
        ConfigAction::Path => match format {
            OutputFormat::Json => {
                println!("{}", serde_json::json!({
                    "path": path.display().to_string(),
                    "exists": path.exists(),
                }));
            }
            OutputFormat::Text => {
                println!("{}", path.display());
            }
        },
        ConfigAction::Init { force } => {
            if path.exists() && !force {
                println!(
                    "{} {} already exists (use --force to overwrite).",
                    style("SKIP").yellow().bold(),
                    path.display()
                );
                return Ok(());
            }
            starter_config().save_to_file(path)?;
            println!(
                "{} Wrote starter configuration to {}",
                style("OK").green().bold(),
                path.display()
            );
        }
    }
    Ok(())
}

fn print_config_text(config: &AppConfig) -> DonorResult<()> {
    println!("{}", style("Database").bold().underlined());
    println!("  Path:             {}", config.effective_db_path()?.display());
    println!("  WAL mode:         {}", config.database.wal_mode);
    println!("  Pool size:        {}", config.database.pool_size);
    println!("  Integrity check:  {}", config.database.integrity_check_on_startup);
    println!();

    println!("{}", style("Logging").bold().underlined());
    println!("  Level:            {}", config.logging.level);
    println!("  Directory:        {}", config.effective_log_dir()?.display());
    println!("  JSON output:      {}", config.logging.json_output);
    println!();

    println!("{}", style("Form").bold().underlined());
    println!("  Default group:    {}", config.form.default_blood_group);
    println!("  Bank choices:     {}", config.form.blood_bank_choices.join(", "));
    println!();

    println!("{}", style("Seeded blood banks").bold().underlined());
    if config.blood_banks.is_empty() {
        println!("  (none)");
    }
    for bank in &config.blood_banks {
        println!("  {:>3}  {} ({})", bank.id, bank.name, bank.location);
    }
    Ok(())
}

/// Default configuration plus one seed per default blood bank choice, so
/// the form's choices resolve out of the box.
fn starter_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.blood_banks = DEFAULT_BLOOD_BANK_CHOICES
        .iter()
        .zip(1..)
        .map(|(name, id)| BloodBankSeed {
            id,
            name: name.to_string(),
            location: format!("Location {id}"),
        })
        .collect();
    config
}
