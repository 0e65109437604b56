//! DonorBank CLI - Command-line front end for the blood donor registry.
//!
//! Registers, searches, and deletes donors from the terminal, and offers an
//! interactive desk session with the same form, results table, and status
//! line as a windowed front end.

mod commands;

use std::path::Path;
use std::process;

use clap::{Parser, Subcommand};
use console::style;
use tracing::info;

use donor_core::config::AppConfig;
use donor_core::error::{DonorError, DonorResult};
use donor_core::logging;

/// DonorBank - blood donor registry.
#[derive(Parser)]
#[command(
    name = "donorbank",
    version,
    about = "Blood donor registry CLI",
    long_about = "A command-line interface for the DonorBank blood donor registry.\n\
                   Register donors against a blood bank, search by name or blood group, \
                   and remove donors."
)]
struct Cli {
    /// Path to the configuration file.
    #[arg(short, long, global = true)]
    config: Option<String>,

    /// Enable verbose logging (debug level).
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output format (text, json).
    #[arg(short = 'f', long, global = true, default_value = "text")]
    format: OutputFormat,

    #[command(subcommand)]
    command: Commands,
}

/// Output format for CLI responses.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output.
    Text,
    /// JSON output for scripting.
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Register a new donor.
    Register {
        /// Donor name.
        #[arg(short, long)]
        name: String,
        /// Contact details (phone or email).
        #[arg(short = 't', long)]
        contact: String,
        /// Blood group (defaults to the configured form default).
        #[arg(short, long)]
        blood_group: Option<String>,
        /// Blood bank name (defaults to the first configured choice).
        #[arg(long)]
        bank: Option<String>,
    },
    /// Search donors by name or blood group. Lists everyone if omitted.
    Search {
        /// Substring to match (case-sensitive).
        #[arg(default_value = "")]
        criteria: String,
    },
    /// Delete a donor by ID.
    Delete {
        /// Donor ID as shown by `search`.
        id: Option<i64>,
    },
    /// List the blood bank choices and whether each is stored.
    Banks,
    /// List the blood group choices.
    Groups,
    /// Start an interactive registry session.
    Desk,
    /// Database management commands.
    Db {
        #[command(subcommand)]
        action: commands::db::DbAction,
    },
    /// Show or create the configuration file.
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        if e.is_recoverable() {
            eprintln!("{}", style(e.user_message()).red());
            process::exit(1);
        }
        eprintln!("{} {e}", style("ERROR").red().bold());
        process::exit(2);
    }
}

fn run(cli: Cli) -> DonorResult<()> {
    let config_path = match cli.config.as_deref() {
        Some(path) => Some(Path::new(path).to_path_buf()),
        None => AppConfig::default_config_path().ok(),
    };
    let config = match cli.config.as_deref() {
        Some(path) => AppConfig::load_from_file(Path::new(path))?,
        None => AppConfig::load_default()?,
    };

    let log_level = if cli.verbose { "debug" } else { config.logging.level.as_str() };
    let log_dir = config.effective_log_dir()?;
    let _guard = logging::init_logging(log_level, &log_dir, config.logging.json_output)?;

    info!("DonorBank CLI v{}", donor_core::constants::APP_VERSION);

    match cli.command {
        Commands::Register { name, contact, blood_group, bank } => {
            commands::donors::register(&config, name, contact, blood_group, bank, cli.format)
        }
        Commands::Search { criteria } => commands::donors::search(&config, &criteria, cli.format),
        Commands::Delete { id } => commands::donors::delete(&config, id, cli.format),
        Commands::Banks => commands::banks::banks(&config, cli.format),
        Commands::Groups => commands::banks::groups(cli.format),
        Commands::Desk => commands::desk::run(&config),
        Commands::Db { action } => commands::db::run(&config, action, cli.format),
        Commands::Config { action } => {
            let path = config_path.ok_or_else(|| {
                DonorError::MissingConfig("configuration directory".into())
            })?;
            commands::config::run(&config, &path, action, cli.format)
        }
    }
}
