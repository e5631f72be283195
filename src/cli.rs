//! Command-line interface definition and dispatch for suna.
//!
//! Uses [`clap`] for argument parsing with derive macros. The `defaults`
//! subcommand family drives the defaults subsystem; handlers return
//! `anyhow::Result` and the process exits nonzero on any propagated error.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::Colorize;

use crate::constants;
use crate::defaults::{self, DefaultsStore};

/// Top-level CLI structure for suna.
///
/// Parsed from command-line arguments via [`clap::Parser`]. Contains a single
/// required subcommand that determines which action suna performs.
#[derive(Parser)]
#[command(name = constants::APP_NAME, about = "A local database sandbox provisioning tool")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands for the suna CLI.
///
/// The `///` doc comments on variants double as `--help` text rendered by
/// clap.
#[derive(Subcommand)]
pub enum Commands {
    /// Manage stored defaults
    Defaults {
        #[command(subcommand)]
        action: DefaultsAction,
    },
}

/// Subcommands for the `defaults` command.
///
/// Controls reading and writing suna's JSON defaults file stored at
/// `~/.suna/config.json`.
#[derive(Subcommand)]
pub enum DefaultsAction {
    /// Show the effective defaults
    Show,
    /// Change one default value and store the result
    Update {
        /// Field name to change (see `defaults fields`)
        name: String,
        /// New value, parsed to the field's type
        value: String,
    },
    /// Write the effective defaults to the configuration file
    Store,
    /// Remove the configuration file, reverting to internal values
    Remove,
    /// Export the effective defaults to a file
    Export {
        /// Destination file
        path: PathBuf,
    },
    /// Load defaults from a file and store them as the configuration
    Load {
        /// Source file
        path: PathBuf,
    },
    /// List the field names accepted by `defaults update`
    Fields,
}

/// Parses command-line arguments into a [`Cli`] struct.
///
/// Delegates to [`clap::Parser::parse`], which exits the process on invalid
/// input.
pub fn parse() -> Cli {
    Cli::parse()
}

/// Dispatches the parsed CLI command to its handler.
pub fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Defaults { action } => handle_defaults(action),
    }
}

fn handle_defaults(action: DefaultsAction) -> Result<()> {
    let mut store = DefaultsStore::open_default()?;
    store.load()?;
    match action {
        DefaultsAction::Show => {
            let from_file = store
                .config_file()
                .exists()
                .then(|| store.config_file().to_path_buf());
            let effective = store.effective()?;
            println!("{}", defaults::render(effective, from_file.as_deref())?);
        }
        DefaultsAction::Update { name, value } => {
            store.update(&name, &value, true)?;
            log_op(&format!("defaults update {name}={value}"));
        }
        DefaultsAction::Store => {
            let path = store.config_file().to_path_buf();
            let effective = store.effective()?.clone();
            defaults::write_defaults(&path, &effective)?;
            println!("# defaults written to {}", path.display());
        }
        DefaultsAction::Remove => {
            let path = store.config_file().to_path_buf();
            defaults::remove_defaults(&path)?;
            println!("# file {} removed", path.display());
            log_op("defaults remove");
        }
        DefaultsAction::Export { path } => {
            let effective = store.effective()?.clone();
            defaults::write_defaults(&path, &effective)?;
            println!("# defaults exported to {}", path.display());
        }
        DefaultsAction::Load { path } => {
            let candidate = defaults::read_defaults(&path)?;
            if let Err(issues) = defaults::validate(&candidate) {
                for issue in &issues {
                    eprintln!("{issue}");
                }
                anyhow::bail!("defaults file {} not validated", path.display());
            }
            let config_file = store.config_file().to_path_buf();
            defaults::write_defaults(&config_file, &candidate)?;
            println!("# defaults loaded from {}", path.display());
        }
        DefaultsAction::Fields => {
            println!("{}", "Fields accepted by `defaults update`:".bold());
            for name in defaults::field_names() {
                println!("  {name}");
            }
        }
    }
    Ok(())
}

/// Traces a defaults operation to stderr when operation logging is on.
fn log_op(action: &str) {
    if defaults::log_operations() {
        eprintln!("{}", format!("[{}] {}", constants::APP_NAME, action).dimmed());
    }
}
