//! Entry point for suna, a local database sandbox provisioning tool.
//!
//! This binary loads environment variables, parses CLI arguments via [`cli`],
//! and dispatches to the appropriate subcommand handler.

mod cli;
mod constants;
mod defaults;

use anyhow::Result;

/// Runs the suna CLI.
///
/// Loads `.env` files (silently ignored if absent), parses command-line
/// arguments into a [`cli::Cli`] struct, and dispatches the chosen
/// subcommand via [`cli::run`]. Any propagated error prints a diagnostic
/// and exits with a nonzero status.
fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = cli::parse();
    cli::run(cli)
}
