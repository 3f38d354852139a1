//! Wazo MAC Finder - locate a VoIP device by MAC address across Wazo PBX servers.
//!
//! Servers come from `WAZO_HOST`/`WAZO_TOKEN` (and numbered variants), loaded
//! from a `.env` file when present. A device without a line can be force-linked
//! to the fallback extension's line after confirmation.

mod cli;
mod commands;
mod error;
mod logging;
mod output;
mod prompt;

use clap::Parser;

use wazo_finder_core::config::load_dotenv;
use wazo_finder_core::error::CoreError;

use cli::Cli;
use error::{exit_codes, CliError};
use prompt::StdinConfirm;

#[tokio::main]
async fn main() {
    // Loaded before parsing so clap `env` defaults see dotfile values.
    let dotenv = load_dotenv();
    let cli = Cli::parse();

    logging::init(cli.verbose);
    let reporter = output::get_reporter(cli.json);

    let result = match dotenv {
        Ok(path) => {
            if let Some(path) = path {
                tracing::debug!("Using configuration from {}", path.display());
            }
            tokio::select! {
                result = commands::run_find(cli, reporter.as_ref(), &StdinConfirm) => result.map(|_| ()),
                _ = tokio::signal::ctrl_c() => Err(CliError::Core(CoreError::Interrupted)),
            }
        }
        Err(e) => Err(CliError::from(e)),
    };

    match result {
        Ok(()) => std::process::exit(exit_codes::SUCCESS),
        Err(e) => {
            if !e.already_reported() {
                reporter.report_error(&e.to_string());
            }
            std::process::exit(e.exit_code());
        }
    }
}
