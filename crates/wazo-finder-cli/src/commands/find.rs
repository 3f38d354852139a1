//! Find command: scan configured servers for a MAC address.

use std::time::Duration;

use wazo_finder_core::api::HttpConnector;
use wazo_finder_core::config::{select_servers, servers_from_env};
use wazo_finder_core::error::CoreError;
use wazo_finder_core::finder::{ScanController, ScanOptions, ScanOutcome};
use wazo_finder_core::mac;
use wazo_finder_core::report::{Confirm, Reporter};

use crate::cli::Cli;
use crate::error::CliError;

/// Run the lookup described by the command line.
pub async fn run_find(
    cli: Cli,
    reporter: &dyn Reporter,
    confirm: &dyn Confirm,
) -> Result<ScanOutcome, CliError> {
    let plan = select_servers(servers_from_env(), cli.host, cli.token, cli.server)?;

    if !mac::is_valid(&cli.mac) {
        return Err(CoreError::Validation(cli.mac).into());
    }

    tracing::debug!(
        "Scanning {} server(s) for {} ({:?})",
        plan.servers.len(),
        cli.mac,
        plan.selection
    );

    let connector = HttpConnector {
        insecure: cli.insecure,
        timeout: Duration::from_secs(cli.timeout),
    };
    let options = ScanOptions {
        fallback_exten: cli.fallback_exten,
        fail_fast: plan.fail_fast(),
        ..Default::default()
    };

    let controller = ScanController::new(&connector, reporter, confirm, options);
    match controller.scan(&plan.servers, &cli.mac).await? {
        ScanOutcome::NotFound => Err(CliError::DeviceNotFound(cli.mac)),
        outcome => Ok(outcome),
    }
}
