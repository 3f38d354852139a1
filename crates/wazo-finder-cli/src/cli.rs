//! CLI argument definitions using clap.

use clap::Parser;

use wazo_finder_core::config::DEFAULT_FALLBACK_EXTEN;

/// Wazo MAC Finder - locate a VoIP device by MAC address across Wazo servers
#[derive(Parser, Debug)]
#[command(name = "wazo-finder")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// MAC address to look up (XX:XX:XX:XX:XX:XX, XX-XX-..., XXXX.XXXX.XXXX or XXXXXXXXXXXX)
    #[arg(short, long)]
    pub mac: String,

    /// Wazo host, overriding configured servers
    #[arg(long)]
    pub host: Option<String>,

    /// Wazo authentication token, overriding configured servers
    #[arg(long)]
    pub token: Option<String>,

    /// Only scan the n-th configured server (1-based)
    #[arg(long, value_name = "N")]
    pub server: Option<usize>,

    /// Disable TLS certificate verification
    #[arg(long)]
    pub insecure: bool,

    /// Verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Output in JSON format
    #[arg(long)]
    pub json: bool,

    /// Per-request timeout in seconds
    #[arg(
        long,
        default_value = "30",
        env = "WAZO_TIMEOUT",
        value_parser = clap::value_parser!(u64).range(1..)
    )]
    pub timeout: u64,

    /// Extension whose line is offered to devices without a line
    #[arg(long, default_value = DEFAULT_FALLBACK_EXTEN, env = "WAZO_FALLBACK_EXTEN")]
    pub fallback_exten: String,
}
