//! Colored terminal output.

use colored::*;
use comfy_table::{Cell, Color, ContentArrangement, Table};

use wazo_finder_core::config::ServerConfig;
use wazo_finder_core::error::ApiError;
use wazo_finder_core::model::Device;
use wazo_finder_core::report::Reporter;

use super::NOT_LINKED;

pub struct ConsoleReporter;

impl ConsoleReporter {
    pub fn new() -> Self {
        Self
    }

    /// Render a device as a two-column table.
    pub fn format_device(device: &Device, server: &ServerConfig) -> String {
        let mut table = Table::new();
        table.set_content_arrangement(ContentArrangement::Dynamic);
        table.set_header(vec![
            Cell::new("Device found").fg(Color::Green),
            Cell::new(""),
        ]);

        let or_na = |v: &Option<String>| v.clone().unwrap_or_else(|| "N/A".to_string());

        table.add_row(vec![
            Cell::new("Tenant ID"),
            Cell::new(or_na(&device.tenant_uuid)).fg(Color::DarkGrey),
        ]);
        table.add_row(vec![Cell::new("Device Name"), value_cell(or_na(&device.label))]);
        if let Some(ref mac) = device.mac {
            table.add_row(vec![Cell::new("MAC"), value_cell(mac.clone())]);
        }
        table.add_row(vec![Cell::new("Line Number"), linked_cell(device.line_exten.clone())]);
        table.add_row(vec![Cell::new("User"), linked_cell(device.user_fullname())]);
        table.add_row(vec![Cell::new("Profile"), value_cell(or_na(&device.profile))]);
        table.add_row(vec![
            Cell::new("Server"),
            Cell::new(format!("{} ({})", server.name, server.host)),
        ]);

        table.to_string()
    }
}

impl Default for ConsoleReporter {
    fn default() -> Self {
        Self::new()
    }
}

fn value_cell(value: String) -> Cell {
    Cell::new(value).fg(Color::Cyan)
}

fn linked_cell(value: Option<String>) -> Cell {
    match value {
        Some(v) => value_cell(v),
        None => Cell::new(NOT_LINKED).fg(Color::Yellow),
    }
}

impl Reporter for ConsoleReporter {
    fn report_scanning(&self, server: &ServerConfig) {
        eprintln!("{}", format!("Scanning {} ({})...", server.name, server.host).dimmed());
    }

    fn report_device(&self, device: &Device, server: &ServerConfig) {
        println!("{}", Self::format_device(device, server));
    }

    fn report_not_found(&self, mac: &str) {
        println!(
            "{} {}",
            "[!] No device found with MAC address:".yellow(),
            mac.red().bold()
        );
    }

    fn report_error(&self, message: &str) {
        eprintln!("{}", format!("[X] ERROR: {}", message).red().bold());
    }

    fn report_server_error(&self, server: &ServerConfig, error: &ApiError) {
        eprintln!(
            "{} {}: {}",
            "[!]".yellow(),
            server.name,
            error.to_string().yellow()
        );
    }

    fn report_warning(&self, message: &str) {
        println!("{}", message.yellow());
    }

    fn report_info(&self, message: &str) {
        println!("{}", message.cyan());
    }

    fn report_success(&self, message: &str) {
        println!("{}", message.green().bold());
    }
}
