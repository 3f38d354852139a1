//! JSON-formatted output for CLI.

use serde::Serialize;
use serde_json::{json, Value};

use wazo_finder_core::config::ServerConfig;
use wazo_finder_core::error::ApiError;
use wazo_finder_core::model::Device;
use wazo_finder_core::report::Reporter;

/// Prints the final result as JSON on stdout; progress messages go to stderr.
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }

    fn to_json<T: Serialize>(value: &T) -> String {
        serde_json::to_string_pretty(value).unwrap_or_else(|_| "{}".to_string())
    }

    pub fn device_document(device: &Device, server: &ServerConfig) -> Value {
        json!({
            "found": true,
            "linked": device.is_linked(),
            "server": server,
            "device": device,
        })
    }

    fn message(level: &str, message: &str) -> String {
        Self::to_json(&json!({ "level": level, "message": message }))
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn report_device(&self, device: &Device, server: &ServerConfig) {
        println!("{}", Self::to_json(&Self::device_document(device, server)));
    }

    fn report_not_found(&self, mac: &str) {
        println!("{}", Self::to_json(&json!({ "found": false, "mac": mac })));
    }

    fn report_error(&self, message: &str) {
        eprintln!("{}", Self::to_json(&json!({ "error": message })));
    }

    fn report_server_error(&self, server: &ServerConfig, error: &ApiError) {
        eprintln!(
            "{}",
            Self::to_json(&json!({
                "server": server,
                "error": error.to_string(),
            }))
        );
    }

    fn report_warning(&self, message: &str) {
        eprintln!("{}", Self::message("warning", message));
    }

    fn report_info(&self, message: &str) {
        eprintln!("{}", Self::message("info", message));
    }

    fn report_success(&self, message: &str) {
        eprintln!("{}", Self::message("success", message));
    }
}
