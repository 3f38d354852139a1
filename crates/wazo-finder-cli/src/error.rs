//! Error types for the Wazo finder CLI.
//!
//! CliError wraps CoreError from the shared library and adds CLI-specific variants.

use thiserror::Error;
use wazo_finder_core::error::CoreError;

pub use wazo_finder_core::error::{ApiError, ConfigError};

/// Exit codes for the CLI
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL_ERROR: i32 = 1;
    pub const NOT_FOUND: i32 = 2;
}

/// Main error type for the CLI
#[derive(Error, Debug)]
pub enum CliError {
    #[error("{0}")]
    Core(#[from] CoreError),

    #[error("No device found with MAC address {0}")]
    DeviceNotFound(String),
}

impl CliError {
    /// Get the exit code for this error
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::DeviceNotFound(_) => exit_codes::NOT_FOUND,
            CliError::Core(_) => exit_codes::GENERAL_ERROR,
        }
    }

    /// Whether the error was already shown to the operator during the scan.
    pub fn already_reported(&self) -> bool {
        matches!(self, CliError::DeviceNotFound(_))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        CliError::Core(CoreError::Config(e))
    }
}

impl From<ApiError> for CliError {
    fn from(e: ApiError) -> Self {
        CliError::Core(CoreError::Api(e))
    }
}
