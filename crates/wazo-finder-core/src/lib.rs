//! Shared core library for locating VoIP devices on Wazo PBX servers.

pub mod api;
pub mod config;
pub mod error;
pub mod finder;
pub mod mac;
pub mod model;
pub mod report;

#[cfg(test)]
mod test_support;

pub use error::{ApiError, ConfigError, CoreError};
