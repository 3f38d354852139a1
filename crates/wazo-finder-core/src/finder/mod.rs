//! Device lookup across Wazo servers.
//!
//! The resolver enriches a single match; the scan controller walks servers
//! in order and stops at the first one that knows the MAC.

pub mod resolver;
pub mod scan;

pub use resolver::resolve_device;
pub use scan::{ScanController, ScanOptions, ScanOutcome};
