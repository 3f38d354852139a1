//! Output reporters for scan results.

pub mod console;
pub mod json;

pub use console::ConsoleReporter;
pub use json::JsonReporter;

use wazo_finder_core::report::Reporter;

/// Placeholder shown for line/user fields of an unlinked device.
pub const NOT_LINKED: &str = "Not linked";

/// Get the appropriate reporter based on JSON flag
pub fn get_reporter(json: bool) -> Box<dyn Reporter> {
    if json {
        Box::new(JsonReporter::new())
    } else {
        Box::new(ConsoleReporter::new())
    }
}
