//! MAC address validation and normalization.
//!
//! Accepted input formats (case-insensitive, surrounding whitespace ignored):
//! - `XX:XX:XX:XX:XX:XX` or `XX-XX-XX-XX-XX-XX`
//! - `XXXX.XXXX.XXXX`
//! - `XXXXXXXXXXXX`

use std::sync::LazyLock;

use regex::Regex;

const MAC_PATTERNS: &[&str] = &[
    r"^([0-9A-Fa-f]{2}[:-]){5}[0-9A-Fa-f]{2}$",
    r"^([0-9A-Fa-f]{4}\.){2}[0-9A-Fa-f]{4}$",
    r"^[0-9A-Fa-f]{12}$",
];

static MAC_REGEXES: LazyLock<Vec<Regex>> = LazyLock::new(|| {
    MAC_PATTERNS
        .iter()
        .map(|p| Regex::new(p).expect("MAC pattern is a valid regex"))
        .collect()
});

/// Check whether a string is a MAC address in one of the accepted formats.
pub fn is_valid(mac: &str) -> bool {
    let mac = mac.trim();
    if mac.is_empty() {
        return false;
    }

    MAC_REGEXES.iter().any(|re| re.is_match(mac))
}

/// Normalize a MAC address to six upper-case octets joined by `separator`.
///
/// Returns `None` if the input is not a valid MAC address.
pub fn normalize(mac: &str, separator: &str) -> Option<String> {
    if !is_valid(mac) {
        return None;
    }

    let hex: String = mac
        .chars()
        .filter(|c| c.is_ascii_hexdigit())
        .map(|c| c.to_ascii_uppercase())
        .collect();

    if hex.len() != 12 {
        return None;
    }

    let pairs: Vec<&str> = (0..12).step_by(2).map(|i| &hex[i..i + 2]).collect();
    Some(pairs.join(separator))
}

/// Format a MAC address for the device search endpoint.
pub fn format_for_search(mac: &str) -> Option<String> {
    normalize(mac, ":")
}
