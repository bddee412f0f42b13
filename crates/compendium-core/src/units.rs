//! Byte-size formatting for RAM capacities.

use serde::Serialize;

const SI_UNITS: [&str; 9] = ["B", "KB", "MB", "GB", "TB", "PB", "EB", "ZB", "YB"];
const BINARY_UNITS: [&str; 9] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];

/// A size rendered with decimal (SI) and binary prefixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FormattedSize {
    pub si: String,
    pub binary: String,
}

/// Format `bytes` with `decimals` digits after the point.
pub fn format_bytes(bytes: f64, decimals: usize) -> FormattedSize {
    FormattedSize {
        si: scale(bytes, 1000.0, &SI_UNITS, decimals),
        binary: scale(bytes, 1024.0, &BINARY_UNITS, decimals),
    }
}

fn scale(bytes: f64, step: f64, units: &[&str], decimals: usize) -> String {
    let mut value = bytes;
    let mut idx = 0;
    while value >= step && idx + 1 < units.len() {
        value /= step;
        idx += 1;
    }
    format!("{value:.decimals$} {}", units[idx])
}
