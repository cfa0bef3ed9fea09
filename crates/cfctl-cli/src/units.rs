//! Byte-size parsing and formatting.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;

/// Bytes in a kilobyte.
pub const KILOBYTE: u64 = 1024;
/// Bytes in a megabyte.
pub const MEGABYTE: u64 = 1024 * KILOBYTE;
/// Bytes in a gigabyte.
pub const GIGABYTE: u64 = 1024 * MEGABYTE;
/// Bytes in a terabyte.
pub const TERABYTE: u64 = 1024 * GIGABYTE;

static BYTE_QUANTITY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^(\d+)([KMGT])B?$").unwrap_or_else(|_| unreachable!()));

/// A size string that is not a positive integer with a unit.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{0}' is not a byte quantity; use a positive integer with a unit like M, MB, G, or GB")]
pub struct InvalidByteQuantity(pub String);

/// Parse a human size such as `512M`, `1G` or `2gb` into megabytes.
pub fn to_megabytes(input: &str) -> Result<u64, InvalidByteQuantity> {
    let invalid = || InvalidByteQuantity(input.to_string());

    let captures = BYTE_QUANTITY.captures(input.trim()).ok_or_else(invalid)?;
    let value: u64 = captures[1].parse().map_err(|_| invalid())?;
    let unit = match captures[2].to_ascii_uppercase().as_str() {
        "K" => KILOBYTE,
        "M" => MEGABYTE,
        "G" => GIGABYTE,
        _ => TERABYTE,
    };

    value
        .checked_mul(unit)
        .map(|bytes| bytes / MEGABYTE)
        .ok_or_else(invalid)
}

/// Render a byte count with one decimal and the largest fitting unit, e.g.
/// `1.5G` or `512M`.
pub fn byte_size(bytes: u64) -> String {
    let (divisor, unit) = match bytes {
        0 => return "0".to_string(),
        b if b >= TERABYTE => (TERABYTE, "T"),
        b if b >= GIGABYTE => (GIGABYTE, "G"),
        b if b >= MEGABYTE => (MEGABYTE, "M"),
        b if b >= KILOBYTE => (KILOBYTE, "K"),
        _ => (1, "B"),
    };

    let value = format!("{:.1}", bytes as f64 / divisor as f64);
    let value = value.strip_suffix(".0").unwrap_or(&value);
    format!("{value}{unit}")
}

/// Render a size given in megabytes.
pub fn megabytes(mb: u64) -> String {
    byte_size(mb.saturating_mul(MEGABYTE))
}
