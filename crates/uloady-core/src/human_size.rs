//! Short human-readable byte counts for error messages.

const UNITS: [&str; 6] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB"];

/// Formats `bytes` with binary units and three significant digits.
///
/// # Examples
///
/// - `format_size(0)` → `"0.00B"`
/// - `format_size(1536)` → `"1.50KiB"`
/// - `format_size(1_048_576)` → `"1.00MiB"`
pub fn format_size(bytes: u64) -> String {
    let mut value = bytes as f64;
    let mut unit = 0;
    // Anything that would print as "1024" belongs to the next unit.
    while value >= 1023.5 && unit + 1 < UNITS.len() {
        value /= 1024.0;
        unit += 1;
    }
    format!("{}{}", three_significant(value), UNITS[unit])
}

/// Fixed-point rendering with as many decimals as keep three significant digits.
/// Values of 1000 and above keep their integer part intact.
fn three_significant(value: f64) -> String {
    let mut decimals: usize = 2;
    // Step down when rounding would carry into another integer digit (9.996 -> "10.0").
    while decimals > 0 && value >= 10f64.powi(3 - decimals as i32) - 0.5 * 10f64.powi(-(decimals as i32)) {
        decimals -= 1;
    }
    format!("{:.*}", decimals, value)
}
