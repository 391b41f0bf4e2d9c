//! Human-readable byte sizes.

/// Binary unit names, one per power of 1024.
pub const UNITS: [&str; 9] = ["B", "KiB", "MiB", "GiB", "TiB", "PiB", "EiB", "ZiB", "YiB"];

/// Format a byte count with binary units and four significant digits.
///
/// The largest unit not exceeding the value is chosen. Trailing zeros are
/// dropped, so whole values print without a fraction.
///
/// # Example
///
/// ```
/// use dirdupe::duplicates::human_size;
///
/// assert_eq!(human_size(0), "0 B");
/// assert_eq!(human_size(1024), "1 KiB");
/// assert_eq!(human_size(12345), "12.06 KiB");
/// ```
#[must_use]
pub fn human_size(bytes: u64) -> String {
    let value = u128::from(bytes);
    let unit = (1..UNITS.len())
        .take_while(|&i| value >= 1u128 << (10 * i))
        .last()
        .unwrap_or(0);

    let scaled = bytes as f64 / (1u128 << (10 * unit)) as f64;
    format!("{} {}", format_significant(scaled, 4), UNITS[unit])
}

/// Format like C's `%.<digits>g` for values in the fixed-point range.
fn format_significant(value: f64, digits: i32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let exponent = value.abs().log10().floor() as i32;
    let decimals = (digits - 1 - exponent).max(0) as usize;
    let text = format!("{:.*}", decimals, value);

    if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        text
    }
}
