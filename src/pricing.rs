//! Rupee price strings as shown in the catalog (`₹60/L`, `₹150/250g`).

/// Flat delivery charge applied at checkout unless overridden by config.
pub const DEFAULT_DELIVERY_FEE: f64 = 20.0;

pub const CURRENCY_MARKER: char = '₹';

/// Numeric amount of a display price.
///
/// Strips the leading currency marker and anything from the first `/`
/// onward (the unit of measure), then parses what is left. Unparseable
/// strings count as `0.0` so one malformed entry cannot poison a total.
pub fn parse_price(price: &str) -> f64 {
    let trimmed = price.trim();
    let without_marker = trimmed
        .strip_prefix(CURRENCY_MARKER)
        .unwrap_or(trimmed);
    let amount = match without_marker.find('/') {
        Some(idx) => &without_marker[..idx],
        None => without_marker,
    };
    amount.trim().parse::<f64>().unwrap_or(0.0)
}

/// `unit price × quantity` for one cart entry.
pub fn line_total(price: &str, quantity: u32) -> f64 {
    parse_price(price) * f64::from(quantity)
}

/// Whole-rupee display form, e.g. `₹500`.
pub fn format_rupees(amount: f64) -> String {
    format!("{CURRENCY_MARKER}{amount:.0}")
}
