/// Fallback when a market size carries no usable number.
pub const DEFAULT_MARKET_SIZE: f64 = 1_000_000_000.0;

/// Parse a free-text market size ("$1B", "500M", "250k") into USD.
///
/// Non-numeric characters other than `.` are stripped and the longest
/// leading `digits[.digits]` run is the magnitude, so "1.2.3" reads as 1.2.
/// The unit is the first letter after the last digit: `b`, `m` or `k` (any
/// case) scale it; other letters leave it unscaled.
pub fn parse_market_size(market_size: &str) -> f64 {
    let digits: String = market_size
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect();

    let value = match numeric_prefix(&digits).parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => return DEFAULT_MARKET_SIZE,
    };

    match unit_multiplier(market_size) {
        Some(multiplier) => value * multiplier,
        None if value == 0.0 => DEFAULT_MARKET_SIZE,
        None => value,
    }
}

/// Everything before the second `.`.
fn numeric_prefix(digits: &str) -> &str {
    match digits.match_indices('.').nth(1) {
        Some((second_dot, _)) => &digits[..second_dot],
        None => digits,
    }
}

fn unit_multiplier(market_size: &str) -> Option<f64> {
    let last_digit = market_size.rfind(|c: char| c.is_ascii_digit())?;
    let unit = market_size[last_digit..]
        .chars()
        .find(|c| c.is_ascii_alphabetic())?;

    match unit.to_ascii_lowercase() {
        'b' => Some(1_000_000_000.0),
        'm' => Some(1_000_000.0),
        'k' => Some(1_000.0),
        _ => None,
    }
}
