use thiserror::Error;

/// Money is represented as integer cents to avoid floating-point precision issues.
/// 1 unit = 100 cents, so $1.50 = 150 cents. Balances and prices are never negative.
pub type Cents = u64;

/// Format cents as a human-readable amount.
/// Example: 150 -> "1.50", 5 -> "0.05"
pub fn format_cents(cents: Cents) -> String {
    format!("{}.{:02}", cents / 100, cents % 100)
}

/// Parse a decimal string into cents.
/// Example: "1.50" -> 150, "1.5" -> 150, "2" -> 200, "$5.00" -> 500
pub fn parse_cents(input: &str) -> Result<Cents, ParseCentsError> {
    let input = input.trim();
    if input.starts_with('-') {
        return Err(ParseCentsError::Negative);
    }
    let input = input.trim_start_matches('$');

    let (units_str, decimal_str) = match input.split_once('.') {
        Some((units, decimal)) => (units, decimal),
        None => (input, ""),
    };
    if decimal_str.contains('.') || (units_str.is_empty() && decimal_str.is_empty()) {
        return Err(ParseCentsError::InvalidFormat);
    }
    if !units_str.chars().all(|c| c.is_ascii_digit())
        || !decimal_str.chars().all(|c| c.is_ascii_digit())
    {
        return Err(ParseCentsError::InvalidFormat);
    }

    let units: u64 = if units_str.is_empty() {
        0
    } else {
        units_str
            .parse()
            .map_err(|_| ParseCentsError::InvalidFormat)?
    };

    // Pad or truncate the fraction to exactly two digits
    let decimal_cents: u64 = match decimal_str.len() {
        0 => 0,
        1 => decimal_str
            .parse::<u64>()
            .map_err(|_| ParseCentsError::InvalidFormat)?
            * 10,
        _ => decimal_str[..2]
            .parse()
            .map_err(|_| ParseCentsError::InvalidFormat)?,
    };

    units
        .checked_mul(100)
        .and_then(|cents| cents.checked_add(decimal_cents))
        .ok_or(ParseCentsError::InvalidFormat)
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseCentsError {
    #[error("invalid money format")]
    InvalidFormat,

    #[error("amount cannot be negative")]
    Negative,
}
