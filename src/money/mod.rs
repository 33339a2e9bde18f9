use regex::Regex;
use std::sync::LazyLock;

use crate::error::ValidationError;

// Digits, then optionally a dot and 1-2 fractional digits. No signs,
// thousands separators, or currency symbols.
#[allow(clippy::unwrap_used)]
static AMOUNT_PATTERN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").unwrap());

/// Parse a user-entered dollar amount into integer cents.
/// "12" → 1200, "12.3" → 1230, "12.34" → 1234.
pub(crate) fn parse_amount(input: &str) -> Result<i64, ValidationError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::AmountRequired);
    }
    if !AMOUNT_PATTERN.is_match(trimmed) {
        return Err(ValidationError::AmountFormat);
    }

    let (whole, frac) = match trimmed.split_once('.') {
        Some((whole, frac)) => (whole, frac),
        None => (trimmed, ""),
    };

    let cents = whole
        .parse::<i64>()
        .ok()
        .and_then(|dollars| dollars.checked_mul(100))
        .and_then(|dollar_cents| {
            // "12.3" means 30 cents, so pad the fraction out to 2 digits.
            let frac_cents = format!("{frac:0<2}").parse::<i64>().ok()?;
            dollar_cents.checked_add(frac_cents)
        })
        .ok_or(ValidationError::AmountNotPositive)?;

    if cents <= 0 {
        return Err(ValidationError::AmountNotPositive);
    }
    Ok(cents)
}

/// Format integer cents as USD with thousand separators and 2 decimal
/// places. e.g. `123456789` → `"$1,234,567.89"`
pub(crate) fn format_money(cents: i64) -> String {
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();
    let remainder = abs % 100;

    let with_commas: String = dollars
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    if cents < 0 {
        format!("-${with_commas}.{remainder:02}")
    } else {
        format!("${with_commas}.{remainder:02}")
    }
}

#[cfg(test)]
mod tests;
