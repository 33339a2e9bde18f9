#![allow(clippy::unwrap_used)]

use super::*;

// ── parse_amount ──────────────────────────────────────────────

#[test]
fn test_parse_whole_dollars() {
    assert_eq!(parse_amount("12").unwrap(), 1200);
}

#[test]
fn test_parse_one_decimal_pads_to_cents() {
    assert_eq!(parse_amount("12.3").unwrap(), 1230);
}

#[test]
fn test_parse_two_decimals() {
    assert_eq!(parse_amount("12.34").unwrap(), 1234);
}

#[test]
fn test_parse_smallest_amount() {
    assert_eq!(parse_amount("0.01").unwrap(), 1);
}

#[test]
fn test_parse_trims_whitespace() {
    assert_eq!(parse_amount("  7.50  ").unwrap(), 750);
}

#[test]
fn test_parse_large_amount() {
    assert_eq!(parse_amount("1000000").unwrap(), 100_000_000);
}

#[test]
fn test_parse_empty_is_required() {
    assert_eq!(parse_amount("").unwrap_err(), ValidationError::AmountRequired);
    assert_eq!(parse_amount("   ").unwrap_err(), ValidationError::AmountRequired);
}

#[test]
fn test_parse_rejects_bad_format() {
    for input in ["abc", "-5", "12.345", "$5", "1,000", "12.", ".5", "1.2.3", "1e3"] {
        assert_eq!(
            parse_amount(input).unwrap_err(),
            ValidationError::AmountFormat,
            "input: {input}"
        );
    }
}

#[test]
fn test_parse_rejects_zero() {
    assert_eq!(parse_amount("0").unwrap_err(), ValidationError::AmountNotPositive);
    assert_eq!(parse_amount("0.00").unwrap_err(), ValidationError::AmountNotPositive);
    assert_eq!(parse_amount("000").unwrap_err(), ValidationError::AmountNotPositive);
}

#[test]
fn test_parse_rejects_overflow() {
    let huge = "9".repeat(30);
    assert_eq!(
        parse_amount(&huge).unwrap_err(),
        ValidationError::AmountNotPositive
    );
}

// ── format_money ──────────────────────────────────────────────

#[test]
fn test_format_basic() {
    assert_eq!(format_money(1234), "$12.34");
}

#[test]
fn test_format_zero() {
    assert_eq!(format_money(0), "$0.00");
}

#[test]
fn test_format_sub_dollar() {
    assert_eq!(format_money(5), "$0.05");
}

#[test]
fn test_format_thousand_separators() {
    assert_eq!(format_money(123_456_789), "$1,234,567.89");
    assert_eq!(format_money(100_000), "$1,000.00");
}

#[test]
fn test_format_negative() {
    assert_eq!(format_money(-1234), "-$12.34");
}

// ── round trip ────────────────────────────────────────────────

#[test]
fn test_parse_then_format_round_trip() {
    let cases = [
        ("12", "$12.00"),
        ("12.3", "$12.30"),
        ("12.34", "$12.34"),
        ("1234.5", "$1,234.50"),
        ("0.99", "$0.99"),
        ("5", "$5.00"),
    ];
    for (input, rendered) in cases {
        assert_eq!(format_money(parse_amount(input).unwrap()), rendered);
    }
}
