//! Input normalisation helpers shared by the application services
//!
//! Postal codes (CEP), state codes (UF) and money amounts arrive as free text.

use std::str::FromStr;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use super::errors::{DomainError, DomainResult};

/// Keep only ASCII digits
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// CEP with formatting (dots, dashes, spaces) removed
pub fn normalize_postal_code(raw: &str) -> String {
    digits_only(raw)
}

/// Normalise a CEP and require exactly 8 digits
pub fn parse_postal_code(raw: &str) -> DomainResult<String> {
    let cep = normalize_postal_code(raw);
    if cep.len() != 8 {
        return Err(DomainError::Validation(
            "Invalid postal code: expected 8 digits".into(),
        ));
    }
    Ok(cep)
}

/// Two-letter state code, uppercased
pub fn parse_state_code(raw: &str) -> DomainResult<String> {
    let uf = raw.trim().to_uppercase();
    if uf.len() != 2 || !uf.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(DomainError::Validation(format!(
            "Invalid state code '{}': expected two letters",
            raw.trim()
        )));
    }
    Ok(uf)
}

/// Parse a decimal number written with either `.` or `,` as separator
pub fn parse_decimal(raw: &str) -> Option<f64> {
    let normalized = raw.trim().replace(',', ".");
    if normalized.is_empty() {
        return None;
    }
    normalized.parse::<f64>().ok().filter(|n| n.is_finite())
}

/// Parse a money amount into integer cents.
///
/// With a comma present the text is read in Brazilian notation (`1.234,56`);
/// otherwise `.` is the decimal separator (`1234.56`). Half cents round away
/// from zero. The amount must be positive.
pub fn parse_money_cents(raw: &str) -> DomainResult<i64> {
    let trimmed = raw.trim();
    let normalized = if trimmed.contains(',') {
        trimmed.replace('.', "").replace(',', ".")
    } else {
        trimmed.to_string()
    };

    let invalid = || DomainError::Validation(format!("Invalid money amount '{}'", trimmed));

    let amount = Decimal::from_str(&normalized).map_err(|_| invalid())?;
    let cents = amount
        .checked_mul(Decimal::ONE_HUNDRED)
        .ok_or_else(invalid)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(invalid)?;

    if cents <= 0 {
        return Err(DomainError::Validation(
            "Money amount must be greater than zero".into(),
        ));
    }
    Ok(cents)
}

/// Cents rendered as a plain decimal amount (`15050` -> `"150.50"`)
pub fn format_cents(cents: i64) -> String {
    Decimal::new(cents, 2).to_string()
}

/// Optional positive measure (weight, dimension, volume)
pub fn check_positive(value: Option<f64>, label: &str) -> DomainResult<()> {
    match value {
        Some(v) if !v.is_finite() || v <= 0.0 => Err(DomainError::Validation(format!(
            "Invalid {}: must be greater than zero",
            label
        ))),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn postal_code_strips_formatting() {
        assert_eq!(normalize_postal_code("01310-100"), "01310100");
        assert_eq!(normalize_postal_code(" 20.040-020 "), "20040020");
        assert_eq!(parse_postal_code("01310-100").unwrap(), "01310100");
    }

    #[test]
    fn postal_code_requires_eight_digits() {
        assert!(parse_postal_code("1310-100").is_err());
        assert!(parse_postal_code("013101000").is_err());
        assert!(parse_postal_code("abc").is_err());
    }

    #[test]
    fn state_code_is_uppercased() {
        assert_eq!(parse_state_code(" sp ").unwrap(), "SP");
        assert!(parse_state_code("S").is_err());
        assert!(parse_state_code("S1").is_err());
        assert!(parse_state_code("SPX").is_err());
    }

    #[test]
    fn decimal_accepts_comma() {
        assert_eq!(parse_decimal("10"), Some(10.0));
        assert_eq!(parse_decimal("10,5"), Some(10.5));
        assert_eq!(parse_decimal("10.5"), Some(10.5));
        assert_eq!(parse_decimal(""), None);
        assert_eq!(parse_decimal("dez"), None);
    }

    #[test]
    fn money_in_brazilian_notation() {
        assert_eq!(parse_money_cents("1.234,56").unwrap(), 123_456);
        assert_eq!(parse_money_cents("99,9").unwrap(), 9_990);
        assert_eq!(parse_money_cents("1234,5").unwrap(), 123_450);
    }

    #[test]
    fn money_with_dot_decimal() {
        assert_eq!(parse_money_cents("1234.56").unwrap(), 123_456);
        assert_eq!(parse_money_cents("150").unwrap(), 15_000);
    }

    #[test]
    fn money_rounds_half_cents_away_from_zero() {
        assert_eq!(parse_money_cents("10,005").unwrap(), 1_001);
        assert_eq!(parse_money_cents("10.004").unwrap(), 1_000);
    }

    #[test]
    fn money_rejects_zero_negative_and_garbage() {
        assert!(parse_money_cents("0").is_err());
        assert!(parse_money_cents("-5,00").is_err());
        assert!(parse_money_cents("").is_err());
        assert!(parse_money_cents("R$ 10").is_err());
    }

    #[test]
    fn money_too_large_is_a_validation_error() {
        let err = parse_money_cents("1000000000000000000000000000").unwrap_err();
        assert!(matches!(err, DomainError::Validation(_)));
        assert!(parse_money_cents("99999999999999999999,99").is_err());
    }

    #[test]
    fn cents_render_with_two_places() {
        assert_eq!(format_cents(15_050), "150.50");
        assert_eq!(format_cents(7), "0.07");
        assert_eq!(format_cents(100_000), "1000.00");
    }

    #[test]
    fn positive_measures() {
        assert!(check_positive(None, "width").is_ok());
        assert!(check_positive(Some(1.5), "width").is_ok());
        assert!(check_positive(Some(0.0), "width").is_err());
        assert!(check_positive(Some(f64::NAN), "width").is_err());
    }
}
