use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;

static SIGNED_AMOUNT: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[+-]?[0-9]+(\.[0-9]+)?$").expect("valid regex"));
static UNSIGNED_RATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[0-9]+(\.[0-9]+)?$").expect("valid regex"));

pub fn check_amount(content: &str) -> Result<(), &'static str> {
    if content.is_empty() {
        return Err("Empty amount");
    }
    check_amount_opt(content)
}

pub fn check_amount_opt(content: &str) -> Result<(), &'static str> {
    if content.is_empty() || SIGNED_AMOUNT.is_match(content) {
        Ok(())
    } else {
        Err("Expected an optionally signed decimal number")
    }
}

pub fn check_exchange_rate_opt(content: &str) -> Result<(), &'static str> {
    if content.is_empty() || UNSIGNED_RATE.is_match(content) {
        Ok(())
    } else {
        Err("Expected an unsigned decimal number")
    }
}

/// The amount as written in the export, without surrounding whitespace and a leading `+`.
pub fn amount_literal(content: &str) -> &str {
    let content = content.trim();
    content.strip_prefix('+').unwrap_or(content)
}

/// Parses the amount exactly as written, keeping its scale (`0.80` stays `0.80`).
pub fn parse_amount(content: &str) -> Result<Decimal, rust_decimal::Error> {
    let amount = Decimal::from_str_exact(amount_literal(content))?;
    Ok(without_negative_zero(amount))
}

/// Negation that never produces `-0`.
pub fn negate(amount: Decimal) -> Decimal {
    without_negative_zero(-amount)
}

fn without_negative_zero(amount: Decimal) -> Decimal {
    if amount.is_zero() {
        amount.abs()
    } else {
        amount
    }
}
