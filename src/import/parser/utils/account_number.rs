use once_cell::sync::Lazy;
use regex::Regex;

const MAX_LEN: usize = 34;

static IBAN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)^[A-Z]{2}[0-9]{2}[A-Z0-9]{4,}$").expect("valid regex"));
static BBAN: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^P?[0-9]+$").expect("valid regex"));

/// IBAN or domestic account number. Only the shape is checked, not the checksum.
pub fn check_account_number_opt(content: &str) -> Result<(), &'static str> {
    if content.is_empty() {
        return Ok(());
    }
    if content.len() > MAX_LEN {
        return Err("Account number is longer than 34 characters");
    }
    if IBAN.is_match(content) || BBAN.is_match(content) {
        Ok(())
    } else {
        Err("Expected an IBAN or BBAN account number")
    }
}
