//! String transforms applied to CSV fields before they end up in a journal.
//!
//! All functions are total. Blank input is returned unchanged.

use once_cell::sync::Lazy;
use regex::Regex;

static DATE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("valid regex"));
static NEWLINE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\r?\n").expect("valid regex"));
static SPECIAL_CHARS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[;|\[\]]").expect("valid regex"));
static WHITESPACE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid regex"));

fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// `2018-09-20` -> `2018/09/20`. Anything not shaped like that is returned as is.
pub fn reformat_date(s: &str) -> String {
    if is_blank(s) {
        return s.to_string();
    }
    DATE.replace(s, "$1/$2/$3").into_owned()
}

pub fn collapse_newlines(s: &str) -> String {
    if is_blank(s) {
        return s.to_string();
    }
    NEWLINE.replace_all(s, " => ").into_owned()
}

/// `;`, `|`, `[` and `]` are delimiters in journal header lines.
pub fn strip_special_chars(s: &str) -> String {
    if is_blank(s) {
        return s.to_string();
    }
    SPECIAL_CHARS.replace_all(s, " ").into_owned()
}

pub fn squeeze(s: &str) -> String {
    if is_blank(s) {
        return s.to_string();
    }
    WHITESPACE.replace_all(s.trim(), " ").into_owned()
}

/// Normalization for free text like payee and description. Case is preserved.
pub fn soft_format(s: &str) -> String {
    squeeze(&strip_special_chars(&collapse_newlines(s)))
}

/// Normalization for fields that become part of an account name.
pub fn format(s: &str) -> String {
    squeeze(&strip_special_chars(&collapse_newlines(s)).to_lowercase())
}
