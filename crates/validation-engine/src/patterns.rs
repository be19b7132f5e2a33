//! Shared regexes, keyword lists and value parsing for the rule battery.

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    /// `local@domain.tld` shape; no attempt at full RFC 5322.
    pub static ref EMAIL_RE: Regex = Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();

    /// Brazilian landline/mobile with optional `(DD)` area code.
    pub static ref PHONE_RE: Regex = Regex::new(r"^(\(?\d{2}\)?\s?)?\d{4,5}-?\d{4}$").unwrap();

    /// 5+3 digit postal code.
    pub static ref CEP_RE: Regex = Regex::new(r"^\d{5}-?\d{3}$").unwrap();

    /// `R$` prefixed grouped decimal (Brazilian convention).
    pub static ref CURRENCY_RE: Regex =
        Regex::new(r"^R\$\s*\d{1,3}(?:\.\d{3})*(?:,\d{2})?$").unwrap();
}

/// Keywords whose presence marks a structurally complete contract.
/// Matched as case-insensitive substrings of the aggregated text.
pub const STRUCTURE_KEYWORDS: &[&str] =
    &["assinatura", "testemunha", "clausula", "termo", "acordo"];

/// Minimum number of structure keywords a complete contract contains.
pub const STRUCTURE_KEYWORD_MINIMUM: usize = 3;

/// Parse a Brazilian-formatted monetary amount (`R$ 1.234,56`).
///
/// Strips everything except digits and the comma, then treats the comma
/// as the decimal separator. Returns `None` for values that still fail
/// to parse; callers surface that as a format finding rather than
/// dropping the field.
pub fn parse_currency(value: &str) -> Option<f64> {
    let cleaned: String = value
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned.replace(',', ".").parse::<f64>().ok()
}
