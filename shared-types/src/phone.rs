use regex::Regex;
use std::sync::OnceLock;

/// Country code prepended to bare 10-digit numbers on export.
pub const NANP_COUNTRY_CODE: &str = "+1";

fn ten_digits() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    // `\d` is Unicode-aware in the regex crate, so spell out the ASCII range.
    PATTERN.get_or_init(|| Regex::new(r"^[0-9]{10}$").expect("static phone pattern"))
}

/// True when `raw` is exactly ten ASCII digits.
pub fn is_ten_digit(raw: &str) -> bool {
    ten_digits().is_match(raw)
}

/// Formats a phone number for display.
///
/// Ten-digit values become `(XXX) XXX-XXXX`; anything else (international,
/// punctuated, empty) is returned unchanged.
pub fn format_display(raw: &str) -> String {
    if is_ten_digit(raw) {
        format!("({}) {}-{}", &raw[0..3], &raw[3..6], &raw[6..10])
    } else {
        raw.to_string()
    }
}

/// Builds the `tel` value handed to an exporter.
pub fn to_tel(raw: &str) -> String {
    if is_ten_digit(raw) {
        format!("{NANP_COUNTRY_CODE}{raw}")
    } else {
        raw.to_string()
    }
}
