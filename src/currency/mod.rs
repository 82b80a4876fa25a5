//! Locale-aware presentation of fee amounts and dates.
//!
//! Amounts are taken to be in the display currency's major unit already; no
//! minor-unit conversion happens here.

use std::collections::HashMap;

use chrono::{Datelike, NaiveDate};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Locale used when a tag is not recognized.
pub const DEFAULT_LOCALE_TAG: &str = "en-IN";

/// ISO 4217 currency representation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct CurrencyCode(pub String);

impl CurrencyCode {
    pub fn new(code: impl Into<String>) -> Self {
        Self(code.into().to_uppercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn symbol(&self) -> String {
        symbol_for(self.as_str())
    }
}

impl Default for CurrencyCode {
    fn default() -> Self {
        Self::new("INR")
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GroupingStyle {
    /// 1,234,567
    Thousands,
    /// 12,34,567
    Indian,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SymbolPosition {
    Prefix,
    Suffix,
}

/// Locale-aware formatting preferences.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LocaleConfig {
    pub language_tag: String,
    pub currency: CurrencyCode,
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub grouping: GroupingStyle,
    pub symbol_position: SymbolPosition,
}

impl LocaleConfig {
    fn new(
        tag: &str,
        currency: &str,
        separators: (char, char),
        grouping: GroupingStyle,
        symbol_position: SymbolPosition,
    ) -> Self {
        Self {
            language_tag: tag.into(),
            currency: CurrencyCode::new(currency),
            decimal_separator: separators.0,
            grouping_separator: separators.1,
            grouping,
            symbol_position,
        }
    }

    /// Looks up a locale tag (`en-IN`) or a currency code (`INR`).
    pub fn lookup(tag: &str) -> Option<LocaleConfig> {
        let key = tag.trim().replace('_', "-").to_ascii_lowercase();
        LOCALES
            .get(key.as_str())
            .or_else(|| {
                CURRENCY_LOCALES
                    .get(key.to_ascii_uppercase().as_str())
                    .and_then(|locale| LOCALES.get(locale))
            })
            .cloned()
    }

    /// Like [`LocaleConfig::lookup`], falling back to the default locale.
    pub fn for_tag(tag: &str) -> LocaleConfig {
        Self::lookup(tag).unwrap_or_else(|| {
            tracing::debug!(tag, fallback = DEFAULT_LOCALE_TAG, "unknown locale tag");
            LocaleConfig::default()
        })
    }
}

impl Default for LocaleConfig {
    fn default() -> Self {
        LOCALES
            .get("en-in")
            .cloned()
            .unwrap_or_else(|| indian_locale(DEFAULT_LOCALE_TAG))
    }
}

fn indian_locale(tag: &str) -> LocaleConfig {
    LocaleConfig::new(
        tag,
        "INR",
        ('.', ','),
        GroupingStyle::Indian,
        SymbolPosition::Prefix,
    )
}

static LOCALES: Lazy<HashMap<&'static str, LocaleConfig>> = Lazy::new(|| {
    use GroupingStyle::*;
    use SymbolPosition::*;

    HashMap::from([
        ("en-in", indian_locale("en-IN")),
        ("hi-in", indian_locale("hi-IN")),
        (
            "en-us",
            LocaleConfig::new("en-US", "USD", ('.', ','), Thousands, Prefix),
        ),
        (
            "en-gb",
            LocaleConfig::new("en-GB", "GBP", ('.', ','), Thousands, Prefix),
        ),
        (
            "de-de",
            LocaleConfig::new("de-DE", "EUR", (',', '.'), Thousands, Suffix),
        ),
        (
            "fr-fr",
            LocaleConfig::new("fr-FR", "EUR", (',', ' '), Thousands, Suffix),
        ),
        (
            "ja-jp",
            LocaleConfig::new("ja-JP", "JPY", ('.', ','), Thousands, Prefix),
        ),
    ])
});

static CURRENCY_LOCALES: Lazy<HashMap<&'static str, &'static str>> = Lazy::new(|| {
    HashMap::from([
        ("INR", "en-in"),
        ("USD", "en-us"),
        ("GBP", "en-gb"),
        ("EUR", "de-de"),
        ("JPY", "ja-jp"),
    ])
});

pub fn symbol_for(code: &str) -> String {
    match code {
        "INR" => "₹".into(),
        "USD" => "$".into(),
        "EUR" => "€".into(),
        "GBP" => "£".into(),
        "JPY" => "¥".into(),
        _ => code.into(),
    }
}

/// Formats `amount` for `tag` with zero fractional digits.
///
/// `tag` may be a locale tag or a currency code. Rounding is half away from
/// zero; non-finite input renders as zero.
pub fn format_currency(amount: f64, tag: &str) -> String {
    format_currency_value(amount, &LocaleConfig::for_tag(tag))
}

pub fn format_currency_value(amount: f64, locale: &LocaleConfig) -> String {
    let rounded = if amount.is_finite() {
        amount.round()
    } else {
        tracing::warn!(amount, "non-finite amount rendered as zero");
        0.0
    };
    let body = format_number(locale, rounded.abs(), 0);
    let sign = if rounded < 0.0 { "-" } else { "" };
    let symbol = locale.currency.symbol();
    match locale.symbol_position {
        SymbolPosition::Prefix => format!("{}{}{}", sign, symbol, body),
        SymbolPosition::Suffix => format!("{}{} {}", sign, body, symbol),
    }
}

pub fn format_number(locale: &LocaleConfig, value: f64, precision: u8) -> String {
    let rendered = format!("{:.*}", precision as usize, value);
    let (sign, unsigned) = match rendered.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", rendered.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (unsigned, None),
    };
    let grouped = match locale.grouping {
        GroupingStyle::Thousands => group_digits(int_part, locale.grouping_separator, 3, 3),
        GroupingStyle::Indian => group_digits(int_part, locale.grouping_separator, 3, 2),
    };
    match frac_part {
        Some(frac) => format!("{}{}{}{}", sign, grouped, locale.decimal_separator, frac),
        None => format!("{}{}", sign, grouped),
    }
}

/// Inserts `separator` after the first `first` digits from the right, then
/// after every `rest` digits.
fn group_digits(digits: &str, separator: char, first: usize, rest: usize) -> String {
    let chars: Vec<char> = digits.chars().collect();
    if chars.len() <= first {
        return digits.to_string();
    }
    let (head, tail) = chars.split_at(chars.len() - first);
    let mut groups: Vec<String> = vec![tail.iter().collect()];
    let mut remaining = head;
    while !remaining.is_empty() {
        let cut = remaining.len().saturating_sub(rest);
        groups.push(remaining[cut..].iter().collect());
        remaining = &remaining[..cut];
    }
    groups.reverse();
    groups.join(&separator.to_string())
}

/// `DD Mon YYYY`, as shown on record lists.
pub fn format_date(date: NaiveDate) -> String {
    format!(
        "{:02} {} {}",
        date.day(),
        month_label(date.month()),
        date.year()
    )
}

fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_indian_style() {
        let locale = LocaleConfig::default();
        assert_eq!(format_number(&locale, 999.0, 0), "999");
        assert_eq!(format_number(&locale, 1000.0, 0), "1,000");
        assert_eq!(format_number(&locale, 150000.0, 0), "1,50,000");
        assert_eq!(format_number(&locale, 12345678.0, 0), "1,23,45,678");
    }

    #[test]
    fn groups_thousands_with_fraction() {
        let locale = LocaleConfig::for_tag("de-DE");
        assert_eq!(format_number(&locale, 1234567.891, 2), "1.234.567,89");
        assert_eq!(format_number(&locale, -1234.5, 1), "-1.234,5");
    }

    #[test]
    fn lookup_accepts_currency_codes_and_underscores() {
        assert_eq!(LocaleConfig::lookup("usd").unwrap().language_tag, "en-US");
        assert_eq!(LocaleConfig::lookup("en_GB").unwrap().language_tag, "en-GB");
        assert!(LocaleConfig::lookup("xx-YY").is_none());
    }

    #[test]
    fn formats_dates_for_lists() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 4).unwrap();
        assert_eq!(format_date(date), "04 Mar 2025");
    }
}
