use portal_analytics::{
    currency::{format_currency_value, CurrencyCode, LocaleConfig, DEFAULT_LOCALE_TAG},
    format_currency,
};

#[test]
fn fifteen_thousand_rupees() {
    assert_eq!(format_currency(15000.0, "en-IN"), "₹15,000");
}

#[test]
fn indian_grouping_for_lakhs() {
    assert_eq!(format_currency(250000.0, "en-IN"), "₹2,50,000");
    assert_eq!(format_currency(12345678.0, "INR"), "₹1,23,45,678");
}

#[test]
fn fractional_amounts_round_to_whole_units() {
    assert_eq!(format_currency(1499.5, "en-IN"), "₹1,500");
    assert_eq!(format_currency(1499.49, "en-IN"), "₹1,499");
    assert_eq!(format_currency(0.4, "en-IN"), "₹0");
}

#[test]
fn other_locales_use_their_own_conventions() {
    assert_eq!(format_currency(15000.0, "en-US"), "$15,000");
    assert_eq!(format_currency(1234567.0, "en-GB"), "£1,234,567");
    assert_eq!(format_currency(15000.0, "de-DE"), "15.000 €");
    assert_eq!(format_currency(15000.0, "fr-FR"), "15 000 €");
    assert_eq!(format_currency(15000.0, "JPY"), "¥15,000");
}

#[test]
fn unknown_tag_falls_back_to_default_locale() {
    assert_eq!(format_currency(15000.0, "tlh-KX"), format_currency(15000.0, DEFAULT_LOCALE_TAG));
}

#[test]
fn non_finite_and_negative_amounts_do_not_panic() {
    assert_eq!(format_currency(f64::NAN, "en-IN"), "₹0");
    assert_eq!(format_currency(f64::INFINITY, "en-US"), "$0");
    assert_eq!(format_currency(-2500.0, "en-IN"), "-₹2,500");
}

#[test]
fn formatting_is_repeatable() {
    let first = format_currency(98765.4321, "en-IN");
    let second = format_currency(98765.4321, "en-IN");
    assert_eq!(first, second);
    assert_eq!(first, "₹98,765");
}

#[test]
fn custom_locale_config() {
    let mut locale = LocaleConfig::default();
    locale.currency = CurrencyCode::new("chf");
    locale.grouping_separator = '\'';
    locale.grouping = portal_analytics::currency::GroupingStyle::Thousands;
    assert_eq!(format_currency_value(1234567.0, &locale), "CHF1'234'567");
}
