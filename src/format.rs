//! Number formatting shared by the summary panel and the table.

use num_format::{Locale, ToFormattedString};

/// Map a user-provided locale tag to a `num_format::Locale`.
///
/// Supported tags (case-insensitive): `en`, `us`, `en_US`, `de`, `de_DE`, `german`,
/// `fr`, `es`, `it`, `pt`, `nl`. Defaults to English.
pub fn map_locale(tag: &str) -> &'static Locale {
    match tag.to_lowercase().as_str() {
        "de" | "de_de" | "german" => &Locale::de,
        "fr" | "fr_fr" => &Locale::fr,
        "es" | "es_es" => &Locale::es,
        "it" | "it_it" => &Locale::it,
        "pt" | "pt_pt" | "pt_br" => &Locale::pt,
        "nl" | "nl_nl" => &Locale::nl,
        _ => &Locale::en,
    }
}

/// Whole number with thousands separators (`1234567.5` -> `"1,234,568"`).
///
/// Ties round to even. Non-finite values print as `NA`.
pub fn thousands(value: f64, locale: &Locale) -> String {
    if !value.is_finite() {
        return "NA".to_string();
    }
    let n = value.round_ties_even() as i64;
    n.to_formatted_string(locale)
}

/// [`thousands`] with the English locale.
pub fn thousands_en(value: f64) -> String {
    thousands(value, &Locale::en)
}
