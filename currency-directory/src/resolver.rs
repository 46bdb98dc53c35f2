//! Place-name to currency resolution.

use crate::{CurrencyCode, entries};

/// Currency returned when a place name matches nothing in the directory.
pub const FALLBACK_CURRENCY: CurrencyCode = CurrencyCode::VND;

/// Resolves a free-text place name (usually a reverse-geocoded country) to a
/// currency code.
///
/// Matching runs in order and the first hit wins:
/// 1. exact country name
/// 2. case-insensitive country name
/// 3. substring in either direction, case-insensitive, in directory order
///    (so "United States of America" resolves through "United States")
/// 4. [`FALLBACK_CURRENCY`]
///
/// Never fails; callers always get something displayable.
pub fn resolve_currency(place_name: &str) -> CurrencyCode {
    if let Some(e) = entries().iter().find(|e| e.country_name == place_name) {
        return e.currency_code;
    }

    let needle = place_name.trim().to_lowercase();
    // An empty needle is contained in every name.
    if needle.is_empty() {
        return FALLBACK_CURRENCY;
    }

    if let Some(e) = entries()
        .iter()
        .find(|e| e.country_name.to_lowercase() == needle)
    {
        return e.currency_code;
    }

    entries()
        .iter()
        .find(|e| {
            let name = e.country_name.to_lowercase();
            needle.contains(&name) || name.contains(&needle)
        })
        .map(|e| e.currency_code)
        .unwrap_or(FALLBACK_CURRENCY)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_names_resolve() {
        for e in entries() {
            assert_eq!(resolve_currency(e.country_name), e.currency_code);
        }
    }

    #[test]
    fn test_case_insensitive_names_resolve() {
        for e in entries() {
            assert_eq!(
                resolve_currency(&e.country_name.to_uppercase()),
                e.currency_code,
                "{}",
                e.country_name
            );
            assert_eq!(
                resolve_currency(&e.country_name.to_lowercase()),
                e.currency_code,
                "{}",
                e.country_name
            );
        }
    }

    #[test]
    fn test_longer_name_contains_directory_key() {
        assert_eq!(
            resolve_currency("United States of America"),
            CurrencyCode::USD
        );
        assert_eq!(resolve_currency("Kingdom of Spain"), CurrencyCode::EUR);
    }

    #[test]
    fn test_directory_key_contains_shorter_name() {
        assert_eq!(resolve_currency("Zealand"), CurrencyCode::NZD);
        assert_eq!(resolve_currency("arab emirates"), CurrencyCode::AED);
    }

    #[test]
    fn test_substring_match_uses_directory_order() {
        // "United" is part of both "United States" and "United Kingdom";
        // "United States" comes first.
        assert_eq!(resolve_currency("United"), CurrencyCode::USD);
    }

    #[test]
    fn test_unknown_place_falls_back() {
        assert_eq!(resolve_currency("Atlantis"), FALLBACK_CURRENCY);
        assert_eq!(resolve_currency("Atlantis"), CurrencyCode::VND);
    }

    #[test]
    fn test_blank_place_falls_back() {
        assert_eq!(resolve_currency(""), FALLBACK_CURRENCY);
        assert_eq!(resolve_currency("   "), FALLBACK_CURRENCY);
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        assert_eq!(resolve_currency("  Japan "), CurrencyCode::JPY);
    }
}
