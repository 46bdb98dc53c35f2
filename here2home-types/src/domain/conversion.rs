//! Conversion requests, results and display formatting.

use std::fmt;

use serde::{Deserialize, Serialize};

use currency_directory::CurrencyCode;

/// Largest amount accepted from user input, in major units.
pub const MAX_INPUT_AMOUNT: f64 = 1_000_000_000_000.0;

// 2^63; every f64 below it converts to i64 without saturating.
const MINOR_UNITS_LIMIT: f64 = i64::MAX as f64;

/// One conversion: a positive amount and the two currencies.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ConversionRequest {
    pub amount: f64,
    pub source: CurrencyCode,
    pub target: CurrencyCode,
}

/// A converted value rounded to cents.
///
/// Amount is stored in hundredths of the currency unit so the displayed total
/// is fixed once rounding has happened. Rounding is half away from zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertedAmount {
    minor_units: i64,
    currency: CurrencyCode,
}

impl ConvertedAmount {
    /// Rounds a major-unit value to 2 decimal places.
    ///
    /// Returns `None` when the value is not finite or its hundredths do not
    /// fit in an `i64`.
    pub fn from_major(value: f64, currency: CurrencyCode) -> Option<Self> {
        let minor = (value * 100.0).round();
        if !minor.is_finite() || minor.abs() >= MINOR_UNITS_LIMIT {
            return None;
        }
        Some(Self {
            minor_units: minor as i64,
            currency,
        })
    }

    /// Returns the amount in hundredths.
    pub fn minor_units(&self) -> i64 {
        self.minor_units
    }

    pub fn currency(&self) -> CurrencyCode {
        self.currency
    }

    /// Returns the rounded amount as a number.
    pub fn value(&self) -> f64 {
        self.minor_units as f64 / 100.0
    }
}

impl fmt::Display for ConvertedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let abs = self.minor_units.unsigned_abs();
        let sign = if self.minor_units < 0 { "-" } else { "" };
        let symbol = self.currency.symbol();
        // Letter symbols ("kr", "CHF") need a gap before the digits.
        let gap = if symbol.chars().last().is_some_and(char::is_alphabetic) {
            " "
        } else {
            ""
        };
        write!(
            f,
            "{}{}{}{}.{:02}",
            sign,
            symbol,
            gap,
            group_thousands(abs / 100),
            abs % 100
        )
    }
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Result of converting user input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionOutcome {
    Converted(ConvertedAmount),
    /// Nothing usable was typed; the shell shows its placeholder.
    NoInput,
}

/// Parses an amount typed by the user.
///
/// Returns `None` for empty, non-numeric or non-positive input, and for
/// anything above [`MAX_INPUT_AMOUNT`]. Comma thousands separators are
/// accepted ("1,250.50").
pub fn parse_amount(input: &str) -> Option<f64> {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    if cleaned.is_empty() {
        return None;
    }
    cleaned
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0 && *v <= MAX_INPUT_AMOUNT)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn amount(value: f64, currency: CurrencyCode) -> ConvertedAmount {
        ConvertedAmount::from_major(value, currency).unwrap()
    }

    #[test]
    fn test_rounds_half_away_from_zero() {
        // 10.125 is exact in binary, so this is a true midpoint.
        assert_eq!(amount(10.125, CurrencyCode::USD).minor_units(), 1013);
        assert_eq!(amount(10.124, CurrencyCode::USD).minor_units(), 1012);
    }

    #[test]
    fn test_display_with_symbol_and_grouping() {
        let vnd = amount(240000.0, CurrencyCode::VND);
        assert_eq!(vnd.to_string(), "₫240,000.00");

        let usd = amount(10.5, CurrencyCode::USD);
        assert_eq!(usd.to_string(), "$10.50");

        let big = amount(1234567.891, CurrencyCode::AUD);
        assert_eq!(big.to_string(), "A$1,234,567.89");
    }

    #[test]
    fn test_display_letter_symbol_gets_space() {
        let chf = amount(99.0, CurrencyCode::CHF);
        assert_eq!(chf.to_string(), "CHF 99.00");
        let sek = amount(0.05, CurrencyCode::SEK);
        assert_eq!(sek.to_string(), "kr 0.05");
    }

    #[test]
    fn test_value_is_rounded() {
        let rounded = amount(3.14159, CurrencyCode::EUR);
        assert_eq!(rounded.value(), 3.14);
    }

    #[test]
    fn test_group_thousands() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1,000");
        assert_eq!(group_thousands(1234567), "1,234,567");
    }

    #[test]
    fn test_parse_amount() {
        assert_eq!(parse_amount("100"), Some(100.0));
        assert_eq!(parse_amount(" 1,250.50 "), Some(1250.5));
        assert_eq!(parse_amount(""), None);
        assert_eq!(parse_amount("   "), None);
        assert_eq!(parse_amount("abc"), None);
        assert_eq!(parse_amount("0"), None);
        assert_eq!(parse_amount("-5"), None);
        assert_eq!(parse_amount("inf"), None);
        assert_eq!(parse_amount("NaN"), None);
        assert_eq!(parse_amount("1,000,000,000,000"), Some(MAX_INPUT_AMOUNT));
        assert_eq!(parse_amount("1,000,000,000,000.01"), None);
        assert_eq!(parse_amount("1e13"), None);
    }

    #[test]
    fn test_values_too_large_for_cents_are_rejected() {
        assert_eq!(ConvertedAmount::from_major(1e13 * 24000.0, CurrencyCode::VND), None);
        assert_eq!(ConvertedAmount::from_major(f64::INFINITY, CurrencyCode::USD), None);

        let largest = amount(MAX_INPUT_AMOUNT * 1000.0, CurrencyCode::VND);
        assert_eq!(largest.to_string(), "₫1,000,000,000,000,000.00");
    }
}
