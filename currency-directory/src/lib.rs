//! Country and Currency Directory with Macro-Based Currency Generation
//!
//! The directory is the fixed reference table behind every currency decision:
//! which ISO codes exist, how they are displayed, and which country names map
//! to them. Currencies are defined declaratively with a macro that generates
//! the [`CurrencyCode`] enum and its metadata accessors.
//!
//! # Adding a New Currency
//! Add a line to the `define_currencies!` invocation and, if a country uses
//! it, an entry to [`entries`]:
//! ```ignore
//! define_currencies! {
//!     // ... existing currencies ...
//!     ISK => ("ISK", "kr", "Icelandic Krona"),
//! }
//! ```
//!
//! # Example
//! ```
//! use currency_directory::{resolve_currency, CurrencyCode};
//!
//! assert_eq!(resolve_currency("Japan"), CurrencyCode::JPY);
//! assert_eq!("vnd".parse::<CurrencyCode>().unwrap(), CurrencyCode::VND);
//! assert_eq!(CurrencyCode::EUR.symbol(), "€");
//! ```

mod resolver;

pub use resolver::{FALLBACK_CURRENCY, resolve_currency};

use serde::Serialize;

/// Error returned when a code is not part of the directory.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown currency: {0}")]
pub struct UnknownCurrency(pub String);

// ─────────────────────────────────────────────────────────────────────────────
// THE MACRO: Defines all currencies and the CurrencyCode enum
// ─────────────────────────────────────────────────────────────────────────────

/// Macro to define currencies with an auto-generated enum and accessors.
///
/// # Syntax
/// ```ignore
/// define_currencies! {
///     Variant => ("CODE", "SYMBOL", "Display Name"),
/// }
/// ```
#[macro_export]
macro_rules! define_currencies {
    (
        $(
            $name:ident => ($code:literal, $symbol:literal, $display:literal)
        ),* $(,)?
    ) => {
        /// ISO-4217 currency codes known to the directory.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize, utoipa::ToSchema)]
        #[serde(rename_all = "UPPERCASE")]
        pub enum CurrencyCode {
            $($name),*
        }

        impl CurrencyCode {
            pub const fn code(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $code),*
                }
            }

            pub const fn symbol(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $symbol),*
                }
            }

            /// Human-readable currency name, e.g. "Vietnamese Dong".
            pub const fn name(&self) -> &'static str {
                match self {
                    $(CurrencyCode::$name => $display),*
                }
            }

            pub fn all() -> &'static [CurrencyCode] {
                &[$(CurrencyCode::$name),*]
            }
        }

        impl std::fmt::Display for CurrencyCode {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.code())
            }
        }

        impl std::str::FromStr for CurrencyCode {
            type Err = $crate::UnknownCurrency;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_uppercase().as_str() {
                    $($code => Ok(CurrencyCode::$name),)*
                    _ => Err($crate::UnknownCurrency(s.to_string())),
                }
            }
        }
    };
}

// ─────────────────────────────────────────────────────────────────────────────
// CURRENCY DEFINITIONS
// ─────────────────────────────────────────────────────────────────────────────

define_currencies! {
    AUD => ("AUD", "A$", "Australian Dollar"),
    USD => ("USD", "$", "US Dollar"),
    GBP => ("GBP", "£", "British Pound"),
    CAD => ("CAD", "CA$", "Canadian Dollar"),
    JPY => ("JPY", "¥", "Japanese Yen"),
    CNY => ("CNY", "CN¥", "Chinese Yuan"),
    INR => ("INR", "₹", "Indian Rupee"),
    EUR => ("EUR", "€", "Euro"),
    CHF => ("CHF", "CHF", "Swiss Franc"),
    SEK => ("SEK", "kr", "Swedish Krona"),
    NOK => ("NOK", "kr", "Norwegian Krone"),
    DKK => ("DKK", "kr", "Danish Krone"),
    PLN => ("PLN", "zł", "Polish Zloty"),
    RUB => ("RUB", "₽", "Russian Ruble"),
    TRY => ("TRY", "₺", "Turkish Lira"),
    KRW => ("KRW", "₩", "South Korean Won"),
    SGD => ("SGD", "S$", "Singapore Dollar"),
    HKD => ("HKD", "HK$", "Hong Kong Dollar"),
    THB => ("THB", "฿", "Thai Baht"),
    MYR => ("MYR", "RM", "Malaysian Ringgit"),
    IDR => ("IDR", "Rp", "Indonesian Rupiah"),
    PHP => ("PHP", "₱", "Philippine Peso"),
    VND => ("VND", "₫", "Vietnamese Dong"),
    NZD => ("NZD", "NZ$", "New Zealand Dollar"),
    BRL => ("BRL", "R$", "Brazilian Real"),
    MXN => ("MXN", "MX$", "Mexican Peso"),
    ARS => ("ARS", "AR$", "Argentine Peso"),
    ZAR => ("ZAR", "R", "South African Rand"),
    ILS => ("ILS", "₪", "Israeli Shekel"),
    AED => ("AED", "AED", "UAE Dirham"),
    SAR => ("SAR", "SAR", "Saudi Riyal"),
    EGP => ("EGP", "E£", "Egyptian Pound"),
    NGN => ("NGN", "₦", "Nigerian Naira"),
    KES => ("KES", "KSh", "Kenyan Shilling"),
    PKR => ("PKR", "Rs", "Pakistani Rupee"),
    BDT => ("BDT", "৳", "Bangladeshi Taka"),
    LKR => ("LKR", "Rs", "Sri Lankan Rupee"),
    NPR => ("NPR", "Rs", "Nepalese Rupee"),
    CZK => ("CZK", "Kč", "Czech Koruna"),
    HUF => ("HUF", "Ft", "Hungarian Forint"),
}

/// The pivot currency every rate is quoted against.
pub const BASE_CURRENCY: CurrencyCode = CurrencyCode::USD;

// ─────────────────────────────────────────────────────────────────────────────
// Country Table
// ─────────────────────────────────────────────────────────────────────────────

/// One row of the directory: a country and the currency it uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CountryCurrencyEntry {
    pub country_name: &'static str,
    pub currency_code: CurrencyCode,
    pub display_name: &'static str,
}

const fn entry(country_name: &'static str, currency_code: CurrencyCode) -> CountryCurrencyEntry {
    CountryCurrencyEntry {
        country_name,
        currency_code,
        display_name: currency_code.name(),
    }
}

static ENTRIES: [CountryCurrencyEntry; 46] = [
    entry("Australia", CurrencyCode::AUD),
    entry("United States", CurrencyCode::USD),
    entry("United Kingdom", CurrencyCode::GBP),
    entry("Canada", CurrencyCode::CAD),
    entry("Japan", CurrencyCode::JPY),
    entry("China", CurrencyCode::CNY),
    entry("India", CurrencyCode::INR),
    entry("Germany", CurrencyCode::EUR),
    entry("France", CurrencyCode::EUR),
    entry("Italy", CurrencyCode::EUR),
    entry("Spain", CurrencyCode::EUR),
    entry("Netherlands", CurrencyCode::EUR),
    entry("Belgium", CurrencyCode::EUR),
    entry("Austria", CurrencyCode::EUR),
    entry("Switzerland", CurrencyCode::CHF),
    entry("Sweden", CurrencyCode::SEK),
    entry("Norway", CurrencyCode::NOK),
    entry("Denmark", CurrencyCode::DKK),
    entry("Poland", CurrencyCode::PLN),
    entry("Russia", CurrencyCode::RUB),
    entry("Turkey", CurrencyCode::TRY),
    entry("South Korea", CurrencyCode::KRW),
    entry("Singapore", CurrencyCode::SGD),
    entry("Hong Kong", CurrencyCode::HKD),
    entry("Thailand", CurrencyCode::THB),
    entry("Malaysia", CurrencyCode::MYR),
    entry("Indonesia", CurrencyCode::IDR),
    entry("Philippines", CurrencyCode::PHP),
    entry("Vietnam", CurrencyCode::VND),
    entry("New Zealand", CurrencyCode::NZD),
    entry("Brazil", CurrencyCode::BRL),
    entry("Mexico", CurrencyCode::MXN),
    entry("Argentina", CurrencyCode::ARS),
    entry("South Africa", CurrencyCode::ZAR),
    entry("Israel", CurrencyCode::ILS),
    entry("United Arab Emirates", CurrencyCode::AED),
    entry("Saudi Arabia", CurrencyCode::SAR),
    entry("Egypt", CurrencyCode::EGP),
    entry("Nigeria", CurrencyCode::NGN),
    entry("Kenya", CurrencyCode::KES),
    entry("Pakistan", CurrencyCode::PKR),
    entry("Bangladesh", CurrencyCode::BDT),
    entry("Sri Lanka", CurrencyCode::LKR),
    entry("Nepal", CurrencyCode::NPR),
    entry("Czech Republic", CurrencyCode::CZK),
    entry("Hungary", CurrencyCode::HUF),
];

/// All directory rows in insertion order.
pub fn entries() -> &'static [CountryCurrencyEntry] {
    &ENTRIES
}

/// Label shown for a home currency ("Your home country is currently ...").
///
/// The euro is shared by several directory countries, so it is labelled as a
/// region instead of picking one of them.
pub fn country_for_currency(code: CurrencyCode) -> &'static str {
    if code == CurrencyCode::EUR {
        return "Europe";
    }
    ENTRIES
        .iter()
        .find(|e| e.currency_code == code)
        .map(|e| e.country_name)
        .unwrap_or("Unknown")
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_currency_code_parse() {
        assert_eq!("USD".parse::<CurrencyCode>().unwrap(), CurrencyCode::USD);
        assert_eq!("eur".parse::<CurrencyCode>().unwrap(), CurrencyCode::EUR);
        assert_eq!(" vnd ".parse::<CurrencyCode>().unwrap(), CurrencyCode::VND);
    }

    #[test]
    fn test_unknown_currency_is_an_error() {
        let err = "XYZ".parse::<CurrencyCode>().unwrap_err();
        assert_eq!(err, UnknownCurrency("XYZ".to_string()));
        assert_eq!(err.to_string(), "Unknown currency: XYZ");
    }

    #[test]
    fn test_currency_code_display() {
        assert_eq!(CurrencyCode::USD.to_string(), "USD");
        assert_eq!(CurrencyCode::VND.symbol(), "₫");
        assert_eq!(CurrencyCode::VND.name(), "Vietnamese Dong");
    }

    #[test]
    fn test_currency_code_all() {
        assert_eq!(CurrencyCode::all().len(), 40);
        assert!(CurrencyCode::all().contains(&BASE_CURRENCY));
    }

    #[test]
    fn test_serde_uses_iso_code() {
        let json = serde_json::to_string(&CurrencyCode::HKD).unwrap();
        assert_eq!(json, "\"HKD\"");
        let back: CurrencyCode = serde_json::from_str("\"NZD\"").unwrap();
        assert_eq!(back, CurrencyCode::NZD);
    }

    #[test]
    fn test_entry_display_names_match_currency_names() {
        for e in entries() {
            assert_eq!(e.display_name, e.currency_code.name(), "{}", e.country_name);
        }
    }

    #[test]
    fn test_every_currency_has_a_country() {
        for code in CurrencyCode::all() {
            assert_ne!(country_for_currency(*code), "Unknown", "{code}");
        }
    }

    #[test]
    fn test_country_for_currency() {
        assert_eq!(country_for_currency(CurrencyCode::AUD), "Australia");
        assert_eq!(country_for_currency(CurrencyCode::EUR), "Europe");
        assert_eq!(country_for_currency(CurrencyCode::VND), "Vietnam");
    }
}
