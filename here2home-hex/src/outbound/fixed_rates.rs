//! In-process rate provider with hardcoded rates.
//!
//! For development and tests: answers instantly, never fails and needs no
//! network. Rates are approximate and never change.

use async_trait::async_trait;

use here2home_types::{CurrencyCode, ExchangeError, ExchangeRateProvider, RateTable};

/// Units of each currency per 1 USD.
const FIXED_RATES: &[(CurrencyCode, f64)] = &[
    (CurrencyCode::AUD, 1.52),
    (CurrencyCode::GBP, 0.79),
    (CurrencyCode::CAD, 1.36),
    (CurrencyCode::JPY, 150.0),
    (CurrencyCode::CNY, 7.2),
    (CurrencyCode::INR, 83.1),
    (CurrencyCode::EUR, 0.92),
    (CurrencyCode::CHF, 0.88),
    (CurrencyCode::SEK, 10.5),
    (CurrencyCode::NOK, 10.6),
    (CurrencyCode::DKK, 6.9),
    (CurrencyCode::PLN, 4.0),
    (CurrencyCode::RUB, 92.0),
    (CurrencyCode::TRY, 32.0),
    (CurrencyCode::KRW, 1330.0),
    (CurrencyCode::SGD, 1.34),
    (CurrencyCode::HKD, 7.8),
    (CurrencyCode::THB, 36.0),
    (CurrencyCode::MYR, 4.7),
    (CurrencyCode::IDR, 15700.0),
    (CurrencyCode::PHP, 56.0),
    (CurrencyCode::VND, 24500.0),
    (CurrencyCode::NZD, 1.65),
    (CurrencyCode::BRL, 5.0),
    (CurrencyCode::MXN, 17.0),
    (CurrencyCode::ARS, 870.0),
    (CurrencyCode::ZAR, 18.7),
    (CurrencyCode::ILS, 3.7),
    (CurrencyCode::AED, 3.6725),
    (CurrencyCode::SAR, 3.75),
    (CurrencyCode::EGP, 47.0),
    (CurrencyCode::NGN, 1500.0),
    (CurrencyCode::KES, 130.0),
    (CurrencyCode::PKR, 278.0),
    (CurrencyCode::LKR, 300.0),
    (CurrencyCode::NPR, 133.0),
    (CurrencyCode::BDT, 110.0),
    (CurrencyCode::CZK, 23.0),
    (CurrencyCode::HUF, 360.0),
];

/// Serves [`FIXED_RATES`].
#[derive(Debug, Clone, Default)]
pub struct FixedRateProvider;

impl FixedRateProvider {
    pub fn new() -> Self {
        Self
    }

    pub fn table() -> RateTable {
        RateTable::from_rates(FIXED_RATES.iter().copied())
    }
}

#[async_trait]
impl ExchangeRateProvider for FixedRateProvider {
    async fn fetch_latest(&self) -> Result<RateTable, ExchangeError> {
        Ok(Self::table())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_covers_every_directory_currency() {
        let table = FixedRateProvider::new().fetch_latest().await.unwrap();
        for code in CurrencyCode::all() {
            assert!(table.rate(*code).is_some(), "missing rate for {code}");
        }
    }
}
