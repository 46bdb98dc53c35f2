//! Conversion engine.
//!
//! Pure functions: no IO, no clock. Rates come in as a [`RateTable`] quoted
//! against USD and every conversion goes through USD.

use here2home_types::{
    BASE_CURRENCY, ConversionError, ConversionOutcome, ConversionRequest, ConvertedAmount,
    CurrencyCode, RateTable,
};

/// Converts `request.amount` from `request.source` to `request.target`.
///
/// A non-finite or non-positive amount is [`ConversionOutcome::NoInput`].
/// Converting a currency to itself never looks at `rates`. A result too large
/// to count in cents is [`ConversionError::AmountOutOfRange`].
pub fn convert(
    request: &ConversionRequest,
    rates: &RateTable,
) -> Result<ConversionOutcome, ConversionError> {
    let ConversionRequest {
        amount,
        source,
        target,
    } = *request;

    if !amount.is_finite() || amount <= 0.0 {
        return Ok(ConversionOutcome::NoInput);
    }

    if source == target {
        return rounded(amount, target);
    }

    let usd = if source == BASE_CURRENCY {
        amount
    } else {
        amount / rate_for(rates, source)?
    };

    let result = if target == BASE_CURRENCY {
        usd
    } else {
        usd * rate_for(rates, target)?
    };

    rounded(result, target)
}

fn rounded(value: f64, target: CurrencyCode) -> Result<ConversionOutcome, ConversionError> {
    ConvertedAmount::from_major(value, target)
        .map(ConversionOutcome::Converted)
        .ok_or(ConversionError::AmountOutOfRange(target))
}

fn rate_for(rates: &RateTable, code: CurrencyCode) -> Result<f64, ConversionError> {
    rates
        .rate(code)
        .ok_or(ConversionError::CurrencyRateMissing(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> RateTable {
        RateTable::from_rates([(CurrencyCode::EUR, 0.9), (CurrencyCode::VND, 24000.0)])
    }

    fn request(amount: f64, source: CurrencyCode, target: CurrencyCode) -> ConversionRequest {
        ConversionRequest {
            amount,
            source,
            target,
        }
    }

    fn converted(outcome: ConversionOutcome) -> ConvertedAmount {
        match outcome {
            ConversionOutcome::Converted(amount) => amount,
            ConversionOutcome::NoInput => panic!("expected a converted amount"),
        }
    }

    #[test]
    fn test_usd_to_vnd() {
        let outcome = convert(&request(10.0, CurrencyCode::USD, CurrencyCode::VND), &table());
        let amount = converted(outcome.unwrap());
        assert_eq!(amount.minor_units(), 24_000_000);
        assert_eq!(amount.to_string(), "₫240,000.00");
    }

    #[test]
    fn test_eur_to_usd() {
        let outcome = convert(&request(9.0, CurrencyCode::EUR, CurrencyCode::USD), &table());
        assert_eq!(converted(outcome.unwrap()).value(), 10.0);
    }

    #[test]
    fn test_cross_rate_goes_through_usd() {
        let outcome = convert(&request(9.0, CurrencyCode::EUR, CurrencyCode::VND), &table());
        assert_eq!(converted(outcome.unwrap()).value(), 240000.0);
    }

    #[test]
    fn test_same_currency_needs_no_rates() {
        let empty = RateTable::new();
        let outcome = convert(&request(100.0, CurrencyCode::USD, CurrencyCode::USD), &empty);
        assert_eq!(converted(outcome.unwrap()).value(), 100.0);

        let outcome = convert(&request(12.345, CurrencyCode::JPY, CurrencyCode::JPY), &empty);
        assert_eq!(converted(outcome.unwrap()).minor_units(), 1235);
    }

    #[test]
    fn test_missing_rate_names_currency() {
        let err = convert(&request(5.0, CurrencyCode::USD, CurrencyCode::GBP), &table())
            .unwrap_err();
        assert_eq!(err, ConversionError::CurrencyRateMissing(CurrencyCode::GBP));

        let err = convert(&request(5.0, CurrencyCode::THB, CurrencyCode::EUR), &table())
            .unwrap_err();
        assert_eq!(err, ConversionError::CurrencyRateMissing(CurrencyCode::THB));
    }

    #[test]
    fn test_non_positive_amount_is_no_input() {
        for amount in [0.0, -3.0, f64::NAN, f64::INFINITY] {
            let outcome = convert(&request(amount, CurrencyCode::USD, CurrencyCode::VND), &table());
            assert_eq!(outcome.unwrap(), ConversionOutcome::NoInput);
        }
    }

    #[test]
    fn test_round_trip_stays_within_rounding() {
        let rates = table();
        for amount in [1.0, 17.5, 250.0, 1234.56] {
            let there = converted(
                convert(&request(amount, CurrencyCode::EUR, CurrencyCode::VND), &rates).unwrap(),
            );
            let back = converted(
                convert(
                    &request(there.value(), CurrencyCode::VND, CurrencyCode::EUR),
                    &rates,
                )
                .unwrap(),
            );
            assert!((back.value() - amount).abs() <= 0.01, "{amount} -> {back}");
        }
    }

    #[test]
    fn test_result_too_large_for_cents_is_an_error() {
        let outcome = convert(&request(1e13, CurrencyCode::USD, CurrencyCode::VND), &table());
        assert_eq!(outcome, Err(ConversionError::AmountOutOfRange(CurrencyCode::VND)));

        let outcome = convert(&request(1e12, CurrencyCode::USD, CurrencyCode::VND), &table());
        assert_eq!(converted(outcome.unwrap()).value(), 24e15);
    }

    #[test]
    fn test_result_is_rounded_half_up() {
        let rates = RateTable::from_rates([(CurrencyCode::GBP, 0.5)]);
        // 20.25 USD * 0.5 = 10.125 GBP exactly
        let outcome = convert(&request(20.25, CurrencyCode::USD, CurrencyCode::GBP), &rates);
        assert_eq!(converted(outcome.unwrap()).minor_units(), 1013);
    }
}
