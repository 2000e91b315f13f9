use crate::fx::fx_errors::FxError;
use crate::settings::AppSettings;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Converts amounts between the base currency and the configured display currencies.
///
/// Every configured rate is expressed in base-currency units per one unit of the
/// target currency, so conversions out of the base currency divide by the rate.
#[derive(Debug, Clone)]
pub struct CurrencyConverter {
    base_currency: String,
    /// Key: normalized currency code. Value: base units per unit.
    rates: HashMap<String, Decimal>,
}

fn normalize_code(code: &str) -> String {
    code.trim().to_uppercase()
}

impl CurrencyConverter {
    /// Creates a converter from `(code, rate)` pairs, rejecting non-positive rates.
    pub fn new<I>(base_currency: &str, rates: I) -> Result<Self, FxError>
    where
        I: IntoIterator<Item = (String, Decimal)>,
    {
        let base_currency = normalize_code(base_currency);
        if base_currency.is_empty() {
            return Err(FxError::InvalidCurrencyCode(base_currency));
        }

        let mut converter = CurrencyConverter {
            base_currency,
            rates: HashMap::new(),
        };
        for (code, rate) in rates {
            let code = normalize_code(&code);
            if code.is_empty() {
                return Err(FxError::InvalidCurrencyCode(code));
            }
            if rate <= Decimal::ZERO {
                return Err(FxError::InvalidRate {
                    currency: code,
                    rate: rate.to_string(),
                });
            }
            converter.rates.insert(code, rate);
        }
        Ok(converter)
    }

    /// Builds a converter from the persisted application settings.
    pub fn from_settings(settings: &AppSettings) -> Result<Self, FxError> {
        Self::new(
            &settings.base_currency,
            settings
                .currencies
                .iter()
                .map(|c| (c.code.clone(), c.rate)),
        )
    }

    pub fn base_currency(&self) -> &str {
        &self.base_currency
    }

    /// Base-currency units per one unit of `code`. The base currency itself is 1.
    pub fn get_rate(&self, code: &str) -> Result<Decimal, FxError> {
        let code = normalize_code(code);
        if code == self.base_currency {
            return Ok(Decimal::ONE);
        }
        self.rates.get(&code).copied().ok_or_else(|| {
            FxError::RateNotFound(format!("No rate configured for {}", code))
        })
    }

    /// Converts a base-currency amount into `to_currency`.
    pub fn convert_from_base(&self, amount: Decimal, to_currency: &str) -> Result<Decimal, FxError> {
        let rate = self.get_rate(to_currency)?;
        Ok(amount / rate)
    }

    /// Converts an amount in `from_currency` back into the base currency.
    pub fn convert_to_base(&self, amount: Decimal, from_currency: &str) -> Result<Decimal, FxError> {
        let rate = self.get_rate(from_currency)?;
        Ok(amount * rate)
    }

    /// Converts between any two known currencies by way of the base currency.
    pub fn convert_amount(
        &self,
        amount: Decimal,
        from_currency: &str,
        to_currency: &str,
    ) -> Result<Decimal, FxError> {
        if normalize_code(from_currency) == normalize_code(to_currency) {
            return Ok(amount);
        }
        let base = self.convert_to_base(amount, from_currency)?;
        self.convert_from_base(base, to_currency)
    }

    /// Codes the converter can produce, base currency first.
    pub fn available_currencies(&self) -> Vec<String> {
        let mut codes: Vec<String> = self.rates.keys().cloned().collect();
        codes.sort();
        codes.retain(|c| *c != self.base_currency);
        codes.insert(0, self.base_currency.clone());
        codes
    }
}
