use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FxError {
    #[error("Exchange rate not found: {0}")]
    RateNotFound(String),

    #[error("Invalid exchange rate for {currency}: {rate}")]
    InvalidRate { currency: String, rate: String },

    #[error("Invalid currency code: {0}")]
    InvalidCurrencyCode(String),
}
