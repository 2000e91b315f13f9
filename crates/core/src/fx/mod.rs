//! FX module - conversion of base-currency amounts into display currencies.

pub mod currency_converter;
mod fx_errors;

pub use currency_converter::CurrencyConverter;
pub use fx_errors::FxError;
