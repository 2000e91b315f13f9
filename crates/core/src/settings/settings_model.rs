//! Application settings: base currency, display currencies, custom cost types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::DEFAULT_BASE_CURRENCY;
use crate::utils::decimal_serde_or_zero;

/// Setting keys as stored by the settings repository.
pub const SETTING_BASE_CURRENCY: &str = "base_currency";
pub const SETTING_CURRENCIES: &str = "currencies";
pub const SETTING_CUSTOM_COST_TYPES: &str = "custom_cost_types";

/// A display currency and its rate, in base-currency units per one unit of `code`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyRate {
    pub code: String,
    #[serde(default, with = "decimal_serde_or_zero")]
    pub rate: Decimal,
}

impl CurrencyRate {
    pub fn new(code: impl Into<String>, rate: Decimal) -> Self {
        Self {
            code: code.into(),
            rate,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppSettings {
    pub base_currency: String,
    pub currencies: Vec<CurrencyRate>,
    /// Admin-configurable names offered as custom cost lines on a quote.
    pub custom_cost_types: Vec<String>,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            base_currency: DEFAULT_BASE_CURRENCY.to_string(),
            currencies: Vec::new(),
            custom_cost_types: Vec::new(),
        }
    }
}

/// Partial update; `None` fields are left as they are.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsUpdate {
    pub base_currency: Option<String>,
    pub currencies: Option<Vec<CurrencyRate>>,
    pub custom_cost_types: Option<Vec<String>>,
}

impl AppSettings {
    /// Returns a copy with `update` applied.
    pub fn merged(&self, update: &SettingsUpdate) -> AppSettings {
        AppSettings {
            base_currency: update
                .base_currency
                .clone()
                .unwrap_or_else(|| self.base_currency.clone()),
            currencies: update
                .currencies
                .clone()
                .unwrap_or_else(|| self.currencies.clone()),
            custom_cost_types: update
                .custom_cost_types
                .clone()
                .unwrap_or_else(|| self.custom_cost_types.clone()),
        }
    }
}
