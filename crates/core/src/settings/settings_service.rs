use super::SettingsRepositoryTrait;
use crate::errors::{Result, ValidationError};
use crate::fx::CurrencyConverter;
use crate::settings::{AppSettings, SettingsUpdate};
use async_trait::async_trait;
use log::{debug, info};
use rust_decimal::Decimal;
use std::collections::HashSet;
use std::sync::Arc;

#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    fn get_settings(&self) -> Result<AppSettings>;

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()>;

    fn get_base_currency(&self) -> Result<String>;

    /// Converter for the currently configured rates.
    fn get_currency_converter(&self) -> Result<CurrencyConverter>;

    fn get_custom_cost_types(&self) -> Result<Vec<String>>;
}

pub struct SettingsService {
    settings_repository: Arc<dyn SettingsRepositoryTrait>,
}

impl SettingsService {
    pub fn new(settings_repository: Arc<dyn SettingsRepositoryTrait>) -> Self {
        SettingsService {
            settings_repository,
        }
    }
}

/// Rejects blank or repeated currency codes, non-positive rates and blank or
/// repeated cost type names.
pub fn validate_settings(settings: &AppSettings) -> Result<()> {
    if settings.base_currency.trim().is_empty() {
        return Err(ValidationError::MissingField("baseCurrency".to_string()).into());
    }

    let base = settings.base_currency.trim().to_uppercase();
    let mut codes = HashSet::new();
    for currency in &settings.currencies {
        let code = currency.code.trim().to_uppercase();
        if code.is_empty() {
            return Err(ValidationError::MissingField("currency code".to_string()).into());
        }
        if code == base || !codes.insert(code.clone()) {
            return Err(
                ValidationError::InvalidInput(format!("Duplicate currency {}", code)).into(),
            );
        }
        if currency.rate <= Decimal::ZERO {
            return Err(ValidationError::InvalidInput(format!(
                "Rate for {} must be greater than zero",
                code
            ))
            .into());
        }
    }

    let mut names = HashSet::new();
    for name in &settings.custom_cost_types {
        let name = name.trim();
        if name.is_empty() {
            return Err(ValidationError::MissingField("custom cost type".to_string()).into());
        }
        if !names.insert(name.to_lowercase()) {
            return Err(ValidationError::InvalidInput(format!(
                "Duplicate custom cost type {}",
                name
            ))
            .into());
        }
    }
    Ok(())
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    fn get_settings(&self) -> Result<AppSettings> {
        self.settings_repository.get_settings()
    }

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()> {
        let current = self.settings_repository.get_settings()?;
        let merged = current.merged(new_settings);
        validate_settings(&merged)?;

        if merged.base_currency != current.base_currency {
            info!(
                "Base currency changed from {} to {}",
                current.base_currency, merged.base_currency
            );
        }
        debug!("Saving settings: {:?}", new_settings);

        self.settings_repository
            .update_settings(new_settings)
            .await?;
        Ok(())
    }

    fn get_base_currency(&self) -> Result<String> {
        Ok(self.settings_repository.get_settings()?.base_currency)
    }

    fn get_currency_converter(&self) -> Result<CurrencyConverter> {
        let settings = self.settings_repository.get_settings()?;
        Ok(CurrencyConverter::from_settings(&settings)?)
    }

    fn get_custom_cost_types(&self) -> Result<Vec<String>> {
        Ok(self.settings_repository.get_settings()?.custom_cost_types)
    }
}
