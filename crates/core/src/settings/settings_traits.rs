//! Repository traits for settings.

use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::{AppSettings, SettingsUpdate};

/// Repository trait for managing application settings.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// Get all settings, with defaults for keys never written.
    fn get_settings(&self) -> Result<AppSettings>;

    /// Update multiple settings at once.
    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()>;

    /// Get a single raw setting value by key.
    fn get_setting(&self, setting_key: &str) -> Result<String>;

    /// Update a single raw setting.
    async fn update_setting(&self, setting_key: &str, setting_value: &str) -> Result<()>;
}
