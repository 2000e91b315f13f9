use async_trait::async_trait;
use diesel::prelude::*;
use log::warn;
use serde::de::DeserializeOwned;
use std::sync::Arc;

use super::model::AppSettingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, StorageError};
use crate::schema::app_settings::dsl::*;
use valvequote_core::constants::DEFAULT_BASE_CURRENCY;
use valvequote_core::errors::Result;
use valvequote_core::settings::{
    AppSettings, SettingsRepositoryTrait, SettingsUpdate, SETTING_BASE_CURRENCY,
    SETTING_CURRENCIES, SETTING_CUSTOM_COST_TYPES,
};

pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SettingsRepository { pool, writer }
    }
}

/// Stored lists that no longer parse fall back to empty rather than failing every read.
fn parse_list<T: DeserializeOwned>(key: &str, value: &str) -> Vec<T> {
    serde_json::from_str(value).unwrap_or_else(|e| {
        warn!("Ignoring unreadable setting {}: {}", key, e);
        Vec::new()
    })
}

fn upsert(conn: &mut SqliteConnection, row: AppSettingDB) -> Result<()> {
    diesel::replace_into(app_settings)
        .values(&row)
        .execute(conn)
        .map_err(StorageError::from)?;
    Ok(())
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    fn get_settings(&self) -> Result<AppSettings> {
        let mut conn = get_connection(&self.pool)?;
        let all_settings: Vec<(String, String)> = app_settings
            .select((setting_key, setting_value))
            .load::<(String, String)>(&mut conn)
            .map_err(StorageError::from)?;

        let mut settings = AppSettings::default();
        for (key, value) in all_settings {
            match key.as_str() {
                SETTING_BASE_CURRENCY => settings.base_currency = value,
                SETTING_CURRENCIES => settings.currencies = parse_list(&key, &value),
                SETTING_CUSTOM_COST_TYPES => {
                    settings.custom_cost_types = parse_list(&key, &value)
                }
                _ => {}
            }
        }
        Ok(settings)
    }

    async fn update_settings(&self, new_settings: &SettingsUpdate) -> Result<()> {
        let mut rows = Vec::new();
        if let Some(ref base) = new_settings.base_currency {
            rows.push(AppSettingDB::new(SETTING_BASE_CURRENCY, base.clone()));
        }
        if let Some(ref currencies) = new_settings.currencies {
            rows.push(AppSettingDB::new(
                SETTING_CURRENCIES,
                serde_json::to_string(currencies).into_core()?,
            ));
        }
        if let Some(ref cost_types) = new_settings.custom_cost_types {
            rows.push(AppSettingDB::new(
                SETTING_CUSTOM_COST_TYPES,
                serde_json::to_string(cost_types).into_core()?,
            ));
        }

        self.writer
            .exec(move |conn| {
                for row in rows {
                    upsert(conn, row)?;
                }
                Ok(())
            })
            .await
    }

    fn get_setting(&self, setting_key_param: &str) -> Result<String> {
        let mut conn = get_connection(&self.pool)?;
        let result = app_settings
            .filter(setting_key.eq(setting_key_param))
            .select(setting_value)
            .first::<String>(&mut conn);

        match result {
            Ok(value) => Ok(value),
            Err(diesel::result::Error::NotFound) => {
                let default_value = match setting_key_param {
                    SETTING_BASE_CURRENCY => DEFAULT_BASE_CURRENCY,
                    SETTING_CURRENCIES | SETTING_CUSTOM_COST_TYPES => "[]",
                    _ => return Err(StorageError::from(diesel::result::Error::NotFound).into()),
                };
                Ok(default_value.to_string())
            }
            Err(e) => Err(StorageError::from(e).into()),
        }
    }

    async fn update_setting(
        &self,
        setting_key_param: &str,
        setting_value_param: &str,
    ) -> Result<()> {
        let row = AppSettingDB::new(setting_key_param, setting_value_param);
        self.writer.exec(move |conn| upsert(conn, row)).await
    }
}
