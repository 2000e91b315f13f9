//! Database model for application settings.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

/// One key-value row. List-valued settings are stored as JSON text.
#[derive(Queryable, Insertable, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::app_settings)]
#[serde(rename_all = "camelCase")]
pub struct AppSettingDB {
    pub setting_key: String,
    pub setting_value: String,
}

impl AppSettingDB {
    pub fn new(key: &str, value: impl Into<String>) -> Self {
        Self {
            setting_key: key.to_string(),
            setting_value: value.into(),
        }
    }
}
