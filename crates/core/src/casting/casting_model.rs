//! Domain models for casting types.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::utils::{decimal_serde, decimal_serde_or_zero};

/// A material grade with a price per weight unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastingSeries {
    pub id: String,
    pub name: String,
    #[serde(default, with = "decimal_serde_or_zero")]
    pub rate: Decimal,
}

/// A casting type (e.g. "Cast Steel") grouping its series.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastingType {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub series: Vec<CastingSeries>,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CastingType {
    pub fn find_series(&self, series_id: &str) -> Option<&CastingSeries> {
        self.series.iter().find(|s| s.id == series_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCastingType {
    pub id: Option<String>,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCastingSeries {
    pub name: String,
    #[serde(default, with = "decimal_serde_or_zero")]
    pub rate: Decimal,
}

/// Which series a quote is priced with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesSelection {
    pub type_id: String,
    pub series_id: String,
}

/// A resolved series with the names needed for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesRate {
    pub type_name: String,
    pub series_name: String,
    #[serde(with = "decimal_serde")]
    pub rate: Decimal,
}
