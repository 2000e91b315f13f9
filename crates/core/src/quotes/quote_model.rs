
//! Domain models for quotes.

use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::casting::SeriesSelection;
use crate::catalogs::ComponentGroup;
use crate::customers::CustomerRef;
use crate::pricing::{CastingAttributes, SelectionBreakdown};
use crate::utils::{decimal_serde, decimal_serde_or_zero};

/// A freeform cost line such as testing or packing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct CustomCost {
    #[serde(default, with = "decimal_serde_or_zero")]
    pub price: Decimal,
    #[serde(default)]
    pub notes: String,
}

/// The path chosen in one catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentSelection {
    /// Display label, e.g. "Body" or "Trim - Plug".
    pub label: String,
    pub catalog_id: String,
    #[serde(default)]
    pub path: Vec<usize>,
}

/// Everything needed to generate a quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub customer_id: String,
    pub currency: String,
    #[serde(default)]
    pub series: Option<SeriesSelection>,
    pub components: Vec<ComponentSelection>,
    #[serde(default)]
    pub custom_costs: BTreeMap<String, CustomCost>,
}

/// One priced component on a finalized quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteLineItem {
    pub label: String,
    pub catalog_id: String,
    pub group: ComponentGroup,
    pub path: Vec<usize>,
    /// Chosen names joined with the path separator.
    pub description: String,
    pub breakdown: SelectionBreakdown,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub casting: Option<CastingAttributes>,
    /// Contribution to the base total. For casting items this is
    /// `weight · rate + machining_charge`.
    #[serde(with = "decimal_serde")]
    pub subtotal: Decimal,
}

/// The casting group computation as shown on a quote.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CastingSummary {
    pub type_name: String,
    pub series_name: String,
    #[serde(with = "decimal_serde")]
    pub rate: Decimal,
    #[serde(with = "decimal_serde")]
    pub total_weight: Decimal,
    #[serde(with = "decimal_serde")]
    pub total_machining: Decimal,
    #[serde(with = "decimal_serde")]
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomCostLine {
    pub name: String,
    #[serde(with = "decimal_serde")]
    pub price: Decimal,
    pub notes: String,
}

/// A finalized, immutable quote.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: String,
    pub quote_number: String,
    pub customer: CustomerRef,
    pub line_items: Vec<QuoteLineItem>,
    pub casting: Option<CastingSummary>,
    /// Sum of the priced (non-casting) components.
    #[serde(with = "decimal_serde")]
    pub components_total: Decimal,
    pub custom_costs: Vec<CustomCostLine>,
    #[serde(with = "decimal_serde")]
    pub custom_costs_total: Decimal,
    pub base_currency: String,
    #[serde(with = "decimal_serde")]
    pub base_total: Decimal,
    pub currency: String,
    /// Base-currency units per one unit of `currency`.
    #[serde(with = "decimal_serde")]
    pub exchange_rate: Decimal,
    /// `base_total` converted into `currency`.
    #[serde(with = "decimal_serde")]
    pub total: Decimal,
    pub created_at: NaiveDateTime,
}

/// Headline numbers over the quote history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteSummary {
    /// Sum of base totals of all quotes.
    #[serde(with = "decimal_serde")]
    pub total_sales: Decimal,
    pub quote_count: usize,
    pub recent_quotes: Vec<Quote>,
    /// Change in quote count versus the previous calendar month, in percent.
    #[serde(with = "decimal_serde")]
    pub monthly_growth: Decimal,
}
