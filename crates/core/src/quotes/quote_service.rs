//! Quote service implementation.

use async_trait::async_trait;
use chrono::{Datelike, NaiveDateTime, Utc};
use log::{debug, info};
use rust_decimal::{Decimal, RoundingStrategy};
use std::sync::Arc;
use uuid::Uuid;

use crate::casting::CastingServiceTrait;
use crate::catalogs::CatalogServiceTrait;
use crate::constants::{QUOTE_NUMBER_PREFIX, RECENT_QUOTES_LIMIT};
use crate::customers::{CustomerRef, CustomerServiceTrait, CustomerStatus};
use crate::errors::{DatabaseError, ValidationError};
use crate::pricing::resolve_selection;
use crate::settings::SettingsServiceTrait;
use crate::Result;

use super::{
    Quote, QuoteAssembler, QuoteRepositoryTrait, QuoteRequest, QuoteServiceTrait, QuoteSummary,
    ResolvedComponent,
};

pub struct QuoteService {
    quote_repository: Arc<dyn QuoteRepositoryTrait>,
    catalog_service: Arc<dyn CatalogServiceTrait>,
    customer_service: Arc<dyn CustomerServiceTrait>,
    casting_service: Arc<dyn CastingServiceTrait>,
    settings_service: Arc<dyn SettingsServiceTrait>,
}

impl QuoteService {
    pub fn new(
        quote_repository: Arc<dyn QuoteRepositoryTrait>,
        catalog_service: Arc<dyn CatalogServiceTrait>,
        customer_service: Arc<dyn CustomerServiceTrait>,
        casting_service: Arc<dyn CastingServiceTrait>,
        settings_service: Arc<dyn SettingsServiceTrait>,
    ) -> Self {
        Self {
            quote_repository,
            catalog_service,
            customer_service,
            casting_service,
            settings_service,
        }
    }

    fn resolve_customer(&self, customer_id: &str) -> Result<CustomerRef> {
        if customer_id.trim().is_empty() {
            return Err(ValidationError::MissingField("customerId".to_string()).into());
        }
        let customer = self.customer_service.get_customer(customer_id)?;
        if customer.status == CustomerStatus::Inactive {
            return Err(ValidationError::InvalidInput(format!(
                "Customer {} is inactive",
                customer.name
            ))
            .into());
        }
        Ok(CustomerRef::from(&customer))
    }

    /// Loads each catalog and resolves the requested path against it. Stale
    /// indices are dropped by the selector; a component with nothing usable left
    /// is incomplete.
    fn resolve_components(&self, request: &QuoteRequest) -> Result<Vec<ResolvedComponent>> {
        if request.components.is_empty() {
            return Err(ValidationError::MissingField("components".to_string()).into());
        }

        request
            .components
            .iter()
            .map(|component| -> Result<ResolvedComponent> {
                let catalog = self.catalog_service.get_catalog(&component.catalog_id)?;
                let selection = resolve_selection(&catalog.tree, &component.path).ok_or_else(
                    || {
                        ValidationError::InvalidInput(format!(
                            "Selection for {} is incomplete",
                            component.label
                        ))
                    },
                )?;
                if selection.path.len() < component.path.len() {
                    debug!(
                        "Selection for {} truncated from {:?} to {:?}",
                        component.label, component.path, selection.path
                    );
                }
                Ok(ResolvedComponent {
                    label: component.label.clone(),
                    catalog_id: catalog.id,
                    group: catalog.group,
                    selection,
                })
            })
            .collect()
    }
}

/// Headline numbers for a set of quotes as of `now`.
pub fn summarize_quotes(quotes: &[Quote], now: NaiveDateTime) -> QuoteSummary {
    let total_sales: Decimal = quotes.iter().map(|q| q.base_total).sum();

    let mut recent: Vec<Quote> = quotes.to_vec();
    recent.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    recent.truncate(RECENT_QUOTES_LIMIT);

    let (last_year, last_month) = if now.month() == 1 {
        (now.year() - 1, 12)
    } else {
        (now.year(), now.month() - 1)
    };
    let count_in = |year: i32, month: u32| {
        quotes
            .iter()
            .filter(|q| q.created_at.year() == year && q.created_at.month() == month)
            .count()
    };
    let this_month = count_in(now.year(), now.month());
    let previous_month = count_in(last_year, last_month);

    let monthly_growth = if previous_month > 0 {
        let change = Decimal::from(this_month as i64 - previous_month as i64);
        (change * Decimal::ONE_HUNDRED / Decimal::from(previous_month))
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
    } else if this_month > 0 {
        Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };

    QuoteSummary {
        total_sales,
        quote_count: quotes.len(),
        recent_quotes: recent,
        monthly_growth,
    }
}

#[async_trait]
impl QuoteServiceTrait for QuoteService {
    async fn generate_quote(&self, request: QuoteRequest) -> Result<Quote> {
        let customer = self.resolve_customer(&request.customer_id)?;
        let converter = self.settings_service.get_currency_converter()?;
        let components = self.resolve_components(&request)?;
        let series = request
            .series
            .as_ref()
            .map(|s| self.casting_service.resolve_series(&s.type_id, &s.series_id))
            .transpose()?;

        let assembled = QuoteAssembler::new(&converter).assemble(
            components,
            series.as_ref(),
            &request.custom_costs,
            &request.currency,
        )?;

        let now = Utc::now();
        let quote = Quote {
            id: Uuid::new_v4().to_string(),
            quote_number: format!("{}-{}", QUOTE_NUMBER_PREFIX, now.timestamp_millis()),
            customer,
            line_items: assembled.line_items,
            casting: assembled.casting,
            components_total: assembled.components_total,
            custom_costs: assembled.custom_costs,
            custom_costs_total: assembled.custom_costs_total,
            base_currency: assembled.base_currency,
            base_total: assembled.base_total,
            currency: assembled.currency,
            exchange_rate: assembled.exchange_rate,
            total: assembled.total,
            created_at: now.naive_utc(),
        };

        let id = self.quote_repository.save_quote(quote.clone()).await?;
        info!(
            "Generated quote {} for {}: {} {} ({} {})",
            quote.quote_number,
            quote.customer.name,
            quote.total,
            quote.currency,
            quote.base_total,
            quote.base_currency
        );
        Ok(Quote { id, ..quote })
    }

    fn list_quotes(&self) -> Result<Vec<Quote>> {
        let mut quotes = self.quote_repository.list_quotes()?;
        quotes.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(quotes)
    }

    fn get_quote(&self, id: &str) -> Result<Quote> {
        self.quote_repository
            .get_quote(id)?
            .ok_or_else(|| DatabaseError::NotFound(format!("Quote {}", id)).into())
    }

    fn get_quote_summary(&self, now: NaiveDateTime) -> Result<QuoteSummary> {
        let quotes = self.quote_repository.list_quotes()?;
        Ok(summarize_quotes(&quotes, now))
    }
}
