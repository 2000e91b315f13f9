//! Traits for quote repository and service.

use async_trait::async_trait;
use chrono::NaiveDateTime;

use crate::Result;

use super::{Quote, QuoteRequest, QuoteSummary};

/// Append-only quote store.
#[async_trait]
pub trait QuoteRepositoryTrait: Send + Sync {
    fn list_quotes(&self) -> Result<Vec<Quote>>;
    fn get_quote(&self, id: &str) -> Result<Option<Quote>>;
    /// Persists a new quote and returns its id.
    async fn save_quote(&self, quote: Quote) -> Result<String>;
}

/// Service trait for generating and browsing quotes.
#[async_trait]
pub trait QuoteServiceTrait: Send + Sync {
    async fn generate_quote(&self, request: QuoteRequest) -> Result<Quote>;
    /// All quotes, newest first.
    fn list_quotes(&self) -> Result<Vec<Quote>>;
    fn get_quote(&self, id: &str) -> Result<Quote>;
    fn get_quote_summary(&self, now: NaiveDateTime) -> Result<QuoteSummary>;
}
