//! Quotes module - assembly, persistence contract and history of finalized quotes.
//!
//! Quotes are append-only: once saved they are never updated or deleted.

mod quote_assembler;
mod quote_model;
mod quote_service;
mod quote_traits;


pub use quote_assembler::{AssembledQuote, QuoteAssembler, ResolvedComponent};
pub use quote_model::{
    CastingSummary, ComponentSelection, CustomCost, CustomCostLine, Quote, QuoteLineItem,
    QuoteRequest, QuoteSummary,
};
pub use quote_service::{summarize_quotes, QuoteService};
pub use quote_traits::{QuoteRepositoryTrait, QuoteServiceTrait};
