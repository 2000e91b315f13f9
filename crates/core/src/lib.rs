//! ValveQuote Core - Domain entities, services, and traits.
//!
//! This crate contains the pricing engine and quoting logic. It is
//! database-agnostic and defines traits that are implemented by the
//! `storage-sqlite` crate.

pub mod casting;
pub mod catalogs;
pub mod constants;
pub mod customers;
pub mod errors;
pub mod fx;
pub mod pricing;
pub mod quotes;
pub mod settings;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
