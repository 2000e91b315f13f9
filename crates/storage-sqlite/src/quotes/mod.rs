//! SQLite storage implementation for finalized quotes.

mod model;
mod repository;

pub use model::QuoteDB;
pub use repository::QuoteRepository;

// Re-export trait from core for convenience
pub use valvequote_core::quotes::QuoteRepositoryTrait;
