//! SQLite storage implementation for customers.

mod model;
mod repository;

pub use model::CustomerDB;
pub use repository::CustomerRepository;

// Re-export trait from core for convenience
pub use valvequote_core::customers::CustomerRepositoryTrait;
