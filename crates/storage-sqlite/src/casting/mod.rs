//! SQLite storage implementation for casting types and their series.

mod model;
mod repository;

pub use model::CastingTypeDB;
pub use repository::CastingRepository;

// Re-export trait from core for convenience
pub use valvequote_core::casting::CastingRepositoryTrait;
