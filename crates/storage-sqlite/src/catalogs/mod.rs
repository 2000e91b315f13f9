//! SQLite storage implementation for pricing catalogs.

mod model;
mod repository;

pub use model::CatalogDB;
pub use repository::CatalogRepository;

// Re-export trait from core for convenience
pub use valvequote_core::catalogs::CatalogRepositoryTrait;
