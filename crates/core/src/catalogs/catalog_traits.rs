//! Traits for catalog repository and service.

use async_trait::async_trait;

use crate::pricing::PricingTree;
use crate::Result;

use super::{Catalog, NewCatalog};

/// Repository trait for catalog documents.
#[async_trait]
pub trait CatalogRepositoryTrait: Send + Sync {
    fn list_catalogs(&self) -> Result<Vec<Catalog>>;
    fn get_catalog(&self, id: &str) -> Result<Option<Catalog>>;
    /// Inserts or replaces the catalog with the same id.
    async fn save_catalog(&self, catalog: NewCatalog) -> Result<Catalog>;
    async fn delete_catalog(&self, id: &str) -> Result<usize>;
}

/// Service trait for catalog business logic.
#[async_trait]
pub trait CatalogServiceTrait: Send + Sync {
    fn list_catalogs(&self) -> Result<Vec<Catalog>>;
    fn get_catalog(&self, id: &str) -> Result<Catalog>;
    fn load_tree(&self, catalog_id: &str) -> Result<PricingTree>;
    /// Validates and persists a tree. Invalid trees are never written.
    async fn save_tree(&self, catalog_id: &str, tree: PricingTree) -> Result<Catalog>;
    async fn create_catalog(&self, catalog: NewCatalog) -> Result<Catalog>;
    async fn delete_catalog(&self, id: &str) -> Result<usize>;
    /// Creates any of the standard component catalogs that do not exist yet.
    async fn ensure_default_catalogs(&self) -> Result<usize>;
}
