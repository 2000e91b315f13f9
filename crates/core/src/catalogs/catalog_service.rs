//! Catalog service implementation.

use async_trait::async_trait;
use log::{info, warn};
use std::sync::Arc;

use crate::errors::{DatabaseError, Error, ValidationError};
use crate::pricing::{validate, PricingError, PricingTree};
use crate::Result;

use super::{default_catalogs, Catalog, CatalogRepositoryTrait, CatalogServiceTrait, NewCatalog};

pub struct CatalogService {
    repository: Arc<dyn CatalogRepositoryTrait>,
}

impl CatalogService {
    pub fn new(repository: Arc<dyn CatalogRepositoryTrait>) -> Self {
        Self { repository }
    }

    fn check_tree(catalog_id: &str, tree: &PricingTree) -> Result<()> {
        validate(tree).map_err(|e| {
            warn!("Rejected tree for catalog {}: {}", catalog_id, e);
            Error::from(PricingError::from(e))
        })
    }
}

#[async_trait]
impl CatalogServiceTrait for CatalogService {
    fn list_catalogs(&self) -> Result<Vec<Catalog>> {
        self.repository.list_catalogs()
    }

    fn get_catalog(&self, id: &str) -> Result<Catalog> {
        self.repository
            .get_catalog(id)?
            .ok_or_else(|| DatabaseError::NotFound(format!("Catalog {}", id)).into())
    }

    fn load_tree(&self, catalog_id: &str) -> Result<PricingTree> {
        Ok(self.get_catalog(catalog_id)?.tree)
    }

    async fn save_tree(&self, catalog_id: &str, tree: PricingTree) -> Result<Catalog> {
        let existing = self.get_catalog(catalog_id)?;
        Self::check_tree(catalog_id, &tree)?;

        let leaves = tree.leaf_count();
        let mut catalog = NewCatalog::from(existing);
        catalog.tree = tree;
        let saved = self.repository.save_catalog(catalog).await?;
        info!("Saved catalog {} ({} options)", catalog_id, leaves);
        Ok(saved)
    }

    async fn create_catalog(&self, catalog: NewCatalog) -> Result<Catalog> {
        if catalog.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()).into());
        }
        if catalog.name.trim().is_empty() {
            return Err(ValidationError::MissingField("name".to_string()).into());
        }
        if self.repository.get_catalog(&catalog.id)?.is_some() {
            return Err(DatabaseError::UniqueViolation(format!(
                "Catalog {} already exists",
                catalog.id
            ))
            .into());
        }
        Self::check_tree(&catalog.id, &catalog.tree)?;
        self.repository.save_catalog(catalog).await
    }

    async fn delete_catalog(&self, id: &str) -> Result<usize> {
        let deleted = self.repository.delete_catalog(id).await?;
        if deleted > 0 {
            info!("Deleted catalog {}", id);
        }
        Ok(deleted)
    }

    async fn ensure_default_catalogs(&self) -> Result<usize> {
        let mut created = 0;
        for catalog in default_catalogs() {
            if self.repository.get_catalog(&catalog.id)?.is_none() {
                self.repository.save_catalog(catalog).await?;
                created += 1;
            }
        }
        if created > 0 {
            info!("Created {} default catalogs", created);
        }
        Ok(created)
    }
}
