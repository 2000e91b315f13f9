//! Pending, unsaved edits to one catalog.

use std::sync::Arc;

use log::debug;

use crate::pricing::{
    apply_edit, validate, PricingTree, TreeEdit, TreeEditError, TreeValidationError,
};
use crate::Result;

use super::{Catalog, CatalogServiceTrait};

/// Holds the last saved tree and a pending copy that edits are applied to.
///
/// Edits replace the pending tree only when they succeed. Saving promotes the
/// pending tree; a failed save keeps it, and the dirty flag, for a retry.
#[derive(Debug, Clone)]
pub struct CatalogDraft {
    catalog_id: String,
    saved: Arc<PricingTree>,
    pending: PricingTree,
    dirty: bool,
}

impl CatalogDraft {
    pub fn new(catalog_id: impl Into<String>, tree: PricingTree) -> Self {
        Self {
            catalog_id: catalog_id.into(),
            pending: tree.clone(),
            saved: Arc::new(tree),
            dirty: false,
        }
    }

    /// Starts a draft from the stored tree of `catalog_id`.
    pub fn open(service: &dyn CatalogServiceTrait, catalog_id: &str) -> Result<Self> {
        Ok(Self::new(catalog_id, service.load_tree(catalog_id)?))
    }

    pub fn catalog_id(&self) -> &str {
        &self.catalog_id
    }

    pub fn pending(&self) -> &PricingTree {
        &self.pending
    }

    /// The tree as last loaded or saved, shareable with selectors.
    pub fn saved(&self) -> Arc<PricingTree> {
        Arc::clone(&self.saved)
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn apply(&mut self, edit: &TreeEdit) -> std::result::Result<(), TreeEditError> {
        self.pending = apply_edit(&self.pending, edit)?;
        self.dirty = true;
        debug!("Applied {:?} to draft of {}", edit, self.catalog_id);
        Ok(())
    }

    /// Full structural check of the pending tree.
    pub fn validate(&self) -> std::result::Result<(), TreeValidationError> {
        validate(&self.pending)
    }

    /// Throws away pending edits.
    pub fn discard(&mut self) {
        self.pending = (*self.saved).clone();
        self.dirty = false;
    }

    pub async fn save(&mut self, service: &dyn CatalogServiceTrait) -> Result<Catalog> {
        let catalog = service
            .save_tree(&self.catalog_id, self.pending.clone())
            .await?;
        self.saved = Arc::new(catalog.tree.clone());
        self.dirty = false;
        Ok(catalog)
    }
}
