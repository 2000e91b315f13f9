//! Catalogs module - named pricing trees for each valve component.

mod catalog_draft;
mod catalog_model;
mod catalog_service;
mod catalog_traits;


pub use catalog_draft::CatalogDraft;
pub use catalog_model::{default_catalogs, Catalog, ComponentGroup, NewCatalog};
pub use catalog_service::CatalogService;
pub use catalog_traits::{CatalogRepositoryTrait, CatalogServiceTrait};
