//! Database model for catalogs. The pricing tree is stored as one JSON document.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use log::warn;

use crate::errors::StorageError;
use valvequote_core::catalogs::{Catalog, ComponentGroup, NewCatalog};

#[derive(Queryable, Identifiable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::catalogs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CatalogDB {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub component_group: String,
    pub tree: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl CatalogDB {
    pub fn from_new(catalog: &NewCatalog, now: NaiveDateTime) -> Result<Self, StorageError> {
        Ok(Self {
            id: catalog.id.clone(),
            name: catalog.name.clone(),
            description: catalog.description.clone(),
            component_group: catalog.group.as_str().to_string(),
            tree: serde_json::to_string(&catalog.tree)?,
            created_at: now,
            updated_at: now,
        })
    }
}

impl TryFrom<CatalogDB> for Catalog {
    type Error = StorageError;

    fn try_from(db: CatalogDB) -> Result<Self, Self::Error> {
        let group = db.component_group.parse().unwrap_or_else(|e| {
            warn!("Catalog {}: {}, treating as priced", db.id, e);
            ComponentGroup::Priced
        });
        Ok(Catalog {
            tree: serde_json::from_str(&db.tree)?,
            id: db.id,
            name: db.name,
            description: db.description,
            group,
            updated_at: db.updated_at,
        })
    }
}
