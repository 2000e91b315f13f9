use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;

use super::model::CatalogDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::catalogs;
use valvequote_core::catalogs::{Catalog, CatalogRepositoryTrait, NewCatalog};
use valvequote_core::errors::{Error, Result};

pub struct CatalogRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CatalogRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CatalogRepository { pool, writer }
    }
}

#[async_trait]
impl CatalogRepositoryTrait for CatalogRepository {
    fn list_catalogs(&self) -> Result<Vec<Catalog>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = catalogs::table
            .order((catalogs::created_at.asc(), catalogs::id.asc()))
            .select(CatalogDB::as_select())
            .load::<CatalogDB>(&mut conn)
            .map_err(StorageError::from)?;
        rows.into_iter()
            .map(|row| Catalog::try_from(row).map_err(Error::from))
            .collect()
    }

    fn get_catalog(&self, catalog_id: &str) -> Result<Option<Catalog>> {
        let mut conn = get_connection(&self.pool)?;
        let row = catalogs::table
            .find(catalog_id)
            .select(CatalogDB::as_select())
            .first::<CatalogDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        row.map(Catalog::try_from)
            .transpose()
            .map_err(Error::from)
    }

    async fn save_catalog(&self, catalog: NewCatalog) -> Result<Catalog> {
        let row = CatalogDB::from_new(&catalog, Utc::now().naive_utc())?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Catalog> {
                diesel::insert_into(catalogs::table)
                    .values(&row)
                    .on_conflict(catalogs::id)
                    .do_update()
                    .set((
                        catalogs::name.eq(&row.name),
                        catalogs::description.eq(&row.description),
                        catalogs::component_group.eq(&row.component_group),
                        catalogs::tree.eq(&row.tree),
                        catalogs::updated_at.eq(row.updated_at),
                    ))
                    .execute(conn)
                    .map_err(StorageError::from)?;

                let saved = catalogs::table
                    .find(&row.id)
                    .select(CatalogDB::as_select())
                    .first::<CatalogDB>(conn)
                    .map_err(StorageError::from)?;
                Ok(Catalog::try_from(saved)?)
            })
            .await
    }

    async fn delete_catalog(&self, catalog_id: &str) -> Result<usize> {
        let catalog_id = catalog_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let affected = diesel::delete(catalogs::table.find(catalog_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }
}
