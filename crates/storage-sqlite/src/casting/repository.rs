use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use super::model::CastingTypeDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::casting_types;
use valvequote_core::casting::{CastingRepositoryTrait, CastingType, NewCastingType};
use valvequote_core::errors::{DatabaseError, Error, Result};

pub struct CastingRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CastingRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CastingRepository { pool, writer }
    }
}

#[async_trait]
impl CastingRepositoryTrait for CastingRepository {
    fn get_casting_types(&self) -> Result<Vec<CastingType>> {
        let mut conn = get_connection(&self.pool)?;
        casting_types::table
            .order(casting_types::name.asc())
            .select(CastingTypeDB::as_select())
            .load::<CastingTypeDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(|row| CastingType::try_from(row).map_err(Error::from))
            .collect()
    }

    fn get_casting_type(&self, type_id: &str) -> Result<Option<CastingType>> {
        let mut conn = get_connection(&self.pool)?;
        casting_types::table
            .find(type_id)
            .select(CastingTypeDB::as_select())
            .first::<CastingTypeDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(CastingType::try_from)
            .transpose()
            .map_err(Error::from)
    }

    async fn create_casting_type(&self, new_type: NewCastingType) -> Result<CastingType> {
        let now = Utc::now().naive_utc();
        let row = CastingTypeDB {
            id: new_type
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: new_type.name,
            series: "[]".to_string(),
            created_at: now,
            updated_at: now,
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CastingType> {
                let created = diesel::insert_into(casting_types::table)
                    .values(&row)
                    .returning(CastingTypeDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(CastingType::try_from(created)?)
            })
            .await
    }

    async fn update_casting_type(&self, casting_type: CastingType) -> Result<CastingType> {
        let mut row = CastingTypeDB::try_from(&casting_type)?;
        row.updated_at = Utc::now().naive_utc();

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<CastingType> {
                let updated = diesel::update(casting_types::table.find(&row.id))
                    .set((
                        casting_types::name.eq(&row.name),
                        casting_types::series.eq(&row.series),
                        casting_types::updated_at.eq(row.updated_at),
                    ))
                    .returning(CastingTypeDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| {
                        DatabaseError::NotFound(format!("Casting type {}", row.id))
                    })?;
                Ok(CastingType::try_from(updated)?)
            })
            .await
    }

    async fn delete_casting_type(&self, type_id: &str) -> Result<usize> {
        let type_id = type_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let affected = diesel::delete(casting_types::table.find(type_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }
}
