use async_trait::async_trait;
use diesel::prelude::*;
use log::debug;
use std::sync::Arc;

use super::model::QuoteDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::quotes;
use valvequote_core::errors::{Error, Result};
use valvequote_core::quotes::{Quote, QuoteRepositoryTrait};

/// Append-only: quotes are inserted once and never updated or deleted.
pub struct QuoteRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl QuoteRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        QuoteRepository { pool, writer }
    }
}

#[async_trait]
impl QuoteRepositoryTrait for QuoteRepository {
    fn list_quotes(&self) -> Result<Vec<Quote>> {
        let mut conn = get_connection(&self.pool)?;
        quotes::table
            .order(quotes::created_at.desc())
            .select(QuoteDB::as_select())
            .load::<QuoteDB>(&mut conn)
            .map_err(StorageError::from)?
            .into_iter()
            .map(|row| Quote::try_from(row).map_err(Error::from))
            .collect()
    }

    fn get_quote(&self, quote_id: &str) -> Result<Option<Quote>> {
        let mut conn = get_connection(&self.pool)?;
        quotes::table
            .find(quote_id)
            .select(QuoteDB::as_select())
            .first::<QuoteDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?
            .map(Quote::try_from)
            .transpose()
            .map_err(Error::from)
    }

    async fn save_quote(&self, quote: Quote) -> Result<String> {
        let row = QuoteDB::try_from(&quote)?;
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<String> {
                diesel::insert_into(quotes::table)
                    .values(&row)
                    .execute(conn)
                    .map_err(StorageError::from)?;
                debug!("Stored quote {} ({})", row.quote_number, row.id);
                Ok(row.id)
            })
            .await
    }
}
