//! Database model for quotes.
//!
//! The full quote is kept as a JSON document; the remaining columns duplicate
//! the fields needed to list and filter without decoding it.

use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::errors::StorageError;
use valvequote_core::quotes::Quote;

#[derive(Queryable, Identifiable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::quotes)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct QuoteDB {
    pub id: String,
    pub quote_number: String,
    pub customer_id: String,
    pub customer_name: String,
    pub currency: String,
    pub base_total: String,
    pub total: String,
    pub document: String,
    pub created_at: NaiveDateTime,
}

impl TryFrom<&Quote> for QuoteDB {
    type Error = StorageError;

    fn try_from(quote: &Quote) -> Result<Self, Self::Error> {
        Ok(QuoteDB {
            id: quote.id.clone(),
            quote_number: quote.quote_number.clone(),
            customer_id: quote.customer.id.clone(),
            customer_name: quote.customer.name.clone(),
            currency: quote.currency.clone(),
            base_total: quote.base_total.to_string(),
            total: quote.total.to_string(),
            document: serde_json::to_string(quote)?,
            created_at: quote.created_at,
        })
    }
}

impl TryFrom<QuoteDB> for Quote {
    type Error = StorageError;

    fn try_from(db: QuoteDB) -> Result<Self, Self::Error> {
        let mut quote: Quote = serde_json::from_str(&db.document)?;
        // The row id is authoritative.
        quote.id = db.id;
        Ok(quote)
    }
}
