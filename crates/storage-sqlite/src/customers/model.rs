//! Database model for customers.

use chrono::NaiveDateTime;
use diesel::prelude::*;
use log::warn;

use valvequote_core::customers::{Customer, CustomerStatus};

#[derive(Queryable, Identifiable, Selectable, Insertable, Debug, Clone, PartialEq)]
#[diesel(table_name = crate::schema::customers)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct CustomerDB {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub country: String,
    pub tax_id: Option<String>,
    pub status: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<CustomerDB> for Customer {
    fn from(db: CustomerDB) -> Self {
        let status = db.status.parse().unwrap_or_else(|e| {
            warn!("Customer {}: {}", db.id, e);
            CustomerStatus::Active
        });
        Customer {
            id: db.id,
            name: db.name,
            email: db.email,
            phone: db.phone,
            address: db.address,
            country: db.country,
            tax_id: db.tax_id,
            status,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}
