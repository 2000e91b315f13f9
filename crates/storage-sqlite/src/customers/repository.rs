use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use std::sync::Arc;
use uuid::Uuid;

use super::model::CustomerDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::StorageError;
use crate::schema::customers;
use valvequote_core::customers::{
    Customer, CustomerRepositoryTrait, CustomerUpdate, NewCustomer,
};
use valvequote_core::errors::{DatabaseError, Result};

pub struct CustomerRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl CustomerRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        CustomerRepository { pool, writer }
    }
}

#[async_trait]
impl CustomerRepositoryTrait for CustomerRepository {
    fn list_customers(&self) -> Result<Vec<Customer>> {
        let mut conn = get_connection(&self.pool)?;
        let rows = customers::table
            .order(customers::name.asc())
            .select(CustomerDB::as_select())
            .load::<CustomerDB>(&mut conn)
            .map_err(StorageError::from)?;
        Ok(rows.into_iter().map(Customer::from).collect())
    }

    fn get_customer(&self, customer_id: &str) -> Result<Option<Customer>> {
        let mut conn = get_connection(&self.pool)?;
        let row = customers::table
            .find(customer_id)
            .select(CustomerDB::as_select())
            .first::<CustomerDB>(&mut conn)
            .optional()
            .map_err(StorageError::from)?;
        Ok(row.map(Customer::from))
    }

    async fn create_customer(&self, new_customer: NewCustomer) -> Result<Customer> {
        let now = Utc::now().naive_utc();
        let row = CustomerDB {
            id: new_customer
                .id
                .filter(|id| !id.trim().is_empty())
                .unwrap_or_else(|| Uuid::new_v4().to_string()),
            name: new_customer.name,
            email: new_customer.email,
            phone: new_customer.phone,
            address: new_customer.address,
            country: new_customer.country,
            tax_id: new_customer.tax_id,
            status: new_customer.status.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Customer> {
                let created = diesel::insert_into(customers::table)
                    .values(&row)
                    .returning(CustomerDB::as_returning())
                    .get_result(conn)
                    .map_err(StorageError::from)?;
                Ok(Customer::from(created))
            })
            .await
    }

    async fn update_customer(&self, update: CustomerUpdate) -> Result<Customer> {
        let now = Utc::now().naive_utc();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Customer> {
                let updated = diesel::update(customers::table.find(&update.id))
                    .set((
                        customers::name.eq(&update.name),
                        customers::email.eq(&update.email),
                        customers::phone.eq(&update.phone),
                        customers::address.eq(&update.address),
                        customers::country.eq(&update.country),
                        customers::tax_id.eq(&update.tax_id),
                        customers::status.eq(update.status.as_str()),
                        customers::updated_at.eq(now),
                    ))
                    .returning(CustomerDB::as_returning())
                    .get_result(conn)
                    .optional()
                    .map_err(StorageError::from)?
                    .ok_or_else(|| DatabaseError::NotFound(format!("Customer {}", update.id)))?;
                Ok(Customer::from(updated))
            })
            .await
    }

    async fn delete_customer(&self, customer_id: &str) -> Result<usize> {
        let customer_id = customer_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<usize> {
                let affected = diesel::delete(customers::table.find(customer_id))
                    .execute(conn)
                    .map_err(StorageError::from)?;
                Ok(affected)
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use tempfile::tempdir;
    use valvequote_core::customers::CustomerStatus;
    use valvequote_core::errors::Error;

    fn create_test_repository() -> (CustomerRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db");
        let pool = create_pool(&db_path.to_string_lossy()).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        (CustomerRepository::new(pool, writer), temp_dir)
    }

    fn new_customer(id: Option<&str>) -> NewCustomer {
        NewCustomer {
            id: id.map(str::to_string),
            name: "Acme Refineries".to_string(),
            email: "buyer@acme.in".to_string(),
            phone: "+91 22 5555 0100".to_string(),
            address: "Plot 7, MIDC, Pune".to_string(),
            country: "India".to_string(),
            tax_id: Some("27AAPFU0939F1ZV".to_string()),
            status: CustomerStatus::Active,
        }
    }

    #[tokio::test]
    async fn test_create_and_update_customer() {
        let (repo, _temp_dir) = create_test_repository();
        let created = repo.create_customer(new_customer(None)).await.unwrap();
        assert!(!created.id.is_empty());
        assert_eq!(created.tax_id.as_deref(), Some("27AAPFU0939F1ZV"));

        let updated = repo
            .update_customer(CustomerUpdate {
                id: created.id.clone(),
                name: created.name.clone(),
                email: created.email.clone(),
                phone: created.phone.clone(),
                address: created.address.clone(),
                country: "Germany".to_string(),
                tax_id: None,
                status: CustomerStatus::Inactive,
            })
            .await
            .unwrap();
        assert_eq!(updated.status, CustomerStatus::Inactive);
        assert!(updated.tax_id.is_none());

        let loaded = repo.get_customer(&created.id).unwrap().unwrap();
        assert_eq!(loaded, updated);
    }

    #[tokio::test]
    async fn test_duplicate_id_is_unique_violation() {
        let (repo, _temp_dir) = create_test_repository();
        repo.create_customer(new_customer(Some("c-1"))).await.unwrap();
        let result = repo.create_customer(new_customer(Some("c-1"))).await;
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::UniqueViolation(_)))
        ));
        assert_eq!(repo.list_customers().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_update_and_delete_missing_customer() {
        let (repo, _temp_dir) = create_test_repository();
        let result = repo
            .update_customer(CustomerUpdate {
                id: "nobody".to_string(),
                name: "N".to_string(),
                email: "n@example.com".to_string(),
                phone: "1".to_string(),
                address: "A".to_string(),
                country: "Germany".to_string(),
                tax_id: None,
                status: CustomerStatus::Active,
            })
            .await;
        assert!(matches!(
            result,
            Err(Error::Database(DatabaseError::NotFound(_)))
        ));
        assert_eq!(repo.delete_customer("nobody").await.unwrap(), 0);
    }
}
