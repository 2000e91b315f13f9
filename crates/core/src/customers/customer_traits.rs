//! Traits for customer repository and service.

use async_trait::async_trait;

use crate::Result;

use super::{Customer, CustomerRef, CustomerUpdate, NewCustomer};

/// Repository trait for customer persistence.
#[async_trait]
pub trait CustomerRepositoryTrait: Send + Sync {
    fn list_customers(&self) -> Result<Vec<Customer>>;
    fn get_customer(&self, id: &str) -> Result<Option<Customer>>;
    async fn create_customer(&self, customer: NewCustomer) -> Result<Customer>;
    async fn update_customer(&self, customer: CustomerUpdate) -> Result<Customer>;
    async fn delete_customer(&self, id: &str) -> Result<usize>;
}

/// Service trait for customer business logic.
#[async_trait]
pub trait CustomerServiceTrait: Send + Sync {
    /// Read-only view used when attaching a customer to a quote.
    fn list_customers(&self) -> Result<Vec<CustomerRef>>;
    fn get_customers(&self) -> Result<Vec<Customer>>;
    fn get_customer(&self, id: &str) -> Result<Customer>;
    async fn create_customer(&self, customer: NewCustomer) -> Result<Customer>;
    async fn update_customer(&self, customer: CustomerUpdate) -> Result<Customer>;
    async fn delete_customer(&self, id: &str) -> Result<usize>;
}
