//! Customer service implementation.

use async_trait::async_trait;
use log::info;
use std::sync::Arc;

use crate::errors::DatabaseError;
use crate::Result;

use super::{
    Customer, CustomerRef, CustomerRepositoryTrait, CustomerServiceTrait, CustomerUpdate,
    NewCustomer,
};

pub struct CustomerService {
    repository: Arc<dyn CustomerRepositoryTrait>,
}

impl CustomerService {
    pub fn new(repository: Arc<dyn CustomerRepositoryTrait>) -> Self {
        Self { repository }
    }
}

#[async_trait]
impl CustomerServiceTrait for CustomerService {
    fn list_customers(&self) -> Result<Vec<CustomerRef>> {
        Ok(self
            .repository
            .list_customers()?
            .iter()
            .map(CustomerRef::from)
            .collect())
    }

    fn get_customers(&self) -> Result<Vec<Customer>> {
        self.repository.list_customers()
    }

    fn get_customer(&self, id: &str) -> Result<Customer> {
        self.repository
            .get_customer(id)?
            .ok_or_else(|| DatabaseError::NotFound(format!("Customer {}", id)).into())
    }

    async fn create_customer(&self, customer: NewCustomer) -> Result<Customer> {
        customer.validate()?;
        let created = self.repository.create_customer(customer.normalized()).await?;
        info!("Created customer {} ({})", created.name, created.id);
        Ok(created)
    }

    async fn update_customer(&self, customer: CustomerUpdate) -> Result<Customer> {
        customer.validate()?;
        self.repository.update_customer(customer.normalized()).await
    }

    async fn delete_customer(&self, id: &str) -> Result<usize> {
        self.repository.delete_customer(id).await
    }
}
