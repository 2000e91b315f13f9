//! Customers module - reference data attached to quotes.

mod customer_model;
mod customer_service;
mod customer_traits;

pub use customer_model::{Customer, CustomerRef, CustomerStatus, CustomerUpdate, NewCustomer};
pub use customer_service::CustomerService;
pub use customer_traits::{CustomerRepositoryTrait, CustomerServiceTrait};
