//! Domain models for customers.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::{GST_COUNTRY, GST_NUMBER_LENGTH};
use crate::errors::{Result, ValidationError};

static EMAIL_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("Invalid email regex pattern")
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum CustomerStatus {
    #[default]
    Active,
    Inactive,
}

impl CustomerStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CustomerStatus::Active => "Active",
            CustomerStatus::Inactive => "Inactive",
        }
    }
}

impl std::str::FromStr for CustomerStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "Active" => Ok(CustomerStatus::Active),
            "Inactive" => Ok(CustomerStatus::Inactive),
            other => Err(ValidationError::InvalidInput(format!(
                "Unknown customer status: {}",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub country: String,
    /// GST number for Indian customers.
    pub tax_id: Option<String>,
    pub status: CustomerStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// The fields of a customer a quote needs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerRef {
    pub id: String,
    pub name: String,
    pub country: String,
    pub tax_id: Option<String>,
    pub status: CustomerStatus,
}

impl From<&Customer> for CustomerRef {
    fn from(customer: &Customer) -> Self {
        CustomerRef {
            id: customer.id.clone(),
            name: customer.name.clone(),
            country: customer.country.clone(),
            tax_id: customer.tax_id.clone(),
            status: customer.status,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewCustomer {
    pub id: Option<String>,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub country: String,
    pub tax_id: Option<String>,
    #[serde(default)]
    pub status: CustomerStatus,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerUpdate {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub country: String,
    pub tax_id: Option<String>,
    pub status: CustomerStatus,
}

/// Checks the contact fields shared by new and updated customers.
fn validate_contact(
    name: &str,
    email: &str,
    phone: &str,
    address: &str,
    country: &str,
    tax_id: Option<&str>,
) -> Result<()> {
    for (field, value) in [
        ("name", name),
        ("email", email),
        ("phone", phone),
        ("address", address),
    ] {
        if value.trim().is_empty() {
            return Err(ValidationError::MissingField(field.to_string()).into());
        }
    }

    if !EMAIL_REGEX.is_match(email.trim()) {
        return Err(ValidationError::InvalidInput(format!("Invalid email format: {}", email)).into());
    }

    if country == GST_COUNTRY {
        let gst = tax_id.map(str::trim).unwrap_or_default();
        if gst.is_empty() {
            return Err(ValidationError::MissingField("taxId".to_string()).into());
        }
        if gst.chars().count() != GST_NUMBER_LENGTH {
            return Err(ValidationError::InvalidInput(format!(
                "GST number must be {} characters",
                GST_NUMBER_LENGTH
            ))
            .into());
        }
    }
    Ok(())
}

/// Upper-cases the GST number and drops it for customers outside India.
fn normalize_tax_id(country: &str, tax_id: Option<String>) -> Option<String> {
    if country != GST_COUNTRY {
        return None;
    }
    tax_id
        .map(|t| t.trim().to_uppercase())
        .filter(|t| !t.is_empty())
}

impl NewCustomer {
    pub fn validate(&self) -> Result<()> {
        validate_contact(
            &self.name,
            &self.email,
            &self.phone,
            &self.address,
            self.country.trim(),
            self.tax_id.as_deref(),
        )
    }

    pub fn normalized(self) -> Self {
        let country = self.country.trim().to_string();
        NewCustomer {
            id: self.id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            tax_id: normalize_tax_id(&country, self.tax_id),
            country,
            status: self.status,
        }
    }
}

impl CustomerUpdate {
    pub fn validate(&self) -> Result<()> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::MissingField("id".to_string()).into());
        }
        validate_contact(
            &self.name,
            &self.email,
            &self.phone,
            &self.address,
            self.country.trim(),
            self.tax_id.as_deref(),
        )
    }

    pub fn normalized(self) -> Self {
        let country = self.country.trim().to_string();
        CustomerUpdate {
            id: self.id,
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            address: self.address.trim().to_string(),
            tax_id: normalize_tax_id(&country, self.tax_id),
            country,
            status: self.status,
        }
    }
}
