//! Database records and API payloads for the customers slice.
//!
//! Records mirror the stored rows (snake_case fields, string record IDs via
//! `type::string(id)` projections); payloads are the camelCase API contract.

use crate::error::CustomersError;
use serde::{Deserialize, Serialize};
use surrealdb::types::SurrealValue;
use utoipa::ToSchema;

#[derive(Debug, Clone, SurrealValue)]
pub struct CustomerRecord {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub note: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

#[derive(Debug, Clone, SurrealValue)]
pub struct AddressRecord {
    pub id: String,
    pub customer: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub label: Option<String>,
}

/// Pre-keyed address payload bound into the customer create transaction.
#[derive(Debug, Clone, SurrealValue)]
pub struct AddressSeed {
    pub key: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewAddress {
    pub street: String,
    pub city: String,
    pub postal_code: String,
    #[serde(default)]
    pub label: Option<String>,
}

impl NewAddress {
    pub(crate) fn validate(&self) -> Result<(), CustomersError> {
        if self.street.trim().is_empty() || self.city.trim().is_empty() {
            return Err(CustomersError::Validation(
                "Address street and city must not be empty".into(),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CreateCustomerRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
    pub addresses: Vec<NewAddress>,
}

impl CreateCustomerRequest {
    pub(crate) fn validate(&self) -> Result<(), CustomersError> {
        validate_contact(&self.name, &self.email)?;
        if self.addresses.is_empty() {
            return Err(CustomersError::Validation(
                "A customer requires at least one address".into(),
            ));
        }
        for address in &self.addresses {
            address.validate()?;
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct UpdateCustomerRequest {
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub note: Option<String>,
}

impl UpdateCustomerRequest {
    pub(crate) fn validate(&self) -> Result<(), CustomersError> {
        validate_contact(&self.name, &self.email)
    }
}

fn validate_contact(name: &str, email: &str) -> Result<(), CustomersError> {
    if name.trim().is_empty() {
        return Err(CustomersError::Validation("Customer name must not be empty".into()));
    }
    if email.trim().is_empty() || !email.contains('@') {
        return Err(CustomersError::Validation("Customer email is not valid".into()));
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddressResponse {
    pub id: String,
    pub street: String,
    pub city: String,
    pub postal_code: String,
    pub label: Option<String>,
}

impl From<AddressRecord> for AddressResponse {
    fn from(record: AddressRecord) -> Self {
        Self {
            id: record.id,
            street: record.street,
            city: record.city,
            postal_code: record.postal_code,
            label: record.label,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub note: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<CustomerRecord> for CustomerResponse {
    fn from(record: CustomerRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
            email: record.email,
            phone: record.phone,
            note: record.note,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDetailResponse {
    pub id: String,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub note: Option<String>,
    pub created_at: String,
    pub updated_at: String,
    pub addresses: Vec<AddressResponse>,
}

impl CustomerDetailResponse {
    pub(crate) fn from_parts(customer: CustomerRecord, addresses: Vec<AddressRecord>) -> Self {
        Self {
            id: customer.id,
            name: customer.name,
            email: customer.email,
            phone: customer.phone,
            note: customer.note,
            created_at: customer.created_at,
            updated_at: customer.updated_at,
            addresses: addresses.into_iter().map(Into::into).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_requires_an_address() {
        let request = CreateCustomerRequest {
            name: "Jansen BV".into(),
            email: "info@jansen.example".into(),
            phone: None,
            note: None,
            addresses: vec![],
        };
        assert!(matches!(request.validate(), Err(CustomersError::Validation(_))));
    }

    #[test]
    fn create_rejects_invalid_email() {
        let request = CreateCustomerRequest {
            name: "Jansen BV".into(),
            email: "not-an-email".into(),
            phone: None,
            note: None,
            addresses: vec![NewAddress {
                street: "Main St 1".into(),
                city: "Utrecht".into(),
                postal_code: "3511AA".into(),
                label: None,
            }],
        };
        assert!(request.validate().is_err());
    }
}
