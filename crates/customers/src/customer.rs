use serde::Serialize;

use shopstock_core::{CustomerId, DomainError, DomainResult, Entity};

/// Contact details for a customer.
///
/// Email is always present; phone and address are omitted from the serialized
/// form when absent (never emitted as null).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactInfo {
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// A customer. Immutable once created (no update operation exists).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Customer {
    customer_id: CustomerId,
    name: String,
    email: String,
    phone: Option<String>,
    address: Option<String>,
}

impl Customer {
    pub fn new(
        customer_id: CustomerId,
        name: impl Into<String>,
        email: impl Into<String>,
        phone: Option<String>,
        address: Option<String>,
    ) -> DomainResult<Self> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(DomainError::validation("name cannot be empty"));
        }
        let email = email.into();
        if email.trim().is_empty() {
            return Err(DomainError::validation("email cannot be empty"));
        }

        Ok(Self {
            customer_id,
            name,
            email,
            phone,
            address,
        })
    }

    pub fn customer_id(&self) -> &CustomerId {
        &self.customer_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn contact_info(&self) -> ContactInfo {
        ContactInfo {
            email: self.email.clone(),
            phone: self.phone.clone(),
            address: self.address.clone(),
        }
    }
}

impl Entity for Customer {
    type Id = CustomerId;

    fn id(&self) -> &Self::Id {
        &self.customer_id
    }
}
