//! Customers Data

use crate::{
    auth::UserUuid,
    domain::{
        customers::{errors::CustomersServiceError, records::CustomerUuid},
        validation::{is_valid_email, is_valid_phone, required_text},
    },
};

/// New Customer Data
#[derive(Debug, Clone, PartialEq)]
pub struct NewCustomer {
    pub uuid: CustomerUuid,
    pub user_uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl NewCustomer {
    pub(crate) fn validated(self) -> Result<Self, CustomersServiceError> {
        let (name, email, phone) = validate_contact(&self.name, &self.email, &self.phone)?;

        Ok(Self {
            name,
            email,
            phone,
            ..self
        })
    }
}

/// Customer Update Data
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerUpdate {
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl CustomerUpdate {
    pub(crate) fn validated(self) -> Result<Self, CustomersServiceError> {
        let (name, email, phone) = validate_contact(&self.name, &self.email, &self.phone)?;

        Ok(Self { name, email, phone })
    }
}

fn validate_contact(
    name: &str,
    email: &str,
    phone: &str,
) -> Result<(String, String, String), CustomersServiceError> {
    let name = required_text(name)
        .ok_or_else(|| CustomersServiceError::Validation("name must not be blank".to_string()))?;

    let email = email.trim().to_string();

    if !is_valid_email(&email) {
        return Err(CustomersServiceError::Validation(
            "email address is not valid".to_string(),
        ));
    }

    let phone = phone.trim().to_string();

    if !is_valid_phone(&phone) {
        return Err(CustomersServiceError::Validation(
            "phone number must be entered in the format '+999999999', up to 15 digits".to_string(),
        ));
    }

    Ok((name, email, phone))
}
