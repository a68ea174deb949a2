//! Customer Records

use jiff::Timestamp;

use crate::{auth::UserUuid, uuids::TypedUuid};

/// Customer UUID
pub type CustomerUuid = TypedUuid<CustomerRecord>;

/// Customer Record
#[derive(Debug, Clone, PartialEq)]
pub struct CustomerRecord {
    pub uuid: CustomerUuid,
    pub user_uuid: UserUuid,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}
