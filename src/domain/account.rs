//! Account domain entity.
//! Only the fields the donation flow reads are modelled here.

use uuid::Uuid;

/// Existing user account, looked up by email.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Uuid,
    pub email: String,
}
