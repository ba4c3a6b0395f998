//! Ports the use cases depend on.
//! Adapters in `crate::adapters`, `crate::stripe` and `crate::email` implement them.

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;
use uuid::Uuid;

use crate::domain::{Account, Donation};

#[derive(Error, Debug)]
pub enum RepositoryError {
    #[error("Not found: {0}")]
    NotFound(String),
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Corrupt row: {0}")]
    Corrupt(String),
}

pub type RepositoryResult<T> = Result<T, RepositoryError>;

#[async_trait]
pub trait DonationRepository: Send + Sync {
    async fn insert(&self, donation: &Donation) -> RepositoryResult<Donation>;
    async fn save(&self, donation: &Donation) -> RepositoryResult<()>;
    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Donation>>;
}

#[async_trait]
pub trait AccountRepository: Send + Sync {
    /// Case-insensitive lookup.
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Account>>;
}

/// Charge request in the processor's terms.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChargeRequest {
    pub amount: i64,
    pub currency: String,
    pub source: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct FundingSource {
    pub exp_month: Option<i32>,
    pub exp_year: Option<i32>,
    pub last4: Option<String>,
    pub country: Option<String>,
    pub brand: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Charge {
    #[serde(default)]
    pub id: String,
    pub paid: bool,
    pub source: Option<FundingSource>,
}

#[derive(Error, Debug)]
pub enum PaymentError {
    #[error("{0}")]
    Declined(String),
    #[error("{0}")]
    Transport(#[from] reqwest::Error),
}

impl PaymentError {
    /// Text surfaced to the caller under the `stripe` key.
    pub fn message(&self) -> String {
        self.to_string()
    }
}

#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, request: &ChargeRequest) -> Result<Charge, PaymentError>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmailMessage {
    pub to: String,
    pub subject: String,
    pub html_body: String,
}

#[derive(Error, Debug)]
pub enum NotificationError {
    #[error("Failed to send email: {0}")]
    SendFailed(String),
}

#[async_trait]
pub trait EmailSender: Send + Sync {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError>;
}
