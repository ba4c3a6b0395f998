//! Donation domain entity.
//! One row per donation attempt together with its charge outcome.

use chrono::{DateTime, Utc};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Lifecycle of a donation. Only `Pending` may move, and only forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DonationStatus {
    Pending,
    Completed,
    Canceled,
}

impl DonationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DonationStatus::Pending => "pending",
            DonationStatus::Completed => "completed",
            DonationStatus::Canceled => "canceled",
        }
    }

    pub fn can_transition_to(&self, next: DonationStatus) -> bool {
        matches!(
            (self, next),
            (DonationStatus::Pending, DonationStatus::Completed)
                | (DonationStatus::Pending, DonationStatus::Canceled)
                | (DonationStatus::Canceled, DonationStatus::Canceled)
                | (DonationStatus::Completed, DonationStatus::Completed)
        )
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DonationStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(DonationStatus::Pending),
            "completed" => Ok(DonationStatus::Completed),
            "canceled" => Ok(DonationStatus::Canceled),
            other => Err(format!("unknown donation status: {}", other)),
        }
    }
}

/// Card metadata copied from the processor's funding source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardDetails {
    pub exp_month: Option<i32>,
    pub exp_year: Option<i32>,
    pub last4: Option<String>,
    pub country: Option<String>,
    pub brand: Option<String>,
}

/// Returned when a status change would move a settled donation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid donation status transition: {from} -> {to}")]
pub struct InvalidTransition {
    pub from: DonationStatus,
    pub to: DonationStatus,
}

#[derive(Debug, Clone)]
pub struct Donation {
    pub id: Uuid,
    pub amount: i32,
    pub token: String,
    pub email: String,
    pub full_name: String,
    pub zip_code: String,
    pub announce_amount: bool,
    pub announce_name: bool,
    pub status: DonationStatus,
    pub user_id: Option<Uuid>,
    pub card: CardDetails,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Donation {
    pub fn new(
        amount: i32,
        token: String,
        email: String,
        full_name: String,
        zip_code: String,
        announce_amount: bool,
        announce_name: bool,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            amount,
            token,
            email,
            full_name,
            zip_code,
            announce_amount,
            announce_name,
            status: DonationStatus::Pending,
            user_id: None,
            card: CardDetails::default(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Processor description for the charge.
    pub fn charge_description(&self) -> String {
        format!(
            "One time donation from {} <{}> to IA-CP Organization.",
            self.full_name, self.email
        )
    }

    /// Amount in the processor's minor unit. Assumes a two-decimal currency.
    pub fn charge_amount(&self) -> i64 {
        i64::from(self.amount) * 100
    }

    pub fn link_account(&mut self, user_id: Uuid) {
        self.user_id = Some(user_id);
    }

    pub fn transition_to(&mut self, next: DonationStatus) -> Result<(), InvalidTransition> {
        if !self.status.can_transition_to(next) {
            return Err(InvalidTransition {
                from: self.status,
                to: next,
            });
        }
        self.status = next;
        Ok(())
    }
}
