//! Donate use case.
//! Records a donation, charges the payment token and mails a receipt.
//!
//! Callers only ever see two error shapes: `stripe` carrying the processor's
//! message, or `general` for everything else. No idempotency key is sent, so
//! resubmitting the same token creates a second donation and a second charge.

use serde::Serialize;
use std::sync::Arc;

use crate::domain::{CardDetails, Donation, DonationStatus};
use crate::email::send_donation_email;
use crate::error::AppError;
use crate::ports::{
    AccountRepository, ChargeRequest, DonationRepository, EmailSender, PaymentGateway,
};
use crate::utils::sanitize::mask_secret;

pub const DEFAULT_CURRENCY: &str = "usd";
pub const STRIPE_ERROR_KEY: &str = "stripe";
pub const GENERAL_ERROR_KEY: &str = "general";
pub const GENERAL_ERROR_MESSAGE: &str = "Unexpected server error";

/// Input for the Donate use case.
#[derive(Debug, Clone)]
pub struct DonateInput {
    pub token: String,
    pub email: String,
    pub full_name: String,
    pub zip_code: String,
    pub amount: i32,
    pub announce_amount: bool,
    pub announce_name: bool,
}

/// Caller-visible error.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub key: String,
    pub message: String,
}

impl FieldError {
    pub fn stripe(message: impl Into<String>) -> Self {
        Self {
            key: STRIPE_ERROR_KEY.to_string(),
            message: message.into(),
        }
    }

    pub fn general() -> Self {
        Self {
            key: GENERAL_ERROR_KEY.to_string(),
            message: GENERAL_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Output of the Donate use case. Empty `errors` means success.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DonateOutput {
    pub errors: Vec<FieldError>,
}

#[derive(Debug, Clone)]
pub struct DonateOptions {
    pub currency: String,
    /// Mask the payment token in log records.
    pub redact_token: bool,
}

impl Default for DonateOptions {
    fn default() -> Self {
        Self {
            currency: DEFAULT_CURRENCY.to_string(),
            redact_token: false,
        }
    }
}

/// Use case for processing one donation.
pub struct Donate {
    donations: Arc<dyn DonationRepository>,
    accounts: Arc<dyn AccountRepository>,
    payments: Arc<dyn PaymentGateway>,
    mailer: Arc<dyn EmailSender>,
    options: DonateOptions,
}

impl Donate {
    pub fn new(
        donations: Arc<dyn DonationRepository>,
        accounts: Arc<dyn AccountRepository>,
        payments: Arc<dyn PaymentGateway>,
        mailer: Arc<dyn EmailSender>,
    ) -> Self {
        Self {
            donations,
            accounts,
            payments,
            mailer,
            options: DonateOptions::default(),
        }
    }

    pub fn with_options(mut self, options: DonateOptions) -> Self {
        self.options = options;
        self
    }

    /// Never fails: internal errors are logged and collapsed into `general`.
    pub async fn execute(&self, input: DonateInput) -> DonateOutput {
        let token = self.loggable_token(&input.token);

        match self.run(&input, &token).await {
            Ok(errors) => DonateOutput { errors },
            Err(e) => {
                tracing::error!(
                    email = %input.email,
                    full_name = %input.full_name,
                    amount = input.amount,
                    zip_code = %input.zip_code,
                    token = %token,
                    error = %e,
                    "Donation failed"
                );
                DonateOutput {
                    errors: vec![FieldError::general()],
                }
            }
        }
    }

    async fn run(&self, input: &DonateInput, token: &str) -> Result<Vec<FieldError>, AppError> {
        let mut donation = self
            .donations
            .insert(&Donation::new(
                input.amount,
                input.token.clone(),
                input.email.clone(),
                input.full_name.clone(),
                input.zip_code.clone(),
                input.announce_amount,
                input.announce_name,
            ))
            .await?;

        let description = donation.charge_description();
        let amount = donation.charge_amount();

        let mut errors = Vec::new();

        if let Some(account) = self.accounts.find_by_email(&input.email).await? {
            donation.link_account(account.id);
            self.donations.save(&donation).await?;
        }

        let request = ChargeRequest {
            amount,
            currency: self.options.currency.clone(),
            source: input.token.clone(),
            description,
        };

        match self.payments.charge(&request).await {
            Ok(charge) => {
                // paid=false still takes the success branch below
                let next = if charge.paid {
                    DonationStatus::Completed
                } else {
                    DonationStatus::Canceled
                };
                donation.transition_to(next)?;

                if let Some(source) = charge.source {
                    donation.card = CardDetails {
                        exp_month: source.exp_month,
                        exp_year: source.exp_year,
                        last4: source.last4,
                        country: source.country,
                        brand: source.brand,
                    };
                }
                self.donations.save(&donation).await?;
            }
            Err(e) => errors.push(FieldError::stripe(e.message())),
        }

        if !errors.is_empty() {
            tracing::error!(
                donation_id = %donation.id,
                email = %input.email,
                full_name = %input.full_name,
                amount = input.amount,
                zip_code = %input.zip_code,
                token = %token,
                errors = ?errors,
                "Donation failed"
            );
            donation.transition_to(DonationStatus::Canceled)?;
            self.donations.save(&donation).await?;
        } else {
            tracing::info!(
                donation_id = %donation.id,
                status = %donation.status,
                email = %input.email,
                full_name = %input.full_name,
                amount = input.amount,
                zip_code = %input.zip_code,
                token = %token,
                "Donation succeeded"
            );
            send_donation_email(self.mailer.as_ref(), &input.email, input.amount).await;
            tracing::info!(
                donation_id = %donation.id,
                email = %input.email,
                full_name = %input.full_name,
                amount = input.amount,
                zip_code = %input.zip_code,
                token = %token,
                "Donation email has been sent"
            );
        }

        Ok(errors)
    }

    fn loggable_token(&self, token: &str) -> String {
        if self.options.redact_token {
            mask_secret(token)
        } else {
            token.to_string()
        }
    }
}
