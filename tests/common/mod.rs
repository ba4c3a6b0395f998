#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

use iacp_core::domain::{Account, Donation};
use iacp_core::ports::{
    AccountRepository, Charge, ChargeRequest, DonationRepository, EmailMessage, EmailSender,
    FundingSource, NotificationError, PaymentError, PaymentGateway, RepositoryError,
    RepositoryResult,
};
use iacp_core::use_cases::Donate;

#[derive(Default)]
pub struct InMemoryDonations {
    pub rows: Mutex<HashMap<Uuid, Donation>>,
    pub saves: Mutex<usize>,
    pub fail_insert: bool,
    pub fail_save: bool,
}

impl InMemoryDonations {
    pub fn all(&self) -> Vec<Donation> {
        self.rows.lock().unwrap().values().cloned().collect()
    }

    pub fn only(&self) -> Donation {
        let all = self.all();
        assert_eq!(all.len(), 1, "expected exactly one donation");
        all.into_iter().next().unwrap()
    }

    pub fn save_count(&self) -> usize {
        *self.saves.lock().unwrap()
    }
}

#[async_trait]
impl DonationRepository for InMemoryDonations {
    async fn insert(&self, donation: &Donation) -> RepositoryResult<Donation> {
        if self.fail_insert {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        self.rows
            .lock()
            .unwrap()
            .insert(donation.id, donation.clone());
        Ok(donation.clone())
    }

    async fn save(&self, donation: &Donation) -> RepositoryResult<()> {
        if self.fail_save {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        let mut rows = self.rows.lock().unwrap();
        if !rows.contains_key(&donation.id) {
            return Err(RepositoryError::NotFound(donation.id.to_string()));
        }
        rows.insert(donation.id, donation.clone());
        *self.saves.lock().unwrap() += 1;
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Donation>> {
        Ok(self.rows.lock().unwrap().get(&id).cloned())
    }
}

#[derive(Default)]
pub struct InMemoryAccounts {
    pub accounts: Vec<Account>,
    pub fail_lookup: bool,
}

impl InMemoryAccounts {
    pub fn with(email: &str) -> (Self, Uuid) {
        let id = Uuid::new_v4();
        let accounts = vec![Account {
            id,
            email: email.to_string(),
        }];
        (
            Self {
                accounts,
                ..Default::default()
            },
            id,
        )
    }
}

#[async_trait]
impl AccountRepository for InMemoryAccounts {
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Option<Account>> {
        if self.fail_lookup {
            return Err(RepositoryError::Database(sqlx::Error::PoolTimedOut));
        }
        let wanted = email.to_lowercase();
        Ok(self
            .accounts
            .iter()
            .find(|a| a.email.to_lowercase() == wanted)
            .cloned())
    }
}

#[derive(Debug, Clone)]
pub enum ChargeOutcome {
    Paid,
    Unpaid,
    Declined(String),
}

pub struct FakeGateway {
    pub outcome: ChargeOutcome,
    pub source: Option<FundingSource>,
    pub requests: Mutex<Vec<ChargeRequest>>,
}

impl FakeGateway {
    pub fn new(outcome: ChargeOutcome) -> Self {
        Self {
            outcome,
            source: None,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_card(mut self) -> Self {
        self.source = Some(visa());
        self
    }

    pub fn requests(&self) -> Vec<ChargeRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    async fn charge(&self, request: &ChargeRequest) -> Result<Charge, PaymentError> {
        self.requests.lock().unwrap().push(request.clone());
        match &self.outcome {
            ChargeOutcome::Paid => Ok(Charge {
                id: format!("ch_{}", self.requests.lock().unwrap().len()),
                paid: true,
                source: self.source.clone(),
            }),
            ChargeOutcome::Unpaid => Ok(Charge {
                id: "ch_unpaid".to_string(),
                paid: false,
                source: self.source.clone(),
            }),
            ChargeOutcome::Declined(message) => Err(PaymentError::Declined(message.clone())),
        }
    }
}

pub fn visa() -> FundingSource {
    FundingSource {
        exp_month: Some(12),
        exp_year: Some(2031),
        last4: Some("4242".to_string()),
        country: Some("US".to_string()),
        brand: Some("Visa".to_string()),
    }
}

#[derive(Default)]
pub struct RecordingMailer {
    pub sent: Mutex<Vec<EmailMessage>>,
    pub fail: bool,
}

impl RecordingMailer {
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Default::default()
        }
    }
}

impl RecordingMailer {
    pub fn sent(&self) -> Vec<EmailMessage> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl EmailSender for RecordingMailer {
    async fn send(&self, message: &EmailMessage) -> Result<(), NotificationError> {
        self.sent.lock().unwrap().push(message.clone());
        if self.fail {
            return Err(NotificationError::SendFailed("connection refused".to_string()));
        }
        Ok(())
    }
}

pub struct Harness {
    pub donations: Arc<InMemoryDonations>,
    pub gateway: Arc<FakeGateway>,
    pub mailer: Arc<RecordingMailer>,
    pub donate: Donate,
}

impl Harness {
    pub fn new(donations: InMemoryDonations, accounts: InMemoryAccounts, gateway: FakeGateway) -> Self {
        Self::with_mailer(donations, accounts, gateway, RecordingMailer::default())
    }

    pub fn with_mailer(
        donations: InMemoryDonations,
        accounts: InMemoryAccounts,
        gateway: FakeGateway,
        mailer: RecordingMailer,
    ) -> Self {
        let donations = Arc::new(donations);
        let gateway = Arc::new(gateway);
        let mailer = Arc::new(mailer);
        let donate = Donate::new(
            donations.clone(),
            Arc::new(accounts),
            gateway.clone(),
            mailer.clone(),
        );
        Self {
            donations,
            gateway,
            mailer,
            donate,
        }
    }

    pub fn with_outcome(outcome: ChargeOutcome) -> Self {
        Self::new(
            InMemoryDonations::default(),
            InMemoryAccounts::default(),
            FakeGateway::new(outcome),
        )
    }
}
