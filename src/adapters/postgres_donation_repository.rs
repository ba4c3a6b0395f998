//! Postgres implementation of DonationRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{CardDetails, Donation, DonationStatus};
use crate::ports::{DonationRepository, RepositoryError, RepositoryResult};

const DONATION_COLUMNS: &str = "id, amount, token, email, full_name, zip_code, \
    announce_amount, announce_name, status, user_id, \
    exp_month, exp_year, last4, country, brand, created_at, updated_at";

/// Postgres-backed donation repository.
#[derive(Clone)]
pub struct PostgresDonationRepository {
    pool: PgPool,
}

impl PostgresDonationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DonationRepository for PostgresDonationRepository {
    async fn insert(&self, donation: &Donation) -> RepositoryResult<Donation> {
        let sql = format!(
            r#"
            INSERT INTO donations (
                id, amount, token, email, full_name, zip_code,
                announce_amount, announce_name, status, user_id,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
            RETURNING {}
            "#,
            DONATION_COLUMNS
        );

        let row = sqlx::query_as::<_, DonationRow>(&sql)
            .bind(donation.id)
            .bind(donation.amount)
            .bind(&donation.token)
            .bind(&donation.email)
            .bind(&donation.full_name)
            .bind(&donation.zip_code)
            .bind(donation.announce_amount)
            .bind(donation.announce_name)
            .bind(donation.status.as_str())
            .bind(donation.user_id)
            .bind(donation.created_at)
            .bind(donation.updated_at)
            .fetch_one(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        row.into_domain()
    }

    async fn save(&self, donation: &Donation) -> RepositoryResult<()> {
        let result = sqlx::query(
            r#"
            UPDATE donations SET
                status = $2, user_id = $3,
                exp_month = $4, exp_year = $5, last4 = $6, country = $7, brand = $8,
                updated_at = NOW()
            WHERE id = $1
            "#,
        )
        .bind(donation.id)
        .bind(donation.status.as_str())
        .bind(donation.user_id)
        .bind(donation.card.exp_month)
        .bind(donation.card.exp_year)
        .bind(&donation.card.last4)
        .bind(&donation.card.country)
        .bind(&donation.card.brand)
        .execute(&self.pool)
        .await
        .map_err(RepositoryError::from)?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound(donation.id.to_string()));
        }
        Ok(())
    }

    async fn find_by_id(&self, id: Uuid) -> RepositoryResult<Option<Donation>> {
        let sql = format!("SELECT {} FROM donations WHERE id = $1", DONATION_COLUMNS);
        let row = sqlx::query_as::<_, DonationRow>(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(RepositoryError::from)?;

        row.map(DonationRow::into_domain).transpose()
    }
}

/// Internal row type for SQLx. Not exposed outside the adapter.
#[derive(Debug, sqlx::FromRow)]
struct DonationRow {
    id: Uuid,
    amount: i32,
    token: String,
    email: String,
    full_name: String,
    zip_code: String,
    announce_amount: bool,
    announce_name: bool,
    status: String,
    user_id: Option<Uuid>,
    exp_month: Option<i32>,
    exp_year: Option<i32>,
    last4: Option<String>,
    country: Option<String>,
    brand: Option<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl DonationRow {
    fn into_domain(self) -> RepositoryResult<Donation> {
        let status = self
            .status
            .parse::<DonationStatus>()
            .map_err(RepositoryError::Corrupt)?;

        Ok(Donation {
            id: self.id,
            amount: self.amount,
            token: self.token,
            email: self.email,
            full_name: self.full_name,
            zip_code: self.zip_code,
            announce_amount: self.announce_amount,
            announce_name: self.announce_name,
            status,
            user_id: self.user_id,
            card: CardDetails {
                exp_month: self.exp_month,
                exp_year: self.exp_year,
                last4: self.last4,
                country: self.country,
                brand: self.brand,
            },
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}
