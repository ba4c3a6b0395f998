use async_graphql::{Context, Object, Result, SimpleObject};
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::Donation;
use crate::graphql::schema::Services;
use crate::use_cases::{DonateInput, DonateOutput, FieldError};

#[derive(SimpleObject, Debug, Clone, PartialEq, Eq)]
#[graphql(name = "ErrorType")]
pub struct ErrorType {
    pub key: String,
    pub message: String,
}

impl From<FieldError> for ErrorType {
    fn from(e: FieldError) -> Self {
        Self {
            key: e.key,
            message: e.message,
        }
    }
}

#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "donateResult")]
pub struct DonateResult {
    pub errors: Vec<ErrorType>,
}

impl From<DonateOutput> for DonateResult {
    fn from(output: DonateOutput) -> Self {
        Self {
            errors: output.errors.into_iter().map(ErrorType::from).collect(),
        }
    }
}

/// Public view of a donation. Name and amount appear only when the donor
/// chose to announce them; contact, card and account details never do.
#[derive(SimpleObject, Debug, Clone)]
#[graphql(name = "Donation")]
pub struct DonationObject {
    pub id: Uuid,
    pub amount: Option<i32>,
    pub full_name: Option<String>,
    pub announce_amount: bool,
    pub announce_name: bool,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

impl From<Donation> for DonationObject {
    fn from(d: Donation) -> Self {
        Self {
            id: d.id,
            amount: d.announce_amount.then_some(d.amount),
            full_name: d.announce_name.then_some(d.full_name),
            announce_amount: d.announce_amount,
            announce_name: d.announce_name,
            status: d.status.to_string(),
            created_at: d.created_at,
        }
    }
}

#[derive(Default)]
pub struct DonationQuery;

#[Object]
impl DonationQuery {
    async fn donation(&self, ctx: &Context<'_>, id: Uuid) -> Result<Option<DonationObject>> {
        let services = ctx.data::<Services>()?;
        let donation = services.donations.find_by_id(id).await?;
        Ok(donation.map(DonationObject::from))
    }
}

#[derive(Default)]
pub struct DonationMutation;

#[Object]
impl DonationMutation {
    #[allow(clippy::too_many_arguments)]
    async fn donate(
        &self,
        ctx: &Context<'_>,
        token: String,
        email: String,
        full_name: String,
        zip_code: String,
        amount: i32,
        announce_amount: bool,
        announce_name: bool,
    ) -> Result<DonateResult> {
        let services = ctx.data::<Services>()?;
        let output = services
            .donate
            .execute(DonateInput {
                token,
                email,
                full_name,
                zip_code,
                amount,
                announce_amount,
                announce_name,
            })
            .await;

        Ok(output.into())
    }
}
