pub mod donation;

pub use donation::{DonationMutation, DonationQuery};

use async_graphql::MergedObject;

#[derive(MergedObject, Default)]
pub struct Query(DonationQuery);

#[derive(MergedObject, Default)]
pub struct Mutation(DonationMutation);
