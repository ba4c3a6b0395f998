use async_graphql::{EmptySubscription, Schema};
use std::sync::Arc;

use crate::graphql::resolvers::{Mutation, Query};
use crate::ports::DonationRepository;
use crate::use_cases::Donate;

pub type AppSchema = Schema<Query, Mutation, EmptySubscription>;

/// Collaborators made available to resolvers through the schema context.
#[derive(Clone)]
pub struct Services {
    pub donate: Arc<Donate>,
    pub donations: Arc<dyn DonationRepository>,
}

pub fn build_schema(services: Services) -> AppSchema {
    Schema::build(Query::default(), Mutation::default(), EmptySubscription)
        .data(services)
        .finish()
}
