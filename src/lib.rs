pub mod adapters;
pub mod config;
pub mod db;
pub mod domain;
pub mod email;
pub mod error;
pub mod graphql;
pub mod handlers;
pub mod ports;
pub mod stripe;
pub mod use_cases;
pub mod utils;

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use crate::graphql::AppSchema;

#[derive(Clone)]
pub struct AppState {
    pub db: sqlx::PgPool,
    pub schema: AppSchema,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/graphql",
            get(handlers::graphql::graphiql).post(handlers::graphql::graphql_handler),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}
