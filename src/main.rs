use std::net::SocketAddr;
use std::sync::Arc;

use iacp_core::adapters::{PostgresAccountRepository, PostgresDonationRepository};
use iacp_core::config::Config;
use iacp_core::email::{NoopEmailSender, SmtpEmailSender};
use iacp_core::graphql::{build_schema, Services};
use iacp_core::ports::{DonationRepository, EmailSender};
use iacp_core::stripe::StripeClient;
use iacp_core::use_cases::{Donate, DonateOptions};
use iacp_core::{create_app, db, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    // Setup logging
    let filter =
        tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    let json_logs = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);
    if json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer())
            .init();
    }

    // Database pool
    let pool = db::create_pool(&config).await?;
    db::run_migrations(&pool).await?;
    tracing::info!("Database migrations completed");

    let stripe = StripeClient::new(config.stripe_api_url.clone(), config.stripe_secret_key.clone());
    tracing::info!("Stripe client initialized with URL: {}", config.stripe_api_url);

    let mailer: Arc<dyn EmailSender> = match &config.smtp {
        Some(smtp) => {
            tracing::info!(host = %smtp.host, port = smtp.port, "Using SMTP email sender");
            Arc::new(SmtpEmailSender::new(&smtp.host, smtp.port, config.mail_from.clone()))
        }
        None => {
            tracing::warn!("SMTP_HOST not set, emails will not be delivered");
            Arc::new(NoopEmailSender)
        }
    };

    let donations: Arc<dyn DonationRepository> =
        Arc::new(PostgresDonationRepository::new(pool.clone()));
    let donate = Donate::new(
        donations.clone(),
        Arc::new(PostgresAccountRepository::new(pool.clone())),
        Arc::new(stripe),
        mailer,
    )
    .with_options(DonateOptions {
        redact_token: config.redact_payment_token,
        ..Default::default()
    });

    let schema = build_schema(Services {
        donate: Arc::new(donate),
        donations,
    });

    let app = create_app(AppState { db: pool, schema });

    let addr = SocketAddr::from(([0, 0, 0, 0], config.server_port));
    tracing::info!("listening on {}", addr);

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .await?;

    Ok(())
}
