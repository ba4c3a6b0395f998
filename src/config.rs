use anyhow::Result;
use dotenvy::dotenv;
use serde::Deserialize;
use std::env;

use crate::stripe::client::DEFAULT_API_URL;

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub server_port: u16,
    pub database_url: String,
    pub stripe_secret_key: String,
    pub stripe_api_url: String,
    pub smtp: Option<SmtpConfig>,
    pub mail_from: String,
    pub redact_payment_token: bool,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SmtpConfig {
    pub host: String,
    pub port: u16,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenv().ok(); // Load .env file if present

        let smtp = match env::var("SMTP_HOST") {
            Ok(host) if !host.trim().is_empty() => Some(SmtpConfig {
                host,
                port: env::var("SMTP_PORT")
                    .unwrap_or_else(|_| "25".to_string())
                    .parse()?,
            }),
            _ => None,
        };

        Ok(Config {
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            database_url: env::var("DATABASE_URL")?,
            stripe_secret_key: env::var("STRIPE_SECRET_KEY")?,
            stripe_api_url: env::var("STRIPE_API_URL").unwrap_or_else(|_| DEFAULT_API_URL.to_string()),
            smtp,
            mail_from: env::var("MAIL_FROM").unwrap_or_else(|_| "noreply@iacp.org".to_string()),
            redact_payment_token: parse_flag(env::var("REDACT_PAYMENT_TOKEN").ok().as_deref())?,
        })
    }
}

fn parse_flag(raw: Option<&str>) -> Result<bool> {
    match raw.map(|v| v.trim().to_ascii_lowercase()) {
        None => Ok(false),
        Some(v) if v.is_empty() || v == "0" || v == "false" || v == "no" => Ok(false),
        Some(v) if v == "1" || v == "true" || v == "yes" => Ok(true),
        Some(v) => anyhow::bail!("expected a boolean flag, got '{}'", v),
    }
}
