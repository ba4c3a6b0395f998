use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;

use crate::ports::{Charge, ChargeRequest, PaymentError, PaymentGateway};

pub const DEFAULT_API_URL: &str = "https://api.stripe.com";

/// Error envelope returned by the Stripe API on non-2xx responses
#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// HTTP client for the Stripe charges API
#[derive(Clone)]
pub struct StripeClient {
    client: Client,
    base_url: String,
    secret_key: String,
}

impl StripeClient {
    /// Creates a new StripeClient against the given base URL
    pub fn new(base_url: String, secret_key: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .unwrap_or_default();

        StripeClient {
            client,
            base_url,
            secret_key,
        }
    }

    fn charges_url(&self) -> String {
        format!("{}/v1/charges", self.base_url.trim_end_matches('/'))
    }
}

#[async_trait]
impl PaymentGateway for StripeClient {
    async fn charge(&self, request: &ChargeRequest) -> Result<Charge, PaymentError> {
        let form = [
            ("amount", request.amount.to_string()),
            ("currency", request.currency.clone()),
            ("source", request.source.clone()),
            ("description", request.description.clone()),
        ];

        let response = self
            .client
            .post(self.charges_url())
            .bearer_auth(&self.secret_key)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            return Ok(response.json::<Charge>().await?);
        }

        let body = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorEnvelope>(&body)
            .ok()
            .and_then(|e| e.error.message)
            .unwrap_or_else(|| format!("Payment processor returned HTTP {}", status.as_u16()));

        tracing::debug!(status = status.as_u16(), "Stripe rejected charge");
        Err(PaymentError::Declined(message))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    fn request() -> ChargeRequest {
        ChargeRequest {
            amount: 2500,
            currency: "usd".to_string(),
            source: "tok_visa".to_string(),
            description: "One time donation".to_string(),
        }
    }

    #[test]
    fn test_charges_url_strips_trailing_slash() {
        let client = StripeClient::new("https://api.stripe.com/".to_string(), "sk".to_string());
        assert_eq!(client.charges_url(), "https://api.stripe.com/v1/charges");
    }

    #[tokio::test]
    async fn test_charge_success_with_card_source() {
        let mut server = mockito::Server::new_async().await;

        let mock_response = r#"{
            "id": "ch_123",
            "object": "charge",
            "paid": true,
            "source": {
                "id": "card_1",
                "object": "card",
                "exp_month": 4,
                "exp_year": 2030,
                "last4": "4242",
                "country": "US",
                "brand": "Visa"
            }
        }"#;

        let mock = server
            .mock("POST", "/v1/charges")
            .match_header("authorization", "Bearer sk_test_123")
            .match_body(Matcher::AllOf(vec![
                Matcher::UrlEncoded("amount".into(), "2500".into()),
                Matcher::UrlEncoded("currency".into(), "usd".into()),
                Matcher::UrlEncoded("source".into(), "tok_visa".into()),
                Matcher::UrlEncoded("description".into(), "One time donation".into()),
            ]))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(mock_response)
            .create_async()
            .await;

        let client = StripeClient::new(server.url(), "sk_test_123".to_string());
        let charge = client.charge(&request()).await.unwrap();

        mock.assert_async().await;
        assert_eq!(charge.id, "ch_123");
        assert!(charge.paid);
        let source = charge.source.unwrap();
        assert_eq!(source.last4.as_deref(), Some("4242"));
        assert_eq!(source.exp_year, Some(2030));
        assert_eq!(source.brand.as_deref(), Some("Visa"));
    }

    #[tokio::test]
    async fn test_charge_without_source() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/v1/charges")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"id": "ch_456", "paid": false, "source": null}"#)
            .create_async()
            .await;

        let client = StripeClient::new(server.url(), "sk_test_123".to_string());
        let charge = client.charge(&request()).await.unwrap();

        assert!(!charge.paid);
        assert!(charge.source.is_none());
    }

    #[tokio::test]
    async fn test_card_error_message_is_surfaced() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/v1/charges")
            .with_status(402)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error": {"type": "card_error", "message": "Your card was declined."}}"#)
            .create_async()
            .await;

        let client = StripeClient::new(server.url(), "sk_test_123".to_string());
        let err = client.charge(&request()).await.unwrap_err();

        assert!(matches!(err, PaymentError::Declined(_)));
        assert_eq!(err.message(), "Your card was declined.");
    }

    #[tokio::test]
    async fn test_unparseable_error_body_falls_back_to_status() {
        let mut server = mockito::Server::new_async().await;

        let _mock = server
            .mock("POST", "/v1/charges")
            .with_status(500)
            .with_body("upstream exploded")
            .create_async()
            .await;

        let client = StripeClient::new(server.url(), "sk_test_123".to_string());
        let err = client.charge(&request()).await.unwrap_err();

        assert_eq!(err.message(), "Payment processor returned HTTP 500");
    }

    #[tokio::test]
    async fn test_unreachable_host_is_transport_error() {
        let client = StripeClient::new("http://127.0.0.1:1".to_string(), "sk".to_string());
        let err = client.charge(&request()).await.unwrap_err();

        assert!(matches!(err, PaymentError::Transport(_)));
    }
}
