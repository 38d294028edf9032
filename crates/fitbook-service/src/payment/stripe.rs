//! Stripe checkout session client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::StatusCode;

use fitbook_core::config::payment::PaymentConfig;
use fitbook_core::error::{AppError, ErrorKind};
use fitbook_core::result::AppResult;
use fitbook_core::traits::payment::{CheckoutProvider, CheckoutSession};

/// Talks to the Stripe API to retrieve checkout sessions.
#[derive(Debug, Clone)]
pub struct StripeClient {
    http: reqwest::Client,
    secret_key: String,
    base_url: String,
}

impl StripeClient {
    /// Build a client from the payment configuration.
    pub fn new(config: &PaymentConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_seconds))
            .build()
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::Configuration,
                    "Failed to build payment HTTP client".to_string(),
                    e,
                )
            })?;

        Ok(Self {
            http,
            secret_key: config.stripe_secret_key.clone(),
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl CheckoutProvider for StripeClient {
    async fn fetch_checkout_session(&self, session_id: &str) -> AppResult<CheckoutSession> {
        let url = format!("{}/v1/checkout/sessions/{}", self.base_url, session_id);

        let response = self
            .http
            .get(&url)
            .bearer_auth(&self.secret_key)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() || e.is_connect() {
                    AppError::with_source(
                        ErrorKind::Transient,
                        "Payment provider request timed out".to_string(),
                        e,
                    )
                } else {
                    AppError::with_source(
                        ErrorKind::ExternalService,
                        "Payment provider request failed".to_string(),
                        e,
                    )
                }
            })?;

        match response.status() {
            StatusCode::NOT_FOUND => Err(AppError::invalid_payment(
                "No such checkout session at the payment provider",
            )),
            status if !status.is_success() => Err(AppError::external_service(format!(
                "Payment provider returned status {status}"
            ))),
            _ => response.json::<CheckoutSession>().await.map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Failed to decode payment provider response".to_string(),
                    e,
                )
            }),
        }
    }
}
