//! HTTP card gateway speaking the Stripe-style payment intents API.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use tracing::{error, info, warn};

use super::error::PaymentError;
use super::gateway::{
    intent_id_from_secret, BillingDetails, CardDetails, PaymentConfirmation, PaymentGateway, PaymentIntent,
};
use crate::config::PaymentConfig;

/// Intent object returned by the gateway
#[derive(Debug, Deserialize)]
struct IntentBody {
    id: String,
    client_secret: Option<String>,
    amount: i64,
    currency: String,
    status: String,
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: GatewayErrorBody,
}

#[derive(Debug, Deserialize)]
struct GatewayErrorBody {
    code: Option<String>,
    decline_code: Option<String>,
    message: Option<String>,
}

impl GatewayErrorBody {
    fn into_payment_error(self) -> PaymentError {
        let message = self.message.unwrap_or_default();

        // a specific decline reason beats the generic "card_declined" code
        let specific = self
            .decline_code
            .as_deref()
            .map(|code| PaymentError::from_code(code, &message))
            .filter(|e| !matches!(e, PaymentError::Declined { .. }));

        specific.unwrap_or_else(|| PaymentError::from_code(self.code.as_deref().unwrap_or("card_declined"), &message))
    }
}

/// Client for the card gateway's REST API
#[derive(Clone)]
pub struct HttpPaymentGateway {
    base_url: String,
    secret_key: Option<String>,
    http_client: reqwest::Client,
}

impl HttpPaymentGateway {
    pub fn new(base_url: &str, secret_key: Option<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            secret_key,
            http_client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }

    pub fn from_config(config: &PaymentConfig) -> Result<Self, reqwest::Error> {
        if config.secret_key.is_none() {
            warn!("PAYMENT_SECRET_KEY not set - card payments will be rejected");
        }
        Self::new(
            &config.gateway_url,
            config.secret_key.clone(),
            Duration::from_secs(config.timeout_secs),
        )
    }

    async fn post_form(&self, path: &str, form: &[(&str, String)]) -> Result<IntentBody, PaymentError> {
        let secret = self.secret_key.as_deref().ok_or(PaymentError::NotConfigured)?;
        let request = self
            .http_client
            .post(format!("{}{}", self.base_url, path))
            .bearer_auth(secret)
            .form(form);
        self.send(request, path).await
    }

    async fn get(&self, path: &str) -> Result<IntentBody, PaymentError> {
        let secret = self.secret_key.as_deref().ok_or(PaymentError::NotConfigured)?;
        let request = self
            .http_client
            .get(format!("{}{}", self.base_url, path))
            .bearer_auth(secret);
        self.send(request, path).await
    }

    async fn send(&self, request: reqwest::RequestBuilder, path: &str) -> Result<IntentBody, PaymentError> {
        let response = request.send().await.map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if status.is_success() {
            return serde_json::from_str(&body).map_err(|e| PaymentError::InvalidResponse(e.to_string()));
        }

        if status.is_server_error() {
            error!("Payment gateway returned {} for {}", status, path);
            return Err(PaymentError::Unavailable(format!("gateway returned {}", status)));
        }

        let envelope: ErrorEnvelope = serde_json::from_str(&body)
            .map_err(|_| PaymentError::InvalidResponse(format!("gateway returned {}", status)))?;
        Err(envelope.error.into_payment_error())
    }
}

/// Only a succeeded intent counts as paid
fn settled(body: IntentBody) -> Result<PaymentConfirmation, PaymentError> {
    match body.status.as_str() {
        "succeeded" => Ok(PaymentConfirmation {
            payment_id: body.id,
            amount_minor: body.amount,
            currency: body.currency,
        }),
        "requires_action" => Err(PaymentError::RequiresAction),
        other => {
            warn!("Payment intent {} is in status '{}'", body.id, other);
            Err(PaymentError::NotCompleted {
                payment_id: body.id,
                status: other.to_string(),
            })
        }
    }
}

fn transport_error(e: reqwest::Error) -> PaymentError {
    if e.is_timeout() {
        error!("Payment gateway request timed out: {}", e);
        PaymentError::Unavailable("request timed out".to_string())
    } else {
        error!("Payment gateway request failed: {}", e);
        PaymentError::Unavailable(e.to_string())
    }
}

#[async_trait]
impl PaymentGateway for HttpPaymentGateway {
    async fn create_intent(
        &self,
        amount_minor: i64,
        currency: &str,
        description: &str,
    ) -> Result<PaymentIntent, PaymentError> {
        info!("Creating payment intent: amount={}, currency={}", amount_minor, currency);

        let body = self
            .post_form(
                "/v1/payment_intents",
                &[
                    ("amount", amount_minor.to_string()),
                    ("currency", currency.to_string()),
                    ("description", description.to_string()),
                    ("payment_method_types[]", "card".to_string()),
                ],
            )
            .await?;

        let client_secret = body
            .client_secret
            .ok_or_else(|| PaymentError::InvalidResponse("intent without client_secret".to_string()))?;

        Ok(PaymentIntent {
            id: body.id,
            client_secret,
            amount_minor: body.amount,
            currency: body.currency,
        })
    }

    async fn confirm(
        &self,
        client_secret: &str,
        card: &CardDetails,
        billing: &BillingDetails,
    ) -> Result<PaymentConfirmation, PaymentError> {
        let intent_id = intent_id_from_secret(client_secret).ok_or(PaymentError::SessionExpired)?;

        info!("Confirming payment intent {}", intent_id);

        let body = self
            .post_form(
                &format!("/v1/payment_intents/{}/confirm", intent_id),
                &[
                    ("payment_method", card.payment_method.clone()),
                    ("receipt_email", billing.email.clone()),
                ],
            )
            .await?;

        settled(body)
    }

    async fn retrieve(&self, payment_id: &str) -> Result<PaymentConfirmation, PaymentError> {
        // ids go into the URL path
        if payment_id.is_empty() || !payment_id.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
            return Err(PaymentError::PaymentNotFound);
        }

        info!("Retrieving payment intent {}", payment_id);
        let body = self.get(&format!("/v1/payment_intents/{}", payment_id)).await?;
        settled(body)
    }
}
