//! Outbound email.
//!
//! Confirmation mail is best effort: a failed send is logged and never
//! changes the outcome of the booking that triggered it.

use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::config::EmailConfig;

pub mod email;

pub use email::Email;

#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("Mail relay request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Mail relay rejected the message with status {0}")]
    Rejected(u16),
}

#[async_trait]
pub trait EmailNotifier: Send + Sync {
    async fn send(&self, email: &Email) -> Result<(), NotifyError>;
}

/// Posts messages as JSON to an HTTP mail relay
pub struct HttpEmailNotifier {
    relay_url: String,
    from: String,
    http_client: reqwest::Client,
}

impl HttpEmailNotifier {
    pub fn new(relay_url: &str, from: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        Ok(Self {
            relay_url: relay_url.to_string(),
            from: from.to_string(),
            http_client: reqwest::Client::builder().timeout(timeout).build()?,
        })
    }
}

#[derive(serde::Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

#[async_trait]
impl EmailNotifier for HttpEmailNotifier {
    async fn send(&self, email: &Email) -> Result<(), NotifyError> {
        let response = self
            .http_client
            .post(&self.relay_url)
            .json(&RelayMessage {
                from: &self.from,
                to: &email.to,
                subject: &email.subject,
                text: &email.text,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(NotifyError::Rejected(response.status().as_u16()));
        }
        Ok(())
    }
}

/// Used when no relay is configured
#[derive(Debug, Default)]
pub struct LogOnlyNotifier;

#[async_trait]
impl EmailNotifier for LogOnlyNotifier {
    async fn send(&self, email: &Email) -> Result<(), NotifyError> {
        info!(to = %email.to, subject = %email.subject, "Email relay not configured, skipping send");
        Ok(())
    }
}

/// Pick the notifier for the configured relay
pub fn notifier_from_config(config: &EmailConfig, timeout: Duration) -> Result<Arc<dyn EmailNotifier>, reqwest::Error> {
    match &config.relay_url {
        Some(url) => Ok(Arc::new(HttpEmailNotifier::new(url, &config.from, timeout)?)),
        None => {
            warn!("EMAIL_RELAY_URL not set - confirmation emails will only be logged");
            Ok(Arc::new(LogOnlyNotifier))
        }
    }
}

/// Send without making the caller wait; failures are logged
pub fn dispatch_in_background(notifier: Arc<dyn EmailNotifier>, email: Email) -> JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.send(&email).await {
            Ok(()) => info!(to = %email.to, "Confirmation email sent"),
            Err(e) => error!(to = %email.to, "Failed to send confirmation email: {}", e),
        }
    })
}
