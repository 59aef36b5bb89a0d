//! Transactional email
//!
//! Delivery is best-effort everywhere it is used: callers go through
//! [`send_best_effort`], which logs failures and never returns them.

use async_trait::async_trait;
use aws_sdk_sesv2::Client as SesClient;
use aws_sdk_sesv2::types::{Body, Content, Destination, EmailContent, Message};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MailError {
    #[error("failed to build message: {0}")]
    Build(String),

    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Plain-text mail delivery
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError>;
}

/// Amazon SES v2 sender
pub struct SesMailer {
    client: SesClient,
    from: String,
}

impl SesMailer {
    pub fn new(client: SesClient, from: impl Into<String>) -> Self {
        Self {
            client,
            from: from.into(),
        }
    }
}

#[async_trait]
impl Mailer for SesMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        let subject = Content::builder()
            .data(subject)
            .build()
            .map_err(|e| MailError::Build(e.to_string()))?;
        let text = Content::builder()
            .data(body)
            .build()
            .map_err(|e| MailError::Build(e.to_string()))?;

        let message = Message::builder()
            .subject(subject)
            .body(Body::builder().text(text).build())
            .build();

        self.client
            .send_email()
            .from_email_address(&self.from)
            .destination(Destination::builder().to_addresses(to).build())
            .content(EmailContent::builder().simple(message).build())
            .send()
            .await
            .map_err(|e| MailError::Delivery(e.to_string()))?;

        tracing::info!(to = to, "Email sent");
        Ok(())
    }
}

/// Writes messages to the log instead of sending them (development)
#[derive(Debug, Default, Clone)]
pub struct LogMailer;

#[async_trait]
impl Mailer for LogMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), MailError> {
        tracing::info!(to = to, subject = subject, body_len = body.len(), "Email (log backend)");
        Ok(())
    }
}

/// Send and swallow the error. Returns whether delivery succeeded.
pub async fn send_best_effort(mailer: &dyn Mailer, to: &str, subject: &str, body: &str) -> bool {
    match mailer.send(to, subject, body).await {
        Ok(()) => true,
        Err(e) => {
            tracing::warn!(to = to, subject = subject, error = %e, "Email delivery failed");
            false
        }
    }
}
