use std::sync::{LazyLock, Mutex};

use async_trait::async_trait;
use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// `<br>` variants become line breaks before the remaining tags go.
static LINE_BREAK_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<br\s*/?>").unwrap());

/// Any remaining markup tag.
static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").unwrap());

/// Derive the plain-text body for clients that will not render HTML:
/// `<br>` to newlines, every other tag stripped, surrounding whitespace
/// trimmed.
pub fn plain_text_fallback(html: &str) -> String {
    let with_breaks = LINE_BREAK_RE.replace_all(html, "\n");
    TAG_RE.replace_all(&with_breaks, "").trim().to_string()
}

/// Transport outcome reported by the mail collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    /// The transport accepted the message for delivery.
    Accepted,
    /// The transport refused the message (carrier status code).
    Rejected(u16),
}

impl DeliveryStatus {
    pub fn is_accepted(self) -> bool {
        matches!(self, Self::Accepted)
    }
}

/// Mail collaborator fault (connectivity, authentication, ...).
#[derive(Debug, Error)]
pub enum MailerError {
    #[error("mail transport failure: {0}")]
    Transport(String),
}

/// A rendered message ready for the transport.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutboundEmail {
    pub to: String,
    pub subject: String,
    pub html_body: String,
    /// Plain-text fallback derived from the HTML body.
    pub text_body: String,
}

impl OutboundEmail {
    /// Build a message, deriving the plain-text fallback from the HTML.
    pub fn new(
        to: impl Into<String>,
        subject: impl Into<String>,
        html_body: impl Into<String>,
    ) -> Self {
        let html_body = html_body.into();
        let text_body = plain_text_fallback(&html_body);
        Self {
            to: to.into(),
            subject: subject.into(),
            html_body,
            text_body,
        }
    }
}

/// Deliver-or-fail mail transport.
///
/// Transport mechanics, retry and authentication belong to the
/// implementation; the catalog core renders, hands over, and surfaces a
/// non-accepted status to its caller without retrying.
#[async_trait]
pub trait Mailer: Send + Sync {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryStatus, MailerError>;
}

/// Test double: records every message handed to it and reports a
/// configurable status.
#[derive(Debug, Default)]
pub struct RecordingMailer {
    sent: Mutex<Vec<OutboundEmail>>,
    reject_with: Option<u16>,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self::default()
    }

    /// A mailer whose transport refuses every message with `code`.
    pub fn rejecting(code: u16) -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            reject_with: Some(code),
        }
    }

    pub fn sent(&self) -> Vec<OutboundEmail> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, email: &OutboundEmail) -> Result<DeliveryStatus, MailerError> {
        self.sent.lock().unwrap().push(email.clone());
        Ok(match self.reject_with {
            Some(code) => DeliveryStatus::Rejected(code),
            None => DeliveryStatus::Accepted,
        })
    }
}
