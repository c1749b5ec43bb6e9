//! Contact form submission entities

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A contact form submission as received from the site
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactSubmission {
    pub name: String,
    pub email: String,
    pub message: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    /// Service the visitor is interested in
    #[serde(default)]
    pub service: Option<String>,
    #[serde(default)]
    pub budget: Option<String>,
    /// Hidden form field; bots fill it, people don't
    #[serde(default)]
    pub honeypot: Option<String>,
}

impl ContactSubmission {
    pub fn is_spam(&self) -> bool {
        self.honeypot
            .as_deref()
            .map(|v| !v.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Result of a contact submission
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactReceipt {
    pub id: Uuid,
    pub received_at: DateTime<Utc>,
    pub notification_id: Option<String>,
    pub confirmation_id: Option<String>,
    /// Set when the submission was accepted but nothing was sent
    pub accepted_without_delivery: bool,
}

impl ContactReceipt {
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            received_at: Utc::now(),
            notification_id: None,
            confirmation_id: None,
            accepted_without_delivery: false,
        }
    }

    pub fn silent() -> Self {
        Self {
            accepted_without_delivery: true,
            ..Self::new()
        }
    }
}

impl Default for ContactReceipt {
    fn default() -> Self {
        Self::new()
    }
}

/// A transactional email handed to the email provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutgoingEmail {
    pub to: Vec<String>,
    pub subject: String,
    pub html: String,
    pub text: String,
    pub reply_to: Option<String>,
    /// Provider tags, e.g. `("category", "contact")`
    pub tags: Vec<(String, String)>,
}

impl OutgoingEmail {
    pub fn new(to: impl Into<String>, subject: impl Into<String>) -> Self {
        Self {
            to: vec![to.into()],
            subject: subject.into(),
            html: String::new(),
            text: String::new(),
            reply_to: None,
            tags: Vec::new(),
        }
    }

    pub fn with_body(mut self, html: impl Into<String>, text: impl Into<String>) -> Self {
        self.html = html.into();
        self.text = text.into();
        self
    }

    pub fn with_reply_to(mut self, reply_to: impl Into<String>) -> Self {
        self.reply_to = Some(reply_to.into());
        self
    }

    pub fn with_tag(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.tags.push((name.into(), value.into()));
        self
    }
}
