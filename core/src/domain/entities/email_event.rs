//! Email delivery events and their aggregate

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmailEventKind {
    Sent,
    Delivered,
    DeliveryDelayed,
    Opened,
    Clicked,
    Bounced,
    Complained,
}

impl EmailEventKind {
    /// Map a Resend webhook `type` such as `email.opened`
    pub fn from_webhook_type(event_type: &str) -> Option<Self> {
        let name = event_type.strip_prefix("email.").unwrap_or(event_type);
        match name {
            "sent" => Some(EmailEventKind::Sent),
            "delivered" => Some(EmailEventKind::Delivered),
            "delivery_delayed" => Some(EmailEventKind::DeliveryDelayed),
            "opened" => Some(EmailEventKind::Opened),
            "clicked" => Some(EmailEventKind::Clicked),
            "bounced" => Some(EmailEventKind::Bounced),
            "complained" => Some(EmailEventKind::Complained),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmailEvent {
    pub id: Uuid,
    pub kind: EmailEventKind,
    /// Provider message id
    pub email_id: Option<String>,
    /// Masked recipient address
    pub recipient: Option<String>,
    pub subject: Option<String>,
    pub occurred_at: DateTime<Utc>,
}

impl EmailEvent {
    pub fn new(kind: EmailEventKind) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            email_id: None,
            recipient: None,
            subject: None,
            occurred_at: Utc::now(),
        }
    }

    pub fn with_email_id(mut self, email_id: impl Into<String>) -> Self {
        self.email_id = Some(email_id.into());
        self
    }

    pub fn with_recipient(mut self, recipient: &str) -> Self {
        self.recipient = Some(ns_shared::sanitize::mask_email(recipient));
        self
    }

    pub fn with_subject(mut self, subject: impl Into<String>) -> Self {
        self.subject = Some(subject.into());
        self
    }

    pub fn at(mut self, occurred_at: DateTime<Utc>) -> Self {
        self.occurred_at = occurred_at;
        self
    }
}

/// Counts and rates over the recorded events
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsSummary {
    pub total: usize,
    pub sent: usize,
    pub delivered: usize,
    pub opened: usize,
    pub clicked: usize,
    pub bounced: usize,
    pub complained: usize,
    pub open_rate: f64,
    pub click_rate: f64,
    pub bounce_rate: f64,
}
