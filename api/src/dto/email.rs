use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use ns_core::{AnalyticsSummary, EmailEvent, EmailEventKind};

/// Resend webhook payload
#[derive(Debug, Clone, Deserialize)]
pub struct ResendWebhook {
    #[serde(rename = "type")]
    pub event_type: String,
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub data: ResendWebhookData,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ResendWebhookData {
    pub email_id: Option<String>,
    #[serde(default)]
    pub to: Vec<String>,
    pub subject: Option<String>,
}

impl ResendWebhook {
    /// Convert into an analytics event; `None` for event types we don't track
    pub fn into_event(self) -> Option<EmailEvent> {
        let kind = EmailEventKind::from_webhook_type(&self.event_type)?;
        let mut event = EmailEvent::new(kind);
        if let Some(id) = self.data.email_id {
            event = event.with_email_id(id);
        }
        if let Some(to) = self.data.to.first() {
            event = event.with_recipient(to);
        }
        if let Some(subject) = self.data.subject {
            event = event.with_subject(subject);
        }
        if let Some(at) = self.created_at {
            event = event.at(at);
        }
        Some(event)
    }
}

/// Query of `GET /api/email/analytics`
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AnalyticsQuery {
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsResponse {
    pub summary: AnalyticsSummary,
    pub events: Vec<EmailEvent>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WebhookAck {
    pub recorded: bool,
}
