//! Resend email client
//!
//! Sends through `POST https://api.resend.com/emails` with bearer auth.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use ns_core::{DomainResult, EmailProvider, OutgoingEmail};
use ns_shared::sanitize::mask_email;

use crate::http::{build_client, read_body};
use crate::InfrastructureError;

const PROVIDER: &str = "Resend";
const DEFAULT_BASE_URL: &str = "https://api.resend.com";

#[derive(Debug, Serialize)]
pub(crate) struct SendEmailRequest<'a> {
    from: &'a str,
    to: &'a [String],
    subject: &'a str,
    html: &'a str,
    text: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    reply_to: Option<&'a str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tags: Vec<Tag<'a>>,
}

#[derive(Debug, Serialize)]
struct Tag<'a> {
    name: &'a str,
    value: &'a str,
}

impl<'a> SendEmailRequest<'a> {
    pub(crate) fn new(from: &'a str, email: &'a OutgoingEmail) -> Self {
        Self {
            from,
            to: &email.to,
            subject: &email.subject,
            html: &email.html,
            text: &email.text,
            reply_to: email.reply_to.as_deref(),
            tags: email
                .tags
                .iter()
                .map(|(name, value)| Tag { name, value })
                .collect(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct SendEmailResponse {
    id: String,
}

/// Extract the message id from a successful send response
pub(crate) fn parse_send_response(body: &str) -> Result<String, InfrastructureError> {
    let response: SendEmailResponse = serde_json::from_str(body)
        .map_err(|e| InfrastructureError::parse(PROVIDER, e.to_string()))?;
    Ok(response.id)
}

pub struct ResendEmailClient {
    client: reqwest::Client,
    api_key: Option<String>,
    from: String,
    base_url: String,
}

impl ResendEmailClient {
    pub fn new(api_key: Option<String>, from: String, timeout: Duration) -> Result<Self, InfrastructureError> {
        Ok(Self {
            client: build_client(timeout)?,
            api_key,
            from,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn send_email(&self, email: &OutgoingEmail) -> Result<String, InfrastructureError> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| InfrastructureError::Config("RESEND_API_KEY is not set".to_string()))?;

        let response = self
            .client
            .post(format!("{}/emails", self.base_url))
            .bearer_auth(api_key)
            .json(&SendEmailRequest::new(&self.from, email))
            .send()
            .await
            .map_err(|e| InfrastructureError::request(PROVIDER, e))?;

        let body = read_body(PROVIDER, response).await?;
        parse_send_response(&body)
    }
}

#[async_trait]
impl EmailProvider for ResendEmailClient {
    async fn send(&self, email: OutgoingEmail) -> DomainResult<String> {
        let recipient = email.to.first().map(|to| mask_email(to)).unwrap_or_default();
        let id = self.send_email(&email).await.map_err(|e| {
            tracing::error!(error = %e, to = %recipient, "email send failed");
            e
        })?;
        tracing::info!(id = %id, to = %recipient, "email sent");
        Ok(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_payload() {
        let email = OutgoingEmail::new("team@northstar.test", "New inquiry")
            .with_body("<p>Hi</p>", "Hi")
            .with_reply_to("jane@example.com")
            .with_tag("category", "contact_notification");

        let json = serde_json::to_value(SendEmailRequest::new("Northstar <hello@northstar.test>", &email)).unwrap();
        assert_eq!(json["from"], "Northstar <hello@northstar.test>");
        assert_eq!(json["to"][0], "team@northstar.test");
        assert_eq!(json["reply_to"], "jane@example.com");
        assert_eq!(json["tags"][0]["name"], "category");
        assert_eq!(json["tags"][0]["value"], "contact_notification");
    }

    #[test]
    fn test_optional_fields_are_omitted() {
        let email = OutgoingEmail::new("jane@example.com", "Thanks");
        let json = serde_json::to_value(SendEmailRequest::new("hello@northstar.test", &email)).unwrap();
        assert!(json.get("reply_to").is_none());
        assert!(json.get("tags").is_none());
    }

    #[test]
    fn test_parse_send_response() {
        let id = parse_send_response(r#"{"id":"49a3999c-0ce1-4ea6-ab68-afcd6dc2e794"}"#).unwrap();
        assert_eq!(id, "49a3999c-0ce1-4ea6-ab68-afcd6dc2e794");
        assert!(matches!(
            parse_send_response(r#"{"message":"oops"}"#),
            Err(InfrastructureError::Parse { .. })
        ));
    }
}
