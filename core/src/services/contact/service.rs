//! Main contact service implementation

use std::sync::Arc;

use ns_shared::sanitize::{mask_email, sanitize_text};
use ns_shared::validation::validators;

use crate::domain::entities::contact::{ContactReceipt, ContactSubmission, OutgoingEmail};
use crate::domain::entities::email_event::{EmailEvent, EmailEventKind};
use crate::errors::{DomainError, DomainResult};
use crate::services::analytics::EmailAnalytics;

use super::config::*;
use super::templates;
use super::traits::EmailProvider;

/// Contact form service
pub struct ContactService<E: EmailProvider> {
    email: Arc<E>,
    analytics: Arc<EmailAnalytics>,
    config: ContactServiceConfig,
}

impl<E: EmailProvider> ContactService<E> {
    pub fn new(email: Arc<E>, analytics: Arc<EmailAnalytics>, config: ContactServiceConfig) -> Self {
        Self {
            email,
            analytics,
            config,
        }
    }

    /// Validate a submission and send the notification and confirmation.
    ///
    /// A submission with the honeypot filled is accepted without sending
    /// anything. Only a failed team notification fails the request.
    pub async fn submit(
        &self,
        submission: ContactSubmission,
        client_ip: Option<&str>,
    ) -> DomainResult<ContactReceipt> {
        if submission.is_spam() {
            tracing::info!(client_ip = ?client_ip, "honeypot triggered, dropping contact submission");
            return Ok(ContactReceipt::silent());
        }

        let submission = Self::clean(submission)?;
        let mut receipt = ContactReceipt::new();

        let (html, text) = templates::notification_body(&submission, client_ip);
        let notification = OutgoingEmail::new(&self.config.notify_to, templates::notification_subject(&submission))
            .with_body(html, text)
            .with_reply_to(&submission.email)
            .with_tag("category", "contact_notification");

        let notification_id = self.deliver(notification).await.map_err(|e| {
            tracing::error!(error = %e, "failed to send contact notification");
            match e {
                DomainError::Configuration { .. } | DomainError::Upstream { .. } => e,
                other => DomainError::upstream("email", other.to_string()),
            }
        })?;
        receipt.notification_id = Some(notification_id);

        if self.config.send_confirmation {
            let (html, text) = templates::confirmation_body(&submission, &self.config.site_name);
            let confirmation = OutgoingEmail::new(&submission.email, templates::confirmation_subject(&self.config.site_name))
                .with_body(html, text)
                .with_tag("category", "contact_confirmation");

            match self.deliver(confirmation).await {
                Ok(id) => receipt.confirmation_id = Some(id),
                Err(e) => tracing::warn!(
                    error = %e,
                    email = %mask_email(&submission.email),
                    "failed to send contact confirmation"
                ),
            }
        }

        tracing::info!(
            receipt_id = %receipt.id,
            email = %mask_email(&submission.email),
            "contact submission delivered"
        );
        Ok(receipt)
    }

    async fn deliver(&self, email: OutgoingEmail) -> DomainResult<String> {
        let recipient = email.to.first().cloned().unwrap_or_default();
        let subject = email.subject.clone();
        let id = self.email.send(email).await?;
        self.analytics.record(
            EmailEvent::new(EmailEventKind::Sent)
                .with_email_id(id.clone())
                .with_recipient(&recipient)
                .with_subject(subject),
        );
        Ok(id)
    }

    /// Sanitize every field and enforce the field limits
    fn clean(submission: ContactSubmission) -> DomainResult<ContactSubmission> {
        let name = sanitize_text(&submission.name, usize::MAX);
        if !validators::length_between(&name, 1, NAME_MAX) {
            return Err(DomainError::validation(
                "name",
                format!("Name must be between 1 and {} characters", NAME_MAX),
            ));
        }

        let email = submission.email.trim().to_string();
        if !validators::is_valid_email(&email) {
            return Err(DomainError::validation("email", "Invalid email address"));
        }

        let message = sanitize_text(&submission.message, usize::MAX);
        if !validators::length_between(&message, MESSAGE_MIN, MESSAGE_MAX) {
            return Err(DomainError::validation(
                "message",
                format!(
                    "Message must be between {} and {} characters",
                    MESSAGE_MIN, MESSAGE_MAX
                ),
            ));
        }

        Ok(ContactSubmission {
            name,
            email,
            message,
            phone: optional_field("phone", submission.phone, PHONE_MAX)?,
            company: optional_field("company", submission.company, COMPANY_MAX)?,
            service: optional_field("service", submission.service, SERVICE_MAX)?,
            budget: optional_field("budget", submission.budget, BUDGET_MAX)?,
            honeypot: None,
        })
    }
}

fn optional_field(field: &str, value: Option<String>, max: usize) -> DomainResult<Option<String>> {
    let cleaned = match value {
        Some(v) => sanitize_text(&v, usize::MAX),
        None => return Ok(None),
    };
    if cleaned.is_empty() {
        return Ok(None);
    }
    if cleaned.chars().count() > max {
        return Err(DomainError::validation(
            field,
            format!("{} must be at most {} characters", field, max),
        ));
    }
    Ok(Some(cleaned))
}
