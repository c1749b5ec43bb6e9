//! Email Service Module
//!
//! Transactional email delivery for contact submissions.
//!
//! - **Resend**: production delivery through the Resend REST API
//! - **Mock**: logs masked recipients and keeps sent emails in memory

use async_trait::async_trait;
use std::time::Duration;

use ns_core::{DomainResult, EmailProvider, OutgoingEmail};
use ns_shared::config::ResendConfig;
use ns_shared::Environment;

pub mod mock;
pub mod resend;

pub use mock::MockEmailService;
pub use resend::ResendEmailClient;

/// Email provider selected at startup
pub enum EmailService {
    Resend(ResendEmailClient),
    Mock(MockEmailService),
}

impl EmailService {
    pub fn provider_name(&self) -> &'static str {
        match self {
            EmailService::Resend(_) => "Resend",
            EmailService::Mock(_) => "Mock",
        }
    }
}

#[async_trait]
impl EmailProvider for EmailService {
    async fn send(&self, email: OutgoingEmail) -> DomainResult<String> {
        match self {
            EmailService::Resend(client) => client.send(email).await,
            EmailService::Mock(mock) => mock.send(email).await,
        }
    }
}

/// Create the email service for the current environment
///
/// With an API key the Resend client is used. Without one, development and
/// staging get the mock; production keeps the Resend client so that sends
/// fail loudly with a configuration error.
pub fn create_email_service(
    config: &ResendConfig,
    environment: Environment,
    timeout: Duration,
) -> EmailService {
    if config.api_key.is_none() && !environment.is_production() {
        tracing::warn!("RESEND_API_KEY not set, using mock email service");
        return EmailService::Mock(MockEmailService::new());
    }

    match ResendEmailClient::new(config.api_key.clone(), config.from.clone(), timeout) {
        Ok(client) => EmailService::Resend(client),
        Err(e) => {
            tracing::error!(error = %e, "failed to initialize Resend client");
            tracing::warn!("Falling back to mock email service");
            EmailService::Mock(MockEmailService::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(api_key: Option<&str>) -> ResendConfig {
        ResendConfig {
            api_key: api_key.map(String::from),
            from: "Northstar <hello@northstar.test>".to_string(),
            notify_to: "team@northstar.test".to_string(),
        }
    }

    #[test]
    fn test_create_uses_mock_without_key_in_development() {
        let service = create_email_service(&config(None), Environment::Development, Duration::from_secs(5));
        assert_eq!(service.provider_name(), "Mock");
    }

    #[test]
    fn test_create_uses_resend_with_key() {
        let service = create_email_service(&config(Some("re_123")), Environment::Development, Duration::from_secs(5));
        assert_eq!(service.provider_name(), "Resend");
    }

    #[tokio::test]
    async fn test_production_without_key_fails_loudly() {
        let service = create_email_service(&config(None), Environment::Production, Duration::from_secs(5));
        assert_eq!(service.provider_name(), "Resend");

        let result = service
            .send(OutgoingEmail::new("jane@example.com", "Hello"))
            .await;
        assert!(matches!(result, Err(ns_core::DomainError::Configuration { .. })));
    }
}
