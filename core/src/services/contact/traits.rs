//! Trait for transactional email integration

use async_trait::async_trait;

use crate::domain::entities::contact::OutgoingEmail;
use crate::errors::DomainResult;

/// Transactional email provider
#[async_trait]
pub trait EmailProvider: Send + Sync {
    /// Send an email, returning the provider message id
    async fn send(&self, email: OutgoingEmail) -> DomainResult<String>;
}
