//! Mock email service for development
//!
//! Nothing leaves the process: each email is logged with a masked
//! recipient and kept in memory for inspection.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use ns_core::{DomainError, DomainResult, EmailProvider, OutgoingEmail};
use ns_shared::sanitize::mask_email;

pub struct MockEmailService {
    sent: Mutex<Vec<OutgoingEmail>>,
    should_fail: AtomicBool,
}

impl MockEmailService {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            should_fail: AtomicBool::new(false),
        }
    }

    /// Make subsequent sends fail with an upstream error
    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn sent_emails(&self) -> Vec<OutgoingEmail> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

impl Default for MockEmailService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl EmailProvider for MockEmailService {
    async fn send(&self, email: OutgoingEmail) -> DomainResult<String> {
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::upstream("Mock", "simulated email failure"));
        }

        let id = format!("mock-{}", Uuid::new_v4());
        let recipients: Vec<String> = email.to.iter().map(|to| mask_email(to)).collect();
        tracing::info!(
            id = %id,
            to = ?recipients,
            subject = %email.subject,
            "[mock email] message accepted"
        );
        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(email);
        Ok(id)
    }
}
