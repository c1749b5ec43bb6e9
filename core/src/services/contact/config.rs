//! Configuration for the contact service

/// Configuration for the contact service
#[derive(Debug, Clone)]
pub struct ContactServiceConfig {
    /// Inbox that receives new inquiries
    pub notify_to: String,
    /// Name used in the visitor confirmation
    pub site_name: String,
    /// Whether to send the visitor a confirmation
    pub send_confirmation: bool,
}

impl ContactServiceConfig {
    pub fn new(notify_to: impl Into<String>) -> Self {
        Self {
            notify_to: notify_to.into(),
            ..Self::default()
        }
    }
}

impl Default for ContactServiceConfig {
    fn default() -> Self {
        Self {
            notify_to: "team@northstar.digital".to_string(),
            site_name: "Northstar Digital".to_string(),
            send_confirmation: true,
        }
    }
}

/// Field limits, in characters
pub(crate) const NAME_MAX: usize = 100;
pub(crate) const MESSAGE_MIN: usize = 10;
pub(crate) const MESSAGE_MAX: usize = 5000;
pub(crate) const PHONE_MAX: usize = 30;
pub(crate) const COMPANY_MAX: usize = 120;
pub(crate) const SERVICE_MAX: usize = 80;
pub(crate) const BUDGET_MAX: usize = 40;
