use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use ns_core::{ContactReceipt, ContactSubmission};

/// Body of `POST /api/contact`.
///
/// Only coarse limits are checked here; the contact service applies the
/// exact rules after sanitizing.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ContactRequest {
    #[validate(length(min = 1, max = 200, message = "Name is required"))]
    pub name: String,

    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, max = 10000, message = "Message is required"))]
    pub message: String,

    #[validate(length(max = 60))]
    pub phone: Option<String>,

    #[validate(length(max = 240))]
    pub company: Option<String>,

    #[validate(length(max = 160))]
    pub service: Option<String>,

    #[validate(length(max = 80))]
    pub budget: Option<String>,

    /// Hidden field rendered off-screen by the form
    #[serde(default, alias = "website")]
    pub honeypot: Option<String>,
}

impl From<ContactRequest> for ContactSubmission {
    fn from(req: ContactRequest) -> Self {
        ContactSubmission {
            name: req.name,
            email: req.email,
            message: req.message,
            phone: req.phone,
            company: req.company,
            service: req.service,
            budget: req.budget,
            honeypot: req.honeypot,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactResponse {
    pub id: Uuid,
    pub message: String,
}

impl From<ContactReceipt> for ContactResponse {
    fn from(receipt: ContactReceipt) -> Self {
        Self {
            id: receipt.id,
            message: "Thanks for reaching out! We'll get back to you within one business day.".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request() -> ContactRequest {
        serde_json::from_value(serde_json::json!({
            "name": "Ada",
            "email": "ada@example.com",
            "message": "We need a new website for our bakery."
        }))
        .unwrap()
    }

    #[test]
    fn test_valid_request() {
        assert!(request().validate().is_ok());
    }

    #[test]
    fn test_invalid_email_rejected() {
        let mut req = request();
        req.email = "not-an-email".into();
        let errors = req.validate().unwrap_err();
        assert!(errors.field_errors().contains_key("email"));
    }

    #[test]
    fn test_website_alias_maps_to_honeypot() {
        let req: ContactRequest = serde_json::from_value(serde_json::json!({
            "name": "Bot",
            "email": "bot@example.com",
            "message": "buy cheap links now",
            "website": "http://spam.test"
        }))
        .unwrap();
        let submission = ContactSubmission::from(req);
        assert!(submission.is_spam());
    }

    #[test]
    fn test_silent_receipt_response_looks_normal() {
        let response = ContactResponse::from(ContactReceipt::silent());
        assert!(response.message.starts_with("Thanks"));
    }
}
