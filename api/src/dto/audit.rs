use serde::Deserialize;
use validator::Validate;

use ns_core::AuditRequest;

use super::blank_as_none;

/// Body of `POST /api/audit/generate`
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct GenerateAuditRequest {
    #[validate(length(min = 1, max = 2048, message = "Website URL is required"))]
    #[serde(alias = "website", alias = "domain")]
    pub url: String,

    #[validate(email(message = "Please enter a valid email address"))]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub email: Option<String>,

    #[validate(length(max = 200))]
    #[serde(default, deserialize_with = "blank_as_none")]
    pub business_name: Option<String>,
}

impl From<GenerateAuditRequest> for AuditRequest {
    fn from(req: GenerateAuditRequest) -> Self {
        AuditRequest {
            url: req.url,
            email: req.email,
            business_name: req.business_name,
        }
    }
}
