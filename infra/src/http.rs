//! Shared HTTP client construction and response checks

use std::time::Duration;

use crate::InfrastructureError;

pub const USER_AGENT: &str = concat!("northstar-backend/", env!("CARGO_PKG_VERSION"));

/// Body prefix kept in error messages
const ERROR_BODY_LIMIT: usize = 300;

/// Build the reqwest client shared by every provider
pub fn build_client(timeout: Duration) -> Result<reqwest::Client, InfrastructureError> {
    let client = reqwest::Client::builder()
        .timeout(timeout)
        .connect_timeout(Duration::from_secs(5))
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Read a response body, turning non-2xx statuses into provider errors
pub async fn read_body(
    provider: &'static str,
    response: reqwest::Response,
) -> Result<String, InfrastructureError> {
    let status = response.status();
    let body = response
        .text()
        .await
        .map_err(|e| InfrastructureError::request(provider, e))?;

    if !status.is_success() {
        tracing::warn!(provider, status = status.as_u16(), "provider returned an error status");
        return Err(InfrastructureError::provider(
            provider,
            format!("HTTP {}: {}", status.as_u16(), truncate(&body, ERROR_BODY_LIMIT)),
        ));
    }
    Ok(body)
}

pub(crate) fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_string()
    } else {
        let mut out: String = text.chars().take(max_chars).collect();
        out.push_str("...");
        out
    }
}
