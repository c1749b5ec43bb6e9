use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ns_core::{ContactReceipt, ContactService, EmailProvider};
use ns_shared::sanitize::mask_email;

use crate::dto::contact::{ContactRequest, ContactResponse};
use crate::handlers::ApiError;
use crate::middleware::extract_client_ip;

use super::success;

/// `POST /api/contact`
pub async fn submit<E>(
    req: HttpRequest,
    service: web::Data<ContactService<E>>,
    body: web::Json<ContactRequest>,
) -> Result<HttpResponse, ApiError>
where
    E: EmailProvider + 'static,
{
    let body = body.into_inner();
    let client_ip = extract_client_ip(&req);

    // Bots get the same answer as real visitors, whatever else they sent.
    if body.honeypot.as_deref().is_some_and(|h| !h.trim().is_empty()) {
        tracing::info!(client_ip = %client_ip, "contact honeypot triggered");
        return Ok(success(&req, ContactResponse::from(ContactReceipt::silent())));
    }
    body.validate()?;

    tracing::info!(email = %mask_email(&body.email), client_ip = %client_ip, "contact submission");

    let receipt = service.submit(body.into(), Some(&client_ip)).await?;
    Ok(success(&req, ContactResponse::from(receipt)))
}
