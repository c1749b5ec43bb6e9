use actix_web::{web, HttpRequest, HttpResponse};
use validator::Validate;

use ns_core::EmailAnalytics;

use crate::dto::email::{AnalyticsQuery, AnalyticsResponse, ResendWebhook, WebhookAck};
use crate::handlers::ApiError;

use super::success;

const DEFAULT_EVENT_LIMIT: usize = 50;

/// `POST /api/email/webhook`
///
/// Unknown event types are acknowledged and dropped so Resend does not
/// retry them.
pub async fn webhook(
    req: HttpRequest,
    analytics: web::Data<EmailAnalytics>,
    body: web::Json<ResendWebhook>,
) -> HttpResponse {
    let event_type = body.event_type.clone();
    let recorded = match body.into_inner().into_event() {
        Some(event) => {
            analytics.record(event);
            true
        }
        None => {
            tracing::debug!(event_type = %event_type, "ignoring email webhook");
            false
        }
    };
    success(&req, WebhookAck { recorded })
}

/// `GET /api/email/analytics?limit=`
pub async fn analytics(
    req: HttpRequest,
    analytics: web::Data<EmailAnalytics>,
    query: web::Query<AnalyticsQuery>,
) -> Result<HttpResponse, ApiError> {
    query.validate()?;
    let limit = query.limit.unwrap_or(DEFAULT_EVENT_LIMIT);
    Ok(success(
        &req,
        AnalyticsResponse {
            summary: analytics.summary(),
            events: analytics.events(limit),
        },
    ))
}
