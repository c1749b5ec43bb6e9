use actix_web::{web, HttpRequest, HttpResponse};
use std::time::Instant;
use validator::Validate;

use ns_core::{AuditService, InsightGenerator, SeoDataProvider};

use crate::dto::audit::GenerateAuditRequest;
use crate::handlers::ApiError;
use crate::middleware::extract_client_ip;

use super::success;

/// `POST /api/audit/generate`
///
/// Sections that fail upstream are reported in `failedSections`; the
/// response is still 200 unless every section failed.
pub async fn generate<S, I>(
    req: HttpRequest,
    service: web::Data<AuditService<S, I>>,
    body: web::Json<GenerateAuditRequest>,
) -> Result<HttpResponse, ApiError>
where
    S: SeoDataProvider + 'static,
    I: InsightGenerator + 'static,
{
    let body = body.into_inner();
    body.validate()?;

    let started = Instant::now();
    let report = service.generate(body.into()).await?;
    tracing::info!(
        domain = %report.domain,
        score = report.score,
        failed = report.failed_sections.len(),
        client_ip = %extract_client_ip(&req),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "audit generated"
    );
    Ok(success(&req, report))
}
