use actix_web::{web, HttpRequest, HttpResponse};

use ns_core::{ContextService, KvStore};

use crate::dto::context::{ContextListResponse, RefreshQuery};
use crate::handlers::ApiError;

use super::success;

/// `GET /api/context`
pub async fn list<K>(req: HttpRequest, service: web::Data<ContextService<K>>) -> HttpResponse
where
    K: KvStore + 'static,
{
    let contexts = service.get_all().await;
    let sources = service.sources().into_iter().map(String::from).collect();
    success(&req, ContextListResponse { sources, contexts })
}

/// `GET /api/context/{source}`
pub async fn get_one<K>(
    req: HttpRequest,
    service: web::Data<ContextService<K>>,
    source: web::Path<String>,
) -> Result<HttpResponse, ApiError>
where
    K: KvStore + 'static,
{
    let result = service.get(&source).await?;
    Ok(success(&req, result))
}

/// `POST /api/context/refresh[?source=]`
pub async fn refresh<K>(
    req: HttpRequest,
    service: web::Data<ContextService<K>>,
    query: web::Query<RefreshQuery>,
) -> Result<HttpResponse, ApiError>
where
    K: KvStore + 'static,
{
    let source = query.into_inner().source.filter(|s| !s.trim().is_empty());
    let refreshed = service.refresh(source.as_deref()).await?;
    tracing::info!(count = refreshed.len(), source = ?source, "context refreshed");
    Ok(success(&req, refreshed))
}
