//! Route handlers
//!
//! Handlers are generic over the provider types so tests can mount them
//! with mocks.

pub mod audit;
pub mod contact;
pub mod context;
pub mod email;
pub mod health;
pub mod places;

use actix_web::{HttpRequest, HttpResponse};
use serde::Serialize;
use uuid::Uuid;

use ns_shared::ApiResponse;

use crate::middleware::RequestIdExt;

/// 200 with the standard success envelope
pub(crate) fn success<T: Serialize>(req: &HttpRequest, data: T) -> HttpResponse {
    let request_id = req.request_id().unwrap_or_else(|| Uuid::new_v4().to_string());
    HttpResponse::Ok().json(ApiResponse::success(data).with_request_id(request_id))
}
