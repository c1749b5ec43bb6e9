//! Per-scope rate limiting keyed by client IP
//!
//! Wraps a core [`RateLimiterTrait`]. Over-limit requests are answered with
//! 429 before reaching the handler; every limited scope reports
//! `X-RateLimit-*` headers.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::{self, HeaderMap, HeaderName, HeaderValue},
    Error, HttpResponse, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
    sync::Arc,
};

use ns_core::{DomainError, RateLimitOutcome, RateLimiterTrait};

use crate::handlers::ApiError;
use crate::middleware::client_ip::extract_client_ip;

/// Rate limiting middleware factory
#[derive(Clone)]
pub struct RateLimit {
    limiter: Arc<dyn RateLimiterTrait>,
    scope: &'static str,
}

impl RateLimit {
    /// `scope` namespaces the counter key so one IP has separate budgets
    /// per endpoint group.
    pub fn new(scope: &'static str, limiter: Arc<dyn RateLimiterTrait>) -> Self {
        Self { limiter, scope }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RateLimit
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = RateLimitMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RateLimitMiddleware {
            service: Rc::new(service),
            limiter: Arc::clone(&self.limiter),
            scope: self.scope,
        }))
    }
}

pub struct RateLimitMiddleware<S> {
    service: Rc<S>,
    limiter: Arc<dyn RateLimiterTrait>,
    scope: &'static str,
}

impl<S, B> Service<ServiceRequest> for RateLimitMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = Rc::clone(&self.service);

        // CORS preflights are never counted
        if req.method() == actix_web::http::Method::OPTIONS {
            return Box::pin(async move { Ok(service.call(req).await?.map_into_left_body()) });
        }

        let client_ip = extract_client_ip(req.request());
        let key = format!("{}:{}", self.scope, client_ip);
        let outcome = self.limiter.check(&key);
        let scope = self.scope;

        Box::pin(async move {
            if outcome.rate_limited {
                tracing::warn!(
                    scope,
                    client_ip = %client_ip,
                    path = %req.path(),
                    "rate limit exceeded"
                );
                let mut response: HttpResponse = ApiError::from(DomainError::RateLimited {
                    retry_after_seconds: outcome.retry_after_seconds(),
                })
                .error_response();
                apply_headers(response.headers_mut(), &outcome);
                return Ok(req.into_response(response).map_into_right_body());
            }

            let mut response = service.call(req).await?;
            apply_headers(response.headers_mut(), &outcome);
            Ok(response.map_into_left_body())
        })
    }
}

/// Write `X-RateLimit-*` headers; a disabled limiter writes nothing
fn apply_headers(headers: &mut HeaderMap, outcome: &RateLimitOutcome) {
    if outcome.limit == u32::MAX {
        return;
    }
    let values = [
        ("x-ratelimit-limit", outcome.limit.to_string()),
        ("x-ratelimit-remaining", outcome.remaining.to_string()),
        ("x-ratelimit-reset", outcome.reset_at.timestamp().to_string()),
    ];
    for (name, value) in values {
        if let Ok(value) = HeaderValue::from_str(&value) {
            headers.insert(HeaderName::from_static(name), value);
        }
    }
    if outcome.rate_limited {
        if let Ok(value) = HeaderValue::from_str(&outcome.retry_after_seconds().to_string()) {
            headers.insert(header::RETRY_AFTER, value);
        }
    }
}
