//! Bearer-token guard for admin endpoints
//!
//! When no token is configured the guard is open in development and closed
//! everywhere else.

use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    http::header::AUTHORIZATION,
    Error, ResponseError,
};
use futures_util::future::LocalBoxFuture;
use std::{
    future::{ready, Ready},
    rc::Rc,
};

use ns_core::DomainError;
use ns_shared::Environment;

use crate::handlers::ApiError;

#[derive(Debug, Clone)]
pub struct AdminAuth {
    token: Option<Rc<str>>,
    open_without_token: bool,
}

impl AdminAuth {
    pub fn new(token: Option<String>, environment: Environment) -> Self {
        let token = token.filter(|t| !t.trim().is_empty());
        if token.is_none() && !environment.is_development() {
            tracing::warn!("No admin token configured; admin endpoints will reject every request");
        }
        Self {
            token: token.map(|t| Rc::from(t.as_str())),
            open_without_token: environment.is_development(),
        }
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: Some(Rc::from(token.into().as_str())),
            open_without_token: false,
        }
    }
}

impl<S, B> Transform<S, ServiceRequest> for AdminAuth
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = AdminAuthMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AdminAuthMiddleware {
            service: Rc::new(service),
            token: self.token.clone(),
            open_without_token: self.open_without_token,
        }))
    }
}

pub struct AdminAuthMiddleware<S> {
    service: Rc<S>,
    token: Option<Rc<str>>,
    open_without_token: bool,
}

impl<S, B> Service<ServiceRequest> for AdminAuthMiddleware<S>
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
        let authorized = match &self.token {
            Some(expected) => bearer_token(&req)
                .map(|given| constant_time_eq(given.as_bytes(), expected.as_bytes()))
                .unwrap_or(false),
            None => self.open_without_token,
        };

        Box::pin(async move {
            if !authorized {
                tracing::warn!(path = %req.path(), "admin request rejected");
                let response = ApiError::from(DomainError::Unauthorized).error_response();
                return Ok(req.into_response(response).map_into_right_body());
            }
            Ok(service.call(req).await?.map_into_left_body())
        })
    }
}

fn bearer_token(req: &ServiceRequest) -> Option<String> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then(|| token.to_string())
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    async fn ok() -> HttpResponse {
        HttpResponse::Ok().finish()
    }

    #[actix_web::test]
    async fn test_token_required() {
        let app = test::init_service(
            App::new().service(
                web::scope("/admin")
                    .wrap(AdminAuth::with_token("s3cret"))
                    .route("", web::post().to(ok)),
            ),
        )
        .await;

        let missing = test::TestRequest::post().uri("/admin").to_request();
        assert_eq!(test::call_service(&app, missing).await.status(), 401);

        let wrong = test::TestRequest::post()
            .uri("/admin")
            .insert_header(("Authorization", "Bearer nope"))
            .to_request();
        assert_eq!(test::call_service(&app, wrong).await.status(), 401);

        let right = test::TestRequest::post()
            .uri("/admin")
            .insert_header(("Authorization", "bearer s3cret"))
            .to_request();
        assert_eq!(test::call_service(&app, right).await.status(), 200);
    }

    #[actix_web::test]
    async fn test_unconfigured_token_depends_on_environment() {
        for (environment, status) in [(Environment::Development, 200), (Environment::Production, 401)] {
            let app = test::init_service(
                App::new().service(
                    web::scope("/admin")
                        .wrap(AdminAuth::new(None, environment))
                        .route("", web::post().to(ok)),
                ),
            )
            .await;
            let req = test::TestRequest::post().uri("/admin").to_request();
            assert_eq!(test::call_service(&app, req).await.status(), status);
        }
    }

    #[::std::prelude::v1::test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"abc", b"abc"));
        assert!(!constant_time_eq(b"abc", b"abd"));
        assert!(!constant_time_eq(b"abc", b"abcd"));
    }
}
