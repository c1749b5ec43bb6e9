//! CORS configuration
//!
//! Development allows any origin. Production allows the origins listed in
//! `ALLOWED_ORIGINS` (comma separated) plus `https://{WEB_DOMAIN}` and its
//! `www.` variant.

use actix_cors::Cors;
use actix_web::http::{header, Method};
use std::env;

use ns_shared::Environment;

pub fn create_cors(environment: Environment) -> Cors {
    let max_age = env::var("CORS_MAX_AGE")
        .ok()
        .and_then(|v| v.parse::<usize>().ok())
        .unwrap_or(3600);

    if environment.is_production() {
        create_production_cors(max_age, &allowed_origins())
    } else {
        create_development_cors(max_age)
    }
}

/// Origins accepted in production
pub fn allowed_origins() -> Vec<String> {
    let mut origins: Vec<String> = env::var("ALLOWED_ORIGINS")
        .unwrap_or_default()
        .split(',')
        .map(|s| s.trim().trim_end_matches('/').to_string())
        .filter(|s| !s.is_empty())
        .collect();

    if let Ok(web_domain) = env::var("WEB_DOMAIN") {
        let web_domain = web_domain.trim();
        if !web_domain.is_empty() {
            origins.push(format!("https://{}", web_domain));
            origins.push(format!("https://www.{}", web_domain));
        }
    }
    origins
}

fn base_cors(max_age: usize) -> Cors {
    Cors::default()
        .allowed_methods(vec![Method::GET, Method::POST, Method::OPTIONS])
        .allowed_headers(vec![
            header::AUTHORIZATION,
            header::ACCEPT,
            header::CONTENT_TYPE,
            header::HeaderName::from_static("x-request-id"),
        ])
        .expose_headers(vec![
            header::HeaderName::from_static("x-request-id"),
            header::HeaderName::from_static("x-ratelimit-limit"),
            header::HeaderName::from_static("x-ratelimit-remaining"),
            header::HeaderName::from_static("x-ratelimit-reset"),
            header::RETRY_AFTER,
        ])
        .max_age(max_age)
}

fn create_development_cors(max_age: usize) -> Cors {
    tracing::info!("Configuring permissive CORS for development");
    base_cors(max_age).allow_any_origin()
}

fn create_production_cors(max_age: usize, origins: &[String]) -> Cors {
    if origins.is_empty() {
        tracing::warn!("ALLOWED_ORIGINS is empty; cross-origin requests will be rejected");
    }
    origins.iter().fold(base_cors(max_age), |cors, origin| {
        tracing::info!(origin = %origin, "allowing CORS origin");
        cors.allowed_origin(origin)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_origins_from_env() {
        env::set_var("ALLOWED_ORIGINS", "https://northstar.digital/, https://admin.northstar.digital,");
        env::set_var("WEB_DOMAIN", "northstar.test");
        let origins = allowed_origins();
        env::remove_var("ALLOWED_ORIGINS");
        env::remove_var("WEB_DOMAIN");

        assert_eq!(
            origins,
            vec![
                "https://northstar.digital",
                "https://admin.northstar.digital",
                "https://northstar.test",
                "https://www.northstar.test",
            ]
        );
    }
}
