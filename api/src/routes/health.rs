use actix_web::{web, HttpResponse};
use std::collections::HashMap;

use ns_shared::{AppConfig, HealthResponse, ServiceHealth};

/// Provider readiness computed once at startup
#[derive(Debug, Clone, Default)]
pub struct HealthState {
    services: HashMap<String, ServiceHealth>,
}

impl HealthState {
    pub fn new(services: HashMap<String, ServiceHealth>) -> Self {
        Self { services }
    }

    pub fn from_config(config: &AppConfig, email_provider: &str, cache_backend: &str) -> Self {
        let p = &config.providers;
        let configured = |ok: bool, what: &str| {
            if ok {
                ServiceHealth::healthy()
            } else {
                ServiceHealth::degraded(format!("{} not configured", what))
            }
        };

        let mut services = HashMap::new();
        services.insert(
            "email".to_string(),
            if email_provider == "Mock" {
                ServiceHealth::degraded("using mock email provider")
            } else {
                configured(p.resend.api_key.is_some(), "RESEND_API_KEY")
            },
        );
        services.insert(
            "places".to_string(),
            configured(p.places.api_key.is_some(), "GOOGLE_PLACES_API_KEY"),
        );
        services.insert(
            "seo".to_string(),
            configured(
                p.dataforseo.login.is_some() && p.dataforseo.password.is_some(),
                "DataForSEO credentials",
            ),
        );
        services.insert(
            "insight".to_string(),
            configured(p.openai.api_key.is_some(), "OPENAI_API_KEY"),
        );
        services.insert(
            "cache".to_string(),
            if cache_backend == "memory" && config.cache.backend == ns_shared::CacheBackend::Redis {
                ServiceHealth::degraded("redis unavailable, using memory")
            } else {
                ServiceHealth::healthy()
            },
        );
        Self { services }
    }
}

/// `GET /health`
pub async fn health(state: web::Data<HealthState>) -> HttpResponse {
    HttpResponse::Ok().json(HealthResponse::from_services(
        state.services.clone(),
        env!("CARGO_PKG_VERSION"),
    ))
}
