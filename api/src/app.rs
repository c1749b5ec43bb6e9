//! Application state and factory

use actix_web::{
    body::MessageBody,
    dev::{ServiceFactory, ServiceRequest, ServiceResponse},
    error::{JsonPayloadError, QueryPayloadError},
    web, App, Error, HttpRequest, HttpResponse,
};
use std::sync::Arc;
use std::time::Duration;
use tracing_actix_web::TracingLogger;

use ns_core::{
    AuditService, AuditServiceConfig, ContactService, ContactServiceConfig, ContextService,
    ContextServiceConfig, EmailAnalytics, EmailProvider, FixedWindowRateLimiter, InsightGenerator,
    KvStore, PlacesProvider, PlacesService, RateLimiterTrait, SeoDataProvider,
};
use ns_infra::{
    create_email_service, create_kv_store, DataForSeoClient, EmailService, GitHubActivityFetcher,
    GooglePlacesClient, InfrastructureError, KvBackend, OpenAiInsightClient, RssFeedFetcher,
};
use ns_shared::{AppConfig, Environment, ErrorResponse, RateLimitConfig, WindowLimit};

use crate::handlers::ApiError;
use crate::middleware::{create_cors, AdminAuth, RateLimit, RequestIdMiddleware, SecurityMiddleware};
use crate::routes::{self, health::HealthState};

/// One limiter per endpoint group
#[derive(Clone)]
pub struct RateLimiters {
    pub contact: Arc<dyn RateLimiterTrait>,
    pub audit: Arc<dyn RateLimiterTrait>,
    pub places: Arc<dyn RateLimiterTrait>,
    pub api: Arc<dyn RateLimiterTrait>,
}

impl RateLimiters {
    pub fn from_config(config: &RateLimitConfig) -> Self {
        let limiter = |limit: &WindowLimit| -> Arc<dyn RateLimiterTrait> {
            Arc::new(FixedWindowRateLimiter::from_limit(limit, config.enabled))
        };
        Self {
            contact: limiter(&config.contact),
            audit: limiter(&config.audit),
            places: limiter(&config.places),
            api: limiter(&config.api),
        }
    }

    pub fn disabled() -> Self {
        Self::from_config(&RateLimitConfig::disabled())
    }

    /// Drop expired windows from every limiter
    pub fn purge(&self) -> usize {
        [&self.contact, &self.audit, &self.places, &self.api]
            .iter()
            .map(|limiter| limiter.purge())
            .sum()
    }

    /// Spawn a task that purges expired windows every `every`
    pub fn start_sweeper(&self, every: Duration) {
        let limiters = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(every);
            loop {
                ticker.tick().await;
                let purged = limiters.purge();
                if purged > 0 {
                    tracing::debug!(purged, "expired rate-limit windows dropped");
                }
            }
        });
    }
}

/// Services shared by every worker
pub struct AppState<E, P, S, I, K>
where
    E: EmailProvider,
    P: PlacesProvider,
    S: SeoDataProvider,
    I: InsightGenerator,
    K: KvStore,
{
    pub contact: Arc<ContactService<E>>,
    pub places: Arc<PlacesService<P>>,
    pub audit: Arc<AuditService<S, I>>,
    pub context: Arc<ContextService<K>>,
    pub analytics: Arc<EmailAnalytics>,
    pub limiters: RateLimiters,
    pub health: Arc<HealthState>,
    pub admin_token: Option<String>,
    pub environment: Environment,
    pub max_payload_size: usize,
}

impl<E, P, S, I, K> Clone for AppState<E, P, S, I, K>
where
    E: EmailProvider,
    P: PlacesProvider,
    S: SeoDataProvider,
    I: InsightGenerator,
    K: KvStore,
{
    fn clone(&self) -> Self {
        Self {
            contact: Arc::clone(&self.contact),
            places: Arc::clone(&self.places),
            audit: Arc::clone(&self.audit),
            context: Arc::clone(&self.context),
            analytics: Arc::clone(&self.analytics),
            limiters: self.limiters.clone(),
            health: Arc::clone(&self.health),
            admin_token: self.admin_token.clone(),
            environment: self.environment,
            max_payload_size: self.max_payload_size,
        }
    }
}

/// State wired with the real providers
pub type ProductionState =
    AppState<EmailService, GooglePlacesClient, DataForSeoClient, OpenAiInsightClient, KvBackend>;

/// Build the production state from configuration
pub async fn build_state(config: &AppConfig) -> Result<ProductionState, InfrastructureError> {
    let timeout = Duration::from_secs(config.providers.request_timeout_secs);
    let providers = &config.providers;

    let analytics = Arc::new(EmailAnalytics::new());

    let email = create_email_service(&providers.resend, config.environment, timeout);
    let email_provider = email.provider_name();
    let contact = ContactService::new(
        Arc::new(email),
        Arc::clone(&analytics),
        ContactServiceConfig::new(providers.resend.notify_to.clone()),
    );

    let places = PlacesService::new(Arc::new(GooglePlacesClient::new(
        providers.places.api_key.clone(),
        providers.places.region.clone(),
        timeout,
    )?));

    let audit = AuditService::new(
        Arc::new(DataForSeoClient::new(&providers.dataforseo, timeout)?),
        Arc::new(OpenAiInsightClient::new(&providers.openai, timeout)?),
        AuditServiceConfig::from(&config.audit),
    );

    let store = create_kv_store(&config.cache).await;
    let cache_backend = store.backend_name();
    let context = ContextService::new(Arc::new(store), ContextServiceConfig::from(&config.context))
        .with_fetcher(Arc::new(GitHubActivityFetcher::new(&providers.github, timeout)?))
        .with_fetcher(Arc::new(RssFeedFetcher::new(providers.blog_feed_url.clone(), timeout)?));

    Ok(AppState {
        contact: Arc::new(contact),
        places: Arc::new(places),
        audit: Arc::new(audit),
        context: Arc::new(context),
        analytics,
        limiters: RateLimiters::from_config(&config.rate_limit),
        health: Arc::new(HealthState::from_config(config, email_provider, cache_backend)),
        admin_token: config.context.refresh_token.clone(),
        environment: config.environment,
        max_payload_size: config.server.max_payload_size,
    })
}

/// Create the application with all routes and middleware
pub fn create_app<E, P, S, I, K>(
    state: AppState<E, P, S, I, K>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
>
where
    E: EmailProvider + 'static,
    P: PlacesProvider + 'static,
    S: SeoDataProvider + 'static,
    I: InsightGenerator + 'static,
    K: KvStore + 'static,
{
    let admin = AdminAuth::new(state.admin_token.clone(), state.environment);
    let limiters = state.limiters.clone();

    App::new()
        .app_data(web::Data::from(Arc::clone(&state.contact)))
        .app_data(web::Data::from(Arc::clone(&state.places)))
        .app_data(web::Data::from(Arc::clone(&state.audit)))
        .app_data(web::Data::from(Arc::clone(&state.context)))
        .app_data(web::Data::from(Arc::clone(&state.analytics)))
        .app_data(web::Data::from(Arc::clone(&state.health)))
        .app_data(
            web::JsonConfig::default()
                .limit(state.max_payload_size)
                .error_handler(json_error),
        )
        .app_data(web::QueryConfig::default().error_handler(query_error))
        // Middleware order: the last wrap runs first
        .wrap(SecurityMiddleware::new(state.environment))
        .wrap(create_cors(state.environment))
        .wrap(TracingLogger::default())
        .wrap(RequestIdMiddleware)
        .route("/health", web::get().to(routes::health::health))
        .service(
            web::scope("/api")
                .service(
                    web::scope("/contact")
                        .wrap(RateLimit::new("contact", limiters.contact))
                        .route("", web::post().to(routes::contact::submit::<E>)),
                )
                .service(
                    web::scope("/audit")
                        .wrap(RateLimit::new("audit", limiters.audit))
                        .route("/generate", web::post().to(routes::audit::generate::<S, I>)),
                )
                .service(
                    web::scope("/places")
                        .wrap(RateLimit::new("places", limiters.places))
                        .route("/autocomplete", web::get().to(routes::places::autocomplete::<P>))
                        .route("/details", web::get().to(routes::places::details::<P>)),
                )
                .service(
                    web::scope("/context")
                        .wrap(RateLimit::new("context", Arc::clone(&limiters.api)))
                        .service(
                            web::resource("/refresh")
                                .wrap(admin.clone())
                                .route(web::post().to(routes::context::refresh::<K>)),
                        )
                        .route("", web::get().to(routes::context::list::<K>))
                        .route("/{source}", web::get().to(routes::context::get_one::<K>)),
                )
                .service(
                    web::scope("/email")
                        .wrap(RateLimit::new("email", limiters.api))
                        .route("/webhook", web::post().to(routes::email::webhook))
                        .service(
                            web::resource("/analytics")
                                .wrap(admin)
                                .route(web::get().to(routes::email::analytics)),
                        ),
                ),
        )
        .default_service(web::route().to(not_found))
}

fn json_error(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    ApiError::bad_request(format!("Invalid JSON body: {}", err)).into()
}

fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> Error {
    ApiError::bad_request(format!("Invalid query string: {}", err)).into()
}

async fn not_found() -> HttpResponse {
    HttpResponse::NotFound().json(ErrorResponse::new(
        ns_shared::error_codes::NOT_FOUND,
        "The requested resource was not found",
    ))
}
