//! Mock providers and a ready-wired application state for route tests

#![allow(dead_code)]

use async_trait::async_trait;
use std::collections::HashSet;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ns_api::{AppState, RateLimiters};
use ns_api::routes::health::HealthState;
use ns_core::{
    AuditReport, AuditService, AuditServiceConfig, BacklinkSummary, Competitor, ContactService,
    ContactServiceConfig, ContextFetcher, ContextService, ContextServiceConfig, DomainError,
    DomainOverview, DomainResult, EmailAnalytics, InsightGenerator, LatLng, MockKvStore,
    OnPageResult, PlaceDetails, PlacePrediction, PlacesProvider, PlacesService, RankedKeyword,
    SeoDataProvider,
};
use ns_infra::MockEmailService;
use ns_shared::Environment;

pub const ADMIN_TOKEN: &str = "admin-token";
pub const KNOWN_PLACE_ID: &str = "ChIJN1t_tDeuEmsRUsoyG83frY4";

/// Places provider answering from fixed data
pub struct MockPlacesProvider {
    should_fail: AtomicBool,
    pub calls: AtomicUsize,
}

impl MockPlacesProvider {
    pub fn new() -> Self {
        Self {
            should_fail: AtomicBool::new(false),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }

    fn check(&self) -> DomainResult<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::upstream("Google Places", "REQUEST_DENIED"));
        }
        Ok(())
    }
}

#[async_trait]
impl PlacesProvider for MockPlacesProvider {
    async fn autocomplete(
        &self,
        input: &str,
        _session_token: Option<&str>,
    ) -> DomainResult<Vec<PlacePrediction>> {
        self.check()?;
        Ok(vec![PlacePrediction {
            place_id: KNOWN_PLACE_ID.to_string(),
            description: format!("{} Bakery, Denver, CO, USA", input),
            main_text: format!("{} Bakery", input),
            secondary_text: Some("Denver, CO, USA".to_string()),
            types: vec!["bakery".to_string(), "establishment".to_string()],
        }])
    }

    async fn details(&self, place_id: &str, _session_token: Option<&str>) -> DomainResult<PlaceDetails> {
        self.check()?;
        if place_id != KNOWN_PLACE_ID {
            return Err(DomainError::not_found("place"));
        }
        Ok(PlaceDetails {
            place_id: place_id.to_string(),
            name: "Sunrise Bakery".to_string(),
            formatted_address: Some("100 Main St, Denver, CO 80202, USA".to_string()),
            phone: Some("(303) 555-0100".to_string()),
            website: Some("https://sunrise.example".to_string()),
            rating: Some(4.7),
            user_ratings_total: Some(212),
            location: Some(LatLng { lat: 39.7392, lng: -104.9903 }),
            types: vec!["bakery".to_string()],
        })
    }
}

/// SEO provider whose sections can be made to fail one by one
pub struct MockSeoProvider {
    failing: Mutex<HashSet<&'static str>>,
}

impl MockSeoProvider {
    pub fn new() -> Self {
        Self {
            failing: Mutex::new(HashSet::new()),
        }
    }

    pub fn fail(&self, section: &'static str) {
        self.failing.lock().unwrap().insert(section);
    }

    pub fn fail_all(&self) {
        for section in ["overview", "backlinks", "keywords", "on_page", "competitors"] {
            self.fail(section);
        }
    }

    fn check(&self, section: &'static str) -> DomainResult<()> {
        if self.failing.lock().unwrap().contains(section) {
            return Err(DomainError::upstream("DataForSEO", format!("{} unavailable", section)));
        }
        Ok(())
    }
}

#[async_trait]
impl SeoDataProvider for MockSeoProvider {
    async fn domain_overview(&self, _domain: &str) -> DomainResult<DomainOverview> {
        self.check("overview")?;
        Ok(DomainOverview {
            organic_keywords: 340,
            organic_traffic: 1200.0,
            organic_traffic_cost: 850.0,
            paid_keywords: 0,
        })
    }

    async fn backlinks_summary(&self, _domain: &str) -> DomainResult<BacklinkSummary> {
        self.check("backlinks")?;
        Ok(BacklinkSummary {
            rank: 180,
            backlinks: 950,
            referring_domains: 64,
            broken_backlinks: 3,
        })
    }

    async fn ranked_keywords(&self, _domain: &str, limit: u32) -> DomainResult<Vec<RankedKeyword>> {
        self.check("keywords")?;
        Ok((1..=limit.min(3))
            .map(|i| RankedKeyword {
                keyword: format!("bakery denver {}", i),
                position: i,
                search_volume: 1000 / i as u64,
                url: Some("https://sunrise.example/".to_string()),
            })
            .collect())
    }

    async fn on_page(&self, _url: &str) -> DomainResult<OnPageResult> {
        self.check("on_page")?;
        Ok(OnPageResult {
            onpage_score: 82.0,
            status_code: Some(200),
            title: Some("Sunrise Bakery".to_string()),
            meta_description: None,
            h1_count: 1,
            word_count: 640,
            images_without_alt: 2,
            https: true,
            load_time_ms: Some(900),
        })
    }

    async fn competitors(&self, _domain: &str, _limit: u32) -> DomainResult<Vec<Competitor>> {
        self.check("competitors")?;
        Ok(vec![Competitor {
            domain: "rival-bakery.example".to_string(),
            intersections: 42,
            organic_traffic: 3100.0,
        }])
    }
}

pub struct MockInsight;

#[async_trait]
impl InsightGenerator for MockInsight {
    async fn summarize(&self, report: &AuditReport) -> DomainResult<String> {
        Ok(format!("{} scores {} out of 100.", report.domain, report.score))
    }
}

/// Context fetcher with switchable failure
pub struct MockContextFetcher {
    source: &'static str,
    content: String,
    should_fail: AtomicBool,
    pub fetches: AtomicUsize,
}

impl MockContextFetcher {
    pub fn new(source: &'static str, content: impl Into<String>) -> Self {
        Self {
            source,
            content: content.into(),
            should_fail: AtomicBool::new(false),
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn set_should_fail(&self, should_fail: bool) {
        self.should_fail.store(should_fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl ContextFetcher for MockContextFetcher {
    fn source(&self) -> &str {
        self.source
    }

    async fn fetch(&self) -> DomainResult<String> {
        self.fetches.fetch_add(1, Ordering::SeqCst);
        if self.should_fail.load(Ordering::SeqCst) {
            return Err(DomainError::upstream(self.source, "feed unavailable"));
        }
        Ok(self.content.clone())
    }

    fn fallback(&self) -> String {
        format!("{} fallback", self.source)
    }
}

pub type TestState =
    AppState<MockEmailService, MockPlacesProvider, MockSeoProvider, MockInsight, MockKvStore>;

/// Application state wired with mocks, plus handles to inspect them
pub struct TestHarness {
    pub email: Arc<MockEmailService>,
    pub places: Arc<MockPlacesProvider>,
    pub seo: Arc<MockSeoProvider>,
    pub store: Arc<MockKvStore>,
    pub github: Arc<MockContextFetcher>,
    pub blog: Arc<MockContextFetcher>,
    pub analytics: Arc<EmailAnalytics>,
    pub state: TestState,
}

impl TestHarness {
    pub fn new() -> Self {
        Self::with_limiters(RateLimiters::disabled())
    }

    pub fn with_limiters(limiters: RateLimiters) -> Self {
        let email = Arc::new(MockEmailService::new());
        let places = Arc::new(MockPlacesProvider::new());
        let seo = Arc::new(MockSeoProvider::new());
        let store = Arc::new(MockKvStore::new());
        let github = Arc::new(MockContextFetcher::new("github", "- site: Agency website"));
        let blog = Arc::new(MockContextFetcher::new("blog", "- Local SEO checklist"));
        let analytics = Arc::new(EmailAnalytics::new());

        let contact = ContactService::new(
            Arc::clone(&email),
            Arc::clone(&analytics),
            ContactServiceConfig::new("team@northstar.test"),
        );
        let audit = AuditService::new(
            Arc::clone(&seo),
            Arc::new(MockInsight),
            AuditServiceConfig::default(),
        );
        let context = ContextService::new(
            Arc::clone(&store),
            ContextServiceConfig::new(Duration::from_secs(3600)),
        )
        .with_fetcher(github.clone())
        .with_fetcher(blog.clone());

        let state = AppState {
            contact: Arc::new(contact),
            places: Arc::new(PlacesService::new(Arc::clone(&places))),
            audit: Arc::new(audit),
            context: Arc::new(context),
            analytics: Arc::clone(&analytics),
            limiters,
            health: Arc::new(HealthState::default()),
            admin_token: Some(ADMIN_TOKEN.to_string()),
            environment: Environment::Development,
            max_payload_size: 64 * 1024,
        };

        Self {
            email,
            places,
            seo,
            store,
            github,
            blog,
            analytics,
            state,
        }
    }
}
