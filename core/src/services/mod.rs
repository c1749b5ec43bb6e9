//! Business services containing domain logic and use cases.

pub mod analytics;
pub mod audit;
pub mod contact;
pub mod context;
pub mod places;
pub mod rate_limit;

// Re-export commonly used types
pub use analytics::EmailAnalytics;
pub use audit::{AuditService, AuditServiceConfig, InsightGenerator, SeoDataProvider};
pub use contact::{ContactService, ContactServiceConfig, EmailProvider};
pub use context::{is_cache_valid, ContextFetcher, ContextService, ContextServiceConfig};
pub use places::{PlacesProvider, PlacesService};
pub use rate_limit::{FixedWindowRateLimiter, RateLimitOutcome, RateLimiterTrait};
