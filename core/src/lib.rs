//! # Northstar Core
//!
//! Core business logic and domain layer for the Northstar backend.
//! This crate contains domain entities, business services, provider and
//! repository interfaces, and the error types the other layers map from.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::{
    AnalyticsSummary, AuditReport, AuditRequest, AuditSection, AuditStatus, BacklinkSummary,
    Competitor, ContactReceipt, ContactSubmission, ContextEntry, ContextResult, DomainOverview,
    EmailEvent, EmailEventKind, LatLng, OnPageResult, OutgoingEmail, PlaceDetails,
    PlacePrediction, Priority, RankedKeyword, Recommendation,
};
pub use errors::{DomainError, DomainResult};
pub use repositories::{KvStore, MockKvStore};
pub use services::{
    AuditService, AuditServiceConfig, ContactService, ContactServiceConfig, ContextFetcher,
    ContextService, ContextServiceConfig, EmailAnalytics, EmailProvider, FixedWindowRateLimiter,
    InsightGenerator, PlacesProvider, PlacesService, RateLimitOutcome, RateLimiterTrait,
    SeoDataProvider,
};
