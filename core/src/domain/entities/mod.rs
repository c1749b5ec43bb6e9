//! Domain entities

pub mod audit;
pub mod contact;
pub mod context;
pub mod email_event;
pub mod place;

pub use audit::{
    AuditReport, AuditRequest, AuditSection, AuditStatus, BacklinkSummary, Competitor,
    DomainOverview, OnPageResult, Priority, RankedKeyword, Recommendation,
};
pub use contact::{ContactReceipt, ContactSubmission, OutgoingEmail};
pub use context::{ContextEntry, ContextResult};
pub use email_event::{AnalyticsSummary, EmailEvent, EmailEventKind};
pub use place::{LatLng, PlaceDetails, PlacePrediction};
