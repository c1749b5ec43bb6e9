//! HTTP layer of the Northstar backend

pub mod app;
pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;

pub use app::{build_state, create_app, AppState, ProductionState, RateLimiters};
