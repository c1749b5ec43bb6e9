pub mod auth;
pub mod client_ip;
pub mod cors;
pub mod rate_limit;
pub mod request_id;
pub mod security;

pub use auth::AdminAuth;
pub use client_ip::extract_client_ip;
pub use cors::create_cors;
pub use rate_limit::RateLimit;
pub use request_id::{RequestId, RequestIdExt, RequestIdMiddleware};
pub use security::SecurityMiddleware;
