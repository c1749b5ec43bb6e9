//! Contact form service module
//!
//! This module handles contact form submissions:
//! - Field sanitization and validation
//! - Honeypot spam filtering
//! - Team notification and visitor confirmation emails
//! - Delivery analytics

mod config;
mod service;
mod templates;
mod traits;


pub use config::ContactServiceConfig;
pub use service::ContactService;
pub use traits::EmailProvider;
