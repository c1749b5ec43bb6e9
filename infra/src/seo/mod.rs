//! SEO data providers

pub mod dataforseo;

pub use dataforseo::DataForSeoClient;
