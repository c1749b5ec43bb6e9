//! Place search providers

pub mod google;

pub use google::GooglePlacesClient;
