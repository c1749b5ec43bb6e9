//! Places lookup service module

mod service;
mod traits;

#[cfg(test)]
mod tests;

pub use service::PlacesService;
pub use traits::PlacesProvider;
