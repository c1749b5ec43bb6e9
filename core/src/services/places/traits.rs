//! Trait for place search integration

use async_trait::async_trait;

use crate::domain::entities::place::{PlaceDetails, PlacePrediction};
use crate::errors::DomainResult;

/// Place search provider
#[async_trait]
pub trait PlacesProvider: Send + Sync {
    async fn autocomplete(
        &self,
        input: &str,
        session_token: Option<&str>,
    ) -> DomainResult<Vec<PlacePrediction>>;

    /// Details for one place; `NotFound` when the provider doesn't know the id
    async fn details(&self, place_id: &str, session_token: Option<&str>) -> DomainResult<PlaceDetails>;
}
