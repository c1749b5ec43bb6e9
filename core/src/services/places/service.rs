//! Places service: input checks in front of the provider

use once_cell::sync::Lazy;
use regex::Regex;
use std::sync::Arc;

use ns_shared::validation::validators;

use crate::domain::entities::place::{PlaceDetails, PlacePrediction};
use crate::errors::{DomainError, DomainResult};

use super::traits::PlacesProvider;

const INPUT_MIN: usize = 2;
const INPUT_MAX: usize = 200;
const SESSION_TOKEN_MAX: usize = 128;

static PLACE_ID_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,300}$").expect("place id regex is valid"));

pub struct PlacesService<P: PlacesProvider> {
    provider: Arc<P>,
}

impl<P: PlacesProvider> PlacesService<P> {
    pub fn new(provider: Arc<P>) -> Self {
        Self { provider }
    }

    pub async fn autocomplete(
        &self,
        input: &str,
        session_token: Option<&str>,
    ) -> DomainResult<Vec<PlacePrediction>> {
        let input = input.trim();
        if !validators::length_between(input, INPUT_MIN, INPUT_MAX) {
            return Err(DomainError::validation(
                "input",
                format!("Input must be between {} and {} characters", INPUT_MIN, INPUT_MAX),
            ));
        }
        let session_token = check_session_token(session_token)?;

        let predictions = self.provider.autocomplete(input, session_token).await?;
        tracing::debug!(count = predictions.len(), "place predictions fetched");
        Ok(predictions)
    }

    pub async fn details(&self, place_id: &str, session_token: Option<&str>) -> DomainResult<PlaceDetails> {
        let place_id = place_id.trim();
        if !validators::not_empty(place_id) {
            return Err(DomainError::validation("placeId", "Place id is required"));
        }
        if !validators::matches_pattern(place_id, &PLACE_ID_REGEX) {
            return Err(DomainError::validation("placeId", "Invalid place id"));
        }
        let session_token = check_session_token(session_token)?;

        self.provider.details(place_id, session_token).await
    }
}

fn check_session_token(token: Option<&str>) -> DomainResult<Option<&str>> {
    match token.map(str::trim).filter(|t| !t.is_empty()) {
        Some(t) if t.chars().count() > SESSION_TOKEN_MAX => Err(DomainError::validation(
            "sessionToken",
            format!("Session token must be at most {} characters", SESSION_TOKEN_MAX),
        )),
        other => Ok(other),
    }
}
