//! Google Places client
//!
//! Uses the Places Autocomplete and Place Details JSON web services. Both
//! answer HTTP 200 with a `status` field that carries the real outcome.

use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use ns_core::{DomainResult, LatLng, PlaceDetails, PlacePrediction, PlacesProvider};

use crate::http::{build_client, read_body};
use crate::InfrastructureError;

const PROVIDER: &str = "Google Places";
const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com/maps/api/place";
const DETAIL_FIELDS: &str = "place_id,name,formatted_address,formatted_phone_number,website,rating,user_ratings_total,geometry/location,types";

/// Map a Places API `status` to success or an error
pub(crate) fn check_status(status: &str, error_message: Option<&str>) -> Result<(), InfrastructureError> {
    match status {
        "OK" | "ZERO_RESULTS" => Ok(()),
        "NOT_FOUND" => Err(InfrastructureError::NotFound {
            provider: PROVIDER,
            resource: "place".to_string(),
        }),
        other => Err(InfrastructureError::provider(
            PROVIDER,
            match error_message {
                Some(message) => format!("{}: {}", other, message),
                None => other.to_string(),
            },
        )),
    }
}

#[derive(Debug, Deserialize)]
struct AutocompleteResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    predictions: Vec<RawPrediction>,
}

#[derive(Debug, Deserialize)]
struct RawPrediction {
    place_id: String,
    description: String,
    #[serde(default)]
    structured_formatting: Option<StructuredFormatting>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct StructuredFormatting {
    main_text: String,
    #[serde(default)]
    secondary_text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct DetailsResponse {
    status: String,
    #[serde(default)]
    error_message: Option<String>,
    #[serde(default)]
    result: Option<RawDetails>,
}

#[derive(Debug, Deserialize)]
struct RawDetails {
    place_id: String,
    name: String,
    #[serde(default)]
    formatted_address: Option<String>,
    #[serde(default)]
    formatted_phone_number: Option<String>,
    #[serde(default)]
    website: Option<String>,
    #[serde(default)]
    rating: Option<f64>,
    #[serde(default)]
    user_ratings_total: Option<u32>,
    #[serde(default)]
    geometry: Option<Geometry>,
    #[serde(default)]
    types: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct Geometry {
    location: LatLng,
}

pub(crate) fn parse_autocomplete(body: &str) -> Result<Vec<PlacePrediction>, InfrastructureError> {
    let response: AutocompleteResponse =
        serde_json::from_str(body).map_err(|e| InfrastructureError::parse(PROVIDER, e.to_string()))?;
    check_status(&response.status, response.error_message.as_deref())?;

    Ok(response
        .predictions
        .into_iter()
        .map(|p| {
            let (main_text, secondary_text) = match p.structured_formatting {
                Some(f) => (f.main_text, f.secondary_text),
                None => (p.description.clone(), None),
            };
            PlacePrediction {
                place_id: p.place_id,
                description: p.description,
                main_text,
                secondary_text,
                types: p.types,
            }
        })
        .collect())
}

pub(crate) fn parse_details(body: &str) -> Result<PlaceDetails, InfrastructureError> {
    let response: DetailsResponse =
        serde_json::from_str(body).map_err(|e| InfrastructureError::parse(PROVIDER, e.to_string()))?;
    check_status(&response.status, response.error_message.as_deref())?;

    // ZERO_RESULTS carries no result
    let raw = response.result.ok_or(InfrastructureError::NotFound {
        provider: PROVIDER,
        resource: "place".to_string(),
    })?;

    Ok(PlaceDetails {
        place_id: raw.place_id,
        name: raw.name,
        formatted_address: raw.formatted_address,
        phone: raw.formatted_phone_number,
        website: raw.website,
        rating: raw.rating,
        user_ratings_total: raw.user_ratings_total,
        location: raw.geometry.map(|g| g.location),
        types: raw.types,
    })
}

pub struct GooglePlacesClient {
    client: reqwest::Client,
    api_key: Option<String>,
    region: Option<String>,
    base_url: String,
}

impl GooglePlacesClient {
    pub fn new(api_key: Option<String>, region: Option<String>, timeout: Duration) -> Result<Self, InfrastructureError> {
        Ok(Self {
            client: build_client(timeout)?,
            api_key,
            region,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn api_key(&self) -> Result<&str, InfrastructureError> {
        self.api_key
            .as_deref()
            .ok_or_else(|| InfrastructureError::Config("GOOGLE_PLACES_API_KEY is not set".to_string()))
    }

    async fn get(&self, path: &str, query: &[(&str, &str)]) -> Result<String, InfrastructureError> {
        let response = self
            .client
            .get(format!("{}/{}", self.base_url, path))
            .query(query)
            .send()
            .await
            .map_err(|e| InfrastructureError::request(PROVIDER, e))?;
        read_body(PROVIDER, response).await
    }
}

#[async_trait]
impl PlacesProvider for GooglePlacesClient {
    async fn autocomplete(&self, input: &str, session_token: Option<&str>) -> DomainResult<Vec<PlacePrediction>> {
        let key = self.api_key()?;
        let mut query = vec![("input", input), ("key", key)];
        if let Some(token) = session_token {
            query.push(("sessiontoken", token));
        }
        if let Some(region) = self.region.as_deref() {
            query.push(("region", region));
        }

        let body = self.get("autocomplete/json", &query).await?;
        Ok(parse_autocomplete(&body)?)
    }

    async fn details(&self, place_id: &str, session_token: Option<&str>) -> DomainResult<PlaceDetails> {
        let key = self.api_key()?;
        let mut query = vec![("place_id", place_id), ("fields", DETAIL_FIELDS), ("key", key)];
        if let Some(token) = session_token {
            query.push(("sessiontoken", token));
        }

        let body = self.get("details/json", &query).await?;
        Ok(parse_details(&body)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert!(check_status("OK", None).is_ok());
        assert!(check_status("ZERO_RESULTS", None).is_ok());
        assert!(matches!(
            check_status("NOT_FOUND", None),
            Err(InfrastructureError::NotFound { .. })
        ));
        match check_status("REQUEST_DENIED", Some("The provided API key is invalid.")) {
            Err(InfrastructureError::Provider { message, .. }) => {
                assert_eq!(message, "REQUEST_DENIED: The provided API key is invalid.")
            }
            other => panic!("Expected provider error, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_autocomplete() {
        let body = r#"{
            "status": "OK",
            "predictions": [
                {
                    "place_id": "ChIJN1t_tDeuEmsRUsoyG83frY4",
                    "description": "Acme Coffee, Congress Avenue, Austin, TX, USA",
                    "structured_formatting": {
                        "main_text": "Acme Coffee",
                        "secondary_text": "Congress Avenue, Austin, TX, USA"
                    },
                    "types": ["cafe", "establishment"]
                },
                {
                    "place_id": "abc",
                    "description": "Acme Plaza"
                }
            ]
        }"#;
        let predictions = parse_autocomplete(body).unwrap();
        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0].main_text, "Acme Coffee");
        assert_eq!(predictions[0].types, vec!["cafe", "establishment"]);
        assert_eq!(predictions[1].main_text, "Acme Plaza");
        assert!(predictions[1].secondary_text.is_none());
    }

    #[test]
    fn test_parse_zero_results() {
        let predictions = parse_autocomplete(r#"{"status":"ZERO_RESULTS","predictions":[]}"#).unwrap();
        assert!(predictions.is_empty());
    }

    #[test]
    fn test_parse_details() {
        let body = r#"{
            "status": "OK",
            "result": {
                "place_id": "ChIJ123",
                "name": "Acme Coffee",
                "formatted_address": "1 Congress Ave, Austin, TX 78701, USA",
                "formatted_phone_number": "(512) 555-0100",
                "website": "https://acme.coffee/",
                "rating": 4.6,
                "user_ratings_total": 212,
                "geometry": { "location": { "lat": 30.2642, "lng": -97.7446 } },
                "types": ["cafe"]
            }
        }"#;
        let details = parse_details(body).unwrap();
        assert_eq!(details.name, "Acme Coffee");
        assert_eq!(details.phone.as_deref(), Some("(512) 555-0100"));
        assert_eq!(details.user_ratings_total, Some(212));
        assert_eq!(details.location.map(|l| l.lat), Some(30.2642));
    }

    #[test]
    fn test_parse_details_not_found() {
        assert!(matches!(
            parse_details(r#"{"status":"NOT_FOUND"}"#),
            Err(InfrastructureError::NotFound { .. })
        ));
        assert!(matches!(
            parse_details(r#"{"status":"INVALID_REQUEST","error_message":"Invalid request."}"#),
            Err(InfrastructureError::Provider { .. })
        ));
        assert!(matches!(parse_details("<html>"), Err(InfrastructureError::Parse { .. })));
    }
}
