use serde::{Deserialize, Serialize};

use ns_core::{PlaceDetails, PlacePrediction};

/// Query of `GET /api/places/autocomplete`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AutocompleteQuery {
    #[serde(default)]
    pub input: String,
    pub session_token: Option<String>,
}

/// Query of `GET /api/places/details`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailsQuery {
    #[serde(default, alias = "place_id")]
    pub place_id: String,
    pub session_token: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutocompleteResponse {
    pub predictions: Vec<PlacePrediction>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DetailsResponse {
    pub place: PlaceDetails,
}
