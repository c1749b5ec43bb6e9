use actix_web::{web, HttpRequest, HttpResponse};

use ns_core::{PlacesProvider, PlacesService};

use crate::dto::places::{AutocompleteQuery, AutocompleteResponse, DetailsQuery, DetailsResponse};
use crate::handlers::ApiError;

use super::success;

/// `GET /api/places/autocomplete?input=&sessionToken=`
pub async fn autocomplete<P>(
    req: HttpRequest,
    service: web::Data<PlacesService<P>>,
    query: web::Query<AutocompleteQuery>,
) -> Result<HttpResponse, ApiError>
where
    P: PlacesProvider + 'static,
{
    let query = query.into_inner();
    let predictions = service
        .autocomplete(&query.input, query.session_token.as_deref())
        .await?;
    Ok(success(&req, AutocompleteResponse { predictions }))
}

/// `GET /api/places/details?placeId=&sessionToken=`
pub async fn details<P>(
    req: HttpRequest,
    service: web::Data<PlacesService<P>>,
    query: web::Query<DetailsQuery>,
) -> Result<HttpResponse, ApiError>
where
    P: PlacesProvider + 'static,
{
    let query = query.into_inner();
    let place = service
        .details(&query.place_id, query.session_token.as_deref())
        .await?;
    Ok(success(&req, DetailsResponse { place }))
}
