/// Property endpoints
///
/// - `GET /api/properties` - Search, all query parameters optional
/// - `POST /api/properties` - List a new property owned by the caller
///
/// # Search parameters
///
/// ```text
/// GET /api/properties?city=vancouver&min_cost_per_night=5000&max_cost_per_night=20000&min_rating=4&limit=5
/// ```
///
/// Prices are in cents.

use crate::{
    app::{AppState, Session},
    error::ApiResult,
};
use axum::{
    extract::{Query, State},
    http::StatusCode,
    Extension, Json,
};
use lightbnb_shared::models::{
    property::{CreateProperty, Property, PropertyListing},
    property_filter::{PropertyFilter, DEFAULT_LIMIT},
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

/// Query string of a property search
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    pub city: Option<String>,
    pub owner_id: Option<Uuid>,
    pub min_cost_per_night: Option<i64>,
    pub max_cost_per_night: Option<i64>,
    pub min_rating: Option<f64>,
    pub limit: Option<i64>,
}

impl From<SearchParams> for PropertyFilter {
    fn from(params: SearchParams) -> Self {
        Self {
            city: params.city,
            owner_id: params.owner_id,
            min_cost_per_night: params.min_cost_per_night,
            max_cost_per_night: params.max_cost_per_night,
            min_rating: params.min_rating,
        }
    }
}

/// Search response
#[derive(Debug, Serialize, Deserialize)]
pub struct PropertiesResponse {
    pub properties: Vec<PropertyListing>,
}

/// Searches properties
pub async fn search_properties(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<PropertiesResponse>> {
    let limit = params.limit.unwrap_or(DEFAULT_LIMIT);
    let filter = PropertyFilter::from(params);

    let properties = Property::search(&state.db, &filter, limit).await?;

    Ok(Json(PropertiesResponse { properties }))
}

/// Creates a property owned by the session user
///
/// Any `owner_id` in the body is ignored.
///
/// # Errors
///
/// - `400 Bad Request`: Negative cost or counts
pub async fn create_property(
    State(state): State<AppState>,
    Extension(session): Extension<Session>,
    Json(mut data): Json<CreateProperty>,
) -> ApiResult<(StatusCode, Json<Property>)> {
    data.owner_id = session.user_id;

    let property = Property::create(&state.db, data).await?;
    info!(property_id = %property.id, owner_id = %property.owner_id, "Property created");

    Ok((StatusCode::CREATED, Json(property)))
}
