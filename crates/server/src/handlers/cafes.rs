//! Cafe endpoints.

use crate::auth::api_key_matches;
use crate::error::{ApiError, ApiResult};
use crate::state::AppState;
use axum::Json;
use axum::extract::{Form, Path, Query, State};
use brewmap_store::{CafeRow, NewCafe, StoreError};
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

const CAFE_NOT_FOUND: &str = "Sorry a cafe with that id was not found in the database.";
const NO_CAFE_AT_LOCATION: &str = "Sorry, we don't have a cafe at that location.";
const ACCESS_DENIED: &str = "Access denied. Try again with valid api key.";

/// Wire representation of a cafe. Every field is mapped explicitly.
#[derive(Debug, Serialize)]
pub struct CafeResponse {
    pub id: i64,
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

impl From<CafeRow> for CafeResponse {
    fn from(row: CafeRow) -> Self {
        Self {
            id: row.id,
            name: row.name,
            map_url: row.map_url,
            img_url: row.img_url,
            location: row.location,
            seats: row.seats,
            has_toilet: row.has_toilet,
            has_wifi: row.has_wifi,
            has_sockets: row.has_sockets,
            can_take_calls: row.can_take_calls,
            coffee_price: row.coffee_price,
        }
    }
}

/// `{"cafe": {..}}` envelope.
#[derive(Debug, Serialize)]
pub struct SingleCafeResponse {
    pub cafe: CafeResponse,
}

/// `{"cafes": [..]}` envelope.
#[derive(Debug, Serialize)]
pub struct CafeListResponse {
    pub cafes: Vec<CafeResponse>,
}

/// `{"response": {"success": ..}}` envelope for creation and price updates.
#[derive(Debug, Serialize)]
pub struct ActionSuccess {
    pub response: SuccessDetail,
}

#[derive(Debug, Serialize)]
pub struct SuccessDetail {
    pub success: &'static str,
}

/// `{"response": {"Success": ..}}` envelope for deletion. The capitalized
/// key is part of the published surface.
#[derive(Debug, Serialize)]
pub struct RemovalSuccess {
    pub response: RemovalDetail,
}

#[derive(Debug, Serialize)]
pub struct RemovalDetail {
    #[serde(rename = "Success")]
    pub success: &'static str,
}

/// GET /random - One uniformly random cafe.
pub async fn random_cafe(State(state): State<AppState>) -> ApiResult<Json<SingleCafeResponse>> {
    let cafes = state.store.list_cafes().await?;
    let cafe = cafes
        .choose(&mut rand::thread_rng())
        .cloned()
        .ok_or_else(|| ApiError::NotFound("No cafes in the database yet.".to_string()))?;

    Ok(Json(SingleCafeResponse { cafe: cafe.into() }))
}

/// GET /all - Every cafe, in insertion order.
pub async fn all_cafes(State(state): State<AppState>) -> ApiResult<Json<CafeListResponse>> {
    let cafes = state.store.list_cafes().await?;
    Ok(Json(CafeListResponse {
        cafes: cafes.into_iter().map(Into::into).collect(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    pub location: String,
}

/// GET /search?location= - Exact-match search by location.
pub async fn search_cafes(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
) -> ApiResult<Json<CafeListResponse>> {
    let cafes = state.store.find_by_location(&params.location).await?;
    if cafes.is_empty() {
        return Err(ApiError::NotFound(NO_CAFE_AT_LOCATION.to_string()));
    }

    Ok(Json(CafeListResponse {
        cafes: cafes.into_iter().map(Into::into).collect(),
    }))
}

#[derive(Debug, Deserialize)]
pub struct NewCafeForm {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub coffee_price: Option<String>,
}

/// POST /cafe - Add a new cafe.
///
/// Amenity flags are fixed at creation time; clients cannot set them here.
pub async fn add_cafe(
    State(state): State<AppState>,
    Form(form): Form<NewCafeForm>,
) -> ApiResult<Json<ActionSuccess>> {
    for (field, value) in [
        ("name", &form.name),
        ("map_url", &form.map_url),
        ("img_url", &form.img_url),
        ("location", &form.location),
        ("seats", &form.seats),
    ] {
        if value.trim().is_empty() {
            return Err(ApiError::BadRequest(format!("{field} must not be empty")));
        }
    }

    let cafe = NewCafe {
        name: form.name,
        map_url: form.map_url,
        img_url: form.img_url,
        location: form.location,
        seats: form.seats,
        has_toilet: true,
        has_wifi: false,
        has_sockets: false,
        can_take_calls: true,
        coffee_price: form.coffee_price.filter(|p| !p.trim().is_empty()),
    };

    let created = state.store.create_cafe(&cafe).await.map_err(|e| match e {
        StoreError::Constraint(msg) => ApiError::Conflict(msg),
        other => other.into(),
    })?;

    tracing::info!(id = created.id, name = %created.name, "Cafe added");

    Ok(Json(ActionSuccess {
        response: SuccessDetail {
            success: "Successfully added the new cafe.",
        },
    }))
}

#[derive(Debug, Deserialize)]
pub struct PriceParams {
    pub price: String,
}

/// PATCH /update-price/{id}?price= - Change a cafe's coffee price.
pub async fn update_price(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<PriceParams>,
) -> ApiResult<Json<ActionSuccess>> {
    state
        .store
        .update_price(id, &params.price)
        .await
        .map_err(|e| match e {
            StoreError::NotFound(_) => ApiError::NotFound(CAFE_NOT_FOUND.to_string()),
            other => other.into(),
        })?;

    tracing::info!(id, price = %params.price, "Coffee price updated");

    Ok(Json(ActionSuccess {
        response: SuccessDetail {
            success: "Successfully updated the price.",
        },
    }))
}

#[derive(Debug, Deserialize)]
pub struct DeleteParams {
    pub api_key: String,
}

/// DELETE /report-closed/{id}?api_key= - Remove a closed cafe.
///
/// The id is checked before the key, so an unknown id is a 404 even with a
/// bad key.
pub async fn report_closed(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(params): Query<DeleteParams>,
) -> ApiResult<Json<RemovalSuccess>> {
    let cafe = state
        .store
        .get_cafe(id)
        .await?
        .ok_or_else(|| ApiError::NotFound(CAFE_NOT_FOUND.to_string()))?;

    if !api_key_matches(&params.api_key, &state.config.admin.api_key) {
        return Err(ApiError::Forbidden(ACCESS_DENIED.to_string()));
    }

    state.store.delete_cafe(id).await.map_err(|e| match e {
        StoreError::NotFound(_) => ApiError::NotFound(CAFE_NOT_FOUND.to_string()),
        other => other.into(),
    })?;

    tracing::info!(id, name = %cafe.name, "Cafe removed");

    Ok(Json(RemovalSuccess {
        response: RemovalDetail {
            success: "Cafe has been removed from the database",
        },
    }))
}
