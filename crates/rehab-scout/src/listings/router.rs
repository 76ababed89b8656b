use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};

use super::domain::ListingId;
use super::feed::from_provider_records;
use super::filter::FilterSpec;
use super::saved::{SavedListingError, SavedListingStore};
use super::service::{ListingService, ListingServiceError};
use super::sort::SortOrder;

/// Search request carrying a provider batch plus the caller's criteria.
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub listings: Vec<Value>,
    #[serde(default)]
    pub filter: FilterSpec,
    #[serde(default)]
    pub sort: Option<SortOrder>,
}

/// Router builder exposing listing search and saved-listing endpoints.
pub fn listing_router<S>(service: Arc<ListingService<S>>) -> Router
where
    S: SavedListingStore + 'static,
{
    Router::new()
        .route("/api/v1/listings/search", post(search_handler::<S>))
        .route("/api/v1/listings/saved", get(saved_handler::<S>))
        .route(
            "/api/v1/listings/saved/:listing_id",
            put(save_handler::<S>).delete(unsave_handler::<S>),
        )
        .with_state(service)
}

pub(crate) async fn search_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    axum::Json(request): axum::Json<SearchRequest>,
) -> Response
where
    S: SavedListingStore + 'static,
{
    let raws = from_provider_records(&request.listings);
    let order = request.sort.unwrap_or_default();
    match service.search(&raws, &request.filter, order) {
        Ok(results) => (StatusCode::OK, axum::Json(results)).into_response(),
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn saved_handler<S>(State(service): State<Arc<ListingService<S>>>) -> Response
where
    S: SavedListingStore + 'static,
{
    match service.saved_ids() {
        Ok(ids) => {
            let payload = json!({
                "listing_ids": ids,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn save_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    Path(listing_id): Path<String>,
) -> Response
where
    S: SavedListingStore + 'static,
{
    let id = ListingId(listing_id);
    match service.save(id.clone()) {
        Ok(newly_saved) => {
            let payload = json!({
                "listing_id": id,
                "saved": true,
                "newly_saved": newly_saved,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

pub(crate) async fn unsave_handler<S>(
    State(service): State<Arc<ListingService<S>>>,
    Path(listing_id): Path<String>,
) -> Response
where
    S: SavedListingStore + 'static,
{
    let id = ListingId(listing_id);
    match service.unsave(&id) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(ListingServiceError::Saved(SavedListingError::NotSaved(_))) => {
            let payload = json!({
                "listing_id": id,
                "error": "listing is not saved",
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
        Err(other) => internal_error(other),
    }
}

fn internal_error(error: ListingServiceError) -> Response {
    let payload = json!({
        "error": error.to_string(),
    });
    (StatusCode::INTERNAL_SERVER_ERROR, axum::Json(payload)).into_response()
}
