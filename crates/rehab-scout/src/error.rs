use crate::config::ConfigError;
use crate::listings::{FeedImportError, ListingServiceError, SavedListingError};
use crate::telemetry::TelemetryError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use std::fmt;

#[derive(Debug)]
pub enum AppError {
    Config(ConfigError),
    Telemetry(TelemetryError),
    Io(std::io::Error),
    Server(axum::Error),
    Feed(FeedImportError),
    Saved(SavedListingError),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Config(err) => write!(f, "configuration error: {}", err),
            AppError::Telemetry(err) => write!(f, "telemetry error: {}", err),
            AppError::Io(err) => write!(f, "io error: {}", err),
            AppError::Server(err) => write!(f, "server error: {}", err),
            AppError::Feed(err) => write!(f, "listing feed error: {}", err),
            AppError::Saved(err) => write!(f, "saved listings error: {}", err),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Config(err) => Some(err),
            AppError::Telemetry(err) => Some(err),
            AppError::Io(err) => Some(err),
            AppError::Server(err) => Some(err),
            AppError::Feed(err) => Some(err),
            AppError::Saved(err) => Some(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::Feed(_) => StatusCode::BAD_REQUEST,
            AppError::Saved(SavedListingError::NotSaved(_)) => StatusCode::NOT_FOUND,
            AppError::Config(_)
            | AppError::Telemetry(_)
            | AppError::Io(_)
            | AppError::Server(_)
            | AppError::Saved(SavedListingError::Unavailable(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        let body = Json(json!({ "error": self.to_string() }));
        (status, body).into_response()
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<TelemetryError> for AppError {
    fn from(value: TelemetryError) -> Self {
        Self::Telemetry(value)
    }
}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

impl From<axum::Error> for AppError {
    fn from(value: axum::Error) -> Self {
        Self::Server(value)
    }
}

impl From<FeedImportError> for AppError {
    fn from(value: FeedImportError) -> Self {
        Self::Feed(value)
    }
}

impl From<SavedListingError> for AppError {
    fn from(value: SavedListingError) -> Self {
        Self::Saved(value)
    }
}

impl From<ListingServiceError> for AppError {
    fn from(value: ListingServiceError) -> Self {
        match value {
            ListingServiceError::Saved(err) => Self::Saved(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::listings::ListingId;

    #[test]
    fn maps_listing_errors_to_statuses() {
        let missing = AppError::from(SavedListingError::NotSaved(ListingId::from("M1")));
        assert_eq!(missing.into_response().status(), StatusCode::NOT_FOUND);

        let outage = AppError::from(ListingServiceError::Saved(SavedListingError::Unavailable(
            "disk full".to_string(),
        )));
        assert_eq!(
            outage.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );

        let feed = AppError::from(FeedImportError::from(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "feed.json",
        )));
        assert_eq!(feed.into_response().status(), StatusCode::BAD_REQUEST);
    }
}
