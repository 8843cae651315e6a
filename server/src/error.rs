use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use pulse_core::youtube::CatalogError;
use thiserror::Error;

pub const TRENDING_FAILED: &str = "Failed to fetch trending data";
pub const CHANNEL_FAILED: &str = "Failed to fetch channel data";
pub const VIDEOS_FAILED: &str = "Failed to fetch videos";
pub const SEARCH_FAILED: &str = "Failed to search videos";

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{0}")]
    BadRequest(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    /// The client only sees `context`; the cause is logged.
    #[error("{context}")]
    Upstream {
        context: &'static str,
        #[source]
        source: CatalogError,
    },
}

impl ApiError {
    pub fn upstream(context: &'static str) -> impl FnOnce(CatalogError) -> ApiError {
        move |source| ApiError::Upstream { context, source }
    }

    fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Upstream { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if let ApiError::Upstream { context, source } = &self {
            tracing::error!(error = %source, "{context}");
        }
        (self.status(), Json(serde_json::json!({ "error": self.to_string() }))).into_response()
    }
}
