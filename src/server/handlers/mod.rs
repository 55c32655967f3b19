pub mod admin;
pub mod artifacts;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::Deserialize;
use serde_json::json;

use crate::content::PageDescriptor;
use crate::utils::error::SiteMetaError;
use crate::utils::path::normalize_url_path;

/// `?path=` query used by the per-page endpoints
#[derive(Debug, Deserialize)]
pub struct PathQuery {
    pub path: String,
}

/// Page at `path` in a snapshot, or 404
pub fn find_page(pages: Vec<PageDescriptor>, path: &str) -> Result<PageDescriptor, ApiError> {
    let path = normalize_url_path(path);
    pages
        .into_iter()
        .find(|page| page.path == path)
        .ok_or_else(|| ApiError::not_found(&path))
}

/// Error returned by handlers, rendered as a JSON body
#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
}

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        ApiError { status, message: message.into() }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    pub fn not_found(path: &str) -> Self {
        ApiError::new(StatusCode::NOT_FOUND, format!("Page not found: {}", path))
    }
}

impl From<SiteMetaError> for ApiError {
    fn from(err: SiteMetaError) -> Self {
        let status = match &err {
            SiteMetaError::DuplicatePath(_) => StatusCode::CONFLICT,
            SiteMetaError::NotFound(_) => StatusCode::NOT_FOUND,
            SiteMetaError::Validation(_)
            | SiteMetaError::MissingRequiredField(_)
            | SiteMetaError::InvalidStructuredData(_) => StatusCode::UNPROCESSABLE_ENTITY,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        ApiError::new(status, err.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("{}", self.message);
        }
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

/// Fallback for unknown routes
pub async fn handle_not_found() -> impl IntoResponse {
    (StatusCode::NOT_FOUND, "Not Found")
}
