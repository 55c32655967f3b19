use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};

use crate::content::PageDescriptor;
use crate::server::app::AppState;
use crate::server::handlers::{find_page, ApiError, PathQuery};

/// `GET /api/pages`
pub async fn list_pages(State(state): State<Arc<AppState>>) -> Result<Json<Vec<PageDescriptor>>, ApiError> {
    Ok(Json(state.snapshot().await?))
}

/// `POST /api/pages`
pub async fn create_page(
    State(state): State<Arc<AppState>>,
    Json(page): Json<PageDescriptor>,
) -> Result<(StatusCode, Json<PageDescriptor>), ApiError> {
    let created = state.mutate(move |repository| Ok(repository.create(page)?)).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /api/pages/item?path=`
pub async fn get_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> Result<Json<PageDescriptor>, ApiError> {
    let page = find_page(state.snapshot().await?, &query.path)?;
    Ok(Json(page))
}

/// `PUT /api/pages/item?path=`
pub async fn update_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
    Json(page): Json<PageDescriptor>,
) -> Result<Json<PageDescriptor>, ApiError> {
    let updated = state
        .mutate(move |repository| Ok(repository.update(&query.path, page)?))
        .await?;
    Ok(Json(updated))
}

/// `DELETE /api/pages/item?path=`
pub async fn delete_page(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> Result<Json<PageDescriptor>, ApiError> {
    let removed = state
        .mutate(move |repository| Ok(repository.delete(&query.path)?))
        .await?;
    Ok(Json(removed))
}
