use std::sync::Arc;
use std::time::SystemTime;

use axum::{
    extract::{Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use log::debug;

use crate::assembler::{build_page_metadata, build_robots_txt, build_sitemap, render_head_or_default, MetadataBlock};
use crate::server::app::AppState;
use crate::server::handlers::{find_page, ApiError, PathQuery};

/// `GET /sitemap.xml`
pub async fn sitemap(State(state): State<Arc<AppState>>) -> Result<Response, ApiError> {
    let pages = state.clone().snapshot().await?;
    let document = build_sitemap(&pages, &state.config.base_url)
        .map_err(|e| ApiError::internal(e.to_string()))?;

    let mut response = (
        [(header::CONTENT_TYPE, "application/xml; charset=utf-8")],
        document.to_xml(),
    )
        .into_response();

    if let Some(modified) = document.last_modified() {
        let date = httpdate::fmt_http_date(SystemTime::from(modified));
        if let Ok(value) = HeaderValue::from_str(&date) {
            response.headers_mut().insert(header::LAST_MODIFIED, value);
        }
    }

    debug!("Served sitemap with {} entries", document.len());
    Ok(response)
}

/// `GET /robots.txt`
pub async fn robots(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let config = &state.config;
    let sitemap_url = if config.robots.sitemap && !config.base_url.is_empty() {
        Some(config.sitemap_url())
    } else {
        None
    };

    (
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        build_robots_txt(&config.robots.rules, sitemap_url.as_deref()),
    )
}

/// `GET /meta?path=`: head fragment for a page, falling back to site defaults
pub async fn head_fragment(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> Result<Html<String>, ApiError> {
    let page = find_page(state.clone().snapshot().await?, &query.path)?;
    Ok(Html(render_head_or_default(&page, &state.config.base_url, &state.config.site)))
}

/// `GET /meta.json?path=`
pub async fn metadata_json(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PathQuery>,
) -> Result<Json<MetadataBlock>, ApiError> {
    let page = find_page(state.clone().snapshot().await?, &query.path)?;
    let block = build_page_metadata(&page, &state.config.base_url, &state.config.site)
        .map_err(|e| ApiError::new(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()))?;
    Ok(Json(block))
}
