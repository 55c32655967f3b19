use axum::http::Method;
use tower_http::cors::{Any, CorsLayer};

const ALLOWED_METHODS: [Method; 6] = [
    Method::GET,
    Method::POST,
    Method::PUT,
    Method::DELETE,
    Method::OPTIONS,
    Method::HEAD,
];

/// CORS policy for the metadata and admin endpoints
pub struct CorsMiddleware;

impl CorsMiddleware {
    /// Allow any origin to read metadata and call the admin API
    pub fn allow_all() -> CorsLayer {
        CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(ALLOWED_METHODS)
            .allow_headers(Any)
    }
}
