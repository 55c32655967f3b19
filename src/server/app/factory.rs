use std::sync::Arc;
use std::time::Duration;

use axum::{
    routing::get,
    Router,
};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::compression::CompressionLayer;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::server::app::AppState;
use crate::server::handlers::{admin, artifacts, handle_not_found};
use crate::server::middleware::CorsMiddleware;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Create the Axum Router serving metadata artifacts and the admin API
pub fn create_app(state: AppState) -> Router {
    let shared_state = Arc::new(state);

    Router::new()
        .route("/sitemap.xml", get(artifacts::sitemap))
        .route("/robots.txt", get(artifacts::robots))
        .route("/meta", get(artifacts::head_fragment))
        .route("/meta.json", get(artifacts::metadata_json))
        .route("/api/pages", get(admin::list_pages).post(admin::create_page))
        .route(
            "/api/pages/item",
            get(admin::get_page).put(admin::update_page).delete(admin::delete_page),
        )
        .fallback(handle_not_found)
        .with_state(shared_state)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CorsMiddleware::allow_all())
        .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
        .layer(CatchPanicLayer::new())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use chrono::{TimeZone, Utc};
    use tower::ServiceExt;

    use crate::config::{Config, SiteDefaults};
    use crate::content::{MemoryStore, PageDescriptor, PageRepository};

    fn config() -> Config {
        Config {
            base_url: "https://example.com".to_string(),
            site: SiteDefaults {
                title: Some("Acme".to_string()),
                description: Some("Acme builds things".to_string()),
                ..SiteDefaults::default()
            },
            ..Config::default()
        }
    }

    fn pages() -> Vec<PageDescriptor> {
        vec![
            PageDescriptor::new("/")
                .with_title("Home")
                .with_description("Welcome")
                .with_priority(1.0)
                .with_last_modified(Utc.with_ymd_and_hms(2024, 1, 15, 0, 0, 0).unwrap()),
            PageDescriptor::new("/about").with_title("About").with_description("Who we are"),
        ]
    }

    fn app_with(config: Config, admin: bool) -> Router {
        let repository = PageRepository::load(Box::new(MemoryStore::new(pages()))).unwrap();
        create_app(AppState::new(config, repository, admin))
    }

    fn app() -> Router {
        app_with(config(), true)
    }

    async fn send(app: Router, method: Method, uri: &str, body: Option<serde_json::Value>) -> (StatusCode, String) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header(header::CONTENT_TYPE, "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    #[tokio::test]
    async fn test_sitemap_route() {
        let response = app()
            .oneshot(Request::builder().uri("/sitemap.xml").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/xml; charset=utf-8"
        );
        assert_eq!(
            response.headers()[header::LAST_MODIFIED],
            "Mon, 15 Jan 2024 00:00:00 GMT"
        );

        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let xml = String::from_utf8(body.to_vec()).unwrap();
        assert!(xml.contains("<loc>https://example.com/</loc>"));
        assert!(xml.contains("<loc>https://example.com/about</loc>"));
    }

    #[tokio::test]
    async fn test_sitemap_without_base_url_is_server_error() {
        let mut config = config();
        config.base_url = String::new();

        let (status, body) = send(app_with(config, true), Method::GET, "/sitemap.xml", None).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert!(body.contains("Invalid configuration"));
    }

    #[tokio::test]
    async fn test_robots_route() {
        let (status, body) = send(app(), Method::GET, "/robots.txt", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("User-agent: *"));
        assert!(body.contains("Sitemap: https://example.com/sitemap.xml"));
    }

    #[tokio::test]
    async fn test_head_fragment_route() {
        let (status, body) = send(app(), Method::GET, "/meta?path=/about", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>About</title>"));

        let (status, _) = send(app(), Method::GET, "/meta?path=/missing", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_head_fragment_falls_back_when_metadata_fails() {
        let mut config = config();
        config.site.description = None;
        let app = app_with(config.clone(), true);

        // Create a page without a description through the store directly
        let store = MemoryStore::new(vec![PageDescriptor::new("/bare").with_title("Bare")]);
        let repository = PageRepository::load(Box::new(store)).unwrap();
        let bare = create_app(AppState::new(config, repository, true));

        let (status, body) = send(bare.clone(), Method::GET, "/meta?path=/bare", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("<title>Acme</title>"));

        let (status, body) = send(bare, Method::GET, "/meta.json?path=/bare", None).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body.contains("description (/bare)"));

        let (status, _) = send(app, Method::GET, "/meta.json?path=/about", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_metadata_json_route() {
        let (status, body) = send(app(), Method::GET, "/meta.json?path=/about", None).await;
        assert_eq!(status, StatusCode::OK);

        let block: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(block["title"], "About");
        assert_eq!(block["canonical_url"], "https://example.com/about");
    }

    #[tokio::test]
    async fn test_admin_create_and_conflicts() {
        let app = app();
        let page = serde_json::json!({
            "path": "/contact",
            "title": "Contact",
            "description": "Get in touch"
        });

        let (status, _) = send(app.clone(), Method::POST, "/api/pages", Some(page.clone())).await;
        assert_eq!(status, StatusCode::CREATED);

        let (status, _) = send(app.clone(), Method::POST, "/api/pages", Some(page)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let invalid = serde_json::json!({
            "path": "/pricing",
            "title": "Pricing",
            "description": "Plans",
            "priority": 2.0
        });
        let (status, _) = send(app.clone(), Method::POST, "/api/pages", Some(invalid)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let traversal = serde_json::json!({
            "path": "/../../escaped",
            "title": "Escaped",
            "description": "Outside the site"
        });
        let (status, _) = send(app.clone(), Method::POST, "/api/pages", Some(traversal)).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        let home_alias = serde_json::json!({
            "path": "/index",
            "title": "Home again",
            "description": "Same fragment as the root"
        });
        let (status, _) = send(app.clone(), Method::POST, "/api/pages", Some(home_alias)).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, body) = send(app, Method::GET, "/api/pages", None).await;
        assert_eq!(status, StatusCode::OK);
        let listed: Vec<serde_json::Value> = serde_json::from_str(&body).unwrap();
        assert_eq!(listed.len(), 3);
    }

    #[tokio::test]
    async fn test_admin_item_routes() {
        let app = app();
        let updated = serde_json::json!({
            "path": "/about",
            "title": "About us",
            "description": "Who we are"
        });

        let (status, body) = send(app.clone(), Method::PUT, "/api/pages/item?path=/about", Some(updated)).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("About us"));

        let (status, body) = send(app.clone(), Method::GET, "/api/pages/item?path=/about", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("About us"));

        let (status, _) = send(app.clone(), Method::DELETE, "/api/pages/item?path=/about", None).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _) = send(app.clone(), Method::GET, "/api/pages/item?path=/about", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(app, Method::DELETE, "/api/pages/item?path=/about", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_admin_disabled_rejects_mutations() {
        let app = app_with(config(), false);
        let page = serde_json::json!({
            "path": "/contact",
            "title": "Contact",
            "description": "Get in touch"
        });

        let (status, _) = send(app.clone(), Method::POST, "/api/pages", Some(page)).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(app, Method::GET, "/api/pages", None).await;
        assert_eq!(status, StatusCode::OK);
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _) = send(app(), Method::GET, "/nope", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
