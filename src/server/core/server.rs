use log::{error, info, warn};
use tokio::net::TcpListener;
use tokio::signal;

use crate::builder::build_site;
use crate::config::Config;
use crate::content::{open_store, PageRepository};
use crate::server::app::{create_app, AppState};
use crate::server::config::ServerConfig;
use crate::utils::error::BoxResult;

/// Serve metadata artifacts and the admin API until Ctrl+C.
///
/// Artifacts are assembled per request from a fresh snapshot of the store.
/// With `prebuild`, the static artifacts are also written once at startup.
pub async fn serve(server_config: &ServerConfig, config: &Config, prebuild: bool) -> BoxResult<()> {
    if prebuild {
        info!("Building metadata before serving...");
        match build_site(config) {
            Ok(summary) => info!("Built metadata for {} pages", summary.pages),
            Err(e) => warn!("Initial build failed, serving anyway: {}", e),
        }
    }

    let store = open_store(&config.content, &config.source);
    let repository = PageRepository::load(store)?;
    info!("Serving pages from {}", repository.describe());

    let app = create_app(AppState::new(config.clone(), repository, server_config.admin));

    let address = server_config.address_string();
    let listener = TcpListener::bind(&address).await?;
    info!("Starting server at {}", server_config.url());

    print_server_banner(server_config);

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("Server error: {}", e);
        return Err(e.into());
    }

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match signal::ctrl_c().await {
        Ok(()) => info!("Shutting down server (received Ctrl+C)..."),
        Err(e) => error!("Failed to listen for Ctrl+C: {}", e),
    }
}

/// Print a banner with server information
fn print_server_banner(server_config: &ServerConfig) {
    let url = server_config.url();
    println!("\n{}", "-".repeat(60));
    println!(" Sitemeta Server");
    println!(" - Sitemap: {}sitemap.xml", url);
    println!(" - Robots: {}robots.txt", url);
    println!(" - Head fragments: {}meta?path=/", url);
    println!(" - Admin API: {}api/pages ({})", url, if server_config.admin { "read-write" } else { "read-only" });
    println!(" - Press Ctrl+C to stop");
    println!("{}\n", "-".repeat(60));
}
