use log::error;
use std::path::Path;

use crate::cli::commands::load_site_config;
use crate::cli::types::Commands;
use crate::server::{self, ServerConfig};

/// Handle the serve command
pub async fn handle_serve_command(command: &Commands, source: &Path) -> bool {
    if let Commands::Serve { host, port, config: cfg_files, base_url, read_only, build } = command {
        let config = match load_site_config(source, cfg_files.as_ref(), base_url.as_ref(), None) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("Failed to load config: {}", e);
                return false;
            }
        };

        let mut server_config = ServerConfig::from_site_config(&config).with_admin(!read_only);
        if let Some(host) = host {
            server_config.address = host.clone();
        }
        if let Some(port) = port {
            server_config.port = *port;
        }

        if let Err(e) = server::serve(&server_config, &config, *build).await {
            error!("Server error: {}", e);
            return false;
        }
        return true;
    }
    false
}
