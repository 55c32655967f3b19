use log::{error, info};
use std::path::Path;

use crate::builder;
use crate::cli::commands::load_site_config;
use crate::cli::types::Commands;

/// Handle the build command
pub fn handle_build_command(command: &Commands, source: &Path) -> bool {
    if let Commands::Build { config: cfg_files, base_url, destination, watch, .. } = command {
        let config = match load_site_config(source, cfg_files.as_ref(), base_url.as_ref(), destination.as_ref()) {
            Ok(cfg) => cfg,
            Err(e) => {
                error!("Failed to load config: {}", e);
                return false;
            }
        };

        info!("Building metadata...");
        let built = match builder::build_site(&config) {
            Ok(summary) => {
                info!("Built {} pages into {}", summary.pages, summary.destination.display());
                true
            }
            Err(e) => {
                error!("Failed to build metadata: {}", e);
                false
            }
        };

        // Watch for changes if requested
        if *watch {
            if let Err(e) = builder::watch_site(&config) {
                error!("Error watching for changes: {}", e);
                return false;
            }
        }

        return built;
    }
    false
}
