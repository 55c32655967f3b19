use log::{error, info};
use std::path::Path;

use crate::builder;
use crate::cli::commands::load_site_config;

/// Handle the clean command
pub fn handle_clean_command(source: &Path) -> bool {
    let config = match load_site_config(source, None, None, None) {
        Ok(cfg) => cfg,
        Err(e) => {
            error!("Failed to load config: {}", e);
            return false;
        }
    };

    info!("Cleaning {}", config.destination_dir().display());
    match builder::clean_destination(&config) {
        Ok(_) => {
            info!("Output removed");
            true
        }
        Err(e) => {
            error!("Failed to clean output: {}", e);
            false
        }
    }
}
