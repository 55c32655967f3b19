mod build;
mod serve;
mod check;
mod clean;
mod new;

pub use build::handle_build_command;
pub use serve::handle_serve_command;
pub use check::handle_check_command;
pub use clean::handle_clean_command;
pub use new::handle_new_command;

use std::path::{Path, PathBuf};

use crate::config::{self, normalize_config, Config};
use crate::utils::error::BoxResult;

/// Load the configuration for `source` and apply command line overrides
pub(crate) fn load_site_config(
    source: &Path,
    config_files: Option<&Vec<PathBuf>>,
    base_url: Option<&String>,
    destination: Option<&PathBuf>,
) -> BoxResult<Config> {
    let mut config = config::load_config(source, config_files.cloned())?;

    if let Some(base) = base_url {
        config.base_url = base.clone();
    }
    if let Some(dest) = destination {
        config.destination = dest.clone();
    }

    normalize_config(&mut config);
    Ok(config)
}
