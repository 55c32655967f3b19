pub mod artifacts;
pub mod watcher;

pub use artifacts::{assemble_artifacts, build_from_store, build_site, BuildSummary, SiteArtifacts};
pub use watcher::watch_site;

use crate::config::Config;
use crate::utils::error::BoxResult;
use crate::utils::fs::remove_directory;

/// Remove the generated output directory
pub fn clean_destination(config: &Config) -> BoxResult<()> {
    let destination = config.destination_dir();
    log::debug!("Removing {}", destination.display());
    remove_directory(destination)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_destination() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config {
            source: dir.path().to_path_buf(),
            ..Config::default()
        };
        std::fs::create_dir_all(dir.path().join("_site/_meta")).unwrap();

        clean_destination(&config).unwrap();
        assert!(!dir.path().join("_site").exists());
    }
}
