use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde_yaml::Value;

use crate::config::types::Config;
use crate::config::validation;
use crate::utils::error::{BoxResult, SiteMetaError};

/// Configuration file names to look for
const CONFIG_FILES: [&str; 4] = ["_sitemeta.yml", "_sitemeta.yaml", "_sitemeta.toml", "_sitemeta.json"];

/// Load configuration from config files.
///
/// With no explicit files the source directory is searched for the
/// default names. Later files override earlier ones key by key.
pub fn load_config<P: AsRef<Path>>(
    source_dir: P,
    config_files: Option<Vec<PathBuf>>,
) -> BoxResult<Config> {
    let config_paths = match config_files {
        Some(paths) if !paths.is_empty() => paths,
        _ => find_default_config_files(&source_dir),
    };

    let mut merged = Value::Mapping(Default::default());
    if config_paths.is_empty() {
        debug!("No configuration files found, using defaults");
    } else {
        for path in config_paths {
            debug!("Loading configuration from {}", path.display());
            let file_value = read_config_file(&path)?;
            merge_values(&mut merged, file_value);
        }
    }

    let mut config: Config = serde_yaml::from_value(merged)
        .map_err(|e| SiteMetaError::Config(format!("Invalid configuration: {}", e)))?;

    // Set source directory if not already set
    if config.source == PathBuf::from(".") {
        config.source = source_dir.as_ref().to_path_buf();
    }

    normalize_config(&mut config);
    validation::validate_config(&config)?;

    debug!("Configuration loaded: {:?}", config);
    Ok(config)
}

/// Clean up values users commonly get slightly wrong
pub fn normalize_config(config: &mut Config) {
    let trimmed = config.base_url.trim().trim_end_matches('/').to_string();
    if trimmed != config.base_url {
        debug!("Normalized base URL '{}' to '{}'", config.base_url, trimmed);
        config.base_url = trimmed;
    }
}

/// Find default configuration files
fn find_default_config_files<P: AsRef<Path>>(source_dir: P) -> Vec<PathBuf> {
    CONFIG_FILES
        .iter()
        .map(|name| source_dir.as_ref().join(name))
        .filter(|path| path.exists())
        .collect()
}

/// Read one configuration file into a generic YAML value
fn read_config_file(config_path: &Path) -> BoxResult<Value> {
    if !config_path.exists() {
        return Err(SiteMetaError::Config(format!(
            "Configuration file not found: {}", config_path.display()
        )).into());
    }

    let content = fs::read_to_string(config_path)
        .map_err(|e| SiteMetaError::Config(format!(
            "Failed to read configuration file {}: {}", config_path.display(), e
        )))?;

    if content.trim().is_empty() {
        return Ok(Value::Mapping(Default::default()));
    }

    let ext = config_path
        .extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_else(|| "yml".to_string());

    let value = match ext.as_str() {
        "yml" | "yaml" => serde_yaml::from_str::<Value>(&content)
            .map_err(|e| parse_error("YAML", config_path, e))?,
        "toml" => {
            let toml_value = toml::from_str::<toml::Value>(&content)
                .map_err(|e| parse_error("TOML", config_path, e))?;
            serde_yaml::to_value(toml_value).map_err(|e| parse_error("TOML", config_path, e))?
        }
        "json" => {
            let json_value = serde_json::from_str::<serde_json::Value>(&content)
                .map_err(|e| parse_error("JSON", config_path, e))?;
            serde_yaml::to_value(json_value).map_err(|e| parse_error("JSON", config_path, e))?
        }
        other => {
            return Err(SiteMetaError::Config(format!(
                "Unsupported configuration file format: {}", other
            )).into());
        }
    };

    Ok(value)
}

fn parse_error(format: &str, path: &Path, e: impl std::fmt::Display) -> SiteMetaError {
    SiteMetaError::Config(format!(
        "Failed to parse {} configuration ({}): {}", format, path.display(), e
    ))
}

/// Deep-merge `source` into `target`; mappings merge key by key, anything
/// else is replaced.
fn merge_values(target: &mut Value, source: Value) {
    match (target, source) {
        (Value::Mapping(target_map), Value::Mapping(source_map)) => {
            for (key, value) in source_map {
                match target_map.get_mut(&key) {
                    Some(existing) => merge_values(existing, value),
                    None => {
                        target_map.insert(key, value);
                    }
                }
            }
        }
        (target, source) => *target = source,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ContentKind;

    #[test]
    fn test_load_defaults_without_files() {
        let dir = tempfile::tempdir().unwrap();
        let config = load_config(dir.path(), None).unwrap();

        assert_eq!(config.source, dir.path());
        assert!(config.base_url.is_empty());
    }

    #[test]
    fn test_load_yaml_and_trim_base_url() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("_sitemeta.yml"),
            "base_url: https://example.com/\nsite:\n  title: Acme\n",
        ).unwrap();

        let config = load_config(dir.path(), None).unwrap();
        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.site.title.as_deref(), Some("Acme"));
    }

    #[test]
    fn test_later_files_override_earlier_keys() {
        let dir = tempfile::tempdir().unwrap();
        let base = dir.path().join("base.yml");
        let prod = dir.path().join("prod.toml");
        fs::write(&base, "base_url: https://staging.example.com\nsite:\n  title: Acme\n  description: Base\n").unwrap();
        fs::write(&prod, "base_url = \"https://example.com\"\n[site]\ndescription = \"Prod\"\n[content]\nkind = \"directory\"\npath = \"content\"\n").unwrap();

        let config = load_config(dir.path(), Some(vec![base, prod])).unwrap();

        assert_eq!(config.base_url, "https://example.com");
        assert_eq!(config.site.title.as_deref(), Some("Acme"));
        assert_eq!(config.site.description.as_deref(), Some("Prod"));
        assert_eq!(config.content.kind, ContentKind::Directory);
    }

    #[test]
    fn test_json_config() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("site.json");
        fs::write(&path, r#"{"base_url": "https://example.com", "server": {"port": 8080}}"#).unwrap();

        let config = load_config(dir.path(), Some(vec![path])).unwrap();
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_missing_explicit_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_config(dir.path(), Some(vec![dir.path().join("nope.yml")]));
        assert!(result.is_err());
    }

    #[test]
    fn test_relative_base_url_fails_validation() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("_sitemeta.yml"), "base_url: /relative\n").unwrap();
        assert!(load_config(dir.path(), None).is_err());
    }
}
