use log::{info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use crate::assembler::validate_base_url;
use crate::config::Config;
use crate::utils::error::{BoxResult, SiteMetaError};

static TWITTER_HANDLE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^@[A-Za-z0-9_]{1,15}$").unwrap());

/// Whether `handle` looks like `@name`
fn is_twitter_handle(handle: &str) -> bool {
    TWITTER_HANDLE.is_match(handle)
}

/// Validate the configuration
pub fn validate_config(config: &Config) -> BoxResult<()> {
    validate_base_url_setting(config)?;
    validate_robots(config)?;
    validate_output(config)?;
    validate_site_defaults(config);
    Ok(())
}

/// A base URL is only required by the commands that emit URLs, but when
/// one is given it must be usable.
fn validate_base_url_setting(config: &Config) -> BoxResult<()> {
    if config.base_url.is_empty() {
        warn!("No base_url configured; sitemap and metadata generation will fail");
        return Ok(());
    }

    validate_base_url(&config.base_url)?;
    info!("Base URL: {}", config.base_url);
    Ok(())
}

fn validate_robots(config: &Config) -> BoxResult<()> {
    for rule in &config.robots.rules {
        if rule.user_agent.trim().is_empty() {
            return Err(SiteMetaError::Config("robots rule with an empty user_agent".to_string()).into());
        }

        for path in rule.allow.iter().chain(rule.disallow.iter()) {
            if !path.is_empty() && !path.starts_with('/') && !path.starts_with('*') {
                return Err(SiteMetaError::Config(format!(
                    "robots path '{}' for user agent '{}' must start with '/'", path, rule.user_agent
                )).into());
            }
        }
    }
    Ok(())
}

fn validate_output(config: &Config) -> BoxResult<()> {
    let names = [
        ("output.sitemap", &config.output.sitemap),
        ("output.robots", &config.output.robots),
        ("output.meta_dir", &config.output.meta_dir),
    ];

    for (key, value) in names {
        if value.trim().is_empty() || value.contains("..") {
            return Err(SiteMetaError::Config(format!("{} is not a usable file name: '{}'", key, value)).into());
        }
    }
    Ok(())
}

fn validate_site_defaults(config: &Config) {
    if config.site.title.is_none() {
        warn!("No site-wide default title; pages without a title will fail metadata generation");
    }

    if config.site.description.is_none() {
        warn!("No site-wide default description; pages without a description will fail metadata generation");
    }

    if let Some(card) = &config.site.twitter_card {
        if card != "summary" && card != "summary_large_image" {
            warn!("Unusual twitter_card '{}'", card);
        }
    }

    if let Some(handle) = &config.site.twitter_site {
        if !is_twitter_handle(handle) {
            warn!("twitter_site '{}' is not an @handle", handle);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RobotsRule;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_relative_base_url_is_rejected() {
        let config = Config { base_url: "example.com".to_string(), ..Config::default() };
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_robots_paths_must_be_rooted() {
        let mut config = Config::default();
        config.robots.rules.push(RobotsRule {
            user_agent: "Googlebot".to_string(),
            allow: Vec::new(),
            disallow: vec!["admin".to_string()],
            crawl_delay: None,
        });
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_output_names_cannot_escape() {
        let mut config = Config::default();
        config.output.meta_dir = "../outside".to_string();
        assert!(validate_config(&config).is_err());
    }

    #[test]
    fn test_twitter_handle_format() {
        assert!(is_twitter_handle("@acme_co"));
        assert!(!is_twitter_handle("acme"));
        assert!(!is_twitter_handle("@this_handle_is_too_long"));
    }
}
