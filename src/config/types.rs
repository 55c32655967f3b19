use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::config::defaults;
use crate::content::ImageRef;

/// Where page descriptors come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// A single YAML/TOML/JSON pages file
    #[default]
    File,
    /// A directory of front-matter documents
    Directory,
}

/// Content store configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentSource {
    #[serde(default)]
    pub kind: ContentKind,

    #[serde(default = "defaults::default_content_path")]
    pub path: PathBuf,
}

impl Default for ContentSource {
    fn default() -> Self {
        ContentSource {
            kind: ContentKind::default(),
            path: defaults::default_content_path(),
        }
    }
}

/// Site-wide values used whenever a page leaves a field empty
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct SiteDefaults {
    /// Default page title
    #[serde(default)]
    pub title: Option<String>,

    /// Liquid template applied to every resolved title,
    /// e.g. `{{ title }} | {{ site.name }}`
    #[serde(default)]
    pub title_template: Option<String>,

    /// Default page description
    #[serde(default)]
    pub description: Option<String>,

    /// `og:site_name`
    #[serde(default, alias = "site_name")]
    pub name: Option<String>,

    /// `og:locale`, e.g. `en_US`
    #[serde(default)]
    pub locale: Option<String>,

    /// Fallback social preview image
    #[serde(default)]
    pub og_image: Option<ImageRef>,

    /// `summary` or `summary_large_image`
    #[serde(default)]
    pub twitter_card: Option<String>,

    /// Twitter handle of the site, e.g. `@acme`
    #[serde(default)]
    pub twitter_site: Option<String>,

    /// Fallback keywords
    #[serde(default)]
    pub keywords: Vec<String>,
}

/// One `User-agent` group of robots.txt
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotsRule {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default)]
    pub allow: Vec<String>,

    #[serde(default)]
    pub disallow: Vec<String>,

    #[serde(default)]
    pub crawl_delay: Option<u32>,
}

fn default_user_agent() -> String {
    "*".to_string()
}

/// robots.txt configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RobotsConfig {
    #[serde(default = "defaults::default_robots_rules")]
    pub rules: Vec<RobotsRule>,

    /// Append a `Sitemap:` pointer
    #[serde(default = "defaults::default_true")]
    pub sitemap: bool,
}

impl Default for RobotsConfig {
    fn default() -> Self {
        RobotsConfig {
            rules: defaults::default_robots_rules(),
            sitemap: true,
        }
    }
}

/// Names of the generated artifacts
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "defaults::default_sitemap_file")]
    pub sitemap: String,

    #[serde(default = "defaults::default_robots_file")]
    pub robots: String,

    #[serde(default = "defaults::default_meta_dir")]
    pub meta_dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            sitemap: defaults::default_sitemap_file(),
            robots: defaults::default_robots_file(),
            meta_dir: defaults::default_meta_dir(),
        }
    }
}

/// Server settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "defaults::default_host")]
    pub host: String,

    #[serde(default = "defaults::default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        ServerSettings {
            host: defaults::default_host(),
            port: defaults::default_port(),
        }
    }
}

/// Site configuration structure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Directory relative paths are resolved against
    #[serde(default = "defaults::default_source")]
    pub source: PathBuf,

    /// Destination directory for generated artifacts
    #[serde(default = "defaults::default_destination")]
    pub destination: PathBuf,

    /// Absolute site URL without a trailing slash, e.g. `https://example.com`
    #[serde(default, alias = "url", alias = "baseurl")]
    pub base_url: String,

    /// Content store
    #[serde(default)]
    pub content: ContentSource,

    /// Site-wide metadata defaults
    #[serde(default)]
    pub site: SiteDefaults,

    /// robots.txt rules
    #[serde(default)]
    pub robots: RobotsConfig,

    /// Artifact names
    #[serde(default)]
    pub output: OutputConfig,

    /// Request-time server
    #[serde(default)]
    pub server: ServerSettings,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            source: defaults::default_source(),
            destination: defaults::default_destination(),
            base_url: String::new(),
            content: ContentSource::default(),
            site: SiteDefaults::default(),
            robots: RobotsConfig::default(),
            output: OutputConfig::default(),
            server: ServerSettings::default(),
        }
    }
}

impl Config {
    /// Destination resolved against the source directory
    pub fn destination_dir(&self) -> PathBuf {
        if self.destination.is_absolute() {
            self.destination.clone()
        } else {
            self.source.join(&self.destination)
        }
    }

    /// Absolute URL of the sitemap
    pub fn sitemap_url(&self) -> String {
        format!("{}/{}", self.base_url, self.output.sitemap.trim_start_matches('/'))
    }
}
