use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::deserializers::{deserialize_optional_date, deserialize_string_or_seq};
use crate::assembler::structured_data::validate_structured_data;
use crate::utils::error::SiteMetaError;
use crate::utils::path::has_unsafe_segments;

/// How often a page is expected to change, as announced in the sitemap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ChangeFrequency {
    Always,
    Hourly,
    Daily,
    #[default]
    Weekly,
    Monthly,
    Yearly,
    Never,
}

impl ChangeFrequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeFrequency::Always => "always",
            ChangeFrequency::Hourly => "hourly",
            ChangeFrequency::Daily => "daily",
            ChangeFrequency::Weekly => "weekly",
            ChangeFrequency::Monthly => "monthly",
            ChangeFrequency::Yearly => "yearly",
            ChangeFrequency::Never => "never",
        }
    }
}

impl fmt::Display for ChangeFrequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ChangeFrequency {
    type Err = SiteMetaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "always" => Ok(ChangeFrequency::Always),
            "hourly" => Ok(ChangeFrequency::Hourly),
            "daily" => Ok(ChangeFrequency::Daily),
            "weekly" => Ok(ChangeFrequency::Weekly),
            "monthly" => Ok(ChangeFrequency::Monthly),
            "yearly" => Ok(ChangeFrequency::Yearly),
            "never" => Ok(ChangeFrequency::Never),
            other => Err(SiteMetaError::Validation(format!(
                "unknown change frequency '{}'", other
            ))),
        }
    }
}

/// Crawler directives for a page
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotsPolicy {
    #[serde(default = "default_true")]
    pub index: bool,
    #[serde(default = "default_true")]
    pub follow: bool,
}

impl Default for RobotsPolicy {
    fn default() -> Self {
        RobotsPolicy { index: true, follow: true }
    }
}

impl RobotsPolicy {
    /// Value of the `robots` meta tag, e.g. `noindex, follow`
    pub fn directive(&self) -> String {
        format!(
            "{}, {}",
            if self.index { "index" } else { "noindex" },
            if self.follow { "follow" } else { "nofollow" }
        )
    }
}

/// Reference to an image asset used for social previews
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

impl ImageRef {
    pub fn new(url: impl Into<String>) -> Self {
        ImageRef { url: url.into(), width: None, height: None, alt: None }
    }
}

/// One publishable page of the site.
///
/// Descriptors are read-only snapshots taken from a content store; the
/// assembler never mutates them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageDescriptor {
    /// Root-relative URL path, unique across the site
    pub path: String,

    #[serde(default)]
    pub title: String,

    #[serde(default)]
    pub description: String,

    #[serde(default, deserialize_with = "deserialize_string_or_seq", skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,

    #[serde(default, alias = "ogImage", skip_serializing_if = "Option::is_none")]
    pub og_image: Option<ImageRef>,

    /// Overrides `path` for canonical and sitemap URLs
    #[serde(default, alias = "canonicalPath", skip_serializing_if = "Option::is_none")]
    pub canonical_path: Option<String>,

    #[serde(
        default,
        alias = "lastModified",
        deserialize_with = "deserialize_optional_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_modified: Option<DateTime<Utc>>,

    #[serde(default, alias = "changeFrequency", alias = "changefreq")]
    pub change_frequency: ChangeFrequency,

    #[serde(default = "default_priority")]
    pub priority: f32,

    #[serde(default, alias = "robotsPolicy")]
    pub robots: RobotsPolicy,

    /// schema.org object emitted as JSON-LD
    #[serde(default, alias = "structuredData", skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<serde_json::Value>,
}

fn default_true() -> bool {
    true
}

fn default_priority() -> f32 {
    0.5
}

impl PageDescriptor {
    /// Create a descriptor with the given path and everything else defaulted
    pub fn new(path: impl Into<String>) -> Self {
        PageDescriptor {
            path: path.into(),
            title: String::new(),
            description: String::new(),
            keywords: Vec::new(),
            og_image: None,
            canonical_path: None,
            last_modified: None,
            change_frequency: ChangeFrequency::default(),
            priority: default_priority(),
            robots: RobotsPolicy::default(),
            structured_data: None,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_priority(mut self, priority: f32) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_change_frequency(mut self, change_frequency: ChangeFrequency) -> Self {
        self.change_frequency = change_frequency;
        self
    }

    pub fn with_last_modified(mut self, last_modified: DateTime<Utc>) -> Self {
        self.last_modified = Some(last_modified);
        self
    }

    pub fn with_canonical_path(mut self, canonical_path: impl Into<String>) -> Self {
        self.canonical_path = Some(canonical_path.into());
        self
    }

    /// Path used for canonical and sitemap URLs
    pub fn effective_path(&self) -> &str {
        match &self.canonical_path {
            Some(canonical) if !canonical.is_empty() => canonical,
            _ => &self.path,
        }
    }

    /// Whether this descriptor is the site root
    pub fn is_root(&self) -> bool {
        self.path == "/"
    }

    /// Field validation applied on every admin create/update
    pub fn validate(&self) -> Result<(), SiteMetaError> {
        if !self.path.starts_with('/') {
            return Err(SiteMetaError::Validation(format!(
                "path '{}' must be root-relative", self.path
            )));
        }

        if has_unsafe_segments(&self.path) {
            return Err(SiteMetaError::Validation(format!(
                "path '{}' must not contain '.' or '..' segments", self.path
            )));
        }

        if let Some(canonical) = &self.canonical_path {
            if !canonical.is_empty() && !canonical.starts_with('/') {
                return Err(SiteMetaError::Validation(format!(
                    "canonical path '{}' must be root-relative", canonical
                )));
            }
            if has_unsafe_segments(canonical) {
                return Err(SiteMetaError::Validation(format!(
                    "canonical path '{}' must not contain '.' or '..' segments", canonical
                )));
            }
        }

        if self.title.trim().is_empty() {
            return Err(SiteMetaError::Validation("title must not be empty".to_string()));
        }

        if self.description.trim().is_empty() {
            return Err(SiteMetaError::Validation("description must not be empty".to_string()));
        }

        if !(0.0..=1.0).contains(&self.priority) {
            return Err(SiteMetaError::Validation(format!(
                "priority {} is outside 0.0..=1.0", self.priority
            )));
        }

        if let Some(image) = &self.og_image {
            if image.url.trim().is_empty() {
                return Err(SiteMetaError::Validation("og image url must not be empty".to_string()));
            }
        }

        if let Some(data) = &self.structured_data {
            validate_structured_data(data)?;
        }

        Ok(())
    }
}
