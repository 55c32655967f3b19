use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::content::deserializers::{deserialize_optional_date, deserialize_string_or_seq};
use crate::content::{ChangeFrequency, ImageRef, PageDescriptor, RobotsPolicy};
use crate::utils::path::normalize_url_path;

/// Image given either as a bare URL or as a full reference
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ImageField {
    Url(String),
    Full(ImageRef),
}

impl ImageField {
    pub fn into_image_ref(self) -> ImageRef {
        match self {
            ImageField::Url(url) => ImageRef::new(url),
            ImageField::Full(image) => image,
        }
    }
}

/// SEO overrides nested under `seo:`
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct SeoMetadata {
    /// SEO title
    pub title: Option<String>,

    /// SEO description
    pub description: Option<String>,

    /// Open Graph image
    pub image: Option<ImageField>,
}

/// Front matter of a content file
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct PageFrontMatter {
    /// Document title
    pub title: Option<String>,

    /// Page description
    pub description: Option<String>,

    /// Keywords, as a list or a comma separated string
    #[serde(default, alias = "tags", deserialize_with = "deserialize_string_or_seq")]
    pub keywords: Vec<String>,

    /// Explicit URL path, overriding the one derived from the file name
    #[serde(alias = "path")]
    pub permalink: Option<String>,

    /// Canonical path override
    #[serde(alias = "canonical_path")]
    pub canonical: Option<String>,

    /// Social preview image
    pub image: Option<ImageField>,

    /// Last modification date; falls back to `date`, then the file mtime
    #[serde(default, alias = "modified_date", deserialize_with = "deserialize_optional_date")]
    pub last_modified: Option<DateTime<Utc>>,

    /// Publication date
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date: Option<DateTime<Utc>>,

    #[serde(alias = "change_frequency")]
    pub changefreq: Option<ChangeFrequency>,

    pub priority: Option<f32>,

    pub robots: Option<RobotsPolicy>,

    /// Shorthand for `robots: { index: false }`
    pub noindex: Option<bool>,

    /// Whether the content is published
    pub published: Option<bool>,

    /// Set to false to leave the page out of the site entirely
    pub sitemap: Option<bool>,

    /// SEO overrides
    pub seo: Option<SeoMetadata>,

    /// schema.org object
    #[serde(alias = "schema")]
    pub structured_data: Option<serde_json::Value>,
}

impl PageFrontMatter {
    /// Whether the page should be listed at all
    pub fn is_listed(&self) -> bool {
        self.published != Some(false) && self.sitemap != Some(false)
    }

    /// Build a descriptor from this front matter.
    ///
    /// `derived_path` is the URL path computed from the file location and
    /// `mtime` the file modification time; both are fallbacks.
    pub fn into_descriptor(self, derived_path: &str, mtime: Option<DateTime<Utc>>) -> PageDescriptor {
        let path = self
            .permalink
            .as_deref()
            .map(normalize_url_path)
            .unwrap_or_else(|| derived_path.to_string());

        let seo = self.seo.unwrap_or_default();

        let mut robots = self.robots.unwrap_or_default();
        if self.noindex == Some(true) {
            robots.index = false;
        }

        let mut page = PageDescriptor::new(path);
        page.title = seo.title.or(self.title).unwrap_or_default();
        page.description = seo.description.or(self.description).unwrap_or_default();
        page.keywords = self.keywords;
        page.og_image = seo.image.or(self.image).map(ImageField::into_image_ref);
        page.canonical_path = self.canonical;
        page.last_modified = self.last_modified.or(self.date).or(mtime);
        page.change_frequency = self.changefreq.unwrap_or_default();
        if let Some(priority) = self.priority {
            page.priority = priority;
        }
        page.robots = robots;
        page.structured_data = self.structured_data;
        page
    }
}
