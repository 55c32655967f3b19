use chrono::{DateTime, SecondsFormat, Utc};
use log::{debug, warn};
use serde::Serialize;

use crate::assembler::url::{absolute_url, validate_base_url};
use crate::content::{ChangeFrequency, PageDescriptor};
use crate::utils::error::SiteMetaError;

/// Sitemap protocol namespace
const SITEMAP_NS: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

/// Maximum number of URLs a single sitemap file may list
pub const MAX_SITEMAP_URLS: usize = 50_000;

/// One `<url>` element of a sitemap
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SitemapEntry {
    pub url: String,
    pub last_modified: Option<DateTime<Utc>>,
    pub change_frequency: ChangeFrequency,
    pub priority: f32,
}

/// Ordered list of sitemap entries
#[derive(Debug, Clone, PartialEq, Serialize, Default)]
pub struct SitemapDocument {
    pub entries: Vec<SitemapEntry>,
}

/// Build the sitemap for a snapshot of pages.
///
/// Emits exactly one entry per descriptor, in input order, using the
/// canonical path when one is set.
pub fn build_sitemap(pages: &[PageDescriptor], base_url: &str) -> Result<SitemapDocument, SiteMetaError> {
    validate_base_url(base_url)?;

    let entries = pages
        .iter()
        .map(|page| SitemapEntry {
            url: absolute_url(base_url, page.effective_path()),
            last_modified: page.last_modified,
            change_frequency: page.change_frequency,
            priority: page.priority,
        })
        .collect::<Vec<_>>();

    if entries.len() > MAX_SITEMAP_URLS {
        warn!(
            "Sitemap lists {} URLs, more than the {} crawlers accept in one file",
            entries.len(), MAX_SITEMAP_URLS
        );
    }

    debug!("Built sitemap with {} entries", entries.len());
    Ok(SitemapDocument { entries })
}

impl SitemapDocument {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Most recent modification across all entries
    pub fn last_modified(&self) -> Option<DateTime<Utc>> {
        self.entries.iter().filter_map(|e| e.last_modified).max()
    }

    /// Render sitemap protocol XML
    pub fn to_xml(&self) -> String {
        let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n");
        xml.push_str(&format!("<urlset xmlns=\"{}\">\n", SITEMAP_NS));

        for entry in &self.entries {
            xml.push_str("  <url>\n");
            xml.push_str(&format!("    <loc>{}</loc>\n", html_escape::encode_text(&entry.url)));
            if let Some(last_modified) = entry.last_modified {
                xml.push_str(&format!(
                    "    <lastmod>{}</lastmod>\n",
                    last_modified.to_rfc3339_opts(SecondsFormat::Secs, true)
                ));
            }
            xml.push_str(&format!("    <changefreq>{}</changefreq>\n", entry.change_frequency));
            xml.push_str(&format!("    <priority>{}</priority>\n", format_priority(clamp_priority(entry))));
            xml.push_str("  </url>\n");
        }

        xml.push_str("</urlset>\n");
        xml
    }
}

/// Shortest exact rendering, keeping one decimal for whole numbers
fn format_priority(priority: f32) -> String {
    let text = priority.to_string();
    if text.contains('.') {
        text
    } else {
        format!("{}.0", text)
    }
}

fn clamp_priority(entry: &SitemapEntry) -> f32 {
    if entry.priority.is_nan() {
        warn!("Priority of {} is not a number, using 0.5", entry.url);
        return 0.5;
    }

    if !(0.0..=1.0).contains(&entry.priority) {
        warn!("Priority {} of {} is outside 0.0..=1.0, clamping", entry.priority, entry.url);
    }
    entry.priority.clamp(0.0, 1.0)
}
