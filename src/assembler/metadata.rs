use log::warn;
use serde::Serialize;
use serde_json::Value;

use crate::assembler::structured_data::build_structured_data;
use crate::assembler::template::render_title;
use crate::assembler::url::{absolute_url, resolve_asset_url, validate_base_url};
use crate::config::SiteDefaults;
use crate::content::PageDescriptor;
use crate::utils::error::SiteMetaError;

/// Image as emitted in social tags, with an absolute URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedImage {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
}

/// `og:*` properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OpenGraph {
    pub title: String,
    pub description: String,
    pub url: String,
    #[serde(rename = "type")]
    pub og_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<ResolvedImage>,
}

/// `twitter:*` properties
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TwitterCard {
    pub card: String,
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_alt: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site: Option<String>,
}

/// Everything that goes into a page's `<head>` for search engines and
/// social previews
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetadataBlock {
    pub path: String,
    pub title: String,
    pub description: String,
    pub canonical_url: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    pub robots: String,
    pub open_graph: OpenGraph,
    pub twitter: TwitterCard,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub structured_data: Option<Value>,
}

/// Page value, then site default, then nothing
fn resolve_text(page_value: &str, site_value: Option<&String>) -> Option<String> {
    let page_value = page_value.trim();
    if !page_value.is_empty() {
        return Some(page_value.to_string());
    }

    site_value
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
}

/// Apply the title template, degrading to the plain title on failure
fn templated_title(title: String, site: &SiteDefaults) -> String {
    match &site.title_template {
        Some(template) if !template.trim().is_empty() => match render_title(template, &title, site) {
            Ok(rendered) if !rendered.is_empty() => rendered,
            Ok(_) => title,
            Err(e) => {
                warn!("Title template failed, using plain title: {}", e);
                title
            }
        },
        _ => title,
    }
}

/// Assemble the metadata block of one page.
///
/// Title and description follow the chain page value → site default; if
/// neither exists the call fails with `MissingRequiredField`. Optional
/// fields (image, keywords, site name) are omitted when unresolvable.
pub fn build_page_metadata(
    page: &PageDescriptor,
    base_url: &str,
    site: &SiteDefaults,
) -> Result<MetadataBlock, SiteMetaError> {
    validate_base_url(base_url)?;

    let title = resolve_text(&page.title, site.title.as_ref())
        .ok_or_else(|| SiteMetaError::MissingRequiredField(format!("title ({})", page.path)))?;
    let description = resolve_text(&page.description, site.description.as_ref())
        .ok_or_else(|| SiteMetaError::MissingRequiredField(format!("description ({})", page.path)))?;

    let title = templated_title(title, site);
    let canonical_url = absolute_url(base_url, page.effective_path());

    let image = page
        .og_image
        .as_ref()
        .or(site.og_image.as_ref())
        .filter(|image| !image.url.trim().is_empty())
        .map(|image| ResolvedImage {
            url: resolve_asset_url(base_url, &image.url),
            width: image.width,
            height: image.height,
            alt: image.alt.clone().filter(|alt| !alt.trim().is_empty()),
        });

    let keywords = if page.keywords.is_empty() {
        site.keywords.clone()
    } else {
        page.keywords.clone()
    };

    let card = if image.is_some() {
        "summary_large_image".to_string()
    } else {
        site.twitter_card
            .clone()
            .filter(|card| card != "summary_large_image")
            .unwrap_or_else(|| "summary".to_string())
    };

    let structured_data = build_structured_data(page)?;

    Ok(MetadataBlock {
        path: page.path.clone(),
        title: title.clone(),
        description: description.clone(),
        canonical_url: canonical_url.clone(),
        keywords,
        robots: page.robots.directive(),
        open_graph: OpenGraph {
            title: title.clone(),
            description: description.clone(),
            url: canonical_url,
            og_type: "website".to_string(),
            site_name: site.name.clone(),
            locale: site.locale.clone(),
            image: image.clone(),
        },
        twitter: TwitterCard {
            card,
            title,
            description,
            image: image.as_ref().map(|i| i.url.clone()),
            image_alt: image.and_then(|i| i.alt),
            site: site.twitter_site.clone(),
        },
        structured_data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{ImageRef, RobotsPolicy};
    use serde_json::json;

    const BASE: &str = "https://example.com";

    fn page() -> PageDescriptor {
        PageDescriptor::new("/about")
            .with_title("About")
            .with_description("Who we are")
    }

    fn site() -> SiteDefaults {
        SiteDefaults {
            title: Some("Acme".to_string()),
            description: Some("Acme builds things".to_string()),
            name: Some("Acme Inc.".to_string()),
            ..SiteDefaults::default()
        }
    }

    #[test]
    fn test_page_values_win() {
        let block = build_page_metadata(&page(), BASE, &site()).unwrap();

        assert_eq!(block.title, "About");
        assert_eq!(block.description, "Who we are");
        assert_eq!(block.canonical_url, "https://example.com/about");
        assert_eq!(block.robots, "index, follow");
        assert_eq!(block.open_graph.url, block.canonical_url);
        assert_eq!(block.open_graph.site_name.as_deref(), Some("Acme Inc."));
        assert_eq!(block.twitter.card, "summary");
        assert!(block.open_graph.image.is_none());
    }

    #[test]
    fn test_empty_title_falls_back_to_site_default() {
        let untitled = PageDescriptor { title: String::new(), ..page() };
        let block = build_page_metadata(&untitled, BASE, &site()).unwrap();

        assert_eq!(block.title, "Acme");
        assert_eq!(block.open_graph.title, "Acme");
        assert_eq!(block.twitter.title, "Acme");
    }

    #[test]
    fn test_missing_title_everywhere_fails() {
        let untitled = PageDescriptor { title: String::new(), ..page() };
        let err = build_page_metadata(&untitled, BASE, &SiteDefaults::default()).unwrap_err();
        assert!(matches!(err, SiteMetaError::MissingRequiredField(ref f) if f.starts_with("title")));
    }

    #[test]
    fn test_missing_description_everywhere_fails() {
        let bare = PageDescriptor { description: "   ".to_string(), ..page() };
        let err = build_page_metadata(&bare, BASE, &SiteDefaults::default()).unwrap_err();
        assert!(matches!(err, SiteMetaError::MissingRequiredField(ref f) if f.starts_with("description")));
    }

    #[test]
    fn test_idempotent() {
        let mut p = page();
        p.structured_data = Some(json!({"@context": "https://schema.org", "@type": "Organization", "name": "X", "sameAs": ["a", "b"]}));
        p.keywords = vec!["seo".to_string(), "web".to_string()];

        let first = build_page_metadata(&p, BASE, &site()).unwrap();
        let second = build_page_metadata(&p, BASE, &site()).unwrap();

        assert_eq!(first, second);
        assert_eq!(first.to_head_html(), second.to_head_html());
        assert_eq!(serde_json::to_string(&first).unwrap(), serde_json::to_string(&second).unwrap());
    }

    #[test]
    fn test_image_chain_and_card() {
        let mut defaults = site();
        defaults.og_image = Some(ImageRef {
            url: "/img/default.png".to_string(),
            width: Some(1200),
            height: Some(630),
            alt: Some("Acme logo".to_string()),
        });

        let block = build_page_metadata(&page(), BASE, &defaults).unwrap();
        let image = block.open_graph.image.clone().unwrap();
        assert_eq!(image.url, "https://example.com/img/default.png");
        assert_eq!(block.twitter.card, "summary_large_image");
        assert_eq!(block.twitter.image_alt.as_deref(), Some("Acme logo"));

        let mut own = page();
        own.og_image = Some(ImageRef::new("https://cdn.example.com/about.png"));
        let block = build_page_metadata(&own, BASE, &defaults).unwrap();
        assert_eq!(block.twitter.image.as_deref(), Some("https://cdn.example.com/about.png"));
        assert!(block.twitter.image_alt.is_none());
    }

    #[test]
    fn test_canonical_override_and_robots() {
        let mut p = page().with_canonical_path("/company");
        p.robots = RobotsPolicy { index: false, follow: false };

        let block = build_page_metadata(&p, BASE, &site()).unwrap();
        assert_eq!(block.canonical_url, "https://example.com/company");
        assert_eq!(block.robots, "noindex, nofollow");
    }

    #[test]
    fn test_title_template() {
        let mut defaults = site();
        defaults.title_template = Some("{{ title }} | {{ site.name }}".to_string());

        let block = build_page_metadata(&page(), BASE, &defaults).unwrap();
        assert_eq!(block.title, "About | Acme Inc.");

        defaults.title_template = Some("{% if %}".to_string());
        let block = build_page_metadata(&page(), BASE, &defaults).unwrap();
        assert_eq!(block.title, "About");
    }

    #[test]
    fn test_keywords_fall_back_to_site() {
        let mut defaults = site();
        defaults.keywords = vec!["agency".to_string()];

        let block = build_page_metadata(&page(), BASE, &defaults).unwrap();
        assert_eq!(block.keywords, vec!["agency"]);
    }

    #[test]
    fn test_invalid_structured_data_fails() {
        let mut p = page();
        p.structured_data = Some(json!({"@context": "https://schema.org"}));
        assert!(matches!(
            build_page_metadata(&p, BASE, &site()),
            Err(SiteMetaError::InvalidStructuredData(_))
        ));
    }

    #[test]
    fn test_invalid_base_url_fails() {
        assert!(matches!(
            build_page_metadata(&page(), "", &site()),
            Err(SiteMetaError::InvalidConfiguration(_))
        ));
    }
}
