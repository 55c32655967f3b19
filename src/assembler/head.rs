use html_escape::{encode_double_quoted_attribute, encode_text};
use log::warn;

use crate::assembler::metadata::{build_page_metadata, MetadataBlock};
use crate::assembler::structured_data::to_json_ld;
use crate::assembler::url::absolute_url;
use crate::config::SiteDefaults;
use crate::content::PageDescriptor;

fn meta_name(html: &mut String, name: &str, content: &str) {
    html.push_str(&format!(
        "<meta name=\"{}\" content=\"{}\">\n",
        name,
        encode_double_quoted_attribute(content)
    ));
}

fn meta_property(html: &mut String, property: &str, content: &str) {
    html.push_str(&format!(
        "<meta property=\"{}\" content=\"{}\">\n",
        property,
        encode_double_quoted_attribute(content)
    ));
}

fn canonical_link(html: &mut String, url: &str) {
    html.push_str(&format!(
        "<link rel=\"canonical\" href=\"{}\">\n",
        encode_double_quoted_attribute(url)
    ));
}

impl MetadataBlock {
    /// Render the block as tags for a page's `<head>`
    pub fn to_head_html(&self) -> String {
        let mut html = String::new();

        html.push_str(&format!("<title>{}</title>\n", encode_text(&self.title)));
        meta_name(&mut html, "description", &self.description);
        if !self.keywords.is_empty() {
            meta_name(&mut html, "keywords", &self.keywords.join(", "));
        }
        meta_name(&mut html, "robots", &self.robots);
        canonical_link(&mut html, &self.canonical_url);

        // Open Graph
        let og = &self.open_graph;
        meta_property(&mut html, "og:title", &og.title);
        meta_property(&mut html, "og:description", &og.description);
        meta_property(&mut html, "og:url", &og.url);
        meta_property(&mut html, "og:type", &og.og_type);
        if let Some(site_name) = &og.site_name {
            meta_property(&mut html, "og:site_name", site_name);
        }
        if let Some(locale) = &og.locale {
            meta_property(&mut html, "og:locale", locale);
        }
        if let Some(image) = &og.image {
            meta_property(&mut html, "og:image", &image.url);
            if let Some(width) = image.width {
                meta_property(&mut html, "og:image:width", &width.to_string());
            }
            if let Some(height) = image.height {
                meta_property(&mut html, "og:image:height", &height.to_string());
            }
            if let Some(alt) = &image.alt {
                meta_property(&mut html, "og:image:alt", alt);
            }
        }

        // Twitter
        let twitter = &self.twitter;
        meta_name(&mut html, "twitter:card", &twitter.card);
        meta_name(&mut html, "twitter:title", &twitter.title);
        meta_name(&mut html, "twitter:description", &twitter.description);
        if let Some(image) = &twitter.image {
            meta_name(&mut html, "twitter:image", image);
        }
        if let Some(alt) = &twitter.image_alt {
            meta_name(&mut html, "twitter:image:alt", alt);
        }
        if let Some(site) = &twitter.site {
            meta_name(&mut html, "twitter:site", site);
        }

        if let Some(data) = &self.structured_data {
            html.push_str("<script type=\"application/ld+json\">");
            html.push_str(&to_json_ld(data));
            html.push_str("</script>\n");
        }

        html
    }
}

/// Head fragment for the page-render path.
///
/// Never fails: when the page's own metadata cannot be assembled, a
/// fragment built from the site-wide defaults is returned instead.
pub fn render_head_or_default(page: &PageDescriptor, base_url: &str, site: &SiteDefaults) -> String {
    match build_page_metadata(page, base_url, site) {
        Ok(block) => block.to_head_html(),
        Err(e) => {
            warn!("Falling back to site defaults for {}: {}", page.path, e);
            default_head(page, base_url, site)
        }
    }
}

fn default_head(page: &PageDescriptor, base_url: &str, site: &SiteDefaults) -> String {
    let mut html = String::new();

    if let Some(title) = site.title.as_deref().filter(|t| !t.trim().is_empty()) {
        html.push_str(&format!("<title>{}</title>\n", encode_text(title)));
        meta_property(&mut html, "og:title", title);
    }
    if let Some(description) = site.description.as_deref().filter(|d| !d.trim().is_empty()) {
        meta_name(&mut html, "description", description);
        meta_property(&mut html, "og:description", description);
    }
    meta_name(&mut html, "robots", &page.robots.directive());

    if !base_url.is_empty() {
        canonical_link(&mut html, &absolute_url(base_url, page.effective_path()));
    }

    html
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ImageRef;
    use serde_json::json;

    const BASE: &str = "https://example.com";

    fn site() -> SiteDefaults {
        SiteDefaults {
            title: Some("Acme".to_string()),
            description: Some("Acme builds things".to_string()),
            name: Some("Acme".to_string()),
            twitter_site: Some("@acme".to_string()),
            ..SiteDefaults::default()
        }
    }

    fn full_page() -> PageDescriptor {
        let mut page = PageDescriptor::new("/about")
            .with_title("About \"us\" & co")
            .with_description("Who <we> are");
        page.keywords = vec!["agency".to_string(), "seo".to_string()];
        page.og_image = Some(ImageRef {
            url: "/img/about.png".to_string(),
            width: Some(1200),
            height: Some(630),
            alt: Some("Team photo".to_string()),
        });
        page.structured_data = Some(json!({"@context": "https://schema.org", "@type": "Organization", "name": "Acme"}));
        page
    }

    #[test]
    fn test_head_html_contains_every_tag() {
        let block = build_page_metadata(&full_page(), BASE, &site()).unwrap();
        let html = block.to_head_html();

        assert!(html.contains("<title>About \"us\" &amp; co</title>"));
        assert!(html.contains("<meta name=\"description\" content=\"Who &lt;we&gt; are\">"));
        assert!(html.contains("<meta name=\"keywords\" content=\"agency, seo\">"));
        assert!(html.contains("<meta name=\"robots\" content=\"index, follow\">"));
        assert!(html.contains("<link rel=\"canonical\" href=\"https://example.com/about\">"));
        assert!(html.contains("<meta property=\"og:title\" content=\"About &quot;us&quot; &amp; co\">"));
        assert!(html.contains("<meta property=\"og:image\" content=\"https://example.com/img/about.png\">"));
        assert!(html.contains("<meta property=\"og:image:width\" content=\"1200\">"));
        assert!(html.contains("<meta property=\"og:image:alt\" content=\"Team photo\">"));
        assert!(html.contains("<meta name=\"twitter:card\" content=\"summary_large_image\">"));
        assert!(html.contains("<meta name=\"twitter:site\" content=\"@acme\">"));
        assert!(html.contains("<script type=\"application/ld+json\">{\"@context\":\"https://schema.org\""));
    }

    #[test]
    fn test_head_html_omits_absent_optional_tags() {
        let page = PageDescriptor::new("/").with_title("Home").with_description("Welcome");
        let html = build_page_metadata(&page, BASE, &SiteDefaults::default()).unwrap().to_head_html();

        assert!(!html.contains("keywords"));
        assert!(!html.contains("og:image"));
        assert!(!html.contains("og:site_name"));
        assert!(!html.contains("twitter:site"));
        assert!(!html.contains("ld+json"));
    }

    #[test]
    fn test_render_falls_back_to_site_defaults() {
        let mut broken = PageDescriptor::new("/broken").with_title("Broken").with_description("x");
        broken.structured_data = Some(json!({"name": "no type"}));

        let html = render_head_or_default(&broken, BASE, &site());

        assert!(html.contains("<title>Acme</title>"));
        assert!(html.contains("<meta name=\"description\" content=\"Acme builds things\">"));
        assert!(html.contains("<link rel=\"canonical\" href=\"https://example.com/broken\">"));
        assert!(!html.contains("ld+json"));
    }

    #[test]
    fn test_render_without_any_defaults_still_emits_something() {
        let page = PageDescriptor::new("/bare");
        let html = render_head_or_default(&page, BASE, &SiteDefaults::default());

        assert!(!html.contains("<title>"));
        assert!(html.contains("rel=\"canonical\""));
    }

    #[test]
    fn test_render_uses_page_metadata_when_valid() {
        let html = render_head_or_default(&full_page(), BASE, &site());
        assert!(html.contains("og:image"));
    }
}
