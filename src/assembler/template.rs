use liquid::ParserBuilder;

use crate::config::SiteDefaults;
use crate::utils::error::SiteMetaError;

/// Render the site title template for a resolved page title.
///
/// The template sees `title` (the page title) and `site.name` /
/// `site.title` from the site defaults.
pub fn render_title(template: &str, title: &str, site: &SiteDefaults) -> Result<String, SiteMetaError> {
    let parser = ParserBuilder::with_stdlib()
        .build()
        .map_err(|e| SiteMetaError::Generic(format!("Liquid parser unavailable: {}", e)))?;

    let template = parser
        .parse(template)
        .map_err(|e| SiteMetaError::InvalidConfiguration(format!("title template: {}", e)))?;

    let globals = liquid::object!({
        "title": title,
        "site": {
            "name": site.name.clone().unwrap_or_default(),
            "title": site.title.clone().unwrap_or_default()
        }
    });

    let rendered = template
        .render(&globals)
        .map_err(|e| SiteMetaError::InvalidConfiguration(format!("title template: {}", e)))?;

    Ok(rendered.trim().to_string())
}
