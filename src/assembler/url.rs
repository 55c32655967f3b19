use url::Url;

use crate::utils::error::SiteMetaError;

/// Check that a base URL is absolute (`http`/`https` with a host) and has no
/// trailing slash, query or fragment.
pub fn validate_base_url(base_url: &str) -> Result<(), SiteMetaError> {
    if base_url.trim().is_empty() {
        return Err(SiteMetaError::InvalidConfiguration("base URL is empty".to_string()));
    }

    let parsed = Url::parse(base_url).map_err(|e| {
        SiteMetaError::InvalidConfiguration(format!("base URL '{}' is not absolute: {}", base_url, e))
    })?;

    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(SiteMetaError::InvalidConfiguration(format!(
            "base URL '{}' must use http or https", base_url
        )));
    }

    if parsed.host_str().map_or(true, |host| host.is_empty()) {
        return Err(SiteMetaError::InvalidConfiguration(format!(
            "base URL '{}' has no host", base_url
        )));
    }

    if parsed.query().is_some() || parsed.fragment().is_some() {
        return Err(SiteMetaError::InvalidConfiguration(format!(
            "base URL '{}' must not carry a query or fragment", base_url
        )));
    }

    if base_url.ends_with('/') {
        return Err(SiteMetaError::InvalidConfiguration(format!(
            "base URL '{}' must not end with a slash", base_url
        )));
    }

    Ok(())
}

/// Join a validated base URL and a root-relative path
pub fn absolute_url(base_url: &str, path: &str) -> String {
    if path.starts_with('/') {
        format!("{}{}", base_url, path)
    } else {
        format!("{}/{}", base_url, path)
    }
}

/// Resolve an asset reference: absolute URLs are kept, anything else is
/// treated as relative to the site root.
pub fn resolve_asset_url(base_url: &str, reference: &str) -> String {
    if reference.starts_with("http://") || reference.starts_with("https://") || reference.starts_with("//") {
        reference.to_string()
    } else {
        absolute_url(base_url, reference)
    }
}
