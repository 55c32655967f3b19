use crate::front_matter::types::PageFrontMatter;
use crate::utils::error::SiteMetaError;

/// Check if content has front matter
pub fn has_front_matter(content: &str) -> bool {
    content.starts_with("---\n") || content.starts_with("---\r\n")
}

/// Extract the front matter of a content file.
///
/// Returns `Ok(None)` when the file carries no front matter at all.
pub fn extract_front_matter(content: &str) -> Result<Option<PageFrontMatter>, SiteMetaError> {
    if !has_front_matter(content) {
        return Ok(None);
    }

    let body = &content[3..];
    let end_pos = body
        .find("\n---")
        .ok_or_else(|| SiteMetaError::Content("Malformed front matter: missing closing delimiter".to_string()))?;

    let yaml = body[..end_pos].trim();
    if yaml.is_empty() {
        return Ok(Some(PageFrontMatter::default()));
    }

    serde_yaml::from_str::<PageFrontMatter>(yaml)
        .map(Some)
        .map_err(|e| SiteMetaError::Content(format!("Error parsing front matter: {}", e)))
}
