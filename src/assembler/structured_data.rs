use serde_json::Value;

use crate::content::PageDescriptor;
use crate::utils::error::SiteMetaError;

/// Check that a value is a schema.org JSON-LD object: a JSON object with
/// an `@context` and a non-empty `@type` (string or list of strings).
pub fn validate_structured_data(data: &Value) -> Result<(), SiteMetaError> {
    let object = data.as_object().ok_or_else(|| {
        SiteMetaError::InvalidStructuredData("structured data must be a JSON object".to_string())
    })?;

    match object.get("@type") {
        Some(Value::String(kind)) if !kind.trim().is_empty() => {}
        Some(Value::Array(kinds))
            if !kinds.is_empty() && kinds.iter().all(|k| k.as_str().map_or(false, |s| !s.trim().is_empty())) => {}
        Some(_) => {
            return Err(SiteMetaError::InvalidStructuredData("@type must be a non-empty string".to_string()));
        }
        None => {
            return Err(SiteMetaError::InvalidStructuredData("missing @type".to_string()));
        }
    }

    if !object.contains_key("@context") {
        return Err(SiteMetaError::InvalidStructuredData("missing @context".to_string()));
    }

    Ok(())
}

/// Structured data for a page: passed through unchanged when present and
/// well-formed, `None` when the page has none.
pub fn build_structured_data(page: &PageDescriptor) -> Result<Option<Value>, SiteMetaError> {
    match &page.structured_data {
        None => Ok(None),
        Some(data) => {
            validate_structured_data(data)
                .map_err(|e| match e {
                    SiteMetaError::InvalidStructuredData(msg) => {
                        SiteMetaError::InvalidStructuredData(format!("{}: {}", page.path, msg))
                    }
                    other => other,
                })?;
            Ok(Some(data.clone()))
        }
    }
}

/// Serialize JSON-LD for embedding in a `<script>` element
pub fn to_json_ld(data: &Value) -> String {
    // A literal "</" would close the script element early
    serde_json::to_string(data)
        .unwrap_or_else(|_| "{}".to_string())
        .replace("</", "<\\/")
}
