use std::error::Error;
use std::fmt;
use std::io;

/// Common result type for application-level operations
pub type BoxResult<T> = Result<T, Box<dyn Error>>;

/// Error types for Sitemeta operations
#[derive(Debug)]
pub enum SiteMetaError {
    /// Base URL missing, relative or otherwise unusable
    InvalidConfiguration(String),
    /// Neither the page nor the site defaults provide a required field
    MissingRequiredField(String),
    /// Structured data is not a schema.org object
    InvalidStructuredData(String),
    /// A page descriptor failed field validation
    Validation(String),
    /// Two descriptors share the same path
    DuplicatePath(String),
    /// No descriptor exists for a path
    NotFound(String),
    /// IO error wrapper
    Io(io::Error),
    /// Configuration file error
    Config(String),
    /// Content store error
    Content(String),
    /// Server error
    Server(String),
    /// Generic error message
    Generic(String),
}

impl fmt::Display for SiteMetaError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SiteMetaError::InvalidConfiguration(msg) => write!(f, "Invalid configuration: {}", msg),
            SiteMetaError::MissingRequiredField(field) => write!(f, "Missing required field: {}", field),
            SiteMetaError::InvalidStructuredData(msg) => write!(f, "Invalid structured data: {}", msg),
            SiteMetaError::Validation(msg) => write!(f, "Validation error: {}", msg),
            SiteMetaError::DuplicatePath(path) => write!(f, "Duplicate page path: {}", path),
            SiteMetaError::NotFound(path) => write!(f, "Page not found: {}", path),
            SiteMetaError::Io(err) => write!(f, "IO error: {}", err),
            SiteMetaError::Config(msg) => write!(f, "Configuration error: {}", msg),
            SiteMetaError::Content(msg) => write!(f, "Content error: {}", msg),
            SiteMetaError::Server(msg) => write!(f, "Server error: {}", msg),
            SiteMetaError::Generic(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for SiteMetaError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            SiteMetaError::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for SiteMetaError {
    fn from(err: io::Error) -> Self {
        SiteMetaError::Io(err)
    }
}

impl From<String> for SiteMetaError {
    fn from(msg: String) -> Self {
        SiteMetaError::Generic(msg)
    }
}

impl From<&str> for SiteMetaError {
    fn from(msg: &str) -> Self {
        SiteMetaError::Generic(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_names_the_failure_kind() {
        let err = SiteMetaError::MissingRequiredField("title".to_string());
        assert_eq!(err.to_string(), "Missing required field: title");

        let err = SiteMetaError::InvalidConfiguration("base URL is empty".to_string());
        assert!(err.to_string().starts_with("Invalid configuration"));
    }

    #[test]
    fn test_io_error_is_exposed_as_source() {
        let err: SiteMetaError = io::Error::new(io::ErrorKind::NotFound, "gone").into();
        assert!(err.source().is_some());
    }
}
