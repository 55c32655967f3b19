pub mod types;
pub mod parser;

// Re-export the most common items for convenience
pub use types::{PageFrontMatter, SeoMetadata, ImageField};
pub use parser::{extract_front_matter, has_front_matter};
