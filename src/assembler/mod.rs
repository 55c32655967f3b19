//! Site Metadata Assembler
//!
//! Pure, synchronous transformations from page descriptors to the SEO
//! artifacts of a site. Nothing here touches the filesystem or holds
//! state; identical input always yields identical output.

pub mod url;
pub mod sitemap;
pub mod metadata;
pub mod structured_data;
pub mod template;
pub mod head;
pub mod robots;

pub use url::{absolute_url, validate_base_url};
pub use sitemap::{build_sitemap, SitemapDocument, SitemapEntry};
pub use metadata::{build_page_metadata, MetadataBlock, OpenGraph, TwitterCard};
pub use structured_data::{build_structured_data, validate_structured_data};
pub use head::render_head_or_default;
pub use robots::build_robots_txt;
