use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Instant;

use log::{debug, info};
use rayon::prelude::*;

use crate::assembler::{build_page_metadata, build_robots_txt, build_sitemap, MetadataBlock};
use crate::config::Config;
use crate::content::{open_store, ContentStore, PageDescriptor};
use crate::utils::error::{BoxResult, SiteMetaError};
use crate::utils::fs::{remove_directory, write_file};
use crate::utils::path::{fragment_file_for, has_unsafe_segments, is_contained};

/// Name of the metadata manifest inside the meta directory
pub const MANIFEST_FILE: &str = "manifest.json";

/// Everything a build writes, assembled in memory first
#[derive(Debug, Clone)]
pub struct SiteArtifacts {
    pub sitemap_xml: String,
    pub robots_txt: String,
    pub blocks: Vec<MetadataBlock>,
}

/// Result of a successful build
#[derive(Debug, Clone)]
pub struct BuildSummary {
    pub pages: usize,
    pub destination: PathBuf,
}

/// Reject snapshots whose pages cannot each get their own output file.
///
/// Paths are compared by the fragment file they map to, so `/` and
/// `/index`, or `/about` and `/about/`, count as the same page.
fn ensure_distinct_outputs(pages: &[PageDescriptor]) -> Result<(), SiteMetaError> {
    let mut seen = HashMap::new();
    for page in pages {
        if has_unsafe_segments(&page.path) {
            return Err(SiteMetaError::Validation(format!(
                "path '{}' must not contain '.' or '..' segments", page.path
            )));
        }
        if let Some(previous) = seen.insert(fragment_file_for(&page.path), page.path.as_str()) {
            debug!("'{}' and '{}' share an output file", previous, page.path);
            return Err(SiteMetaError::DuplicatePath(page.path.clone()));
        }
    }
    Ok(())
}

/// Assemble all artifacts for a snapshot of pages.
///
/// Any failure fails the whole assembly; nothing partial is returned.
pub fn assemble_artifacts(pages: &[PageDescriptor], config: &Config) -> Result<SiteArtifacts, SiteMetaError> {
    ensure_distinct_outputs(pages)?;

    let sitemap = build_sitemap(pages, &config.base_url)?;

    // collect() keeps input order and stops at the first error
    let blocks = pages
        .par_iter()
        .map(|page| build_page_metadata(page, &config.base_url, &config.site))
        .collect::<Result<Vec<_>, _>>()?;

    let sitemap_url = if config.robots.sitemap {
        Some(config.sitemap_url())
    } else {
        None
    };
    let robots_txt = build_robots_txt(&config.robots.rules, sitemap_url.as_deref());

    Ok(SiteArtifacts {
        sitemap_xml: sitemap.to_xml(),
        robots_txt,
        blocks,
    })
}

/// Write assembled artifacts into the destination directory
pub fn write_artifacts(artifacts: &SiteArtifacts, config: &Config) -> BoxResult<()> {
    let destination = config.destination_dir();
    let meta_dir = destination.join(&config.output.meta_dir);

    let mut fragments = Vec::with_capacity(artifacts.blocks.len());
    for block in &artifacts.blocks {
        let relative = fragment_file_for(&block.path);
        if !is_contained(&relative) {
            return Err(SiteMetaError::Validation(format!(
                "fragment for '{}' would be written outside {}", block.path, meta_dir.display()
            ))
            .into());
        }
        fragments.push((meta_dir.join(relative), block));
    }

    write_file(destination.join(&config.output.sitemap), &artifacts.sitemap_xml)?;
    write_file(destination.join(&config.output.robots), &artifacts.robots_txt)?;

    // Fragments of deleted pages must not linger
    remove_directory(&meta_dir)?;

    for (fragment, block) in fragments {
        debug!("Writing {}", fragment.display());
        write_file(&fragment, &block.to_head_html())?;
    }

    let manifest = serde_json::to_string_pretty(&artifacts.blocks)?;
    write_file(meta_dir.join(MANIFEST_FILE), &manifest)?;

    Ok(())
}

/// Build every artifact from the configured content store
pub fn build_site(config: &Config) -> BoxResult<BuildSummary> {
    let store = open_store(&config.content, &config.source);
    build_from_store(store.as_ref(), config)
}

/// Build every artifact from an explicit store
pub fn build_from_store(store: &dyn ContentStore, config: &Config) -> BoxResult<BuildSummary> {
    let start = Instant::now();
    info!("Reading pages from {}", store.describe());

    let pages = store.list_pages()?;
    let artifacts = assemble_artifacts(&pages, config)?;
    write_artifacts(&artifacts, config)?;

    let destination = config.destination_dir();
    info!(
        "Generated sitemap, robots.txt and {} head fragments in {:.2?}",
        artifacts.blocks.len(),
        start.elapsed()
    );

    Ok(BuildSummary { pages: pages.len(), destination })
}
