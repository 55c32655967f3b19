use std::fs;
use std::path::{Path, PathBuf};

use log::{debug, warn};
use walkdir::WalkDir;

use crate::content::{ContentStore, PageDescriptor};
use crate::front_matter::extract_front_matter;
use crate::utils::error::SiteMetaError;
use crate::utils::fs::modified_time;
use crate::utils::path::url_path_for_file;

/// A directory of Markdown/HTML files whose front matter describes pages
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        DirectoryStore { root: root.into() }
    }

    fn load_page(&self, path: &Path) -> Result<Option<PageDescriptor>, SiteMetaError> {
        let content = fs::read_to_string(path)?;

        let front_matter = match extract_front_matter(&content) {
            Ok(Some(front_matter)) => front_matter,
            Ok(None) => {
                debug!("Skipping {} (no front matter)", path.display());
                return Ok(None);
            }
            Err(e) => {
                return Err(SiteMetaError::Content(format!("{}: {}", path.display(), e)));
            }
        };

        if !front_matter.is_listed() {
            debug!("Skipping {} (unlisted)", path.display());
            return Ok(None);
        }

        let relative = path.strip_prefix(&self.root).unwrap_or(path);
        let derived_path = url_path_for_file(relative);
        Ok(Some(front_matter.into_descriptor(&derived_path, modified_time(path))))
    }
}

impl ContentStore for DirectoryStore {
    fn list_pages(&self) -> Result<Vec<PageDescriptor>, SiteMetaError> {
        if !self.root.is_dir() {
            return Err(SiteMetaError::Content(format!(
                "Content directory does not exist: {}", self.root.display()
            )));
        }

        debug!("Collecting pages from {}", self.root.display());

        // Sorted walk keeps the output order stable across platforms
        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| e.depth() == 0 || !is_excluded_path(e.path()));

        let mut pages = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Error walking {}: {}", self.root.display(), e);
                    continue;
                }
            };

            let path = entry.path();
            if !path.is_file() || !is_page_file(path) {
                continue;
            }

            if let Some(page) = self.load_page(path)? {
                pages.push(page);
            }
        }

        debug!("Collected {} pages", pages.len());
        Ok(pages)
    }

    fn describe(&self) -> String {
        format!("content directory {}", self.root.display())
    }

    fn watch_path(&self) -> Option<PathBuf> {
        Some(self.root.clone())
    }
}

/// Files/directories starting with an underscore or dot are not content
fn is_excluded_path(path: &Path) -> bool {
    path.file_name()
        .map(|name| {
            let name = name.to_string_lossy();
            name.starts_with('_') || name.starts_with('.')
        })
        .unwrap_or(false)
}

fn is_page_file(path: &Path) -> bool {
    match path.extension() {
        Some(ext) => matches!(
            ext.to_string_lossy().to_lowercase().as_str(),
            "md" | "markdown" | "html" | "htm"
        ),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_directory_store_derives_paths() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "index.md", "---\ntitle: Home\npriority: 1.0\n---\n# Home");
        write(root, "about.md", "---\ntitle: About\n---\nAbout us");
        write(root, "services/index.html", "---\ntitle: Services\n---\n<p>x</p>");
        write(root, "services/seo.md", "---\ntitle: SEO\npermalink: /seo/\n---\n");

        let pages = DirectoryStore::new(root).list_pages().unwrap();
        let paths: Vec<&str> = pages.iter().map(|p| p.path.as_str()).collect();

        assert_eq!(paths, vec!["/about", "/", "/services", "/seo"]);
        assert!(pages.iter().all(|p| p.last_modified.is_some()));
    }

    #[test]
    fn test_directory_store_skips_unlisted_and_private() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path();
        write(root, "draft.md", "---\ntitle: Draft\npublished: false\n---\n");
        write(root, "_partials/header.html", "---\ntitle: Header\n---\n");
        write(root, "plain.md", "no front matter");
        write(root, "notes.txt", "---\ntitle: Notes\n---\n");
        write(root, "kept.md", "---\ntitle: Kept\n---\n");

        let pages = DirectoryStore::new(root).list_pages().unwrap();

        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].path, "/kept");
    }

    #[test]
    fn test_directory_store_reports_bad_front_matter() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "broken.md", "---\ntitle: [unclosed\n---\n");

        let result = DirectoryStore::new(dir.path()).list_pages();
        assert!(matches!(result, Err(SiteMetaError::Content(_))));
    }

    #[test]
    fn test_directory_store_missing_root() {
        let result = DirectoryStore::new("/no/such/dir").list_pages();
        assert!(result.is_err());
    }
}
