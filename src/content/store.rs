use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::{Deserialize, Serialize};

use crate::content::PageDescriptor;
use crate::utils::error::SiteMetaError;
use crate::utils::fs::{modified_time, write_file};

/// Read interface to wherever page descriptors live.
///
/// Every call returns a fresh, independent snapshot.
pub trait ContentStore: Send + Sync {
    /// List every publishable page
    fn list_pages(&self) -> Result<Vec<PageDescriptor>, SiteMetaError>;

    /// Pages exactly as persisted, without read-time enrichment such as
    /// mtime dates. Mutations start from this view.
    fn stored_pages(&self) -> Result<Vec<PageDescriptor>, SiteMetaError> {
        self.list_pages()
    }

    /// Human readable location, for logs
    fn describe(&self) -> String;

    /// Replace the stored pages. Stores that cannot be written reject this.
    fn save_pages(&self, _pages: &[PageDescriptor]) -> Result<(), SiteMetaError> {
        Err(SiteMetaError::Content(format!("{} is read-only", self.describe())))
    }

    /// Whether `save_pages` is supported
    fn is_writable(&self) -> bool {
        false
    }

    /// Filesystem location to watch for changes, if any
    fn watch_path(&self) -> Option<PathBuf> {
        None
    }
}

/// In-memory store
#[derive(Debug, Default)]
pub struct MemoryStore {
    pages: std::sync::RwLock<Vec<PageDescriptor>>,
}

impl MemoryStore {
    pub fn new(pages: Vec<PageDescriptor>) -> Self {
        MemoryStore { pages: std::sync::RwLock::new(pages) }
    }
}

impl ContentStore for MemoryStore {
    fn list_pages(&self) -> Result<Vec<PageDescriptor>, SiteMetaError> {
        self.pages
            .read()
            .map(|pages| pages.clone())
            .map_err(|_| SiteMetaError::Content("memory store lock poisoned".to_string()))
    }

    fn describe(&self) -> String {
        "in-memory store".to_string()
    }

    fn save_pages(&self, pages: &[PageDescriptor]) -> Result<(), SiteMetaError> {
        let mut guard = self
            .pages
            .write()
            .map_err(|_| SiteMetaError::Content("memory store lock poisoned".to_string()))?;
        *guard = pages.to_vec();
        Ok(())
    }

    fn is_writable(&self) -> bool {
        true
    }
}

/// On-disk layout of a pages file
#[derive(Debug, Default, Serialize, Deserialize)]
struct PagesFile {
    #[serde(default)]
    pages: Vec<PageDescriptor>,
}

/// Supported pages file formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FileFormat {
    Yaml,
    Toml,
    Json,
}

impl FileFormat {
    fn from_path(path: &Path) -> Result<Self, SiteMetaError> {
        let ext = path
            .extension()
            .map(|ext| ext.to_string_lossy().to_lowercase())
            .unwrap_or_else(|| "yml".to_string());

        match ext.as_str() {
            "yml" | "yaml" => Ok(FileFormat::Yaml),
            "toml" => Ok(FileFormat::Toml),
            "json" => Ok(FileFormat::Json),
            other => Err(SiteMetaError::Content(format!(
                "Unsupported pages file format: {}", other
            ))),
        }
    }
}

/// A single YAML, TOML or JSON file holding `pages: [...]`
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(path: P) -> Self {
        FileStore { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, content: &str) -> Result<PagesFile, SiteMetaError> {
        let format = FileFormat::from_path(&self.path)?;
        let location = self.path.display();

        match format {
            FileFormat::Yaml => serde_yaml::from_str(content)
                .map_err(|e| SiteMetaError::Content(format!("Failed to parse {}: {}", location, e))),
            FileFormat::Toml => toml::from_str(content)
                .map_err(|e| SiteMetaError::Content(format!("Failed to parse {}: {}", location, e))),
            FileFormat::Json => serde_json::from_str(content)
                .map_err(|e| SiteMetaError::Content(format!("Failed to parse {}: {}", location, e))),
        }
    }

    fn serialize(&self, file: &PagesFile) -> Result<String, SiteMetaError> {
        let format = FileFormat::from_path(&self.path)?;
        let location = self.path.display();

        match format {
            FileFormat::Yaml => serde_yaml::to_string(file)
                .map_err(|e| SiteMetaError::Content(format!("Failed to serialize {}: {}", location, e))),
            FileFormat::Toml => toml::to_string_pretty(file)
                .map_err(|e| SiteMetaError::Content(format!("Failed to serialize {}: {}", location, e))),
            FileFormat::Json => serde_json::to_string_pretty(file)
                .map_err(|e| SiteMetaError::Content(format!("Failed to serialize {}: {}", location, e))),
        }
    }
}

impl ContentStore for FileStore {
    fn list_pages(&self) -> Result<Vec<PageDescriptor>, SiteMetaError> {
        let stored = self.stored_pages()?;

        // Pages without an explicit date inherit the file's mtime
        let mtime = modified_time(&self.path);
        let pages = stored
            .into_iter()
            .map(|mut page| {
                if page.last_modified.is_none() {
                    page.last_modified = mtime;
                }
                page
            })
            .collect::<Vec<_>>();

        debug!("Loaded {} pages from {}", pages.len(), self.path.display());
        Ok(pages)
    }

    fn stored_pages(&self) -> Result<Vec<PageDescriptor>, SiteMetaError> {
        if !self.path.exists() {
            return Err(SiteMetaError::Content(format!(
                "Pages file not found: {}", self.path.display()
            )));
        }

        let content = fs::read_to_string(&self.path)?;
        if content.trim().is_empty() {
            return Ok(Vec::new());
        }
        Ok(self.parse(&content)?.pages)
    }

    fn describe(&self) -> String {
        format!("pages file {}", self.path.display())
    }

    fn save_pages(&self, pages: &[PageDescriptor]) -> Result<(), SiteMetaError> {
        let file = PagesFile { pages: pages.to_vec() };
        let content = self.serialize(&file)?;
        write_file(&self.path, &content)
            .map_err(|e| SiteMetaError::Content(format!("Failed to write {}: {}", self.path.display(), e)))?;
        debug!("Saved {} pages to {}", pages.len(), self.path.display());
        Ok(())
    }

    fn is_writable(&self) -> bool {
        true
    }

    fn watch_path(&self) -> Option<PathBuf> {
        Some(self.path.clone())
    }
}
