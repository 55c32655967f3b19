//! Page descriptors and the stores they are read from

pub mod types;
pub mod deserializers;
pub mod store;
pub mod directory;
pub mod repository;

use std::path::Path;

use log::debug;

pub use types::{ChangeFrequency, ImageRef, PageDescriptor, RobotsPolicy};
pub use store::{ContentStore, FileStore, MemoryStore};
pub use directory::DirectoryStore;
pub use repository::PageRepository;

use crate::config::{ContentKind, ContentSource};

/// Open the content store described by the configuration.
///
/// Relative paths are resolved against `source_dir`.
pub fn open_store(source: &ContentSource, source_dir: &Path) -> Box<dyn ContentStore> {
    let path = if source.path.is_absolute() {
        source.path.clone()
    } else {
        source_dir.join(&source.path)
    };

    debug!("Opening {:?} content store at {}", source.kind, path.display());
    match source.kind {
        ContentKind::File => Box::new(FileStore::new(path)),
        ContentKind::Directory => Box::new(DirectoryStore::new(path)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_open_store_resolves_relative_paths() {
        let source = ContentSource { kind: ContentKind::Directory, path: PathBuf::from("content") };
        let store = open_store(&source, Path::new("/srv/site"));

        assert_eq!(store.watch_path(), Some(PathBuf::from("/srv/site/content")));
        assert!(!store.is_writable());
    }

    #[test]
    fn test_open_store_keeps_absolute_paths() {
        let source = ContentSource { kind: ContentKind::File, path: PathBuf::from("/data/pages.yml") };
        let store = open_store(&source, Path::new("/srv/site"));

        assert_eq!(store.watch_path(), Some(PathBuf::from("/data/pages.yml")));
        assert!(store.is_writable());
    }
}
