use chrono::Utc;
use log::{debug, info};

use crate::content::{ContentStore, PageDescriptor};
use crate::utils::error::SiteMetaError;
use crate::utils::path::{fragment_file_for, normalize_url_path};

/// Create/read/update/delete over page descriptors, as used by the admin API.
///
/// Every mutation is validated against, and written through to, the
/// backing store; reads always go to the store.
pub struct PageRepository {
    store: Box<dyn ContentStore>,
}

impl PageRepository {
    /// Load the current pages from a store
    pub fn load(store: Box<dyn ContentStore>) -> Result<Self, SiteMetaError> {
        let pages = store.list_pages()?;
        debug!("Repository loaded {} pages from {}", pages.len(), store.describe());
        Ok(PageRepository { store })
    }

    /// Fresh listing straight from the backing store
    pub fn current(&self) -> Result<Vec<PageDescriptor>, SiteMetaError> {
        self.store.list_pages()
    }

    pub fn is_writable(&self) -> bool {
        self.store.is_writable()
    }

    pub fn describe(&self) -> String {
        self.store.describe()
    }

    pub fn create(&mut self, page: PageDescriptor) -> Result<PageDescriptor, SiteMetaError> {
        let page = stamped(normalized(page));
        page.validate()?;

        let created = page.clone();
        self.mutate(move |pages| {
            if let Some(existing) = pages.iter().find(|p| same_output(&p.path, &page.path)) {
                debug!("'{}' collides with existing '{}'", page.path, existing.path);
                return Err(SiteMetaError::DuplicatePath(page.path));
            }
            pages.push(page);
            Ok(())
        })?;

        info!("Created page {}", created.path);
        Ok(created)
    }

    /// Replace the page at `path`. The replacement may carry a new path as
    /// long as it doesn't collide with another page.
    pub fn update(&mut self, path: &str, page: PageDescriptor) -> Result<PageDescriptor, SiteMetaError> {
        let path = normalize_url_path(path);
        let page = stamped(normalized(page));
        page.validate()?;

        let updated = page.clone();
        self.mutate(move |pages| {
            let index = pages
                .iter()
                .position(|p| p.path == path)
                .ok_or_else(|| SiteMetaError::NotFound(path.clone()))?;

            let clash = pages
                .iter()
                .enumerate()
                .any(|(i, p)| i != index && same_output(&p.path, &page.path));
            if clash {
                return Err(SiteMetaError::DuplicatePath(page.path));
            }

            pages[index] = page;
            Ok(())
        })?;

        info!("Updated page {}", updated.path);
        Ok(updated)
    }

    pub fn delete(&mut self, path: &str) -> Result<PageDescriptor, SiteMetaError> {
        let path = normalize_url_path(path);
        let removed = self.mutate(|pages| {
            let index = pages
                .iter()
                .position(|p| p.path == path)
                .ok_or_else(|| SiteMetaError::NotFound(path.clone()))?;
            Ok(pages.remove(index))
        })?;

        info!("Deleted page {}", removed.path);
        Ok(removed)
    }

    /// Apply a change to the pages exactly as persisted, then save them
    fn mutate<T, F>(&mut self, change: F) -> Result<T, SiteMetaError>
    where
        F: FnOnce(&mut Vec<PageDescriptor>) -> Result<T, SiteMetaError>,
    {
        let mut next = self.store.stored_pages()?;
        let outcome = change(&mut next)?;
        self.store.save_pages(&next)?;
        Ok(outcome)
    }
}

/// Two paths that would share a head fragment file count as the same page
fn same_output(a: &str, b: &str) -> bool {
    fragment_file_for(a) == fragment_file_for(b)
}

/// Admin writes without a date are dated now
fn stamped(mut page: PageDescriptor) -> PageDescriptor {
    if page.last_modified.is_none() {
        page.last_modified = Some(Utc::now());
    }
    page
}

fn normalized(mut page: PageDescriptor) -> PageDescriptor {
    if page.path.starts_with('/') {
        page.path = normalize_url_path(&page.path);
    }
    page
}
