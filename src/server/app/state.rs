use std::sync::{Arc, RwLock};

use axum::http::StatusCode;

use crate::config::Config;
use crate::content::{PageDescriptor, PageRepository};
use crate::server::handlers::ApiError;

/// State shared by every handler
pub struct AppState {
    pub config: Config,
    /// Whether the admin API accepts mutations
    pub admin: bool,
    repository: RwLock<PageRepository>,
}

impl AppState {
    pub fn new(config: Config, repository: PageRepository, admin: bool) -> Self {
        AppState {
            config,
            admin,
            repository: RwLock::new(repository),
        }
    }

    fn read_pages(&self) -> Result<Vec<PageDescriptor>, ApiError> {
        let repository = self
            .repository
            .read()
            .map_err(|_| ApiError::internal("page repository lock poisoned"))?;
        Ok(repository.current()?)
    }

    fn ensure_writable(&self, repository: &PageRepository) -> Result<(), ApiError> {
        if !self.admin {
            return Err(ApiError::new(StatusCode::FORBIDDEN, "Admin API is disabled"));
        }
        if !repository.is_writable() {
            return Err(ApiError::new(
                StatusCode::FORBIDDEN,
                format!("{} is read-only", repository.describe()),
            ));
        }
        Ok(())
    }

    /// Fresh snapshot of the store, taken per request off the async workers.
    ///
    /// Readers share the lock; only admin mutations take it exclusively.
    pub async fn snapshot(self: Arc<Self>) -> Result<Vec<PageDescriptor>, ApiError> {
        tokio::task::spawn_blocking(move || self.read_pages())
            .await
            .map_err(|e| ApiError::internal(format!("snapshot task failed: {}", e)))?
    }

    /// Run an admin mutation under the exclusive lock, on the blocking pool
    pub async fn mutate<T, F>(self: Arc<Self>, change: F) -> Result<T, ApiError>
    where
        T: Send + 'static,
        F: FnOnce(&mut PageRepository) -> Result<T, ApiError> + Send + 'static,
    {
        tokio::task::spawn_blocking(move || {
            let mut repository = self
                .repository
                .write()
                .map_err(|_| ApiError::internal("page repository lock poisoned"))?;
            self.ensure_writable(&repository)?;
            change(&mut repository)
        })
        .await
        .map_err(|e| ApiError::internal(format!("admin task failed: {}", e)))?
    }
}
