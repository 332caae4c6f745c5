//! Atomic catalog snapshot holder

use parking_lot::RwLock;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{error, info};

use super::PlayerCatalog;
use crate::common::errors::{Result, TradeError};
use crate::common::traits::CatalogSource;

/// Holds the current catalog snapshot
///
/// Readers take a cheap `Arc` clone and keep using it for the whole request;
/// a reload builds the new catalog off to the side and swaps the pointer
/// under a short write lock.
pub struct CatalogStore {
    current: RwLock<Arc<PlayerCatalog>>,
    source: Option<Arc<dyn CatalogSource>>,
}

impl CatalogStore {
    /// Store with a fixed catalog and no reload source
    pub fn new(catalog: PlayerCatalog) -> Self {
        Self {
            current: RwLock::new(Arc::new(catalog)),
            source: None,
        }
    }

    /// Load the first snapshot from `source` and keep it for reloads
    pub async fn from_source(source: Arc<dyn CatalogSource>) -> Result<Self> {
        let catalog = source.load().await?;
        info!(
            source = %source.describe(),
            players = catalog.len(),
            latest_round = ?catalog.latest_round(),
            "Loaded player catalog"
        );
        Ok(Self {
            current: RwLock::new(Arc::new(catalog)),
            source: Some(source),
        })
    }

    /// The current snapshot
    pub fn snapshot(&self) -> Arc<PlayerCatalog> {
        Arc::clone(&self.current.read())
    }

    /// Publish a new snapshot, returning the previous one
    pub fn replace(&self, catalog: PlayerCatalog) -> Arc<PlayerCatalog> {
        self.install(Arc::new(catalog))
    }

    fn install(&self, next: Arc<PlayerCatalog>) -> Arc<PlayerCatalog> {
        std::mem::replace(&mut *self.current.write(), next)
    }

    /// Reload from the configured source, returning the snapshot it published
    ///
    /// On failure the current snapshot stays in place.
    pub async fn reload(&self) -> Result<Arc<PlayerCatalog>> {
        let source = self
            .source
            .as_ref()
            .ok_or_else(|| TradeError::Configuration("catalog has no reload source".into()))?;

        let catalog = source.load().await?;
        info!(
            source = %source.describe(),
            players = catalog.len(),
            latest_round = ?catalog.latest_round(),
            "Reloaded player catalog"
        );
        let next = Arc::new(catalog);
        self.install(Arc::clone(&next));
        Ok(next)
    }

    /// Reload on a fixed interval until the task is aborted
    pub fn spawn_periodic_reload(self: Arc<Self>, every: Duration) -> JoinHandle<()> {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(every);
            // First tick completes immediately; the initial load already happened
            interval.tick().await;
            loop {
                interval.tick().await;
                if let Err(e) = self.reload().await {
                    error!(error = %e, "Catalog reload failed, keeping previous snapshot");
                }
            }
        })
    }
}
