//! Icon catalog provider with in-memory and on-disk caching.

use crate::cache::{CacheMetadata, CachedCatalog, CatalogCache};
use crate::error::AppError;
use crate::hugeicons::types::IconRecord;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

/// Anything that can produce the full icon catalog
pub trait IconSource: Send + Sync {
    /// Where the catalog comes from, recorded in the disk cache metadata
    fn source_url(&self) -> &str;

    fn fetch_icons(&self) -> impl Future<Output = Result<Vec<IconRecord>, AppError>> + Send;
}

/// Provides the icon catalog, loading it at most once per process.
///
/// Lookup order:
/// 1. The in-memory copy from an earlier call.
/// 2. A fresh on-disk snapshot.
/// 3. The source, whose result is written back to disk.
/// 4. A stale on-disk snapshot, only when the source fails.
pub struct IconCatalog<S> {
    source: S,
    disk: Option<CatalogCache>,
    ttl_hours: u64,
    loaded: Mutex<Option<Arc<Vec<IconRecord>>>>,
}

impl<S: IconSource> IconCatalog<S> {
    /// Catalog backed by `source` with no disk snapshot
    pub fn new(source: S) -> Self {
        Self {
            source,
            disk: None,
            ttl_hours: 0,
            loaded: Mutex::new(None),
        }
    }

    /// Keep a snapshot in `cache`, trusted for `ttl_hours`
    pub fn with_disk_cache(mut self, cache: CatalogCache, ttl_hours: u64) -> Self {
        self.disk = Some(cache);
        self.ttl_hours = ttl_hours;
        self
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The full catalog
    pub async fn icons(&self) -> Result<Arc<Vec<IconRecord>>, AppError> {
        // Held across the fetch so concurrent callers share one download
        let mut loaded = self.loaded.lock().await;
        if let Some(icons) = loaded.as_ref() {
            return Ok(Arc::clone(icons));
        }

        let icons = match self.read_snapshot() {
            Some(cached) if cached.metadata.is_fresh() => {
                debug!("Using fresh catalog snapshot ({} icons)", cached.icons.len());
                cached.icons
            }
            stale => match self.source.fetch_icons().await {
                Ok(icons) => {
                    info!("Loaded {} icons from {}", icons.len(), self.source.source_url());
                    self.write_snapshot(&icons);
                    icons
                }
                Err(e) => match stale {
                    Some(cached) => {
                        warn!(
                            "Catalog fetch failed ({}), serving snapshot from {}",
                            e, cached.metadata.cached_at
                        );
                        cached.icons
                    }
                    None => return Err(e),
                },
            },
        };

        let icons = Arc::new(icons);
        *loaded = Some(Arc::clone(&icons));
        Ok(icons)
    }

    fn read_snapshot(&self) -> Option<CachedCatalog> {
        let cache = self.disk.as_ref()?;
        match cache.load() {
            Ok(snapshot) => snapshot,
            Err(e) => {
                warn!("Ignoring unreadable catalog snapshot: {}", e);
                None
            }
        }
    }

    fn write_snapshot(&self, icons: &[IconRecord]) {
        let Some(cache) = &self.disk else {
            return;
        };
        let metadata = CacheMetadata::new(self.source.source_url(), icons.len(), self.ttl_hours);
        if let Err(e) = cache.store(icons, &metadata) {
            warn!("Failed to write catalog snapshot: {}", e);
        }
    }
}
