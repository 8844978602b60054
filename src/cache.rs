//! On-disk snapshot of the icon catalog
//!
//! Layout: `{cache_dir}/catalog.json` with `{cache_dir}/metadata.json` next to
//! it. Both files are written to `.tmp` siblings first and renamed into place
//! while holding an exclusive lock on `{cache_dir}/catalog.lock`.

use crate::error::AppError;
use crate::hugeicons::types::IconRecord;
use chrono::{DateTime, Utc};
use fs2::FileExt;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

const CATALOG_FILE: &str = "catalog.json";
const METADATA_FILE: &str = "metadata.json";
const LOCK_FILE: &str = "catalog.lock";

#[derive(Debug, Error)]
pub enum CacheFileError {
    #[error("I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Corrupt cache file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("Failed to encode catalog snapshot: {0}")]
    Encode(#[from] serde_json::Error),
}

impl From<CacheFileError> for AppError {
    fn from(err: CacheFileError) -> Self {
        AppError::CacheError(err.to_string())
    }
}

fn io_error(path: &Path) -> impl FnOnce(std::io::Error) -> CacheFileError + '_ {
    move |source| CacheFileError::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Metadata stored alongside the catalog snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheMetadata {
    pub cached_at: DateTime<Utc>,
    pub ttl_hours: u64,
    pub icon_count: usize,
    pub source_url: String,
}

impl CacheMetadata {
    pub fn new(source_url: &str, icon_count: usize, ttl_hours: u64) -> Self {
        Self {
            cached_at: Utc::now(),
            ttl_hours,
            icon_count,
            source_url: source_url.to_string(),
        }
    }

    /// Whether the snapshot is still within its TTL at `now`
    pub fn is_fresh_at(&self, now: DateTime<Utc>) -> bool {
        let ttl_secs = i64::try_from(self.ttl_hours.saturating_mul(3600)).unwrap_or(i64::MAX);
        now.signed_duration_since(self.cached_at).num_seconds() < ttl_secs
    }

    pub fn is_fresh(&self) -> bool {
        self.is_fresh_at(Utc::now())
    }
}

/// A catalog snapshot read back from disk
#[derive(Debug, Clone)]
pub struct CachedCatalog {
    pub icons: Vec<IconRecord>,
    pub metadata: CacheMetadata,
}

/// Reads and writes the catalog snapshot in one directory
#[derive(Debug, Clone)]
pub struct CatalogCache {
    dir: PathBuf,
}

impl CatalogCache {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[cfg(test)]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn catalog_path(&self) -> PathBuf {
        self.dir.join(CATALOG_FILE)
    }

    fn metadata_path(&self) -> PathBuf {
        self.dir.join(METADATA_FILE)
    }

    /// Load the snapshot; `Ok(None)` when nothing has been cached yet
    pub fn load(&self) -> Result<Option<CachedCatalog>, CacheFileError> {
        let metadata_path = self.metadata_path();
        let catalog_path = self.catalog_path();
        if !metadata_path.exists() || !catalog_path.exists() {
            return Ok(None);
        }

        let metadata_str = fs::read_to_string(&metadata_path).map_err(io_error(&metadata_path))?;
        let metadata: CacheMetadata =
            serde_json::from_str(&metadata_str).map_err(|source| CacheFileError::Corrupt {
                path: metadata_path.clone(),
                source,
            })?;

        let catalog_str = fs::read_to_string(&catalog_path).map_err(io_error(&catalog_path))?;
        let icons: Vec<IconRecord> =
            serde_json::from_str(&catalog_str).map_err(|source| CacheFileError::Corrupt {
                path: catalog_path.clone(),
                source,
            })?;

        debug!(
            "Read catalog snapshot: {} icons cached at {}",
            icons.len(),
            metadata.cached_at
        );
        Ok(Some(CachedCatalog { icons, metadata }))
    }

    /// Write the snapshot and its metadata atomically
    pub fn store(&self, icons: &[IconRecord], metadata: &CacheMetadata) -> Result<(), CacheFileError> {
        fs::create_dir_all(&self.dir).map_err(io_error(&self.dir))?;

        let catalog_path = self.catalog_path();
        let metadata_path = self.metadata_path();
        let catalog_tmp = catalog_path.with_extension("json.tmp");
        let metadata_tmp = metadata_path.with_extension("json.tmp");

        let lock_path = self.dir.join(LOCK_FILE);
        let lock_file = fs::File::create(&lock_path).map_err(io_error(&lock_path))?;
        lock_file.lock_exclusive().map_err(io_error(&lock_path))?;

        let catalog_json = serde_json::to_string(icons)?;
        let metadata_json = serde_json::to_string_pretty(metadata)?;
        fs::write(&catalog_tmp, catalog_json).map_err(io_error(&catalog_tmp))?;
        fs::write(&metadata_tmp, metadata_json).map_err(io_error(&metadata_tmp))?;

        // Catalog first: metadata only ever describes a complete catalog file
        fs::rename(&catalog_tmp, &catalog_path).map_err(io_error(&catalog_path))?;
        fs::rename(&metadata_tmp, &metadata_path).map_err(io_error(&metadata_path))?;

        lock_file.unlock().map_err(io_error(&lock_path))?;
        let _ = fs::remove_file(&lock_path);

        info!(
            "Cached {} icons in {}",
            metadata.icon_count,
            self.dir.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use tempfile::TempDir;

    fn icons() -> Vec<IconRecord> {
        vec![
            IconRecord::new("home-01", "house,building", "navigation"),
            IconRecord::new("bell", "alert", "communication"),
        ]
    }

    #[test]
    fn test_load_empty_directory() {
        let dir = TempDir::new().unwrap();
        let cache = CatalogCache::new(dir.path());
        assert!(cache.load().unwrap().is_none());
    }

    #[test]
    fn test_store_then_load() {
        let dir = TempDir::new().unwrap();
        let cache = CatalogCache::new(dir.path().join("nested"));
        let metadata = CacheMetadata::new("https://hugeicons.com/api/icons", 2, 24);

        cache.store(&icons(), &metadata).unwrap();
        let loaded = cache.load().unwrap().unwrap();

        assert_eq!(loaded.icons, icons());
        assert_eq!(loaded.metadata, metadata);
        assert!(!cache.dir().join(LOCK_FILE).exists());
        assert!(!cache.dir().join("catalog.json.tmp").exists());
    }

    #[test]
    fn test_freshness_window() {
        let metadata = CacheMetadata::new("u", 0, 2);
        let now = metadata.cached_at;
        assert!(metadata.is_fresh_at(now + Duration::minutes(119)));
        assert!(!metadata.is_fresh_at(now + Duration::hours(2)));

        let expired = CacheMetadata::new("u", 0, 0);
        assert!(!expired.is_fresh_at(expired.cached_at));
    }

    #[test]
    fn test_corrupt_metadata_is_reported() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(METADATA_FILE), "{not json").unwrap();
        fs::write(dir.path().join(CATALOG_FILE), "[]").unwrap();

        let err = CatalogCache::new(dir.path()).load().unwrap_err();
        assert!(matches!(err, CacheFileError::Corrupt { .. }));
        assert_eq!(AppError::from(err).error_code(), "cache_error");
    }
}
