//! Server configuration
//!
//! Every setting is a CLI flag with an environment variable fallback. MCP mode
//! has no arguments, so it reads the same struct from the environment alone.

use crate::error::AppError;
use clap::{Args, Parser};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_CATALOG_URL: &str = "https://hugeicons.com/api/icons";
pub const DEFAULT_API_BASE: &str = "https://api.hugeicons.com/v1";

const CACHE_DIR_NAME: &str = "hugeicons-mcp";

/// Remote endpoints, timeouts and catalog caching
#[derive(Args, Debug, Clone, PartialEq)]
pub struct ServerConfig {
    /// Icon catalog endpoint
    #[arg(long, env = "HUGEICONS_CATALOG_URL", default_value = DEFAULT_CATALOG_URL, global = true)]
    pub catalog_url: String,

    /// Base URL of the glyph API
    #[arg(long, env = "HUGEICONS_API_BASE", default_value = DEFAULT_API_BASE, global = true)]
    pub api_base: String,

    /// Per-request HTTP timeout in seconds
    #[arg(
        long,
        env = "HUGEICONS_REQUEST_TIMEOUT_SECS",
        default_value_t = 10,
        value_parser = clap::value_parser!(u64).range(1..),
        global = true
    )]
    pub request_timeout_secs: u64,

    /// How long an on-disk catalog snapshot stays fresh, in hours
    #[arg(long, env = "HUGEICONS_CACHE_TTL_HOURS", default_value_t = 24, global = true)]
    pub cache_ttl_hours: u64,

    /// Keep the catalog in memory only
    #[arg(long, env = "HUGEICONS_NO_DISK_CACHE", global = true)]
    pub no_disk_cache: bool,

    /// Directory for the on-disk catalog snapshot
    #[arg(long, env = "HUGEICONS_CACHE_DIR", global = true)]
    pub cache_dir: Option<PathBuf>,
}

/// Wrapper used to read `ServerConfig` without any command line
#[derive(Parser, Debug)]
#[command(name = "hugeicons-mcp")]
struct EnvOnly {
    #[command(flatten)]
    config: ServerConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
            request_timeout_secs: 10,
            cache_ttl_hours: 24,
            no_disk_cache: false,
            cache_dir: None,
        }
    }
}

impl ServerConfig {
    /// Build the configuration from `HUGEICONS_*` environment variables
    pub fn from_env() -> Result<Self, AppError> {
        EnvOnly::try_parse_from(["hugeicons-mcp"])
            .map(|parsed| parsed.config)
            .map_err(|e| AppError::InvalidInput(format!("Invalid configuration: {}", e)))
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Directory for the catalog snapshot, or `None` when disk caching is off
    pub fn disk_cache_dir(&self) -> Option<PathBuf> {
        if self.no_disk_cache {
            return None;
        }
        Some(
            self.cache_dir
                .clone()
                .unwrap_or_else(default_cache_dir),
        )
    }
}

/// Platform-specific cache directory
fn default_cache_dir() -> PathBuf {
    if let Some(xdg_cache) = std::env::var_os("XDG_CACHE_HOME") {
        PathBuf::from(xdg_cache).join(CACHE_DIR_NAME)
    } else if let Some(cache) = dirs::cache_dir() {
        cache.join(CACHE_DIR_NAME)
    } else {
        std::env::temp_dir().join(CACHE_DIR_NAME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<ServerConfig, clap::Error> {
        let mut argv = vec!["hugeicons-mcp"];
        argv.extend_from_slice(args);
        EnvOnly::try_parse_from(argv).map(|p| p.config)
    }

    #[test]
    fn test_flags_override_defaults() {
        let config = parse(&[
            "--catalog-url",
            "http://localhost:9000/icons",
            "--api-base",
            "http://localhost:9000/v1",
            "--request-timeout-secs",
            "3",
            "--cache-ttl-hours",
            "1",
            "--cache-dir",
            "/tmp/hi",
        ])
        .unwrap();

        assert_eq!(config.catalog_url, "http://localhost:9000/icons");
        assert_eq!(config.api_base, "http://localhost:9000/v1");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.cache_ttl_hours, 1);
        assert_eq!(config.disk_cache_dir(), Some(PathBuf::from("/tmp/hi")));
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        assert!(parse(&["--request-timeout-secs", "0"]).is_err());
    }

    #[test]
    fn test_no_disk_cache_disables_directory() {
        let config = parse(&["--no-disk-cache", "--cache-dir", "/tmp/hi"]).unwrap();
        assert!(config.no_disk_cache);
        assert_eq!(config.disk_cache_dir(), None);
    }

    #[test]
    fn test_default_cache_dir_is_named_after_server() {
        let config = ServerConfig::default();
        let dir = config.disk_cache_dir().unwrap();
        assert!(dir.ends_with(CACHE_DIR_NAME));
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }
}
