//! Engine configuration.

use std::env;

use tracing::warn;
use tracing_subscriber::EnvFilter;

/// Maximum item size accepted by the store, in bytes.
pub const DEFAULT_MAX_ITEM_SIZE: usize = 400 * 1024;

/// Expression engine configuration.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Items larger than this many bytes are rejected.
    pub max_item_size_bytes: usize,
    /// Log filter directives used when `RUST_LOG` is not set.
    pub log_level: String,
}

impl EngineConfig {
    /// Create configuration from environment variables.
    #[must_use]
    pub fn from_env() -> Self {
        Self {
            max_item_size_bytes: env_usize("DOCSTORE_MAX_ITEM_SIZE", DEFAULT_MAX_ITEM_SIZE),
            log_level: env::var("DOCSTORE_LOG_LEVEL").unwrap_or_else(|_| "info".to_owned()),
        }
    }

    /// Log filter for a `tracing_subscriber` setup.
    ///
    /// `RUST_LOG` wins when it is set; otherwise `log_level` is used, falling
    /// back to `info` if it does not parse.
    #[must_use]
    pub fn env_filter(&self) -> EnvFilter {
        if env::var_os(EnvFilter::DEFAULT_ENV).is_some() {
            EnvFilter::from_default_env()
        } else {
            filter_for(&self.log_level)
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            max_item_size_bytes: DEFAULT_MAX_ITEM_SIZE,
            log_level: "info".to_owned(),
        }
    }
}

fn filter_for(directives: &str) -> EnvFilter {
    EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"))
}

fn env_usize(key: &str, default: usize) -> usize {
    match env::var(key) {
        Ok(v) => v.trim().parse().unwrap_or_else(|_| {
            warn!(key, value = %v, default, "ignoring invalid numeric setting");
            default
        }),
        Err(_) => default,
    }
}
