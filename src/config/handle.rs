//! Live config with atomic reload support.
//!
//! Uses `arc-swap` for lock-free reads and atomic config replacement.
//! This enables hot-reloading of `trellis.toml` during watch mode.

use std::hash::Hasher;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use anyhow::Result;
use arc_swap::ArcSwap;
use rustc_hash::FxHasher;

use super::SiteConfig;
use crate::cli::Cli;

/// Current config plus the hash of the file it was loaded from.
pub struct ConfigHandle {
    current: ArcSwap<SiteConfig>,
    hash: AtomicU64,
}

impl ConfigHandle {
    pub fn new(config: SiteConfig) -> Self {
        let hash = file_hash(&config).unwrap_or(0);
        Self {
            current: ArcSwap::from_pointee(config),
            hash: AtomicU64::new(hash),
        }
    }

    #[inline]
    pub fn load(&self) -> Arc<SiteConfig> {
        self.current.load_full()
    }

    /// Reload config from disk if content changed.
    ///
    /// Returns `Ok(true)` if config was updated, `Ok(false)` if unchanged.
    pub fn reload(&self, cli: &Cli) -> Result<bool> {
        let Some(new_hash) = file_hash(&self.load()) else {
            return Ok(false);
        };
        if new_hash == self.hash.load(Ordering::Relaxed) {
            return Ok(false);
        }

        let config = SiteConfig::load(cli)?;
        self.current.store(Arc::new(config));
        self.hash.store(new_hash, Ordering::Relaxed);
        Ok(true)
    }
}

fn file_hash(config: &SiteConfig) -> Option<u64> {
    let content = std::fs::read(&config.config_path).ok()?;
    let mut hasher = FxHasher::default();
    hasher.write(&content);
    Some(hasher.finish())
}
