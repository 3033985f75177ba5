//! Global CLI options and shared construction of the store and client.

use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;

use helio_store::{CacheStore, HttpClient, HttpConfig, default_cache_root};

#[derive(Args, Debug, Clone)]
pub struct GlobalOpts {
    /// Kernel cache directory (default: platform cache dir, or HELIO_CACHE_DIR)
    #[arg(long, global = true)]
    pub cache_dir: Option<PathBuf>,

    /// HTTP timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout_secs: u64,

    /// JSON output
    #[arg(long, global = true)]
    pub json: bool,
}

impl GlobalOpts {
    pub fn store(&self) -> Result<CacheStore> {
        let root = match &self.cache_dir {
            Some(dir) => dir.clone(),
            None => default_cache_root().context("resolve cache directory")?,
        };
        CacheStore::open(&root)
            .with_context(|| format!("open kernel cache at {}", root.display()))
    }

    pub fn client(&self) -> HttpClient {
        HttpClient::new(HttpConfig {
            timeout: Duration::from_secs(self.timeout_secs),
            ..HttpConfig::default()
        })
    }
}
