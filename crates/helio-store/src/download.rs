use std::path::PathBuf;

use url::Url;

use crate::{CacheStore, HttpClient, StoreResult};

/// Batches cache fetches into one blocking pass.
///
/// Records discovered by a single resolution call are enqueued together and
/// downloaded together; entries already present in the store cost nothing.
#[derive(Debug, Default)]
pub struct Downloader {
    queue: Vec<(Url, String)>,
}

impl Downloader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn enqueue(&mut self, url: Url, dest_name: impl Into<String>) {
        self.queue.push((url, dest_name.into()));
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Fetch every queued entry, returning local paths in enqueue order.
    /// The first failure aborts the pass.
    pub fn run(self, client: &HttpClient, store: &CacheStore) -> StoreResult<Vec<PathBuf>> {
        let mut paths = Vec::with_capacity(self.queue.len());
        for (url, name) in self.queue {
            paths.push(store.fetch(client, &url, &name)?);
        }
        Ok(paths)
    }
}
