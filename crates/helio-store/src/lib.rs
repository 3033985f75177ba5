//! Local kernel cache: a blocking HTTP client, a filename-addressed cache
//! directory with fetch-if-absent semantics, and a batch downloader.

mod cache;
mod download;
mod http;

pub use cache::{CacheStore, default_cache_root, fetch_file};
pub use download::Downloader;
pub use http::{HttpClient, HttpConfig};

use std::{io, path::PathBuf};

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} answered HTTP {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("no cache directory available on this platform")]
    NoCacheRoot,
}

pub(crate) fn io_error(path: impl Into<PathBuf>, err: io::Error) -> StoreError {
    StoreError::Io {
        path: path.into(),
        source: err,
    }
}
