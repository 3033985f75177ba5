use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use directories::ProjectDirs;
use url::Url;

use crate::{HttpClient, StoreResult, io_error};

/// Filename-addressed kernel cache rooted at a single directory.
///
/// Existence on disk is the sole cache-hit signal; there is no metadata
/// sidecar, no checksum, and no expiry. Entries may carry relative
/// subdirectories (meta-kernel dependents keep the folder layout the
/// meta-kernel expects).
#[derive(Debug, Clone)]
pub struct CacheStore {
    root: PathBuf,
}

impl CacheStore {
    pub fn open(root: impl AsRef<Path>) -> StoreResult<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root).map_err(|e| io_error(&root, e))?;
        Ok(Self { root })
    }

    /// Open the cache at the platform default location (see
    /// [`default_cache_root`]).
    pub fn open_default() -> StoreResult<Self> {
        Self::open(default_cache_root()?)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Local path an entry name maps to, whether or not it exists yet.
    pub fn entry_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entry_path(name).exists()
    }

    /// Return the local path for `name`, downloading from `url` first if the
    /// entry is absent. A present entry short-circuits with zero network
    /// requests.
    pub fn fetch(&self, client: &HttpClient, url: &Url, name: &str) -> StoreResult<PathBuf> {
        let dest = self.entry_path(name);
        fetch_file(client, url, &dest)?;
        Ok(dest)
    }
}

/// Download `url` to `dest` unless `dest` already exists.
///
/// The body is staged to a temporary file in the destination directory and
/// renamed into place, so a partially written download is never observable
/// at `dest`.
pub fn fetch_file(client: &HttpClient, url: &Url, dest: &Path) -> StoreResult<()> {
    if dest.exists() {
        tracing::debug!(path = %dest.display(), "cache hit");
        return Ok(());
    }
    let parent = dest
        .parent()
        .ok_or_else(|| io_error(dest, ErrorKind::InvalidInput.into()))?;
    fs::create_dir_all(parent).map_err(|e| io_error(parent, e))?;

    let mut staged = tempfile::NamedTempFile::new_in(parent).map_err(|e| io_error(parent, e))?;
    let bytes = client.download(url, staged.as_file_mut())?;
    match staged.persist(dest) {
        Ok(_) => {
            tracing::debug!(%url, bytes, path = %dest.display(), "downloaded");
            Ok(())
        }
        // A concurrent fetch of the same name may have published first.
        Err(_) if dest.exists() => Ok(()),
        Err(err) => Err(io_error(dest, err.error)),
    }
}

/// Cache root resolution: `HELIO_CACHE_DIR` if set, else the platform cache
/// directory.
pub fn default_cache_root() -> StoreResult<PathBuf> {
    if let Ok(dir) = std::env::var("HELIO_CACHE_DIR") {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("", "", "heliospice")
        .map(|dirs| dirs.cache_dir().to_path_buf())
        .ok_or(crate::StoreError::NoCacheRoot)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{HttpConfig, StoreError};
    use tempfile::TempDir;

    fn client() -> HttpClient {
        HttpClient::new(HttpConfig::default())
    }

    #[test]
    fn second_fetch_is_served_from_disk() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/spk/psp.bsp")
            .with_body("ephemeris bytes")
            .expect(1)
            .create();

        let dir = TempDir::new().expect("tmp");
        let store = CacheStore::open(dir.path()).expect("open");
        let url = Url::parse(&format!("{}/spk/psp.bsp", server.url())).expect("url");

        let first = store.fetch(&client(), &url, "psp.bsp").expect("fetch");
        let second = store.fetch(&client(), &url, "psp.bsp").expect("refetch");
        assert_eq!(first, second);
        assert_eq!(fs::read(&first).expect("read"), b"ephemeris bytes");
        mock.assert();
    }

    #[test]
    fn entry_names_may_carry_subdirectories() {
        let mut server = mockito::Server::new();
        server
            .mock("GET", "/k/ck/att.bc")
            .with_body("x")
            .create();

        let dir = TempDir::new().expect("tmp");
        let store = CacheStore::open(dir.path()).expect("open");
        let url = Url::parse(&format!("{}/k/ck/att.bc", server.url())).expect("url");

        let path = store.fetch(&client(), &url, "ck/att.bc").expect("fetch");
        assert_eq!(path, dir.path().join("ck").join("att.bc"));
        assert!(path.exists());
    }

    #[test]
    fn failed_download_leaves_no_entry() {
        let mut server = mockito::Server::new();
        server.mock("GET", "/gone.bsp").with_status(404).create();

        let dir = TempDir::new().expect("tmp");
        let store = CacheStore::open(dir.path()).expect("open");
        let url = Url::parse(&format!("{}/gone.bsp", server.url())).expect("url");

        let err = store
            .fetch(&client(), &url, "gone.bsp")
            .expect_err("should fail");
        assert!(matches!(err, StoreError::Status { .. }));
        assert!(!store.contains("gone.bsp"));
        // No temporary litter either.
        let leftovers: Vec<_> = fs::read_dir(dir.path()).expect("list").collect();
        assert!(leftovers.is_empty());
    }
}
