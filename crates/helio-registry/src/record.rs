use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;
use url::Url;

/// Selection-policy class of a kernel source.
///
/// Reconstructed kernels cover disjoint time windows and all stay useful;
/// predicted and meta kernels are superseded wholesale by newer versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KernelClass {
    Recon,
    Predict,
    Meta,
}

impl fmt::Display for KernelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            KernelClass::Recon => "recon",
            KernelClass::Predict => "predict",
            KernelClass::Meta => "meta",
        };
        f.write_str(label)
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown kernel class '{0}' (expected recon, predict, or meta)")]
pub struct ParseKernelClassError(String);

impl FromStr for KernelClass {
    type Err = ParseKernelClassError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "recon" => Ok(KernelClass::Recon),
            "predict" => Ok(KernelClass::Predict),
            "meta" => Ok(KernelClass::Meta),
            other => Err(ParseKernelClassError(other.to_string())),
        }
    }
}

/// Recency ordering used when ranking a source's records.
///
/// Most sources rank by version number; meta-kernels are reissued with a
/// date stamp and rank chronologically.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Version,
    StartDate,
}

/// Structured metadata a filename matcher extracts from one filename.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KernelMeta {
    pub start: NaiveDate,
    /// `None` means open-ended coverage.
    pub end: Option<NaiveDate>,
    pub version: u32,
}

/// A single kernel available on a remote server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteKernel {
    pub url: Url,
    pub start: NaiveDate,
    /// `None` means open-ended coverage.
    pub end: Option<NaiveDate>,
    pub version: u32,
}

impl RemoteKernel {
    pub fn new(url: Url, meta: KernelMeta) -> Self {
        Self {
            url,
            start: meta.start,
            end: meta.end,
            version: meta.version,
        }
    }

    /// Final path segment of the URL.
    pub fn file_name(&self) -> &str {
        self.url
            .path_segments()
            .and_then(|mut segments| segments.next_back())
            .unwrap_or("")
    }

    /// Rank two records under the given key; the maximum is the most recent.
    pub fn cmp_by(&self, other: &Self, key: SortKey) -> Ordering {
        match key {
            SortKey::Version => (self.version, self.start).cmp(&(other.version, other.start)),
            SortKey::StartDate => (self.start, self.version).cmp(&(other.start, other.version)),
        }
    }
}

impl fmt::Display for RemoteKernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let end = self
            .end
            .map(|d| d.to_string())
            .unwrap_or_else(|| "open".into());
        write!(
            f,
            "{} [{} .. {}] v{}",
            self.file_name(),
            self.start,
            end,
            self.version
        )
    }
}

/// One row of the availability listing the registry exposes for display.
#[derive(Debug, Clone, Serialize)]
pub struct AvailableKernel {
    pub body: String,
    pub class: KernelClass,
    pub version: u32,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub url: String,
}
