use url::Url;

use helio_store::HttpClient;

use crate::listing::list_links;
use crate::patterns::Matcher;
use crate::record::{KernelClass, RemoteKernel, SortKey};
use crate::RegistryResult;

/// One discoverable source of kernels for a (body, class) pair.
pub trait KernelProvider: Send + Sync {
    fn body(&self) -> &str;

    fn class(&self) -> KernelClass;

    /// Key used to rank records; the maximum is the most recent.
    fn sort(&self) -> SortKey;

    /// Remote root against which a meta-kernel's own references resolve.
    fn kernel_root(&self) -> Option<&Url> {
        None
    }

    /// Discover what exists remotely. Built fresh on every call: the
    /// remote listing is the source of truth for what versions exist, the
    /// cache store for what is already downloaded.
    fn remote_kernels(&self, client: &HttpClient) -> RegistryResult<Vec<RemoteKernel>>;
}

/// Generic provider over one archive directory listing: scrape anchors,
/// apply a per-mission filename matcher to each href's final segment, and
/// resolve matches against the listing URL.
pub struct DirectoryProvider {
    body: &'static str,
    class: KernelClass,
    sort: SortKey,
    listing_url: Url,
    matcher: Matcher,
    href_filter: Option<fn(&str) -> bool>,
    backfill_end_dates: bool,
    kernel_root: Option<Url>,
}

impl DirectoryProvider {
    pub fn new(
        body: &'static str,
        class: KernelClass,
        sort: SortKey,
        listing_url: &str,
        matcher: Matcher,
    ) -> Self {
        Self {
            body,
            class,
            sort,
            listing_url: Url::parse(listing_url).expect("listing url"),
            matcher,
            href_filter: None,
            backfill_end_dates: false,
            kernel_root: None,
        }
    }

    /// Keep only hrefs passing the predicate before matching (e.g. to skip
    /// an `archive/` subtree that repeats the same filename pattern).
    pub fn with_href_filter(mut self, filter: fn(&str) -> bool) -> Self {
        self.href_filter = Some(filter);
        self
    }

    /// Back-fill each record's end date from the next record's start after
    /// sorting chronologically; the last record stays open-ended.
    pub fn with_backfilled_end_dates(mut self) -> Self {
        self.backfill_end_dates = true;
        self
    }

    pub fn with_kernel_root(mut self, root: &str) -> Self {
        self.kernel_root = Some(Url::parse(root).expect("kernel root url"));
        self
    }
}

impl KernelProvider for DirectoryProvider {
    fn body(&self) -> &str {
        self.body
    }

    fn class(&self) -> KernelClass {
        self.class
    }

    fn sort(&self) -> SortKey {
        self.sort
    }

    fn kernel_root(&self) -> Option<&Url> {
        self.kernel_root.as_ref()
    }

    fn remote_kernels(&self, client: &HttpClient) -> RegistryResult<Vec<RemoteKernel>> {
        let hrefs = list_links(client, &self.listing_url)?;
        let mut records = Vec::new();
        for href in hrefs {
            if let Some(filter) = self.href_filter {
                if !filter(&href) {
                    continue;
                }
            }
            let name = href.rsplit('/').next().unwrap_or(&href);
            let Some(meta) = (self.matcher)(name) else {
                continue;
            };
            match self.listing_url.join(&href) {
                Ok(url) => records.push(RemoteKernel::new(url, meta)),
                Err(err) => {
                    tracing::debug!(%href, %err, "skipping unresolvable href");
                }
            }
        }
        tracing::debug!(
            body = self.body,
            class = %self.class,
            count = records.len(),
            "scraped remote kernels"
        );
        if self.backfill_end_dates {
            backfill_end_dates(&mut records);
        }
        Ok(records)
    }
}

fn backfill_end_dates(records: &mut [RemoteKernel]) {
    records.sort_by(|a, b| a.start.cmp(&b.start));
    for i in 1..records.len() {
        let next_start = records[i].start;
        records[i - 1].end = Some(next_start);
    }
}

/// Provider for sources that publish one fixed, known set of files and need
/// no scraping.
pub struct StaticProvider {
    body: &'static str,
    class: KernelClass,
    sort: SortKey,
    records: Vec<RemoteKernel>,
}

impl StaticProvider {
    pub fn new(
        body: &'static str,
        class: KernelClass,
        sort: SortKey,
        records: Vec<RemoteKernel>,
    ) -> Self {
        Self {
            body,
            class,
            sort,
            records,
        }
    }
}

impl KernelProvider for StaticProvider {
    fn body(&self) -> &str {
        self.body
    }

    fn class(&self) -> KernelClass {
        self.class
    }

    fn sort(&self) -> SortKey {
        self.sort
    }

    fn remote_kernels(&self, _client: &HttpClient) -> RegistryResult<Vec<RemoteKernel>> {
        Ok(self.records.clone())
    }
}
