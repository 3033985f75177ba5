use std::collections::{BTreeMap, BTreeSet};
use std::path::PathBuf;

use helio_engine::SpiceEngine;
use helio_kernel::{Kernel, KernelKind, KernelSession, MetaKernel};
use helio_store::{CacheStore, Downloader, HttpClient};

use crate::provider::KernelProvider;
use crate::record::{AvailableKernel, KernelClass, RemoteKernel};
use crate::sources;
use crate::{RegistryError, RegistryResult};

/// Directory of kernel providers keyed by (body, class), plus the cache
/// store and HTTP client everything is materialized through.
///
/// The provider table is built explicitly at construction and never mutated
/// afterwards except through [`KernelRegistry::register`].
pub struct KernelRegistry {
    providers: BTreeMap<(String, KernelClass), Box<dyn KernelProvider>>,
    store: CacheStore,
    client: HttpClient,
}

impl KernelRegistry {
    /// An empty registry; callers register providers themselves.
    pub fn new(store: CacheStore, client: HttpClient) -> Self {
        Self {
            providers: BTreeMap::new(),
            store,
            client,
        }
    }

    /// A registry populated with the built-in mission sources.
    pub fn with_default_sources(store: CacheStore, client: HttpClient) -> Self {
        let mut registry = Self::new(store, client);
        for provider in sources::default_providers() {
            registry.register(provider);
        }
        registry
    }

    /// Install a provider for its (body, class) pair, replacing any
    /// previous one.
    pub fn register(&mut self, provider: Box<dyn KernelProvider>) {
        let key = (provider.body().to_string(), provider.class());
        self.providers.insert(key, provider);
    }

    pub fn store(&self) -> &CacheStore {
        &self.store
    }

    pub fn client(&self) -> &HttpClient {
        &self.client
    }

    /// Bodies with at least one registered provider, sorted.
    pub fn bodies(&self) -> Vec<String> {
        let set: BTreeSet<&str> = self
            .providers
            .keys()
            .map(|(body, _)| body.as_str())
            .collect();
        set.into_iter().map(str::to_string).collect()
    }

    /// Kernel classes registered for one body.
    pub fn classes(&self, body: &str) -> Vec<KernelClass> {
        self.providers
            .keys()
            .filter(|(b, _)| b == body)
            .map(|(_, class)| *class)
            .collect()
    }

    fn provider(&self, body: &str, class: KernelClass) -> RegistryResult<&dyn KernelProvider> {
        if !self.providers.keys().any(|(b, _)| b == body) {
            return Err(RegistryError::UnknownBody {
                body: body.to_string(),
                known: self.bodies(),
            });
        }
        self.providers
            .get(&(body.to_string(), class))
            .map(|provider| provider.as_ref())
            .ok_or_else(|| RegistryError::UnknownClass {
                body: body.to_string(),
                class,
                known: self.classes(body),
            })
    }

    /// Merge every class's remote records for one body into display rows.
    pub fn get_available_kernels(&self, body: &str) -> RegistryResult<Vec<AvailableKernel>> {
        if !self.providers.keys().any(|(b, _)| b == body) {
            return Err(RegistryError::UnknownBody {
                body: body.to_string(),
                known: self.bodies(),
            });
        }
        let mut rows = Vec::new();
        for ((registered, class), provider) in &self.providers {
            if registered != body {
                continue;
            }
            for record in provider.remote_kernels(&self.client)? {
                rows.push(AvailableKernel {
                    body: registered.clone(),
                    class: *class,
                    version: record.version,
                    start: record.start,
                    end: record.end,
                    url: record.url.to_string(),
                });
            }
        }
        Ok(rows)
    }

    /// Materialize only the most recent kernel for (body, class).
    pub fn get_latest_kernel<E: SpiceEngine>(
        &self,
        body: &str,
        class: KernelClass,
        session: &mut KernelSession<E>,
    ) -> RegistryResult<Kernel> {
        let provider = self.provider(body, class)?;
        let records = provider.remote_kernels(&self.client)?;
        let latest = records
            .iter()
            .max_by(|a, b| a.cmp_by(b, provider.sort()))
            .ok_or_else(|| RegistryError::NoKernelsAvailable {
                body: body.to_string(),
                class,
                version: None,
            })?;
        let path = self
            .store
            .fetch(&self.client, &latest.url, latest.file_name())?;
        self.load(provider, path, session)
    }

    /// Materialize kernels for (body, class), optionally restricted to an
    /// exact version.
    ///
    /// Predicted and meta kernels collapse to the single most recent
    /// survivor; reconstructed kernels keep every survivor. Survivors are
    /// downloaded in one batch and loaded into the session in order.
    pub fn get_kernels<E: SpiceEngine>(
        &self,
        body: &str,
        class: KernelClass,
        version: Option<u32>,
        session: &mut KernelSession<E>,
    ) -> RegistryResult<Vec<Kernel>> {
        let provider = self.provider(body, class)?;
        let mut records = provider.remote_kernels(&self.client)?;
        if let Some(wanted) = version {
            records.retain(|record| record.version == wanted);
        }
        if records.is_empty() {
            return Err(RegistryError::NoKernelsAvailable {
                body: body.to_string(),
                class,
                version,
            });
        }
        if matches!(class, KernelClass::Predict | KernelClass::Meta) {
            records.sort_by(|a, b| a.cmp_by(b, provider.sort()));
            if let Some(latest) = records.pop() {
                records = vec![latest];
            }
        }

        let mut downloader = Downloader::new();
        for record in &records {
            downloader.enqueue(record.url.clone(), record.file_name());
        }
        let paths = downloader.run(&self.client, &self.store)?;

        let mut kernels = Vec::with_capacity(paths.len());
        for path in paths {
            kernels.push(self.load(provider, path, session)?);
        }
        Ok(kernels)
    }

    /// All remote records for (body, class), unmaterialized.
    pub fn get_remote_kernels(
        &self,
        body: &str,
        class: KernelClass,
    ) -> RegistryResult<Vec<RemoteKernel>> {
        let provider = self.provider(body, class)?;
        provider.remote_kernels(&self.client)
    }

    fn load<E: SpiceEngine>(
        &self,
        provider: &dyn KernelProvider,
        path: PathBuf,
        session: &mut KernelSession<E>,
    ) -> RegistryResult<Kernel> {
        if KernelKind::from_path(&path) == KernelKind::Meta {
            let meta = MetaKernel::open(&path)?;
            meta.rewrite_path_values()?;
            if let Some(root) = provider.kernel_root() {
                meta.resolve(root, &self.client)?;
            }
        }
        Ok(Kernel::load(path, session)?)
    }
}
