//! Remote kernel discovery: mission archive scraping, filename parsing,
//! per-(body, class) providers, and the registry that materializes what
//! they find through the local cache.

mod generic;
mod listing;
pub mod patterns;
mod provider;
mod record;
mod registry;
mod sources;

pub use generic::{DEFAULT_PLANETARY_EPHEMERIS, furnish_planetary_ephemeris};
pub use listing::list_links;
pub use provider::{DirectoryProvider, KernelProvider, StaticProvider};
pub use record::{
    AvailableKernel, KernelClass, KernelMeta, ParseKernelClassError, RemoteKernel, SortKey,
};
pub use registry::KernelRegistry;

pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("body '{body}' is not registered; known bodies: {known:?}")]
    UnknownBody { body: String, known: Vec<String> },
    #[error(
        "kernel class '{class}' is not registered for body '{body}'; available classes: {known:?}"
    )]
    UnknownClass {
        body: String,
        class: KernelClass,
        known: Vec<KernelClass>,
    },
    #[error(
        "no kernels available for body '{body}', class '{class}'{}",
        .version.map(|v| format!(", version {v}")).unwrap_or_default()
    )]
    NoKernelsAvailable {
        body: String,
        class: KernelClass,
        version: Option<u32>,
    },
    #[error("'{name}' is not a valid ephemeris name")]
    InvalidEphemerisName { name: String },
    #[error(transparent)]
    Store(#[from] helio_store::StoreError),
    #[error(transparent)]
    Kernel(#[from] helio_kernel::KernelError),
}
