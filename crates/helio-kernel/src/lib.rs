//! Local kernel representation and the session it is furnished into.
//!
//! A [`Kernel`] is a file on disk tagged with a [`KernelKind`]; loading one
//! hands it to the engine owned by a [`KernelSession`]. Meta-kernels
//! ([`MetaKernel`]) additionally parse their embedded reference list, get
//! their directory placeholder rewritten, and resolve and furnish every
//! referenced kernel in listed order.

mod kernel;
mod kind;
mod meta;
mod session;

pub use kernel::Kernel;
pub use kind::KernelKind;
pub use meta::MetaKernel;
pub use session::KernelSession;

use std::{io, path::PathBuf};

pub type KernelResult<T> = Result<T, KernelError>;

#[derive(Debug, thiserror::Error)]
pub enum KernelError {
    #[error(transparent)]
    Engine(#[from] helio_engine::EngineError),
    #[error(transparent)]
    Store(#[from] helio_store::StoreError),
    #[error("I/O error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed meta-kernel {path:?}: {reason}")]
    MetaFormat { path: PathBuf, reason: String },
    #[error("meta-kernel {meta:?} references '{reference}', which is not present locally")]
    MissingReference { meta: PathBuf, reference: String },
    #[error("SPK kernel {path:?} contains no ephemeris segments")]
    EmptySpk { path: PathBuf },
}

pub(crate) fn io_error(path: impl Into<PathBuf>, err: io::Error) -> KernelError {
    KernelError::Io {
        path: path.into(),
        source: err,
    }
}
