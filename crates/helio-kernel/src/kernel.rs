use std::fmt;
use std::path::{Path, PathBuf};

use helio_engine::{Body, EtWindow, SpiceEngine};

use crate::{KernelError, KernelKind, KernelResult, KernelSession, MetaKernel};

/// A kernel file on disk that has been loaded into a session.
#[derive(Debug, Clone)]
pub struct Kernel {
    path: PathBuf,
    kind: KernelKind,
}

impl Kernel {
    /// Load a kernel file into the session.
    ///
    /// SPK kernels validate by listing at least one contained body; a
    /// structurally invalid file fails with the engine's format error and is
    /// not retried. Meta-kernels are rewritten and furnished with their
    /// references, which must all be present locally (remote resolution is
    /// the registry's job). Generic kernels furnish as-is.
    pub fn load<E: SpiceEngine>(
        path: impl Into<PathBuf>,
        session: &mut KernelSession<E>,
    ) -> KernelResult<Self> {
        let path = path.into();
        let kind = KernelKind::from_path(&path);
        match kind {
            KernelKind::Spk => {
                session.ensure_furnished(&path)?;
                let bodies = session.engine().spk_bodies(&path)?;
                if bodies.is_empty() {
                    return Err(KernelError::EmptySpk { path });
                }
            }
            KernelKind::Meta => {
                let meta = MetaKernel::open(&path)?;
                meta.rewrite_path_values()?;
                meta.furnish(session)?;
            }
            KernelKind::Generic => {
                session.ensure_furnished(&path)?;
            }
        }
        Ok(Self { path, kind })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kind(&self) -> KernelKind {
        self.kind
    }

    /// Bodies with ephemeris data in this kernel (SPK only).
    pub fn bodies<E: SpiceEngine>(&self, session: &KernelSession<E>) -> KernelResult<Vec<Body>> {
        let codes = session.engine().spk_bodies(&self.path)?;
        codes
            .into_iter()
            .map(|code| Body::from_id(code, session.engine()).map_err(KernelError::from))
            .collect()
    }

    /// Coverage windows for one body in this kernel (SPK only).
    pub fn coverage<E: SpiceEngine>(
        &self,
        session: &KernelSession<E>,
        body: &Body,
    ) -> KernelResult<Vec<EtWindow>> {
        Ok(session.engine().spk_coverage(&self.path, body.id())?)
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} kernel {}", self.kind, self.path.display())
    }
}
