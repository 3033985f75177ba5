use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use helio_engine::{Body, SpiceEngine, StateVector};

use crate::{KernelResult, io_error};

/// Owner of the engine and the set of kernels furnished into it.
///
/// Furnishing is idempotent per path; there is no hidden global state, and
/// [`KernelSession::reset`] unloads everything for tests.
pub struct KernelSession<E: SpiceEngine> {
    engine: E,
    furnished: BTreeSet<PathBuf>,
}

impl<E: SpiceEngine> KernelSession<E> {
    pub fn new(engine: E) -> Self {
        Self {
            engine,
            furnished: BTreeSet::new(),
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }

    pub fn is_furnished(&self, path: &Path) -> bool {
        match normalize(path) {
            Ok(p) => self.furnished.contains(&p),
            Err(_) => false,
        }
    }

    /// Paths currently furnished, in sorted order.
    pub fn furnished(&self) -> impl Iterator<Item = &Path> {
        self.furnished.iter().map(PathBuf::as_path)
    }

    /// Furnish `path` unless this session already did. Returns whether the
    /// engine was actually called.
    pub fn ensure_furnished(&mut self, path: &Path) -> KernelResult<bool> {
        let path = normalize(path)?;
        if self.furnished.contains(&path) {
            return Ok(false);
        }
        self.engine.furnish(&path)?;
        tracing::debug!(path = %path.display(), "furnished kernel");
        self.furnished.insert(path);
        Ok(true)
    }

    /// Unload every furnished kernel and empty the set.
    pub fn reset(&mut self) -> KernelResult<()> {
        for path in std::mem::take(&mut self.furnished) {
            self.engine.unload(&path)?;
        }
        Ok(())
    }

    /// Position and velocity of `body` at each ephemeris time, J2000 axes,
    /// no aberration correction, relative to the solar system barycenter.
    pub fn state_of(&self, body: &Body, times_et: &[f64]) -> KernelResult<Vec<StateVector>> {
        Ok(self.engine.state(
            body.name(),
            times_et,
            "J2000",
            "NONE",
            "SOLAR SYSTEM BARYCENTER",
        )?)
    }
}

fn normalize(path: &Path) -> KernelResult<PathBuf> {
    std::path::absolute(path).map_err(|e| io_error(path, e))
}
