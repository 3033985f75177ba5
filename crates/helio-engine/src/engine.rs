use std::path::Path;

use crate::EngineResult;

/// Cartesian state relative to an observer, J2000 axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StateVector {
    pub position_km: [f64; 3],
    pub velocity_km_s: [f64; 3],
}

/// Coverage window in ephemeris seconds past J2000.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EtWindow {
    pub start_et: f64,
    pub end_et: f64,
}

/// Backend that owns the furnished-kernel set and answers ephemeris queries.
///
/// A real implementation wraps the SPICE toolkit; [`crate::MockEngine`]
/// answers from in-memory tables.
pub trait SpiceEngine {
    /// Register a kernel file so its data becomes queryable.
    fn furnish(&mut self, path: &Path) -> EngineResult<()>;

    /// Remove a previously furnished kernel.
    fn unload(&mut self, path: &Path) -> EngineResult<()>;

    /// Integer code for a body name.
    fn body_code(&self, name: &str) -> EngineResult<i32>;

    /// Canonical name for a body code.
    fn body_name(&self, code: i32) -> EngineResult<String>;

    /// Body codes with ephemeris segments in an SPK file.
    fn spk_bodies(&self, path: &Path) -> EngineResult<Vec<i32>>;

    /// Coverage windows for one body in an SPK file.
    fn spk_coverage(&self, path: &Path, body: i32) -> EngineResult<Vec<EtWindow>>;

    /// Position and velocity of `target` relative to `observer` at each
    /// ephemeris time, in the given frame with the given aberration
    /// correction.
    fn state(
        &self,
        target: &str,
        times_et: &[f64],
        frame: &str,
        abcorr: &str,
        observer: &str,
    ) -> EngineResult<Vec<StateVector>>;
}
