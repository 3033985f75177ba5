use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::{EngineError, EngineResult, EtWindow, SpiceEngine, StateVector};

/// Deterministic in-memory engine backend.
///
/// Ships with a small name/code table covering the bodies the built-in
/// kernel sources serve. SPK contents are configured per path; unknown SPK
/// paths report a single placeholder body so freshly downloaded files can be
/// loaded without registering every filename up front.
pub struct MockEngine {
    names: BTreeMap<String, i32>,
    codes: BTreeMap<i32, String>,
    spk_bodies: BTreeMap<PathBuf, Vec<i32>>,
    unreadable: Vec<PathBuf>,
    furnished: Vec<PathBuf>,
    furnish_calls: usize,
}

const BUILTIN_BODIES: &[(&str, i32)] = &[
    ("SOLAR SYSTEM BARYCENTER", 0),
    ("SUN", 10),
    ("EARTH", 399),
    ("CASSINI", -82),
    ("SOLAR PROBE PLUS", -96),
    ("SOLAR ORBITER", -144),
    ("STEREO AHEAD", -234),
    ("STEREO BEHIND", -235),
];

impl MockEngine {
    pub fn new() -> Self {
        let mut names = BTreeMap::new();
        let mut codes = BTreeMap::new();
        for &(name, code) in BUILTIN_BODIES {
            names.insert(name.to_string(), code);
            codes.insert(code, name.to_string());
        }
        Self {
            names,
            codes,
            spk_bodies: BTreeMap::new(),
            unreadable: Vec::new(),
            furnished: Vec::new(),
            furnish_calls: 0,
        }
    }

    /// Register an extra name/code pair.
    pub fn with_body(mut self, name: &str, code: i32) -> Self {
        self.names.insert(name.to_uppercase(), code);
        self.codes.insert(code, name.to_uppercase());
        self
    }

    /// Declare which body codes an SPK file contains.
    pub fn with_spk_bodies(mut self, path: impl Into<PathBuf>, codes: Vec<i32>) -> Self {
        self.spk_bodies.insert(path.into(), codes);
        self
    }

    /// Mark a path as structurally invalid; furnishing it fails.
    pub fn with_unreadable(mut self, path: impl Into<PathBuf>) -> Self {
        self.unreadable.push(path.into());
        self
    }

    /// Paths furnished so far, in call order.
    pub fn furnished(&self) -> &[PathBuf] {
        &self.furnished
    }

    /// Total number of furnish calls accepted.
    pub fn furnish_calls(&self) -> usize {
        self.furnish_calls
    }
}

impl Default for MockEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl SpiceEngine for MockEngine {
    fn furnish(&mut self, path: &Path) -> EngineResult<()> {
        if self.unreadable.iter().any(|p| p == path) {
            return Err(EngineError::Format {
                path: path.to_path_buf(),
                reason: "unreadable kernel".into(),
            });
        }
        if !path.exists() {
            return Err(EngineError::Format {
                path: path.to_path_buf(),
                reason: "file does not exist".into(),
            });
        }
        self.furnish_calls += 1;
        if !self.furnished.iter().any(|p| p == path) {
            self.furnished.push(path.to_path_buf());
        }
        Ok(())
    }

    fn unload(&mut self, path: &Path) -> EngineResult<()> {
        let before = self.furnished.len();
        self.furnished.retain(|p| p != path);
        if self.furnished.len() == before {
            return Err(EngineError::NotFurnished(path.to_path_buf()));
        }
        Ok(())
    }

    fn body_code(&self, name: &str) -> EngineResult<i32> {
        let key = name.to_uppercase();
        self.names
            .get(&key)
            .copied()
            .ok_or(EngineError::UnknownBodyName(key))
    }

    fn body_name(&self, code: i32) -> EngineResult<String> {
        self.codes
            .get(&code)
            .cloned()
            .ok_or(EngineError::UnknownBodyCode(code))
    }

    fn spk_bodies(&self, path: &Path) -> EngineResult<Vec<i32>> {
        match self.spk_bodies.get(path) {
            Some(codes) => Ok(codes.clone()),
            // Placeholder so unregistered downloads still validate.
            None => Ok(vec![10]),
        }
    }

    fn spk_coverage(&self, path: &Path, body: i32) -> EngineResult<Vec<EtWindow>> {
        let codes = self.spk_bodies(path)?;
        if !codes.contains(&body) {
            return Err(EngineError::NoCoverage {
                body,
                path: path.to_path_buf(),
            });
        }
        Ok(vec![EtWindow {
            start_et: 0.0,
            end_et: 86_400.0,
        }])
    }

    fn state(
        &self,
        target: &str,
        times_et: &[f64],
        _frame: &str,
        _abcorr: &str,
        _observer: &str,
    ) -> EngineResult<Vec<StateVector>> {
        // Resolving the target validates it; the returned states are fixed.
        self.body_code(target)?;
        Ok(times_et
            .iter()
            .map(|_| StateVector {
                position_km: [0.0; 3],
                velocity_km_s: [0.0; 3],
            })
            .collect())
    }
}
