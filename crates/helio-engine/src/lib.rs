//! Engine-facing types: the [`SpiceEngine`] trait, body identity, and an
//! in-memory mock backend for tests and offline use.

mod body;
mod engine;
mod mock;

pub use body::Body;
pub use engine::{EtWindow, SpiceEngine, StateVector};
pub use mock::MockEngine;

use std::path::PathBuf;

pub type EngineResult<T> = Result<T, EngineError>;

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("body name '{0}' is not known to the engine")]
    UnknownBodyName(String),
    #[error("body code {0} is not known to the engine")]
    UnknownBodyCode(i32),
    #[error("kernel {path:?} failed to furnish: {reason}")]
    Format { path: PathBuf, reason: String },
    #[error("no ephemeris segments for body {body} in {path:?}")]
    NoCoverage { body: i32, path: PathBuf },
    #[error("kernel {0:?} is not furnished")]
    NotFurnished(PathBuf),
}
