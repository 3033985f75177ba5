use std::fmt;

use crate::{EngineResult, SpiceEngine};

/// An individual solar-system body or spacecraft.
///
/// Carries both halves of the engine's name/code pair; whichever half the
/// caller supplies, the other is derived at construction and cached.
/// Equality is by code.
#[derive(Debug, Clone)]
pub struct Body {
    id: i32,
    name: String,
}

impl Body {
    /// Resolve a body from its canonical name.
    pub fn from_name(name: &str, engine: &dyn SpiceEngine) -> EngineResult<Self> {
        let id = engine.body_code(name)?;
        let name = engine.body_name(id)?;
        Ok(Self { id, name })
    }

    /// Resolve a body from its integer code.
    pub fn from_id(id: i32, engine: &dyn SpiceEngine) -> EngineResult<Self> {
        let name = engine.body_name(id)?;
        Ok(Self { id, name })
    }

    pub fn id(&self) -> i32 {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl PartialEq for Body {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Body {}

impl fmt::Display for Body {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.id)
    }
}
