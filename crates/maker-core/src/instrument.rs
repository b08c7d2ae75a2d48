//! Instrument tags

use std::fmt;

use serde::{Deserialize, Serialize};

pub const DEFAULT_INSTRUMENT: &str = "piano";

/// Sound source for a segment. The tag is opaque here; the playback engine
/// decides what each name sounds like.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Instrument(String);

impl Instrument {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for Instrument {
    fn default() -> Self {
        Self::new(DEFAULT_INSTRUMENT)
    }
}

impl fmt::Display for Instrument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Instrument {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for Instrument {
    fn from(name: String) -> Self {
        Self(name)
    }
}
