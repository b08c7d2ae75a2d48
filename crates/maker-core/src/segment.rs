//! Note segments placed on a track

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::instrument::Instrument;
use crate::key::Key;

/// Unique identifier for segments within one store
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SegmentId(pub u64);

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A set of keys struck together for a span of grid steps
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Segment {
    /// Start position in grid steps (valid segments have start >= 0)
    pub start: i64,
    /// Length in grid steps
    pub duration: i64,
    /// Keys held for the whole segment
    #[serde(default)]
    pub keys: BTreeSet<Key>,
    #[serde(default)]
    pub instrument: Instrument,
}

impl Segment {
    pub fn new(start: i64, duration: i64, instrument: Instrument) -> Self {
        Self {
            start,
            duration,
            keys: BTreeSet::new(),
            instrument,
        }
    }

    pub fn with_keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.keys = keys.into_iter().collect();
        self
    }

    /// End position in grid steps (start + duration, saturating)
    pub fn end(&self) -> i64 {
        self.start.saturating_add(self.duration)
    }

    /// Half-open interval test: `[start, end)` against `other`'s.
    ///
    /// There is no special case for zero length, so an empty segment never
    /// overlaps another empty one, but does overlap a segment it sits
    /// strictly inside.
    pub fn overlaps(&self, other: &Segment) -> bool {
        self.start < other.end() && other.start < self.end()
    }

    /// Copy of this segment with every field set in `patch` replaced
    pub fn merged(&self, patch: SegmentPatch) -> Segment {
        Segment {
            start: patch.start.unwrap_or(self.start),
            duration: patch.duration.unwrap_or(self.duration),
            keys: patch.keys.unwrap_or_else(|| self.keys.clone()),
            instrument: patch.instrument.unwrap_or_else(|| self.instrument.clone()),
        }
    }
}

/// Partial segment update; `None` fields keep the stored value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SegmentPatch {
    pub start: Option<i64>,
    pub duration: Option<i64>,
    pub keys: Option<BTreeSet<Key>>,
    pub instrument: Option<Instrument>,
}

impl SegmentPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(mut self, start: i64) -> Self {
        self.start = Some(start);
        self
    }

    pub fn duration(mut self, duration: i64) -> Self {
        self.duration = Some(duration);
        self
    }

    pub fn keys(mut self, keys: impl IntoIterator<Item = Key>) -> Self {
        self.keys = Some(keys.into_iter().collect());
        self
    }

    pub fn instrument(mut self, instrument: impl Into<Instrument>) -> Self {
        self.instrument = Some(instrument.into());
        self
    }
}
