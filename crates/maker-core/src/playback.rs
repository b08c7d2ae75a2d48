//! Playback schedule derived from a track

use crate::instrument::Instrument;
use crate::key::Key;

/// Keys to strike at a point in playback time
#[derive(Debug, Clone, PartialEq)]
pub struct PlayEvent {
    pub time: f64,
    pub keys: Vec<Key>,
}

/// How long and with which instrument an event sounds
#[derive(Debug, Clone, PartialEq)]
pub struct PlayParams {
    pub duration: f64,
    pub instrument: Instrument,
}

/// One-shot iterator over [`PlayParams`], aligned by position with
/// [`PlayParameters::events`].
///
/// Not `Clone`: once consumed, ask the track for a new schedule.
#[derive(Debug)]
pub struct ParamsIter {
    inner: std::vec::IntoIter<PlayParams>,
}

impl ParamsIter {
    pub(crate) fn new(params: Vec<PlayParams>) -> Self {
        Self { inner: params.into_iter() }
    }
}

impl Iterator for ParamsIter {
    type Item = PlayParams;

    fn next(&mut self) -> Option<PlayParams> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for ParamsIter {}

/// Everything the playback engine needs for one track
#[derive(Debug)]
pub struct PlayParameters {
    /// Events sorted by time, ties broken by segment id
    pub events: Vec<PlayEvent>,
    /// Total playable length in playback time (0.0 for an empty track)
    pub end: f64,
    pub params: ParamsIter,
}

impl PlayParameters {
    /// Pair each event with its parameters, consuming the schedule
    pub fn into_notes(self) -> impl Iterator<Item = (PlayEvent, PlayParams)> {
        self.events.into_iter().zip(self.params)
    }
}
