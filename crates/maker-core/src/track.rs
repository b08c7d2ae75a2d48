//! Track representation

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::config::TrackConfig;
use crate::instrument::Instrument;
use crate::playback::{ParamsIter, PlayEvent, PlayParameters, PlayParams};
use crate::segment::{Segment, SegmentId, SegmentPatch};
use crate::segments::Segments;

/// One instrument lane of segments.
///
/// Editing operations take the track by value and return the updated track.
/// The segment store is shared between clones and copied on the first write
/// while another clone still holds it, so a clone kept for undo history
/// keeps its contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Track {
    segments: Arc<Segments>,
    /// Selected segment id (may point at a removed segment)
    selected: SegmentId,
    /// Instrument for newly appended segments
    instrument: Instrument,
    #[serde(default)]
    config: TrackConfig,
}

impl Track {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: TrackConfig) -> Self {
        Self {
            instrument: config.instrument.clone(),
            config,
            ..Default::default()
        }
    }

    pub fn from_segments(segments: Segments) -> Self {
        Self {
            segments: Arc::new(segments),
            ..Default::default()
        }
    }

    pub fn from_parts(segments: Segments, selected: SegmentId, instrument: Instrument) -> Self {
        Self {
            segments: Arc::new(segments),
            selected,
            instrument,
            config: TrackConfig::default(),
        }
    }

    pub fn segments(&self) -> &Segments {
        &self.segments
    }

    pub fn selected(&self) -> SegmentId {
        self.selected
    }

    /// The selected segment, or the default segment if the selection dangles
    pub fn selected_segment(&self) -> Segment {
        self.segments.get(self.selected)
    }

    pub fn instrument(&self) -> &Instrument {
        &self.instrument
    }

    pub fn size(&self) -> i64 {
        self.config.size
    }

    pub fn tempo(&self) -> f64 {
        self.config.tempo
    }

    pub fn config(&self) -> &TrackConfig {
        &self.config
    }

    /// Merge `patch` into the segment at `id`. Validity is not checked; see
    /// [`Track::is_segment_valid`].
    pub fn set(mut self, id: SegmentId, patch: SegmentPatch) -> Self {
        let segment = self.segments.get(id).merged(patch);
        Arc::make_mut(&mut self.segments).update(id, segment);
        self
    }

    /// Append a segment with the track instrument and select it
    pub fn append(self) -> Self {
        let instrument = self.instrument.clone();
        self.append_with(instrument)
    }

    pub fn append_with(mut self, instrument: Instrument) -> Self {
        let id = Arc::make_mut(&mut self.segments).append(instrument);
        tracing::debug!("Appended segment {}", id);
        self.selected = id;
        self
    }

    /// Remove the segment at `id`. The selection is left untouched.
    pub fn remove(mut self, id: SegmentId) -> Self {
        if self.segments.contains(id) {
            Arc::make_mut(&mut self.segments).delete(id);
            tracing::debug!("Removed segment {}", id);
        }
        self
    }

    /// Set the track instrument; `None` takes the selected segment's, or the
    /// configured default when the selection dangles
    pub fn set_instrument(mut self, instrument: Option<Instrument>) -> Self {
        self.instrument = instrument.unwrap_or_else(|| {
            if self.segments.contains(self.selected) {
                self.selected_segment().instrument
            } else {
                self.config.instrument.clone()
            }
        });
        self
    }

    /// Select `id`; `None` advances to the next stored id, wrapping around
    pub fn set_selected(mut self, id: Option<SegmentId>) -> Self {
        self.selected = id.unwrap_or_else(|| self.segments.next_id(self.selected));
        self
    }

    /// Whether `segment` could be stored at `id`: inside the track bounds and
    /// not overlapping any other segment.
    pub fn is_segment_valid(&self, id: SegmentId, segment: &Segment) -> bool {
        segment.start >= 0
            && segment.end() <= self.config.size
            && self.segments.does_span_fit(id, segment)
    }

    /// Build the playback schedule, ordered by start then id
    pub fn play_parameters(&self) -> PlayParameters {
        let tempo = self.config.tempo;
        let mut entries = self.segments.entries();
        entries.sort_by_key(|(id, segment)| (segment.start, *id));

        let end = entries
            .iter()
            .map(|(_, segment)| segment.end())
            .max()
            .map_or(0.0, |end| end as f64 * tempo);

        let mut events = Vec::with_capacity(entries.len());
        let mut params = Vec::with_capacity(entries.len());
        for (_, segment) in entries {
            events.push(PlayEvent {
                time: segment.start as f64 * tempo,
                keys: segment.keys.into_iter().collect(),
            });
            params.push(PlayParams {
                duration: segment.duration as f64 * tempo,
                instrument: segment.instrument,
            });
        }

        tracing::trace!("Scheduled {} events, end {}", events.len(), end);

        PlayParameters {
            events,
            end,
            params: ParamsIter::new(params),
        }
    }
}
