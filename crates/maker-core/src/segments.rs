//! Segment store backing a track

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::instrument::Instrument;
use crate::segment::{Segment, SegmentId};

/// All segments of one track, keyed by id.
///
/// Iteration is in ascending id order. Ids handed out by [`Segments::append`]
/// start at 1 and are never reused, even after the highest id is deleted,
/// unless an id of `u64::MAX` is stored and the counter has nowhere to go.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segments {
    segments: BTreeMap<SegmentId, Segment>,
    #[serde(default)]
    next_id: u64,
}

impl Segments {
    pub fn new() -> Self {
        Self {
            segments: BTreeMap::new(),
            next_id: 1,
        }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn contains(&self, id: SegmentId) -> bool {
        self.segments.contains_key(&id)
    }

    /// Segment stored at `id`, or the empty default segment
    pub fn get(&self, id: SegmentId) -> Segment {
        self.segments.get(&id).cloned().unwrap_or_default()
    }

    /// Insert or replace the segment at `id`
    pub fn update(&mut self, id: SegmentId, segment: Segment) {
        self.next_id = self.next_id.max(id.0.saturating_add(1));
        self.segments.insert(id, segment);
    }

    /// Add an empty segment at the end of the occupied span and return its id.
    ///
    /// The new segment has zero length, so it fits next to any existing
    /// material without overlapping it.
    pub fn append(&mut self, instrument: Instrument) -> SegmentId {
        let id = self.mint_id();
        let segment = Segment::new(self.end(), 0, instrument);
        self.segments.insert(id, segment);
        id
    }

    pub fn delete(&mut self, id: SegmentId) -> Option<Segment> {
        self.segments.remove(&id)
    }

    /// Id following `current` in ascending order, wrapping to the lowest.
    ///
    /// `current` need not be stored. Returns `SegmentId(0)` when empty.
    pub fn next_id(&self, current: SegmentId) -> SegmentId {
        let after = self
            .segments
            .range((std::ops::Bound::Excluded(current), std::ops::Bound::Unbounded))
            .next();

        after
            .or_else(|| self.segments.iter().next())
            .map(|(id, _)| *id)
            .unwrap_or_default()
    }

    /// Snapshot of all entries in ascending id order
    pub fn entries(&self) -> Vec<(SegmentId, Segment)> {
        self.segments
            .iter()
            .map(|(id, segment)| (*id, segment.clone()))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, &Segment)> {
        self.segments.iter().map(|(id, segment)| (*id, segment))
    }

    /// Whether `candidate` avoids every stored segment except the one at `id`
    pub fn does_span_fit(&self, id: SegmentId, candidate: &Segment) -> bool {
        self.iter()
            .filter(|(other_id, _)| *other_id != id)
            .all(|(_, other)| !candidate.overlaps(other))
    }

    /// Furthest end position of any stored segment (0 when empty)
    pub fn end(&self) -> i64 {
        self.segments
            .values()
            .map(Segment::end)
            .max()
            .unwrap_or(0)
            .max(0)
    }

    fn mint_id(&mut self) -> SegmentId {
        let after_last = self
            .segments
            .keys()
            .next_back()
            .map_or(0, |id| id.0.saturating_add(1));
        let mut id = self.next_id.max(after_last).max(1);
        if self.segments.contains_key(&SegmentId(id)) {
            // Counter ran out at u64::MAX, reuse the lowest free id
            id = (1..=u64::MAX)
                .find(|n| !self.segments.contains_key(&SegmentId(*n)))
                .unwrap_or(0);
        }
        self.next_id = self.next_id.max(id.saturating_add(1));
        SegmentId(id)
    }
}

impl Default for Segments {
    fn default() -> Self {
        Self::new()
    }
}

impl FromIterator<(SegmentId, Segment)> for Segments {
    fn from_iter<I: IntoIterator<Item = (SegmentId, Segment)>>(iter: I) -> Self {
        let mut segments = Segments::new();
        for (id, segment) in iter {
            segments.update(id, segment);
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::Key;

    fn seg(start: i64, duration: i64) -> Segment {
        Segment::new(start, duration, Instrument::default())
    }

    fn store(entries: &[(u64, i64, i64)]) -> Segments {
        entries
            .iter()
            .map(|&(id, start, duration)| (SegmentId(id), seg(start, duration)))
            .collect()
    }

    #[test]
    fn test_get_missing_is_default() {
        let segments = Segments::new();
        assert_eq!(segments.get(SegmentId(7)), Segment::default());
    }

    #[test]
    fn test_update_upserts() {
        let mut segments = Segments::new();
        segments.update(SegmentId(3), seg(0, 4));
        segments.update(SegmentId(3), seg(2, 4).with_keys([Key::new(60)]));
        assert_eq!(segments.len(), 1);
        assert_eq!(segments.get(SegmentId(3)).start, 2);
        assert!(segments.get(SegmentId(3)).keys.contains(&Key::new(60)));
    }

    #[test]
    fn test_append_assigns_fresh_ids() {
        let mut segments = Segments::new();
        let a = segments.append(Instrument::default());
        let b = segments.append(Instrument::new("flute"));
        assert_eq!(a, SegmentId(1));
        assert_eq!(b, SegmentId(2));
        assert_eq!(segments.get(b).instrument.name(), "flute");

        // Deleting the highest id does not let it be reused
        segments.delete(b);
        assert_eq!(segments.append(Instrument::default()), SegmentId(3));
    }

    #[test]
    fn test_append_after_update_skips_used_ids() {
        let mut segments = store(&[(5, 0, 4)]);
        assert_eq!(segments.append(Instrument::default()), SegmentId(6));
    }

    #[test]
    fn test_append_when_ids_exhausted() {
        let mut segments = store(&[(2, 0, 4), (u64::MAX, 4, 2)]);
        let id = segments.append(Instrument::new("flute"));
        assert_eq!(id, SegmentId(1));
        let id = segments.append(Instrument::new("flute"));
        assert_eq!(id, SegmentId(3));

        // Nothing already stored was overwritten
        assert_eq!(segments.len(), 4);
        assert_eq!(segments.get(SegmentId(u64::MAX)).duration, 2);
        assert_eq!(segments.get(SegmentId(u64::MAX)).instrument.name(), "piano");
    }

    #[test]
    fn test_append_places_at_occupied_end() {
        let mut segments = store(&[(1, 0, 4), (2, 10, 6)]);
        let id = segments.append(Instrument::default());
        let appended = segments.get(id);
        assert_eq!(appended.start, 16);
        assert_eq!(appended.duration, 0);
        assert!(segments.does_span_fit(id, &appended));
    }

    #[test]
    fn test_delete_missing_is_noop() {
        let mut segments = store(&[(1, 0, 4)]);
        assert!(segments.delete(SegmentId(9)).is_none());
        assert_eq!(segments.len(), 1);
        assert!(segments.delete(SegmentId(1)).is_some());
        assert!(segments.is_empty());
    }

    #[test]
    fn test_next_id_cycles() {
        let segments = store(&[(0, 0, 1), (2, 1, 1), (5, 2, 1)]);
        assert_eq!(segments.next_id(SegmentId(0)), SegmentId(2));
        assert_eq!(segments.next_id(SegmentId(2)), SegmentId(5));
        assert_eq!(segments.next_id(SegmentId(5)), SegmentId(0));
        // Ids that are not stored still advance to the next stored one
        assert_eq!(segments.next_id(SegmentId(3)), SegmentId(5));
        assert_eq!(segments.next_id(SegmentId(99)), SegmentId(0));
    }

    #[test]
    fn test_next_id_empty() {
        assert_eq!(Segments::new().next_id(SegmentId(4)), SegmentId(0));
    }

    #[test]
    fn test_entries_in_id_order() {
        let segments = store(&[(4, 0, 1), (1, 8, 1), (2, 3, 1)]);
        let ids: Vec<u64> = segments.entries().iter().map(|(id, _)| id.0).collect();
        assert_eq!(ids, vec![1, 2, 4]);
        assert_eq!(segments.entries(), segments.entries());
    }

    #[test]
    fn test_span_fit_excludes_self() {
        let segments = store(&[(1, 0, 8), (2, 8, 4)]);

        // Resizing a segment in place does not collide with itself
        assert!(segments.does_span_fit(SegmentId(1), &seg(0, 6)));
        // Growing into the neighbour does
        assert!(!segments.does_span_fit(SegmentId(1), &seg(0, 10)));
        // A new id is checked against everything
        assert!(!segments.does_span_fit(SegmentId(3), &seg(2, 2)));
        assert!(segments.does_span_fit(SegmentId(3), &seg(12, 2)));
    }

    #[test]
    fn test_span_fit_symmetry() {
        let a = seg(0, 6);
        let b = seg(4, 6);
        let segments = store(&[(1, 0, 6), (2, 4, 6)]);

        assert!(!segments.does_span_fit(SegmentId(1), &b));
        assert!(!segments.does_span_fit(SegmentId(2), &a));
        let only_a = store(&[(1, 0, 6)]);
        let only_b = store(&[(2, 4, 6)]);
        assert!(only_a.does_span_fit(SegmentId(1), &a));
        assert!(only_b.does_span_fit(SegmentId(2), &b));
        assert!(!only_a.does_span_fit(SegmentId(2), &b));
        assert!(!only_b.does_span_fit(SegmentId(1), &a));
    }

    #[test]
    fn test_end() {
        assert_eq!(Segments::new().end(), 0);
        assert_eq!(store(&[(1, 0, 4), (2, 10, 2)]).end(), 12);
    }

    #[test]
    fn test_deserialize_without_counter() {
        let json = r#"{"segments":{"3":{"start":0,"duration":4,"keys":[60],"instrument":"piano"}}}"#;
        let mut segments: Segments = serde_json::from_str(json).unwrap();
        assert_eq!(segments.get(SegmentId(3)).keys.len(), 1);
        assert_eq!(segments.append(Instrument::default()), SegmentId(4));
    }
}
