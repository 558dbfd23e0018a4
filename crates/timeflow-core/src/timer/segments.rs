//! Ordered segment list.
//!
//! A segment is a named sub-interval with a duration in minutes. The
//! sequence owns its segments exclusively; every mutation goes through the
//! CRUD operations here, which keep the `minutes >= 0` invariant.

use serde::{Deserialize, Serialize};

/// Name given to segments created without one, and to edits that blank a name.
pub const DEFAULT_SEGMENT_NAME: &str = "New segment";
/// Duration in minutes for segments created by `insert`.
pub const DEFAULT_SEGMENT_MINUTES: f64 = 5.0;

/// A named sub-interval on the timer timeline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    pub name: String,
    /// Duration in minutes, always >= 0.
    pub minutes: f64,
}

impl Segment {
    /// Create a segment, substituting the default name for blank input and
    /// clamping the duration to >= 0.
    pub fn new(name: impl Into<String>, minutes: f64) -> Self {
        let name = name.into();
        let name = name.trim();
        Self {
            name: if name.is_empty() {
                DEFAULT_SEGMENT_NAME.to_string()
            } else {
                name.to_string()
            },
            minutes: sanitize_minutes(minutes),
        }
    }

    /// Segment duration in seconds.
    pub fn duration_secs(&self) -> f64 {
        self.minutes.max(0.0) * 60.0
    }
}

impl Default for Segment {
    fn default() -> Self {
        Self::new(DEFAULT_SEGMENT_NAME, DEFAULT_SEGMENT_MINUTES)
    }
}

fn sanitize_minutes(minutes: f64) -> f64 {
    if minutes.is_finite() {
        minutes.max(0.0)
    } else {
        0.0
    }
}

/// Ordered, mutable collection of segments.
///
/// Insertion order defines segment order on the timeline. The derived total
/// duration is recomputed on every read, never cached.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentSequence {
    segments: Vec<Segment>,
}

impl SegmentSequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a sequence from existing segments, sanitizing each element.
    pub fn from_segments(segments: Vec<Segment>) -> Self {
        let mut seq = Self::new();
        seq.replace(segments);
        seq
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn get(&self, index: usize) -> Option<&Segment> {
        self.segments.get(index)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Replace the whole sequence. Each element is re-sanitized so the
    /// `minutes >= 0` invariant holds regardless of the caller's input.
    pub fn replace(&mut self, segments: Vec<Segment>) {
        self.segments = segments
            .into_iter()
            .map(|s| Segment::new(s.name, s.minutes))
            .collect();
    }

    /// Insert a default segment at `index` (clamped into range).
    /// Returns the index the segment actually landed at.
    pub fn insert(&mut self, index: usize) -> usize {
        let index = index.min(self.segments.len());
        self.segments.insert(index, Segment::default());
        index
    }

    /// Remove the segment at `index`. Returns false if out of bounds.
    pub fn remove(&mut self, index: usize) -> bool {
        if index >= self.segments.len() {
            return false;
        }
        self.segments.remove(index);
        true
    }

    /// Rename the segment at `index`. The value is trimmed; an empty result
    /// is replaced with the default placeholder.
    pub fn update_name(&mut self, index: usize, value: &str) -> bool {
        let Some(seg) = self.segments.get_mut(index) else {
            return false;
        };
        let trimmed = value.trim();
        seg.name = if trimmed.is_empty() {
            DEFAULT_SEGMENT_NAME.to_string()
        } else {
            trimmed.to_string()
        };
        true
    }

    /// Update the duration of the segment at `index` from raw edit text.
    ///
    /// Non-numeric (or non-finite) input is rejected without mutating state.
    /// Accepted values are clamped to >= 0.
    pub fn update_minutes(&mut self, index: usize, value: &str) -> bool {
        let Some(seg) = self.segments.get_mut(index) else {
            return false;
        };
        let Ok(minutes) = value.trim().parse::<f64>() else {
            return false;
        };
        if !minutes.is_finite() {
            return false;
        }
        seg.minutes = minutes.max(0.0);
        true
    }

    /// Move the segment at `from` so it ends up at index `to`.
    /// Both indices must be in bounds.
    pub fn move_segment(&mut self, from: usize, to: usize) -> bool {
        let len = self.segments.len();
        if from >= len || to >= len {
            return false;
        }
        if from == to {
            return true;
        }
        let seg = self.segments.remove(from);
        self.segments.insert(to, seg);
        true
    }

    /// Per-segment durations in seconds, in timeline order.
    /// This is the navigator's input.
    pub fn durations_secs(&self) -> Vec<f64> {
        self.segments.iter().map(Segment::duration_secs).collect()
    }

    /// Total duration in seconds: `60 * sum(minutes)`.
    pub fn total_seconds(&self) -> f64 {
        self.segments
            .iter()
            .map(|s| s.minutes.max(0.0))
            .sum::<f64>()
            .max(0.0)
            * 60.0
    }
}
