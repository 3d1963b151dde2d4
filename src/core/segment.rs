use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

/// Contiguous run of timeline segments with its real-time extent.
///
/// A single segment has `first_number == last_number`. Bounds are inclusive
/// milliseconds: `end` is the last millisecond of the last segment. The pivot
/// `millisecond` records the timestamp the segment was looked up with.
///
/// Segments are plain values; stepping to a neighbour goes through
/// [`crate::core::SegmentedTimeline::next_segment`] and friends, which return
/// a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Segment {
    first_number: i64,
    last_number: i64,
    start: i64,
    end: i64,
    millisecond: i64,
}

impl Segment {
    pub(crate) fn new(
        first_number: i64,
        last_number: i64,
        start: i64,
        end: i64,
        millisecond: i64,
    ) -> Self {
        Self {
            first_number,
            last_number,
            start,
            end,
            millisecond,
        }
    }

    /// Number of the first segment relative to the timeline start.
    #[must_use]
    pub fn number(self) -> i64 {
        self.first_number
    }

    #[must_use]
    pub fn last_number(self) -> i64 {
        self.last_number
    }

    #[must_use]
    pub fn segment_count(self) -> i64 {
        self.last_number - self.first_number + 1
    }

    #[must_use]
    pub fn is_range(self) -> bool {
        self.last_number != self.first_number
    }

    #[must_use]
    pub fn start(self) -> i64 {
        self.start
    }

    #[must_use]
    pub fn end(self) -> i64 {
        self.end
    }

    #[must_use]
    pub fn millisecond(self) -> i64 {
        self.millisecond
    }

    #[must_use]
    pub fn contains_millis(self, millis: i64) -> bool {
        self.start <= millis && millis <= self.end
    }

    #[must_use]
    pub fn contains_span(self, from: i64, to: i64) -> bool {
        self.start <= from && to <= self.end
    }

    #[must_use]
    pub fn contains(self, other: Segment) -> bool {
        self.contains_span(other.start, other.end)
    }

    /// True when this segment lies entirely inside `[from, to]`.
    #[must_use]
    pub fn is_contained_in(self, from: i64, to: i64) -> bool {
        from <= self.start && self.end <= to
    }

    #[must_use]
    pub fn intersects(self, from: i64, to: i64) -> bool {
        self.start <= to && from <= self.end
    }

    #[must_use]
    pub fn before(self, other: Segment) -> bool {
        self.end < other.start
    }

    #[must_use]
    pub fn after(self, other: Segment) -> bool {
        self.start > other.end
    }

    /// Orders segments in time, treating containment either way as a match.
    ///
    /// This lets one sorted list be searched with point and range queries.
    /// Partial overlaps fall back to start order and are caught by callers
    /// that need strict disjointness.
    #[must_use]
    pub fn compare(self, other: Segment) -> Ordering {
        if self.contains(other) || other.contains(self) {
            Ordering::Equal
        } else if self.before(other) {
            Ordering::Less
        } else if self.after(other) {
            Ordering::Greater
        } else {
            self.start.cmp(&other.start)
        }
    }
}
