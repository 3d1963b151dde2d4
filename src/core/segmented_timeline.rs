use serde::{Deserialize, Serialize};
use tracing::{trace, warn};

use crate::core::segment::Segment;
use crate::core::tick_unit::{MILLIS_PER_DAY, MILLIS_PER_MINUTE};
use crate::error::{AxisError, AxisResult};

/// Monday 1900-01-01T00:00:00Z in epoch milliseconds.
pub const FIRST_MONDAY_AFTER_1900: i64 = -2_208_988_800_000;
pub const DAY_SEGMENT_SIZE: i64 = MILLIS_PER_DAY;
pub const FIFTEEN_MINUTE_SEGMENT_SIZE: i64 = 15 * MILLIS_PER_MINUTE;

/// Real time compressed by a repeating include/exclude pattern.
///
/// Time is cut into segments of `segment_size` ms counted from `start_time`.
/// Each group of `included + excluded` segments keeps its first `included`
/// segments and drops the rest. One-off exceptions remove further included
/// segments; they are kept sorted and disjoint. An optional coarser base
/// timeline can be projected onto this one through
/// [`SegmentedTimeline::add_base_timeline_exception`] and
/// [`SegmentedTimeline::add_base_timeline_exclusions`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "SegmentedTimelineRecord")]
pub struct SegmentedTimeline {
    segment_size: i64,
    included: i64,
    excluded: i64,
    start_time: i64,
    exceptions: Vec<Segment>,
    base_timeline: Option<Box<SegmentedTimeline>>,
}

// Deserialized shape, rebuilt through the validating constructors.
#[derive(Deserialize)]
struct SegmentedTimelineRecord {
    segment_size: i64,
    included: i64,
    excluded: i64,
    start_time: i64,
    #[serde(default)]
    exceptions: Vec<Segment>,
    #[serde(default)]
    base_timeline: Option<Box<SegmentedTimeline>>,
}

impl TryFrom<SegmentedTimelineRecord> for SegmentedTimeline {
    type Error = AxisError;

    fn try_from(record: SegmentedTimelineRecord) -> AxisResult<Self> {
        let count = |value: i64, name: &str| {
            u32::try_from(value).map_err(|_| {
                AxisError::InvalidTimeline(format!("{name} segment count {value} is out of range"))
            })
        };
        let mut timeline = Self::new(
            record.segment_size,
            count(record.included, "included")?,
            count(record.excluded, "excluded")?,
        )?
        .with_start_time(record.start_time)?;
        if let Some(base) = record.base_timeline {
            timeline = timeline.with_base_timeline(*base)?;
        }

        for segment in &record.exceptions {
            let grid = timeline.segment_range(segment.start(), segment.end());
            let on_grid = grid.number() == segment.number()
                && grid.last_number() == segment.last_number()
                && grid.start() == segment.start()
                && grid.end() == segment.end();
            if !on_grid {
                return Err(AxisError::InvalidTimeline(format!(
                    "exception [{}, {}] does not match the segment grid",
                    segment.start(),
                    segment.end()
                )));
            }
            timeline.add_exception_segment(*segment);
        }
        if timeline.exceptions.len() != record.exceptions.len() {
            return Err(AxisError::InvalidTimeline(
                "exceptions must be included and disjoint".to_owned(),
            ));
        }
        Ok(timeline)
    }
}

impl SegmentedTimeline {
    pub fn new(segment_size: i64, included: u32, excluded: u32) -> AxisResult<Self> {
        if segment_size <= 0 {
            return Err(AxisError::InvalidTimeline(
                "segment size must be > 0".to_owned(),
            ));
        }
        if included == 0 {
            return Err(AxisError::InvalidTimeline(
                "a timeline needs at least one included segment per group".to_owned(),
            ));
        }
        let group_count = i64::from(included) + i64::from(excluded);
        if segment_size.checked_mul(group_count).is_none() {
            return Err(AxisError::InvalidTimeline(
                "segment group size overflows i64 milliseconds".to_owned(),
            ));
        }

        Ok(Self {
            segment_size,
            included: i64::from(included),
            excluded: i64::from(excluded),
            start_time: 0,
            exceptions: Vec::new(),
            base_timeline: None,
        })
    }

    /// Daily segments, five included and two excluded, starting on a Monday.
    #[must_use]
    pub fn monday_through_friday() -> Self {
        Self {
            segment_size: DAY_SEGMENT_SIZE,
            included: 5,
            excluded: 2,
            start_time: FIRST_MONDAY_AFTER_1900,
            exceptions: Vec::new(),
            base_timeline: None,
        }
    }

    /// Fifteen-minute segments covering 09:00-16:00 each day, with
    /// [`SegmentedTimeline::monday_through_friday`] as base timeline.
    ///
    /// Weekends are still included by the fine pattern until they are
    /// projected with [`SegmentedTimeline::add_base_timeline_exclusions`].
    #[must_use]
    pub fn fifteen_minute() -> Self {
        Self {
            segment_size: FIFTEEN_MINUTE_SEGMENT_SIZE,
            included: 28,
            excluded: 68,
            start_time: FIRST_MONDAY_AFTER_1900 + 36 * FIFTEEN_MINUTE_SEGMENT_SIZE,
            exceptions: Vec::new(),
            base_timeline: Some(Box::new(Self::monday_through_friday())),
        }
    }

    /// Moves the segment grid origin. Existing exceptions are dropped since
    /// their segment numbers no longer line up.
    pub fn with_start_time(mut self, start_time: i64) -> AxisResult<Self> {
        if let Some(base) = &self.base_timeline {
            validate_base_alignment(base, self.segment_size, start_time)?;
        }
        self.start_time = start_time;
        self.exceptions.clear();
        Ok(self)
    }

    /// Attaches a coarser timeline whose segment grid aligns with this one.
    pub fn with_base_timeline(mut self, base: SegmentedTimeline) -> AxisResult<Self> {
        validate_base_alignment(&base, self.segment_size, self.start_time)?;
        self.base_timeline = Some(Box::new(base));
        Ok(self)
    }

    #[must_use]
    pub fn segment_size(&self) -> i64 {
        self.segment_size
    }

    #[must_use]
    pub fn start_time(&self) -> i64 {
        self.start_time
    }

    #[must_use]
    pub fn segments_included(&self) -> i64 {
        self.included
    }

    #[must_use]
    pub fn segments_excluded(&self) -> i64 {
        self.excluded
    }

    #[must_use]
    pub fn group_segment_count(&self) -> i64 {
        self.included + self.excluded
    }

    #[must_use]
    pub fn segments_included_size(&self) -> i64 {
        self.included * self.segment_size
    }

    #[must_use]
    pub fn segments_excluded_size(&self) -> i64 {
        self.excluded * self.segment_size
    }

    #[must_use]
    pub fn segments_group_size(&self) -> i64 {
        self.group_segment_count() * self.segment_size
    }

    #[must_use]
    pub fn base_timeline(&self) -> Option<&SegmentedTimeline> {
        self.base_timeline.as_deref()
    }

    #[must_use]
    pub fn exceptions(&self) -> &[Segment] {
        &self.exceptions
    }

    /// Sum of segment counts over all exceptions.
    #[must_use]
    pub fn exception_segment_total(&self) -> i64 {
        self.exceptions.iter().map(|segment| segment.segment_count()).sum()
    }

    /// Segment index of `millis`, floored for timestamps before the start.
    #[must_use]
    pub fn segment_number(&self, millis: i64) -> i64 {
        (millis - self.start_time).div_euclid(self.segment_size)
    }

    #[must_use]
    pub fn segment_start(&self, number: i64) -> i64 {
        self.start_time + number * self.segment_size
    }

    #[must_use]
    pub fn segment(&self, millis: i64) -> Segment {
        let number = self.segment_number(millis);
        let start = self.segment_start(number);
        Segment::new(number, number, start, start + self.segment_size - 1, millis)
    }

    /// Run of segments covering `[from, to]` (bounds in either order).
    #[must_use]
    pub fn segment_range(&self, from: i64, to: i64) -> Segment {
        let (from, to) = (from.min(to), from.max(to));
        let first = self.segment_number(from);
        let last = self.segment_number(to);
        Segment::new(
            first,
            last,
            self.segment_start(first),
            self.segment_start(last) + self.segment_size - 1,
            from,
        )
    }

    /// Segment following `segment`, keeping the pivot offset.
    #[must_use]
    pub fn next_segment(&self, segment: Segment) -> Segment {
        self.segment(segment.millisecond() + self.segment_size * segment.segment_count())
    }

    #[must_use]
    pub fn previous_segment(&self, segment: Segment) -> Segment {
        self.segment(segment.millisecond() - self.segment_size)
    }

    fn pattern_includes(&self, number: i64) -> bool {
        number.rem_euclid(self.group_segment_count()) < self.included
    }

    /// True when every segment of the run is part of the included pattern
    /// and none of them is an exception.
    #[must_use]
    pub fn is_in_include_segments(&self, segment: Segment) -> bool {
        self.pattern_includes_run(segment.number(), segment.last_number())
            && self.exception_segment_count(segment.start(), segment.end()) == 0
    }

    /// True when the first segment of the run is dropped by the pattern.
    #[must_use]
    pub fn is_in_exclude_segments(&self, segment: Segment) -> bool {
        !self.pattern_includes(segment.number())
    }

    #[must_use]
    pub fn is_in_exception_segments(&self, segment: Segment) -> bool {
        self.binary_search_exception_segments(segment).is_ok()
    }

    fn pattern_includes_run(&self, first: i64, last: i64) -> bool {
        let position = first.rem_euclid(self.group_segment_count());
        position < self.included && position + (last - first) < self.included
    }

    /// Locates `segment` in the sorted exception list.
    ///
    /// A stored exception matches when it contains the query or the query
    /// contains it. `Err` carries the insertion point that keeps the list
    /// ordered, as with [`slice::binary_search_by`].
    pub fn binary_search_exception_segments(&self, segment: Segment) -> Result<usize, usize> {
        if self.exceptions.is_empty() {
            return Err(0);
        }
        self.exceptions
            .binary_search_by(|candidate| candidate.compare(segment))
    }

    fn exception_index_at(&self, millis: i64) -> Option<usize> {
        if self.exceptions.is_empty() {
            return None;
        }
        let index = self
            .exceptions
            .partition_point(|exception| exception.end() < millis);
        self.exceptions
            .get(index)
            .filter(|exception| exception.contains_millis(millis))
            .map(|_| index)
    }

    /// Number of exception segments intersecting `[from, to]`.
    ///
    /// Range exceptions contribute only the segments that fall inside the
    /// span. Returns 0 when `to < from`.
    #[must_use]
    pub fn exception_segment_count(&self, from: i64, to: i64) -> i64 {
        if to < from || self.exceptions.is_empty() {
            return 0;
        }
        let first_segment = self.segment_number(from);
        let last_segment = self.segment_number(to);
        let first_candidate = self
            .exceptions
            .partition_point(|exception| exception.end() < from);

        self.exceptions[first_candidate..]
            .iter()
            .take_while(|exception| exception.start() <= to)
            .map(|exception| {
                let low = exception.number().max(first_segment);
                let high = exception.last_number().min(last_segment);
                (high - low + 1).max(0)
            })
            .sum()
    }

    /// Excepts the included segment containing `millis`.
    pub fn add_exception(&mut self, millis: i64) {
        let segment = self.segment(millis);
        self.add_exception_segment(segment);
    }

    /// Excepts every segment touched by `[from, to]` as one range exception.
    pub fn add_exception_range(&mut self, from: i64, to: i64) {
        let segment = self.segment_range(from, to);
        self.add_exception_segment(segment);
    }

    pub fn add_exceptions<I>(&mut self, millis: I)
    where
        I: IntoIterator<Item = i64>,
    {
        for value in millis {
            self.add_exception(value);
        }
    }

    /// Inserts an exception in temporal order.
    ///
    /// Segments that are excluded, already excepted, or overlapping a stored
    /// exception are ignored.
    pub fn add_exception_segment(&mut self, segment: Segment) {
        if !self.is_in_include_segments(segment) {
            trace!(
                start = segment.start(),
                end = segment.end(),
                "rejecting exception outside included segments"
            );
            return;
        }
        match self.binary_search_exception_segments(segment) {
            Ok(_) => {}
            Err(index) => self.exceptions.insert(index, segment),
        }
    }

    /// Projects the base-timeline segment containing `millis` onto this grid.
    ///
    /// Every run of included fine segments inside the base segment becomes
    /// one exception. A base segment that is itself excluded is ignored.
    pub fn add_base_timeline_exception(&mut self, millis: i64) -> AxisResult<()> {
        let base_segment = {
            let base = self.require_base_timeline()?;
            let segment = base.segment(millis);
            if !base.is_in_include_segments(segment) {
                return Ok(());
            }
            segment
        };
        self.except_included_runs(base_segment.start(), base_segment.end());
        Ok(())
    }

    /// Projects every excluded base run intersecting `[from, to]` onto this
    /// grid as exceptions, e.g. weekends of a daily base onto intraday
    /// segments.
    pub fn add_base_timeline_exclusions(&mut self, from: i64, to: i64) -> AxisResult<()> {
        let runs = {
            let base = self.require_base_timeline()?;
            let group = base.group_segment_count();
            let last_number = base.segment_number(to);
            let mut number = base.segment_number(from);
            while number <= last_number && base.pattern_includes(number) {
                number += 1;
            }

            let mut runs = Vec::new();
            while number <= last_number {
                let run_first = number.div_euclid(group) * group + base.included;
                let run_start = base.segment_start(run_first).max(base.segment_start(number));
                let run_end = base.segment_start(run_first + base.excluded) - 1;
                runs.push((run_start, run_end.min(base.segment_start(last_number + 1) - 1)));
                number = run_first + group;
            }
            runs
        };

        for (run_start, run_end) in runs {
            self.except_included_runs(run_start, run_end);
        }
        Ok(())
    }

    fn require_base_timeline(&self) -> AxisResult<&SegmentedTimeline> {
        self.base_timeline.as_deref().ok_or_else(|| {
            AxisError::InvalidTimeline("no base timeline is configured".to_owned())
        })
    }

    fn except_included_runs(&mut self, from: i64, to: i64) {
        let last = self.segment_number(to);
        let mut number = self.segment_number(from);
        while number <= last {
            if !self.segment_included(number) {
                number += 1;
                continue;
            }
            let run_first = number;
            while number <= last && self.segment_included(number) {
                number += 1;
            }
            let run = Segment::new(
                run_first,
                number - 1,
                self.segment_start(run_first),
                self.segment_start(number) - 1,
                self.segment_start(run_first),
            );
            self.add_exception_segment(run);
        }
    }

    fn segment_included(&self, number: i64) -> bool {
        self.pattern_includes(number) && self.exception_index_at(self.segment_start(number)).is_none()
    }

    #[must_use]
    pub fn contains_millis(&self, millis: i64) -> bool {
        self.segment_included(self.segment_number(millis))
    }

    /// True when every millisecond of `[from, to]` is included.
    #[must_use]
    pub fn contains_millis_range(&self, from: i64, to: i64) -> bool {
        let (from, to) = (from.min(to), from.max(to));
        let first = self.segment_number(from);
        let last = self.segment_number(to);
        self.pattern_includes_run(first, last)
            && self.exception_segment_count(self.segment_start(first), to) == 0
    }

    /// Maps a timestamp to compressed "timeline" milliseconds.
    ///
    /// Excluded time maps to the start of the next included segment.
    pub fn to_timeline_value(&self, millis: i64) -> i64 {
        let group_size = self.segments_group_size();
        let included_size = self.segments_included_size();
        let mut millis = millis;
        let hop_cap = 2 * self.exceptions.len() + 2;
        let mut settled = false;

        for _ in 0..=hop_cap {
            let raw = millis - self.start_time;
            let group_offset = raw.rem_euclid(group_size);
            if group_offset >= included_size {
                millis = self.start_time + (raw.div_euclid(group_size) + 1) * group_size;
                continue;
            }
            if let Some(index) = self.exception_index_at(millis) {
                millis = self.exceptions[index].end() + 1;
                continue;
            }
            settled = true;
            break;
        }
        if !settled {
            warn!(millis, "timeline forward skip hit its hop cap");
        }

        let raw = millis - self.start_time;
        let compressed = included_size * raw.div_euclid(group_size) + raw.rem_euclid(group_size);
        compressed - self.segment_size * self.signed_exceptions_before(millis)
    }

    /// Inverse of [`SegmentedTimeline::to_timeline_value`] for included time.
    pub fn to_millisecond(&self, timeline_value: i64) -> i64 {
        let included_size = self.segments_included_size();
        let mut millis = self.start_time
            + timeline_value.div_euclid(included_size) * self.segments_group_size()
            + timeline_value.rem_euclid(included_size);
        if self.exceptions.is_empty() {
            return millis;
        }

        let iteration_cap = self.exception_segment_total() + 2;
        let mut skipped = 0;
        let mut stable = false;
        for _ in 0..iteration_cap {
            if millis >= self.start_time {
                let segment_start = self.segment_start(self.segment_number(millis));
                let pending = self.exception_segment_count(self.start_time, segment_start - 1);
                if pending > skipped {
                    millis = self.shift_included_segments(millis, pending - skipped);
                    skipped = pending;
                    continue;
                }
                if let Some(index) = self.exception_index_at(millis) {
                    let remaining =
                        self.exceptions[index].last_number() - self.segment_number(millis) + 1;
                    millis = self.shift_included_segments(millis, remaining);
                    skipped += remaining;
                    continue;
                }
            } else {
                let segment_start = self.segment_start(self.segment_number(millis));
                let pending = self.exception_segment_count(segment_start, self.start_time - 1);
                if pending > skipped {
                    millis = self.shift_included_segments(millis, skipped - pending);
                    skipped = pending;
                    continue;
                }
            }
            stable = true;
            break;
        }

        if !stable {
            warn!(
                timeline_value,
                exceptions = self.exceptions.len(),
                "timeline inverse did not stabilise; returning last estimate"
            );
        }
        millis
    }

    /// Exception segments between the start time and `millis`, negative when
    /// `millis` lies before the start time.
    fn signed_exceptions_before(&self, millis: i64) -> i64 {
        if millis >= self.start_time {
            self.exception_segment_count(self.start_time, millis - 1)
        } else {
            -self.exception_segment_count(millis, self.start_time - 1)
        }
    }

    /// Moves `millis` by `delta` pattern-included segments, keeping its
    /// offset inside the segment. `millis` must lie in an included segment.
    fn shift_included_segments(&self, millis: i64, delta: i64) -> i64 {
        let group = self.group_segment_count();
        let number = self.segment_number(millis);
        let offset = millis - self.segment_start(number);
        let ordinal =
            number.div_euclid(group) * self.included + number.rem_euclid(group) + delta;
        let shifted = ordinal.div_euclid(self.included) * group + ordinal.rem_euclid(self.included);
        self.segment_start(shifted) + offset
    }
}

fn validate_base_alignment(
    base: &SegmentedTimeline,
    segment_size: i64,
    start_time: i64,
) -> AxisResult<()> {
    if base.segment_size % segment_size != 0 {
        return Err(AxisError::InvalidTimeline(format!(
            "base segment size {} is not a multiple of {segment_size}",
            base.segment_size
        )));
    }
    if base.start_time > start_time {
        return Err(AxisError::InvalidTimeline(
            "base timeline must start at or before this timeline".to_owned(),
        ));
    }
    if (start_time - base.start_time) % segment_size != 0 {
        return Err(AxisError::InvalidTimeline(
            "base timeline segment grid is not aligned with this timeline".to_owned(),
        ));
    }
    Ok(())
}
