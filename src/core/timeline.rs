use serde::{Deserialize, Serialize};

use crate::core::segmented_timeline::SegmentedTimeline;

/// Indirection between real timestamps and the values a date axis maps.
///
/// All values are epoch milliseconds as `f64`; fractions of a millisecond
/// are carried through unchanged.
pub trait Timeline {
    fn to_timeline_value(&self, millis: f64) -> f64;
    fn to_millisecond(&self, timeline_value: f64) -> f64;
    fn contains_domain_value(&self, millis: f64) -> bool;
    fn contains_domain_range(&self, from: f64, to: f64) -> bool;
}

/// Plain calendar: every millisecond is on the axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CalendarTimeline;

impl Timeline for CalendarTimeline {
    fn to_timeline_value(&self, millis: f64) -> f64 {
        millis
    }

    fn to_millisecond(&self, timeline_value: f64) -> f64 {
        timeline_value
    }

    fn contains_domain_value(&self, _millis: f64) -> bool {
        true
    }

    fn contains_domain_range(&self, _from: f64, _to: f64) -> bool {
        true
    }
}

// ~142,000 years either side of the epoch; keeps i64 segment arithmetic
// clear of overflow and within exact f64 integers.
const DOMAIN_LIMIT_MILLIS: f64 = 4.5e15;
const TIMELINE_SNAP_ULPS: f64 = 8.0;

fn split_millis(value: f64) -> Option<(i64, f64)> {
    if !value.is_finite() || value.abs() > DOMAIN_LIMIT_MILLIS {
        return None;
    }
    let whole = value.floor();
    Some((whole as i64, value - whole))
}

// Like `split_millis`, but values within rounding noise of a whole number
// snap to it so a segment start never falls back onto the previous segment.
fn split_timeline_value(value: f64) -> Option<(i64, f64)> {
    let (whole, fraction) = split_millis(value)?;
    let noise = f64::EPSILON * value.abs().max(1.0) * TIMELINE_SNAP_ULPS;
    if 1.0 - fraction <= noise {
        Some((whole + 1, 0.0))
    } else {
        Some((whole, fraction))
    }
}

impl Timeline for SegmentedTimeline {
    fn to_timeline_value(&self, millis: f64) -> f64 {
        let Some((whole, fraction)) = split_millis(millis) else {
            return millis;
        };
        let value = SegmentedTimeline::to_timeline_value(self, whole) as f64;
        if self.contains_millis(whole) {
            value + fraction
        } else {
            value
        }
    }

    fn to_millisecond(&self, timeline_value: f64) -> f64 {
        let Some((whole, fraction)) = split_timeline_value(timeline_value) else {
            return timeline_value;
        };
        SegmentedTimeline::to_millisecond(self, whole) as f64 + fraction
    }

    fn contains_domain_value(&self, millis: f64) -> bool {
        match split_millis(millis) {
            Some((whole, _)) => self.contains_millis(whole),
            None => false,
        }
    }

    fn contains_domain_range(&self, from: f64, to: f64) -> bool {
        match (split_millis(from), split_millis(to)) {
            (Some((from, _)), Some((to, _))) => self.contains_millis_range(from, to),
            _ => false,
        }
    }
}

/// Timeline configured on a date axis.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum AxisTimeline {
    #[default]
    Calendar,
    Segmented(SegmentedTimeline),
}

impl AxisTimeline {
    #[must_use]
    pub fn as_segmented(&self) -> Option<&SegmentedTimeline> {
        match self {
            Self::Calendar => None,
            Self::Segmented(timeline) => Some(timeline),
        }
    }

    pub fn as_segmented_mut(&mut self) -> Option<&mut SegmentedTimeline> {
        match self {
            Self::Calendar => None,
            Self::Segmented(timeline) => Some(timeline),
        }
    }
}

impl Timeline for AxisTimeline {
    fn to_timeline_value(&self, millis: f64) -> f64 {
        match self {
            Self::Calendar => CalendarTimeline.to_timeline_value(millis),
            Self::Segmented(timeline) => Timeline::to_timeline_value(timeline, millis),
        }
    }

    fn to_millisecond(&self, timeline_value: f64) -> f64 {
        match self {
            Self::Calendar => CalendarTimeline.to_millisecond(timeline_value),
            Self::Segmented(timeline) => Timeline::to_millisecond(timeline, timeline_value),
        }
    }

    fn contains_domain_value(&self, millis: f64) -> bool {
        match self {
            Self::Calendar => true,
            Self::Segmented(timeline) => timeline.contains_domain_value(millis),
        }
    }

    fn contains_domain_range(&self, from: f64, to: f64) -> bool {
        match self {
            Self::Calendar => true,
            Self::Segmented(timeline) => timeline.contains_domain_range(from, to),
        }
    }
}
