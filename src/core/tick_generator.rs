use std::f64::consts::FRAC_PI_2;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{trace, warn};

use crate::core::label_format::TickLabelFormat;
use crate::core::range::Range;
use crate::core::tick_unit::{TickUnit, TickUnitKind, TickUnitSource};
use crate::core::timeline::{AxisTimeline, Timeline};
use crate::core::transform::{
    CyclicTransform, LogTransform, ModuloTransform, TransformKind, ValueTransform,
};
use crate::core::types::{DeviceInterval, RectangleEdge, TextAnchor};

/// Upper bound on grow steps in the tick unit search.
pub const MAX_SELECTION_STEPS: usize = 128;

const COINCIDENT_TICK_PX: f64 = 0.5;
const MIN_LOG_LABEL_DIGITS: i32 = 3;
const MAX_LOG_LABEL_DIGITS: i32 = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickKind {
    Major,
    Minor,
}

/// A positioned tick; minor ticks carry an empty label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tick {
    pub value: f64,
    pub kind: TickKind,
    pub label: String,
    /// Device coordinate along the axis.
    pub position: f64,
    pub text_anchor: TextAnchor,
    pub rotation_anchor: TextAnchor,
    /// Label rotation in radians.
    pub angle: f64,
}

impl Tick {
    #[must_use]
    pub fn is_major(&self) -> bool {
        self.kind == TickKind::Major
    }
}

/// Per-pass tick options taken from the axis configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickLayout {
    pub vertical_labels: bool,
    /// Overrides the unit's minor count when `> 0`.
    pub minor_tick_count: u32,
    pub minor_ticks_visible: bool,
    pub max_tick_count: usize,
}

impl Default for TickLayout {
    fn default() -> Self {
        Self {
            vertical_labels: false,
            minor_tick_count: 0,
            minor_ticks_visible: false,
            max_tick_count: 500,
        }
    }
}

impl TickLayout {
    fn minor_count(&self, unit: &TickUnit) -> u32 {
        if !self.minor_ticks_visible {
            return 0;
        }
        if self.minor_tick_count > 0 {
            self.minor_tick_count
        } else {
            unit.minor_tick_count()
        }
    }
}

/// Text anchor, rotation anchor and angle for labels on `edge`.
#[must_use]
pub fn label_anchors(edge: RectangleEdge, vertical: bool) -> (TextAnchor, TextAnchor, f64) {
    match (edge, vertical) {
        (RectangleEdge::Bottom, false) => (TextAnchor::TopCenter, TextAnchor::TopCenter, 0.0),
        (RectangleEdge::Top, false) => (TextAnchor::BottomCenter, TextAnchor::BottomCenter, 0.0),
        (RectangleEdge::Bottom, true) => {
            (TextAnchor::CenterRight, TextAnchor::CenterRight, -FRAC_PI_2)
        }
        (RectangleEdge::Top, true) => (TextAnchor::CenterRight, TextAnchor::CenterRight, FRAC_PI_2),
        (RectangleEdge::Left, false) => (TextAnchor::CenterRight, TextAnchor::CenterRight, 0.0),
        (RectangleEdge::Right, false) => (TextAnchor::CenterLeft, TextAnchor::CenterLeft, 0.0),
        (RectangleEdge::Left, true) => {
            (TextAnchor::BottomCenter, TextAnchor::BottomCenter, -FRAC_PI_2)
        }
        (RectangleEdge::Right, true) => {
            (TextAnchor::BottomCenter, TextAnchor::BottomCenter, FRAC_PI_2)
        }
    }
}

/// Smallest unit from `source` whose step spans at least the label extent.
///
/// The walk starts at the smallest unit at least one device pixel wide and
/// grows through the source, so the result depends only on the source, the
/// transform, `area` and `label_extent`. `label_extent` returns the pixel
/// extent, along the axis, of the widest label a unit produces, padding
/// included. The walk stops early once a unit spans the whole axis or the
/// source stops growing. A degenerate span returns the unit covering
/// `fallback`.
pub fn select_tick_unit<F>(
    source: &dyn TickUnitSource,
    transform: &ValueTransform,
    area: DeviceInterval,
    fallback: &TickUnit,
    label_extent: F,
) -> TickUnit
where
    F: Fn(&TickUnit) -> f64,
{
    let span = transform.unit_space_length();
    let device = area.length();
    if !(span.is_finite() && span > 0.0 && device > 0.0) {
        trace!(
            span_length = span,
            size = fallback.size(),
            "degenerate axis span; using fallback unit"
        );
        return source.ceiling_unit(fallback.size());
    }

    let mut unit = source.ceiling_unit(span / device);
    for step in 0..MAX_SELECTION_STEPS {
        let unit_px = unit.size() / span * device;
        let extent = label_extent(&unit);
        trace!(step, size = unit.size(), unit_px, extent, "tick unit candidate");
        if unit_px >= extent {
            return unit;
        }
        if unit_px >= device {
            trace!(size = unit.size(), extent, "labels wider than the axis");
            return unit;
        }
        let larger = source.larger_unit(&unit);
        if larger.size() <= unit.size() {
            trace!(size = unit.size(), "tick unit source exhausted");
            return unit;
        }
        unit = larger;
    }

    warn!(
        size = unit.size(),
        steps = MAX_SELECTION_STEPS,
        "tick unit search hit its step cap"
    );
    unit
}

/// Ticks for the visible range of `transform` using `unit` spacing.
///
/// Returns an empty list when the major tick count would exceed
/// `layout.max_tick_count`.
#[must_use]
pub fn generate_ticks(
    transform: &ValueTransform,
    area: DeviceInterval,
    unit: &TickUnit,
    layout: &TickLayout,
) -> Vec<Tick> {
    if !(unit.size().is_finite() && unit.size() > 0.0) {
        warn!(size = unit.size(), "tick unit size is not positive");
        return Vec::new();
    }
    let builder = TickBuilder::new(transform, area, layout);
    match transform.kind() {
        TransformKind::Linear | TransformKind::Symbol(_) => {
            builder.spaced(transform.range(), unit, layout)
        }
        TransformKind::Log(log) => builder.log(*log, unit, layout),
        TransformKind::Date(date) => builder.date(date.timeline(), unit, layout),
        TransformKind::Modulo(modulo) => builder.modulo(*modulo, unit, layout),
        TransformKind::Cyclic(cyclic) => builder.cyclic(*cyclic, unit, layout),
    }
}

struct TickBuilder<'a> {
    transform: &'a ValueTransform,
    area: DeviceInterval,
    text_anchor: TextAnchor,
    rotation_anchor: TextAnchor,
    angle: f64,
}

impl<'a> TickBuilder<'a> {
    fn new(transform: &'a ValueTransform, area: DeviceInterval, layout: &TickLayout) -> Self {
        let (text_anchor, rotation_anchor, angle) =
            label_anchors(area.edge(), layout.vertical_labels);
        Self {
            transform,
            area,
            text_anchor,
            rotation_anchor,
            angle,
        }
    }

    fn tick(&self, value: f64, kind: TickKind, label: String) -> Tick {
        self.tick_at(value, self.transform.forward(value, self.area), kind, label)
    }

    fn tick_at(&self, value: f64, position: f64, kind: TickKind, label: String) -> Tick {
        Tick {
            value,
            kind,
            label,
            position,
            text_anchor: self.text_anchor,
            rotation_anchor: self.rotation_anchor,
            angle: self.angle,
        }
    }

    fn spaced(&self, range: Range, unit: &TickUnit, layout: &TickLayout) -> Vec<Tick> {
        let Some(values) = spaced_values(range, unit.size(), layout.minor_count(unit), layout)
        else {
            return Vec::new();
        };
        values
            .into_iter()
            .map(|(value, kind)| {
                let label = match kind {
                    TickKind::Major => unit.label(value),
                    TickKind::Minor => String::new(),
                };
                self.tick(value, kind, label)
            })
            .collect()
    }

    fn log(&self, log: LogTransform, unit: &TickUnit, layout: &TickLayout) -> Vec<Tick> {
        let range = self.transform.range();
        let log_lower = log.calculate_log(range.lower());
        let log_upper = log.calculate_log(range.upper());
        let Ok(log_range) = Range::spanning(log_lower, log_upper) else {
            return Vec::new();
        };
        let Some(exponents) = spaced_values(log_range, unit.size(), 0, layout) else {
            return Vec::new();
        };

        let minor_count = layout.minor_count(unit);
        let mut ticks = Vec::with_capacity(exponents.len() * (minor_count as usize + 1));
        let push_minors = |ticks: &mut Vec<Tick>, from_exponent: f64| {
            if minor_count < 2 {
                return;
            }
            let from = log.calculate_value(from_exponent);
            let to = log.calculate_value(from_exponent + unit.size());
            for k in 1..minor_count {
                let value = from + f64::from(k) * (to - from) / f64::from(minor_count);
                if range.contains(value) {
                    ticks.push(self.tick(value, TickKind::Minor, String::new()));
                }
            }
        };

        if let Some(&(first, _)) = exponents.first() {
            push_minors(&mut ticks, first - unit.size());
        }
        for &(exponent, _) in &exponents {
            let value = log.calculate_value(exponent);
            ticks.push(self.tick(
                value,
                TickKind::Major,
                log_label(value, unit.size(), log.base()),
            ));
            push_minors(&mut ticks, exponent);
        }
        ticks
    }

    fn date(&self, timeline: &AxisTimeline, unit: &TickUnit, layout: &TickLayout) -> Vec<Tick> {
        let TickUnitKind::Date {
            unit_type,
            multiple,
        } = unit.kind()
        else {
            return self.spaced(self.transform.range(), unit, layout);
        };

        let range = self.transform.range();
        let estimated = range.length() / unit.size();
        if estimated > layout.max_tick_count as f64 {
            warn!(
                estimated,
                max = layout.max_tick_count,
                "date tick count exceeds cap; emitting no ticks"
            );
            return Vec::new();
        }

        let lower = range.lower().ceil() as i64;
        let upper = range.upper().floor() as i64;
        let Some(mut tick) = unit_type.previous_standard_date(lower, multiple) else {
            return Vec::new();
        };
        let minor_count = layout.minor_count(unit);
        let mut ticks = Vec::new();
        let mut majors = 0usize;
        // Calendar steps can be shorter than the nominal size; the cap is
        // re-checked as the walk proceeds.
        while tick <= upper {
            let Some(next) = unit_type.add_to(tick, multiple) else {
                break;
            };
            if tick >= lower {
                majors += 1;
                if majors > layout.max_tick_count {
                    warn!(max = layout.max_tick_count, "date tick walk hit the tick cap");
                    return Vec::new();
                }
                let value = tick as f64;
                if timeline.contains_domain_value(value) {
                    ticks.push(self.tick(value, TickKind::Major, unit.label(value)));
                }
            }
            if minor_count > 1 {
                let step = (next - tick) as f64 / f64::from(minor_count);
                for k in 1..minor_count {
                    let value = tick as f64 + f64::from(k) * step;
                    if range.contains(value) && timeline.contains_domain_value(value) {
                        ticks.push(self.tick(value, TickKind::Minor, String::new()));
                    }
                }
            }
            tick = next;
        }
        ticks
    }

    fn modulo(&self, modulo: ModuloTransform, unit: &TickUnit, layout: &TickLayout) -> Vec<Tick> {
        let segments = modulo.display_segments();
        let base = modulo.base();
        let minor_count = layout.minor_count(unit);
        let mut ticks = Vec::new();
        for (index, &(start, end)) in segments.iter().enumerate() {
            let Ok(segment) = Range::new(start, end) else {
                continue;
            };
            let Some(values) = spaced_values(segment, unit.size(), minor_count, layout) else {
                return Vec::new();
            };
            let wraps_after = segments.len() > 1 && index == 0;
            for (value, kind) in values {
                // The base upper bound is the same place as the next segment's start.
                if wraps_after && value >= base.upper() {
                    continue;
                }
                let label = match kind {
                    TickKind::Major => unit.label(value),
                    TickKind::Minor => String::new(),
                };
                ticks.push(self.tick(value, kind, label));
            }
        }
        ticks
    }

    fn cyclic(&self, cyclic: CyclicTransform, unit: &TickUnit, layout: &TickLayout) -> Vec<Tick> {
        let range = self.transform.range();
        let cycle = match Range::new(range.upper() - cyclic.period(), range.upper()) {
            Ok(cycle) => cycle,
            Err(_) => return Vec::new(),
        };
        let Some(values) = spaced_values(cycle, unit.size(), layout.minor_count(unit), layout)
        else {
            return Vec::new();
        };

        let bound = cyclic.cycle_bound(range);
        let at_start = self.transform.clone().with_bound_mapped_to_last_cycle(false);
        let at_end = self.transform.clone().with_bound_mapped_to_last_cycle(true);
        let mut candidates: Vec<Tick> = Vec::with_capacity(values.len() + 1);
        for (value, kind) in values {
            let label = match kind {
                TickKind::Major => unit.label(value),
                TickKind::Minor => String::new(),
            };
            if value == bound {
                let start = at_start.forward(value, self.area);
                let end = at_end.forward(value, self.area);
                candidates.push(self.tick_at(value, start, kind, label.clone()));
                candidates.push(self.tick_at(value, end, kind, label));
            } else {
                candidates.push(self.tick(value, kind, label));
            }
        }

        let mut ticks: Vec<Tick> = Vec::with_capacity(candidates.len());
        for candidate in candidates {
            let coincident = ticks
                .iter()
                .any(|kept| (kept.position - candidate.position).abs() < COINCIDENT_TICK_PX);
            if coincident {
                trace!(value = candidate.value, "dropping coincident cyclic tick");
            } else {
                ticks.push(candidate);
            }
        }
        ticks.sort_by(|a, b| a.position.total_cmp(&b.position));
        ticks
    }
}

/// Major multiples of `size` inside `range` with optional minor subdivisions,
/// in ascending order. `None` when the major count exceeds the cap.
fn spaced_values(
    range: Range,
    size: f64,
    minor_count: u32,
    layout: &TickLayout,
) -> Option<SmallVec<[(f64, TickKind); 32]>> {
    let first = (range.lower() / size).ceil();
    let last = (range.upper() / size).floor();
    let count = last - first + 1.0;
    if !count.is_finite() || count > layout.max_tick_count as f64 {
        warn!(
            lower = range.lower(),
            upper = range.upper(),
            size,
            max = layout.max_tick_count,
            "tick count exceeds cap; emitting no ticks"
        );
        return None;
    }

    let major_at = |index: f64| {
        let value = index * size;
        // Snap floating residue such as 1e-17 back to zero.
        if value.abs() < size * 1e-10 { 0.0 } else { value }
    };

    let mut values = SmallVec::new();
    let majors = count.max(0.0) as i64;
    for i in -1..majors {
        let index = first + i as f64;
        if i >= 0 {
            values.push((major_at(index), TickKind::Major));
        }
        if minor_count > 1 {
            let base = major_at(index);
            for k in 1..minor_count {
                let value = base + f64::from(k) * size / f64::from(minor_count);
                if range.contains(value) {
                    values.push((value, TickKind::Minor));
                }
            }
        }
    }
    Some(values)
}

/// Label for a log-axis major tick `exponent_step` exponents away from its
/// neighbours.
///
/// Uses enough significant digits to tell neighbouring ticks apart (at least
/// three), drops trailing fraction zeros and switches to scientific notation
/// for very large or very small magnitudes.
#[must_use]
pub fn log_label(value: f64, exponent_step: f64, base: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 || !magnitude.is_finite() {
        return TickLabelFormat::decimal(0).format(value);
    }
    let significant = log_label_significant_digits(exponent_step, base);
    let text = if (1e-4..1e7).contains(&magnitude) {
        let power = magnitude.log10().floor() as i32;
        let digits = u8::try_from((significant - 1 - power).max(0)).unwrap_or(u8::MAX);
        TickLabelFormat::decimal(digits).format(value)
    } else {
        let mantissa_digits = u8::try_from(significant - 1).unwrap_or(0);
        TickLabelFormat::Scientific { mantissa_digits }.format(value)
    };
    trim_fraction_zeros(&text)
}

fn log_label_significant_digits(exponent_step: f64, base: f64) -> i32 {
    // Neighbouring ticks differ by a factor of `base^step`.
    let relative_gap = base.powf(exponent_step) - 1.0;
    if !(relative_gap.is_finite() && relative_gap > 0.0) {
        return MIN_LOG_LABEL_DIGITS;
    }
    ((-relative_gap.log10()).ceil() as i32 + 2).clamp(MIN_LOG_LABEL_DIGITS, MAX_LOG_LABEL_DIGITS)
}

fn trim_fraction_zeros(text: &str) -> String {
    let (mantissa, exponent) = match text.split_once('E') {
        Some((mantissa, exponent)) => (mantissa, Some(exponent)),
        None => (text, None),
    };
    let mantissa = if mantissa.contains('.') {
        mantissa.trim_end_matches('0').trim_end_matches('.')
    } else {
        mantissa
    };
    match exponent {
        Some(exponent) => format!("{mantissa}E{exponent}"),
        None => mantissa.to_owned(),
    }
}
