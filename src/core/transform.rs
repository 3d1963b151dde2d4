use serde::{Deserialize, Serialize};
use smallvec::{SmallVec, smallvec};

use crate::core::range::Range;
use crate::core::timeline::{AxisTimeline, Timeline};
use crate::core::types::DeviceInterval;
use crate::error::{AxisError, AxisResult};

/// Logarithmic mapping parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LogTransform {
    base: f64,
    smallest_value: f64,
    switched: bool,
}

impl LogTransform {
    pub const DEFAULT_SMALLEST_VALUE: f64 = 1e-100;

    pub fn new(base: f64) -> AxisResult<Self> {
        if !base.is_finite() || base <= 1.0 {
            return Err(AxisError::InvalidConfig(
                "log base must be finite and > 1".to_owned(),
            ));
        }
        Ok(Self {
            base,
            smallest_value: Self::DEFAULT_SMALLEST_VALUE,
            switched: false,
        })
    }

    /// Floor substituted for non-positive values in the plain log mode.
    pub fn with_smallest_value(mut self, smallest_value: f64) -> AxisResult<Self> {
        if !smallest_value.is_finite() || smallest_value <= 0.0 {
            return Err(AxisError::InvalidConfig(
                "log smallest value must be finite and > 0".to_owned(),
            ));
        }
        self.smallest_value = smallest_value;
        Ok(self)
    }

    /// Enables the signed mode that stays finite through zero.
    ///
    /// Magnitudes below `base` are squeezed linearly into `[1, base)` before
    /// taking the log, so `0` maps to `0` and negative values mirror positive
    /// ones.
    #[must_use]
    pub fn with_switched(mut self, switched: bool) -> Self {
        self.switched = switched;
        self
    }

    #[must_use]
    pub fn base(self) -> f64 {
        self.base
    }

    #[must_use]
    pub fn smallest_value(self) -> f64 {
        self.smallest_value
    }

    #[must_use]
    pub fn is_switched(self) -> bool {
        self.switched
    }

    fn log(self, value: f64) -> f64 {
        if self.base == 10.0 {
            value.log10()
        } else {
            value.ln() / self.base.ln()
        }
    }

    fn pow(self, exponent: f64) -> f64 {
        self.base.powf(exponent)
    }

    /// Value to log space.
    #[must_use]
    pub fn calculate_log(self, value: f64) -> f64 {
        if self.switched {
            let magnitude = value.abs();
            let squeezed = if magnitude < self.base {
                magnitude * (1.0 - 1.0 / self.base) + 1.0
            } else {
                magnitude
            };
            let result = self.log(squeezed);
            if value < 0.0 { -result } else { result }
        } else {
            self.log(value.max(self.smallest_value))
        }
    }

    /// Log space back to value; exact inverse of [`LogTransform::calculate_log`].
    #[must_use]
    pub fn calculate_value(self, log_value: f64) -> f64 {
        if self.switched {
            let power = self.pow(log_value.abs());
            let magnitude = if power < self.base {
                (power - 1.0) / (1.0 - 1.0 / self.base)
            } else {
                power
            };
            if log_value < 0.0 { -magnitude } else { magnitude }
        } else {
            self.pow(log_value)
        }
    }

    /// Like [`LogTransform::calculate_value`] but clamps to finite values.
    #[must_use]
    pub fn calculate_value_no_inf(self, log_value: f64) -> f64 {
        let value = self.calculate_value(log_value);
        if value.is_infinite() {
            f64::MAX.copysign(value)
        } else if !self.switched && value <= 0.0 {
            f64::MIN_POSITIVE
        } else {
            value
        }
    }
}

impl Default for LogTransform {
    fn default() -> Self {
        Self {
            base: 10.0,
            smallest_value: Self::DEFAULT_SMALLEST_VALUE,
            switched: false,
        }
    }
}

/// Date mapping through a timeline indirection.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DateTransform {
    timeline: AxisTimeline,
}

impl DateTransform {
    #[must_use]
    pub fn new(timeline: AxisTimeline) -> Self {
        Self { timeline }
    }

    #[must_use]
    pub fn timeline(&self) -> &AxisTimeline {
        &self.timeline
    }

    pub fn timeline_mut(&mut self) -> &mut AxisTimeline {
        &mut self.timeline
    }
}

/// Wrap-around mapping over a fixed base range, e.g. compass degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ModuloTransform {
    base: Range,
    display_start: f64,
    display_end: f64,
}

impl ModuloTransform {
    pub fn new(base: Range) -> AxisResult<Self> {
        if base.is_degenerate() {
            return Err(AxisError::InvalidRange {
                lower: base.lower(),
                upper: base.upper(),
            });
        }
        Ok(Self {
            base,
            display_start: base.lower(),
            display_end: base.upper(),
        })
    }

    /// Sets the visible window; both ends are reduced into the base range.
    ///
    /// A window whose start is not below its end wraps across the base
    /// boundary (`start == end` shows one full turn).
    pub fn with_display_range(mut self, start: f64, end: f64) -> AxisResult<Self> {
        if !start.is_finite() || !end.is_finite() {
            return Err(AxisError::InvalidRange {
                lower: start,
                upper: end,
            });
        }
        self.display_start = self.wrap(start);
        self.display_end = self.wrap(end);
        Ok(self)
    }

    #[must_use]
    pub fn base(self) -> Range {
        self.base
    }

    #[must_use]
    pub fn display_start(self) -> f64 {
        self.display_start
    }

    #[must_use]
    pub fn display_end(self) -> f64 {
        self.display_end
    }

    #[must_use]
    pub fn is_wrapping(self) -> bool {
        self.display_start >= self.display_end
    }

    /// Reduces `value` into `[base.lower, base.upper)`.
    #[must_use]
    pub fn wrap(self, value: f64) -> f64 {
        let lower = self.base.lower();
        (value - lower).rem_euclid(self.base.length()) + lower
    }

    /// Unwrapped axis range covered by the display window.
    #[must_use]
    pub fn display_range(self) -> Range {
        let upper = if self.is_wrapping() {
            self.base.upper() + (self.display_end - self.base.lower())
        } else {
            self.display_end
        };
        Range::new(self.display_start, upper).unwrap_or(self.base)
    }

    /// Pieces of the base range shown on screen, in device order.
    #[must_use]
    pub fn display_segments(self) -> SmallVec<[(f64, f64); 2]> {
        if self.is_wrapping() {
            smallvec![
                (self.display_start, self.base.upper()),
                (self.base.lower(), self.display_end)
            ]
        } else {
            smallvec![(self.display_start, self.display_end)]
        }
    }

    fn wrapped_lengths(self) -> (f64, f64) {
        (
            self.base.upper() - self.display_start,
            self.display_end - self.base.lower(),
        )
    }

    fn fraction(self, value: f64) -> f64 {
        let value = self.wrap(value);
        if !self.is_wrapping() {
            return (value - self.display_start) / (self.display_end - self.display_start);
        }

        let (start_length, end_length) = self.wrapped_lengths();
        let total = start_length + end_length;
        let cutoff = (self.display_start + self.display_end) / 2.0;
        if value >= self.display_start || (value > self.display_end && value > cutoff) {
            (value - self.display_start) / total
        } else {
            (start_length + value - self.base.lower()) / total
        }
    }

    fn value_at(self, fraction: f64) -> f64 {
        if !self.is_wrapping() {
            return self.display_start + fraction * (self.display_end - self.display_start);
        }

        let (start_length, end_length) = self.wrapped_lengths();
        let offset = fraction * (start_length + end_length);
        if offset <= start_length {
            self.display_start + offset
        } else {
            self.base.lower() + (offset - start_length)
        }
    }
}

/// Period-repeating mapping where the device interval shows one cycle.
///
/// The cycle bound is the largest `offset + k * period` not above the range
/// upper bound. Values from the bound up to the upper bound fill the start of
/// the device interval and the older part of the cycle fills the rest, so the
/// bound itself sits on both device ends; `bound_mapped_to_last_cycle` picks
/// the end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CyclicTransform {
    period: f64,
    offset: f64,
    bound_mapped_to_last_cycle: bool,
}

impl CyclicTransform {
    pub fn new(period: f64, offset: f64) -> AxisResult<Self> {
        if !period.is_finite() || period <= 0.0 {
            return Err(AxisError::InvalidConfig(
                "cycle period must be finite and > 0".to_owned(),
            ));
        }
        if !offset.is_finite() {
            return Err(AxisError::InvalidConfig(
                "cycle offset must be finite".to_owned(),
            ));
        }
        Ok(Self {
            period,
            offset,
            bound_mapped_to_last_cycle: true,
        })
    }

    #[must_use]
    pub fn with_bound_mapped_to_last_cycle(mut self, bound_mapped_to_last_cycle: bool) -> Self {
        self.bound_mapped_to_last_cycle = bound_mapped_to_last_cycle;
        self
    }

    #[must_use]
    pub fn period(self) -> f64 {
        self.period
    }

    #[must_use]
    pub fn offset(self) -> f64 {
        self.offset
    }

    #[must_use]
    pub fn is_bound_mapped_to_last_cycle(self) -> bool {
        self.bound_mapped_to_last_cycle
    }

    #[must_use]
    pub fn cycle_bound(self, range: Range) -> f64 {
        ((range.upper() - self.offset) / self.period).floor() * self.period + self.offset
    }

    fn fraction(self, value: f64, range: Range) -> f64 {
        if value < range.upper() - self.period || value > range.upper() {
            return f64::NAN;
        }
        let bound = self.cycle_bound(range);
        if value == bound {
            if self.bound_mapped_to_last_cycle { 1.0 } else { 0.0 }
        } else if value > bound {
            (value - bound) / self.period
        } else {
            1.0 - (bound - value) / self.period
        }
    }

    fn value_at(self, fraction: f64, range: Range) -> f64 {
        let bound = self.cycle_bound(range);
        let split = (range.upper() - bound) / self.period;
        if fraction <= split {
            bound + fraction * self.period
        } else {
            bound - (1.0 - fraction) * self.period
        }
    }
}

/// Closed set of value-to-device mappings an axis can use.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub enum TransformKind {
    #[default]
    Linear,
    Log(LogTransform),
    Date(DateTransform),
    Modulo(ModuloTransform),
    Cyclic(CyclicTransform),
    /// Linear mapping over integer indices labelled by name.
    Symbol(Vec<String>),
}

/// Immutable value/device mapping for one layout pass.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTransform {
    kind: TransformKind,
    range: Range,
    inverted: bool,
}

impl ValueTransform {
    #[must_use]
    pub fn new(kind: TransformKind, range: Range, inverted: bool) -> Self {
        Self {
            kind,
            range,
            inverted,
        }
    }

    #[must_use]
    pub fn linear(range: Range) -> Self {
        Self::new(TransformKind::Linear, range, false)
    }

    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    /// Copy with the cycle-bound tie resolved to the given device end.
    /// Non-cyclic transforms are returned unchanged.
    #[must_use]
    pub fn with_bound_mapped_to_last_cycle(mut self, last_cycle: bool) -> Self {
        if let TransformKind::Cyclic(cyclic) = &mut self.kind {
            *cyclic = cyclic.with_bound_mapped_to_last_cycle(last_cycle);
        }
        self
    }

    #[must_use]
    pub fn kind(&self) -> &TransformKind {
        &self.kind
    }

    pub(crate) fn kind_mut(&mut self) -> &mut TransformKind {
        &mut self.kind
    }

    pub(crate) fn set_range(&mut self, range: Range) {
        self.range = range;
    }

    pub(crate) fn set_inverted(&mut self, inverted: bool) {
        self.inverted = inverted;
    }

    #[must_use]
    pub fn range(&self) -> Range {
        self.range
    }

    #[must_use]
    pub fn is_inverted(&self) -> bool {
        self.inverted
    }

    /// Maps a data value to a device coordinate inside `area`.
    #[must_use]
    pub fn forward(&self, value: f64, area: DeviceInterval) -> f64 {
        area.fraction_to_device(self.fraction(value), self.inverted)
    }

    /// Maps a device coordinate back to a data value.
    #[must_use]
    pub fn inverse(&self, device: f64, area: DeviceInterval) -> f64 {
        self.value_at(area.device_to_fraction(device, self.inverted))
    }

    /// Device distance covered by `length` data units starting at the lower
    /// bound.
    #[must_use]
    pub fn length_to_device(&self, length: f64, area: DeviceInterval) -> f64 {
        let start = self.range.lower();
        let zero = self.forward(start, area);
        let end = match &self.kind {
            TransformKind::Date(date) => {
                let shifted = date.timeline.to_timeline_value(start) + length;
                self.forward(date.timeline.to_millisecond(shifted), area)
            }
            TransformKind::Log(log) => {
                let shifted = log.calculate_log(start) + length;
                self.forward(log.calculate_value(shifted), area)
            }
            TransformKind::Modulo(modulo) => {
                let span = modulo.display_range().length();
                if span > 0.0 {
                    return length / span * area.length();
                }
                zero
            }
            TransformKind::Cyclic(cyclic) => {
                return length / cyclic.period * area.length();
            }
            _ => self.forward(start + length, area),
        };
        (end - zero).abs()
    }

    /// Length of the visible range in the space tick unit sizes are measured
    /// in: exponents for log axes, compressed milliseconds for date axes.
    #[must_use]
    pub fn unit_space_length(&self) -> f64 {
        let lower = self.range.lower();
        let upper = self.range.upper();
        match &self.kind {
            TransformKind::Linear | TransformKind::Symbol(_) => upper - lower,
            TransformKind::Log(log) => log.calculate_log(upper) - log.calculate_log(lower),
            TransformKind::Date(date) => {
                date.timeline.to_timeline_value(upper) - date.timeline.to_timeline_value(lower)
            }
            TransformKind::Modulo(modulo) => modulo.display_range().length(),
            TransformKind::Cyclic(cyclic) => cyclic.period,
        }
    }

    fn fraction(&self, value: f64) -> f64 {
        let lower = self.range.lower();
        let upper = self.range.upper();
        match &self.kind {
            TransformKind::Linear | TransformKind::Symbol(_) => {
                linear_fraction(value, lower, upper)
            }
            TransformKind::Log(log) => linear_fraction(
                log.calculate_log(value),
                log.calculate_log(lower),
                log.calculate_log(upper),
            ),
            TransformKind::Date(date) => linear_fraction(
                date.timeline.to_timeline_value(value),
                date.timeline.to_timeline_value(lower),
                date.timeline.to_timeline_value(upper),
            ),
            TransformKind::Modulo(modulo) => modulo.fraction(value),
            TransformKind::Cyclic(cyclic) => cyclic.fraction(value, self.range),
        }
    }

    /// Value at `fraction` of the axis, `0` being the lower bound; fractions
    /// outside `[0, 1]` extrapolate.
    pub(crate) fn value_at(&self, fraction: f64) -> f64 {
        let lower = self.range.lower();
        let upper = self.range.upper();
        match &self.kind {
            TransformKind::Linear | TransformKind::Symbol(_) => {
                linear_value(fraction, lower, upper)
            }
            TransformKind::Log(log) => log.calculate_value(linear_value(
                fraction,
                log.calculate_log(lower),
                log.calculate_log(upper),
            )),
            TransformKind::Date(date) => date.timeline.to_millisecond(linear_value(
                fraction,
                date.timeline.to_timeline_value(lower),
                date.timeline.to_timeline_value(upper),
            )),
            TransformKind::Modulo(modulo) => modulo.value_at(fraction),
            TransformKind::Cyclic(cyclic) => cyclic.value_at(fraction, self.range),
        }
    }
}

fn linear_fraction(value: f64, lower: f64, upper: f64) -> f64 {
    let span = upper - lower;
    if span == 0.0 || !span.is_finite() {
        // Zero-width ranges put everything mid-axis instead of dividing by zero.
        return 0.5;
    }
    (value - lower) / span
}

fn linear_value(fraction: f64, lower: f64, upper: f64) -> f64 {
    lower + fraction * (upper - lower)
}
