use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::ops::Bound;

use chrono::{DateTime, Datelike, Months, NaiveDate, Timelike, Utc};
use ordered_float::OrderedFloat;
use serde::{Deserialize, Serialize};

use crate::core::label_format::TickLabelFormat;

pub const MILLIS_PER_SECOND: i64 = 1_000;
pub const MILLIS_PER_MINUTE: i64 = 60 * MILLIS_PER_SECOND;
pub const MILLIS_PER_HOUR: i64 = 60 * MILLIS_PER_MINUTE;
pub const MILLIS_PER_DAY: i64 = 24 * MILLIS_PER_HOUR;

/// Calendar granularity of a date tick unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DateTickUnitType {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    Millisecond,
}

impl DateTickUnitType {
    /// Nominal length of one unit; months count as 31 days, years as 365.
    #[must_use]
    pub fn millisecond_count(self) -> i64 {
        match self {
            Self::Year => 365 * MILLIS_PER_DAY,
            Self::Month => 31 * MILLIS_PER_DAY,
            Self::Day => MILLIS_PER_DAY,
            Self::Hour => MILLIS_PER_HOUR,
            Self::Minute => MILLIS_PER_MINUTE,
            Self::Second => MILLIS_PER_SECOND,
            Self::Millisecond => 1,
        }
    }

    /// Default chrono pattern for labels at this granularity.
    #[must_use]
    pub fn default_pattern(self) -> &'static str {
        match self {
            Self::Year => "%Y",
            Self::Month => "%b-%Y",
            Self::Day => "%d-%b",
            Self::Hour => "%d-%b, %H:%M",
            Self::Minute => "%H:%M",
            Self::Second => "%H:%M:%S",
            Self::Millisecond => "%H:%M:%S%.3f",
        }
    }

    /// Advances a UTC timestamp by `multiple` units using calendar arithmetic.
    #[must_use]
    pub fn add_to(self, millis: i64, multiple: u32) -> Option<i64> {
        match self {
            Self::Year | Self::Month => {
                let months = if self == Self::Year {
                    multiple.checked_mul(12)?
                } else {
                    multiple
                };
                let time = DateTime::<Utc>::from_timestamp_millis(millis)?;
                let advanced = time.checked_add_months(Months::new(months))?;
                Some(advanced.timestamp_millis())
            }
            _ => millis.checked_add(self.millisecond_count().checked_mul(i64::from(multiple))?),
        }
    }

    /// Latest timestamp `<= millis` aligned to this unit and `multiple`.
    #[must_use]
    pub fn previous_standard_date(self, millis: i64, multiple: u32) -> Option<i64> {
        let multiple = multiple.max(1);
        if self == Self::Millisecond {
            let step = i64::from(multiple);
            return Some(millis.div_euclid(step) * step);
        }

        let time = DateTime::<Utc>::from_timestamp_millis(millis)?;
        let date = time.date_naive();
        let aligned = match self {
            Self::Year => {
                let step = i32::try_from(multiple).ok()?;
                let year = time.year().div_euclid(step) * step;
                NaiveDate::from_ymd_opt(year, 1, 1)?.and_hms_opt(0, 0, 0)?
            }
            Self::Month => {
                let month0 = (time.month0() / multiple) * multiple;
                NaiveDate::from_ymd_opt(time.year(), month0 + 1, 1)?.and_hms_opt(0, 0, 0)?
            }
            Self::Day => {
                let day0 = (time.day0() / multiple) * multiple;
                NaiveDate::from_ymd_opt(time.year(), time.month(), day0 + 1)?
                    .and_hms_opt(0, 0, 0)?
            }
            Self::Hour => date.and_hms_opt((time.hour() / multiple) * multiple, 0, 0)?,
            Self::Minute => {
                date.and_hms_opt(time.hour(), (time.minute() / multiple) * multiple, 0)?
            }
            Self::Second => date.and_hms_opt(
                time.hour(),
                time.minute(),
                (time.second() / multiple) * multiple,
            )?,
            Self::Millisecond => return None,
        };
        Some(aligned.and_utc().timestamp_millis())
    }
}

/// Discriminates plain numeric spacing from calendar spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TickUnitKind {
    Number,
    Date {
        unit_type: DateTickUnitType,
        multiple: u32,
    },
}

/// Spacing between consecutive major ticks plus how to label them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickUnit {
    size: f64,
    minor_tick_count: u32,
    format: TickLabelFormat,
    kind: TickUnitKind,
}

impl TickUnit {
    #[must_use]
    pub fn number(size: f64, format: TickLabelFormat) -> Self {
        Self {
            size,
            minor_tick_count: 0,
            format,
            kind: TickUnitKind::Number,
        }
    }

    #[must_use]
    pub fn date(unit_type: DateTickUnitType, multiple: u32) -> Self {
        let multiple = multiple.max(1);
        Self {
            size: (unit_type.millisecond_count() * i64::from(multiple)) as f64,
            minor_tick_count: 0,
            format: TickLabelFormat::date(unit_type.default_pattern()),
            kind: TickUnitKind::Date {
                unit_type,
                multiple,
            },
        }
    }

    #[must_use]
    pub fn with_minor_tick_count(mut self, minor_tick_count: u32) -> Self {
        self.minor_tick_count = minor_tick_count;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TickLabelFormat) -> Self {
        self.format = format;
        self
    }

    #[must_use]
    pub fn size(&self) -> f64 {
        self.size
    }

    #[must_use]
    pub fn minor_tick_count(&self) -> u32 {
        self.minor_tick_count
    }

    #[must_use]
    pub fn format(&self) -> &TickLabelFormat {
        &self.format
    }

    #[must_use]
    pub fn kind(&self) -> TickUnitKind {
        self.kind
    }

    #[must_use]
    pub fn label(&self, value: f64) -> String {
        self.format.format(value)
    }

    /// Orders units by size only; format and minor count do not participate.
    #[must_use]
    pub fn compare_size(&self, other: &TickUnit) -> Ordering {
        self.size.total_cmp(&other.size)
    }
}

/// Ordered supply of tick units the selection search walks through.
pub trait TickUnitSource: fmt::Debug + Send + Sync {
    /// Smallest unit whose size is `>= size`; the largest unit when none is.
    fn ceiling_unit(&self, size: f64) -> TickUnit;

    /// Next unit strictly larger than `unit`, or the largest unit when the
    /// source is exhausted.
    fn larger_unit(&self, unit: &TickUnit) -> TickUnit;
}

const DECIMAL_FACTORS: &[u8] = &[1, 2, 5];
// 1-2-5 is only ascending when `5 * base^p < base^(p + 1)`.
const POWER_FACTORS: &[u8] = &[1];
const TIE_TOLERANCE: f64 = 1e-12;

/// Position in the `factors x base^power` sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct SequencePosition {
    power: i32,
    factor_index: usize,
}

impl SequencePosition {
    fn next(self, factors: &[u8]) -> Self {
        if self.factor_index + 1 < factors.len() {
            Self {
                factor_index: self.factor_index + 1,
                ..self
            }
        } else {
            Self {
                power: self.power + 1,
                factor_index: 0,
            }
        }
    }
}

/// Generates the 1-2-5 stepping sequence on demand.
///
/// `integers` restricts the sequence to `power >= 0`. The power is clamped to
/// `[min_power, max_power]` so that requests near zero or infinity stay finite.
/// Bases of 5 or less step through plain powers of the base.
#[derive(Debug, Clone, PartialEq)]
pub struct NumberTickUnitSource {
    integers: bool,
    base: f64,
    factors: &'static [u8],
    min_power: i32,
    max_power: i32,
    format: Option<TickLabelFormat>,
}

impl NumberTickUnitSource {
    pub const DEFAULT_MIN_POWER: i32 = -300;
    pub const DEFAULT_MAX_POWER: i32 = 300;

    #[must_use]
    pub fn new(integers: bool) -> Self {
        Self {
            integers,
            base: 10.0,
            factors: DECIMAL_FACTORS,
            min_power: if integers { 0 } else { Self::DEFAULT_MIN_POWER },
            max_power: Self::DEFAULT_MAX_POWER,
            format: None,
        }
    }

    /// Uses a different base, e.g. `E` for natural-log exponent spacing.
    ///
    /// Bases that are not finite or not `> 1` keep the decimal base.
    #[must_use]
    pub fn with_base(mut self, base: f64) -> Self {
        if base.is_finite() && base > 1.0 {
            self.base = base;
            self.factors = if base > 5.0 {
                DECIMAL_FACTORS
            } else {
                POWER_FACTORS
            };
            let max_power = (f64::MAX.ln() / base.ln()).floor() as i32 - 1;
            self.max_power = self.max_power.min(max_power);
            if !self.integers {
                let min_power = (f64::MIN_POSITIVE.ln() / base.ln()).ceil() as i32 + 1;
                self.min_power = self.min_power.max(min_power);
            }
        }
        self
    }

    /// Forces one label format for every generated unit.
    #[must_use]
    pub fn with_format(mut self, format: TickLabelFormat) -> Self {
        self.format = Some(format);
        self
    }

    #[must_use]
    pub fn is_integers(&self) -> bool {
        self.integers
    }

    #[must_use]
    pub fn base(&self) -> f64 {
        self.base
    }

    fn magnitude(&self, position: SequencePosition) -> f64 {
        let factor = f64::from(self.factors[position.factor_index]);
        if position.power >= 0 {
            factor * self.base.powi(position.power)
        } else {
            // Division keeps `5 / 100` correctly rounded where `5 * 0.01` is not.
            factor / self.base.powi(-position.power)
        }
    }

    fn smallest(&self) -> SequencePosition {
        SequencePosition {
            power: self.min_power,
            factor_index: 0,
        }
    }

    fn largest(&self) -> SequencePosition {
        SequencePosition {
            power: self.max_power,
            factor_index: self.factors.len() - 1,
        }
    }

    fn ceiling_position(&self, size: f64) -> SequencePosition {
        if size.is_nan() || size <= self.magnitude(self.smallest()) {
            return self.smallest();
        }
        if size >= self.magnitude(self.largest()) {
            return self.largest();
        }

        let estimate = (size.ln() / self.base.ln()).floor() as i32 - 1;
        let mut position = SequencePosition {
            power: estimate.clamp(self.min_power, self.max_power),
            factor_index: 0,
        };
        let target = size * (1.0 - TIE_TOLERANCE);
        while self.magnitude(position) < target && position != self.largest() {
            position = position.next(self.factors);
        }
        position
    }

    fn unit_at(&self, position: SequencePosition) -> TickUnit {
        let size = self.magnitude(position);
        let format = self
            .format
            .clone()
            .unwrap_or_else(|| self.default_format(position, size));
        let minor_tick_count = match self.factors[position.factor_index] {
            1 => 2,
            2 => 4,
            _ => 5,
        };
        TickUnit::number(size, format).with_minor_tick_count(minor_tick_count)
    }

    fn default_format(&self, position: SequencePosition, size: f64) -> TickLabelFormat {
        if self.integers {
            return TickLabelFormat::decimal(0);
        }
        let decimal_power = if self.base == 10.0 {
            position.power
        } else {
            size.log10().floor() as i32
        };
        if (-4..=6).contains(&decimal_power) {
            let digits = (-decimal_power).max(0);
            let digits = if self.base == 10.0 { digits } else { digits + 1 };
            TickLabelFormat::decimal(u8::try_from(digits).unwrap_or(u8::MAX))
        } else {
            TickLabelFormat::Scientific { mantissa_digits: 1 }
        }
    }
}

impl Default for NumberTickUnitSource {
    fn default() -> Self {
        Self::new(false)
    }
}

impl TickUnitSource for NumberTickUnitSource {
    fn ceiling_unit(&self, size: f64) -> TickUnit {
        self.unit_at(self.ceiling_position(size))
    }

    fn larger_unit(&self, unit: &TickUnit) -> TickUnit {
        let position = self.ceiling_position(unit.size());
        if self.magnitude(position) > unit.size() * (1.0 + TIE_TOLERANCE) {
            return self.unit_at(position);
        }
        if position == self.largest() {
            return self.unit_at(position);
        }
        self.unit_at(position.next(self.factors))
    }
}

/// Explicit, finite collection of tick units kept sorted by size.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TickUnits {
    units: BTreeMap<OrderedFloat<f64>, TickUnit>,
}

impl TickUnits {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a unit; a unit of identical size replaces the previous one.
    pub fn add(&mut self, unit: TickUnit) {
        if unit.size().is_finite() && unit.size() > 0.0 {
            self.units.insert(OrderedFloat(unit.size()), unit);
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.units.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TickUnit> {
        self.units.values()
    }

    fn first_from(&self, lower: Bound<OrderedFloat<f64>>) -> Option<&TickUnit> {
        self.units
            .range((lower, Bound::Unbounded))
            .next()
            .map(|(_, unit)| unit)
    }

    fn last(&self) -> Option<&TickUnit> {
        self.units.values().next_back()
    }
}

impl TickUnitSource for TickUnits {
    fn ceiling_unit(&self, size: f64) -> TickUnit {
        let key = OrderedFloat(size * (1.0 - TIE_TOLERANCE));
        self.first_from(Bound::Included(key))
            .or_else(|| self.last())
            .cloned()
            .unwrap_or_else(|| TickUnit::number(1.0, TickLabelFormat::default()))
    }

    fn larger_unit(&self, unit: &TickUnit) -> TickUnit {
        let key = OrderedFloat(unit.size() * (1.0 + TIE_TOLERANCE));
        self.first_from(Bound::Excluded(key))
            .or_else(|| self.last())
            .cloned()
            .unwrap_or_else(|| unit.clone())
    }
}

/// 1-2-5 units from `1e-10` to `5e12` with decimal formats.
#[must_use]
pub fn standard_tick_units() -> TickUnits {
    collect_sequence(&NumberTickUnitSource::new(false), -10, 12)
}

/// 1-2-5 units from `1` to `5e9`, labelled without fraction digits.
#[must_use]
pub fn integer_tick_units() -> TickUnits {
    collect_sequence(&NumberTickUnitSource::new(true), 0, 9)
}

fn collect_sequence(source: &NumberTickUnitSource, min_power: i32, max_power: i32) -> TickUnits {
    let mut units = TickUnits::new();
    let mut position = SequencePosition {
        power: min_power,
        factor_index: 0,
    };
    while position.power <= max_power {
        units.add(source.unit_at(position));
        position = position.next(source.factors);
    }
    units
}

/// Calendar units from one millisecond to a century.
#[must_use]
pub fn standard_date_tick_units() -> TickUnits {
    let table: [(DateTickUnitType, &[u32]); 7] = [
        (DateTickUnitType::Millisecond, &[1, 5, 10, 25, 50, 100, 250, 500]),
        (DateTickUnitType::Second, &[1, 5, 10, 30]),
        (DateTickUnitType::Minute, &[1, 2, 5, 10, 15, 20, 30]),
        (DateTickUnitType::Hour, &[1, 2, 4, 6, 12]),
        (DateTickUnitType::Day, &[1, 2, 7, 15]),
        (DateTickUnitType::Month, &[1, 2, 3, 4, 6]),
        (DateTickUnitType::Year, &[1, 2, 5, 10, 25, 50, 100]),
    ];

    let mut units = TickUnits::new();
    for (unit_type, multiples) in table {
        for &multiple in multiples {
            units.add(TickUnit::date(unit_type, multiple));
        }
    }
    units
}
