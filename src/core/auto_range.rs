use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::range::Range;
use crate::core::timeline::{AxisTimeline, Timeline};
use crate::core::transform::LogTransform;

/// Sign restriction applied to auto-ranged bounds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum RangeType {
    #[default]
    Full,
    PositiveOnly,
    NegativeOnly,
}

/// Inputs of the auto-range calculation other than the data bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoRangeOptions {
    pub lower_margin: f64,
    pub upper_margin: f64,
    pub minimum_size: f64,
    /// Width of a trailing window ending at the data maximum; `0` disables it.
    pub fixed_auto_range: f64,
    pub includes_zero: bool,
    pub sticky_zero: bool,
    pub range_type: RangeType,
    pub default_range: Range,
}

impl Default for AutoRangeOptions {
    fn default() -> Self {
        Self {
            lower_margin: 0.05,
            upper_margin: 0.05,
            minimum_size: 1e-8,
            fixed_auto_range: 0.0,
            includes_zero: true,
            sticky_zero: true,
            range_type: RangeType::Full,
            default_range: Range::default(),
        }
    }
}

/// Working range of a numeric axis for the given data bounds.
///
/// `None` data selects `default_range`. Margins are fractions of the clamped
/// data length, measured before any minimum-size expansion.
#[must_use]
pub fn auto_adjust_number(data: Option<Range>, options: &AutoRangeOptions) -> Range {
    let source = data.unwrap_or(options.default_range);
    let mut lower = source.lower();
    let mut upper = source.upper();

    match options.range_type {
        RangeType::Full => {}
        RangeType::PositiveOnly => {
            lower = lower.max(0.0);
            upper = upper.max(0.0);
        }
        RangeType::NegativeOnly => {
            lower = lower.min(0.0);
            upper = upper.min(0.0);
        }
    }

    if options.includes_zero {
        lower = lower.min(0.0);
        upper = upper.max(0.0);
    }

    let range = upper - lower;
    if options.fixed_auto_range > 0.0 {
        lower = upper - options.fixed_auto_range;
    } else {
        if range < options.minimum_size {
            let expand = (options.minimum_size - range) / 2.0;
            upper += expand;
            lower -= expand;
            if lower == upper {
                let adjust = lower.abs() / 10.0;
                lower -= adjust;
                upper += adjust;
            }
            match options.range_type {
                RangeType::PositiveOnly if lower < 0.0 => {
                    upper -= lower;
                    lower = 0.0;
                }
                RangeType::NegativeOnly if upper > 0.0 => {
                    lower -= upper;
                    upper = 0.0;
                }
                _ => {}
            }
        }

        if options.sticky_zero {
            upper = if upper <= 0.0 {
                (upper + options.upper_margin * range).min(0.0)
            } else {
                upper + options.upper_margin * range
            };
            lower = if lower >= 0.0 {
                (lower - options.lower_margin * range).max(0.0)
            } else {
                lower - options.lower_margin * range
            };
        } else {
            upper += options.upper_margin * range;
            lower -= options.lower_margin * range;
        }
    }

    let result = finish(lower, upper, options);
    debug!(
        lower = result.lower(),
        upper = result.upper(),
        has_data = data.is_some(),
        "auto-adjusted numeric range"
    );
    result
}

/// Logarithmic variant: bounds are floored at the smallest loggable value and
/// margins are applied to the exponents.
#[must_use]
pub fn auto_adjust_log(
    data: Option<Range>,
    options: &AutoRangeOptions,
    log: LogTransform,
) -> Range {
    let source = data.unwrap_or(options.default_range);
    let floor = if log.is_switched() {
        f64::NEG_INFINITY
    } else {
        log.smallest_value()
    };
    let mut upper = source.upper();
    let mut lower = source.lower().max(floor);

    if options.fixed_auto_range > 0.0 {
        lower = (upper - options.fixed_auto_range).max(floor);
    } else {
        let range = upper - lower;
        if range < options.minimum_size {
            let expand = (options.minimum_size - range) / 2.0;
            upper += expand;
            lower = (lower - expand).max(floor);
        }

        let mut log_upper = log.calculate_log(upper);
        let mut log_lower = log.calculate_log(lower);
        let log_range = log_upper - log_lower;
        log_upper += options.upper_margin * log_range;
        log_lower -= options.lower_margin * log_range;
        upper = log.calculate_value_no_inf(log_upper);
        lower = log.calculate_value_no_inf(log_lower);
    }

    let result = finish(lower, upper, options);
    debug!(
        lower = result.lower(),
        upper = result.upper(),
        base = log.base(),
        "auto-adjusted log range"
    );
    result
}

/// Date variant: works in timeline space so excluded segments take no room,
/// then maps both bounds back to epoch milliseconds.
#[must_use]
pub fn auto_adjust_date(
    data: Option<Range>,
    options: &AutoRangeOptions,
    timeline: &AxisTimeline,
) -> Range {
    let source = data.unwrap_or(options.default_range);
    let mut upper = timeline.to_timeline_value(source.upper());
    let mut lower;

    if options.fixed_auto_range > 0.0 {
        lower = upper - options.fixed_auto_range;
    } else {
        lower = timeline.to_timeline_value(source.lower());
        let range = upper - lower;
        if range < options.minimum_size {
            let expand = (options.minimum_size - range) / 2.0;
            upper += expand;
            lower -= expand;
        }
        upper += options.upper_margin * range;
        lower -= options.lower_margin * range;
    }

    let result = finish(
        timeline.to_millisecond(lower),
        timeline.to_millisecond(upper),
        options,
    );
    debug!(
        lower = result.lower(),
        upper = result.upper(),
        segmented = timeline.as_segmented().is_some(),
        "auto-adjusted date range"
    );
    result
}

fn finish(lower: f64, upper: f64, options: &AutoRangeOptions) -> Range {
    Range::new(lower, upper).unwrap_or(options.default_range)
}
