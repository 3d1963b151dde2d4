use serde::{Deserialize, Serialize};

use crate::error::{AxisError, AxisResult};

/// Closed interval of data values, `lower <= upper`.
///
/// Zero-width ranges are accepted as values (data bounds of a single sample
/// are legitimately degenerate); mutators that need a usable span go through
/// [`Range::new_non_degenerate`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Range {
    lower: f64,
    upper: f64,
}

impl Range {
    pub fn new(lower: f64, upper: f64) -> AxisResult<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower > upper {
            return Err(AxisError::InvalidRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Like [`Range::new`] but also rejects zero-width ranges.
    pub fn new_non_degenerate(lower: f64, upper: f64) -> AxisResult<Self> {
        if !lower.is_finite() || !upper.is_finite() || lower >= upper {
            return Err(AxisError::InvalidRange { lower, upper });
        }
        Ok(Self { lower, upper })
    }

    /// Builds the range covering both values in any order.
    pub fn spanning(a: f64, b: f64) -> AxisResult<Self> {
        Self::new(a.min(b), a.max(b))
    }

    #[must_use]
    pub fn lower(self) -> f64 {
        self.lower
    }

    #[must_use]
    pub fn upper(self) -> f64 {
        self.upper
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.upper - self.lower
    }

    #[must_use]
    pub fn central_value(self) -> f64 {
        self.lower / 2.0 + self.upper / 2.0
    }

    #[must_use]
    pub fn is_degenerate(self) -> bool {
        self.lower == self.upper
    }

    #[must_use]
    pub fn contains(self, value: f64) -> bool {
        value >= self.lower && value <= self.upper
    }

    /// True when `[lower, upper]` overlaps this range by more than a
    /// shared bound.
    #[must_use]
    pub fn intersects(self, lower: f64, upper: f64) -> bool {
        if lower <= self.lower {
            upper > self.lower
        } else {
            lower < self.upper && upper >= lower
        }
    }

    /// Returns the value clamped into the range.
    #[must_use]
    pub fn constrain(self, value: f64) -> f64 {
        if value.is_nan() {
            return value;
        }
        value.clamp(self.lower, self.upper)
    }

    /// Smallest range covering both operands.
    #[must_use]
    pub fn combine(self, other: Range) -> Self {
        Self {
            lower: self.lower.min(other.lower),
            upper: self.upper.max(other.upper),
        }
    }

    #[must_use]
    pub fn expand_to_include(self, value: f64) -> Self {
        if !value.is_finite() {
            return self;
        }
        Self {
            lower: self.lower.min(value),
            upper: self.upper.max(value),
        }
    }

    /// Grows the range by fractions of its length on each side.
    ///
    /// Negative margins shrink it; if the bounds cross they collapse onto
    /// their midpoint.
    #[must_use]
    pub fn expand(self, lower_margin: f64, upper_margin: f64) -> Self {
        let length = self.length();
        let mut lower = self.lower - length * lower_margin;
        let mut upper = self.upper + length * upper_margin;
        if lower > upper {
            let mid = lower / 2.0 + upper / 2.0;
            lower = mid;
            upper = mid;
        }
        Self { lower, upper }
    }

    #[must_use]
    pub fn shift(self, delta: f64) -> Self {
        if !delta.is_finite() {
            return self;
        }
        Self {
            lower: self.lower + delta,
            upper: self.upper + delta,
        }
    }

    /// Scales both bounds by a non-negative factor.
    pub fn scale(self, factor: f64) -> AxisResult<Self> {
        if !factor.is_finite() || factor < 0.0 {
            return Err(AxisError::InvalidConfig(
                "range scale factor must be finite and >= 0".to_owned(),
            ));
        }
        Ok(Self {
            lower: self.lower * factor,
            upper: self.upper * factor,
        })
    }
}

impl Default for Range {
    fn default() -> Self {
        Self {
            lower: 0.0,
            upper: 1.0,
        }
    }
}
