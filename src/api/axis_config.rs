use serde::{Deserialize, Serialize};

use crate::core::{AutoRangeOptions, Range, RangeType, RectangleInsets, TickLabelFont};
use crate::error::{AxisError, AxisResult};

/// Named, independently settable axis options.
///
/// The type is serializable so hosts can persist axis setup; every field has
/// a serde default, so partial documents load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AxisConfig {
    #[serde(default = "default_margin")]
    pub lower_margin: f64,
    #[serde(default = "default_margin")]
    pub upper_margin: f64,
    #[serde(default = "default_true")]
    pub auto_range: bool,
    #[serde(default = "default_auto_range_minimum_size")]
    pub auto_range_minimum_size: f64,
    /// Width of a trailing window ending at the data maximum; `0` disables it.
    #[serde(default)]
    pub fixed_auto_range: f64,
    #[serde(default = "default_true")]
    pub auto_range_includes_zero: bool,
    #[serde(default = "default_true")]
    pub auto_range_sticky_zero: bool,
    #[serde(default)]
    pub default_auto_range: Range,
    #[serde(default)]
    pub inverted: bool,
    #[serde(default)]
    pub range_type: RangeType,
    #[serde(default = "default_true")]
    pub auto_tick_unit_selection: bool,
    /// Spacing used while auto selection is off, and the seed of the search.
    #[serde(default = "default_tick_unit_size")]
    pub tick_unit_size: f64,
    /// Minor subdivisions per major interval; `0` uses the tick unit's count.
    #[serde(default)]
    pub minor_tick_count: u32,
    #[serde(default)]
    pub minor_ticks_visible: bool,
    #[serde(default)]
    pub vertical_tick_labels: bool,
    #[serde(default)]
    pub tick_label_font: TickLabelFont,
    #[serde(default)]
    pub tick_label_insets: RectangleInsets,
    #[serde(default = "default_tick_mark_outside_length")]
    pub tick_mark_outside_length: f64,
    #[serde(default = "default_max_tick_count")]
    pub max_tick_count: usize,
    #[serde(default = "default_true")]
    pub visible: bool,
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self {
            lower_margin: default_margin(),
            upper_margin: default_margin(),
            auto_range: true,
            auto_range_minimum_size: default_auto_range_minimum_size(),
            fixed_auto_range: 0.0,
            auto_range_includes_zero: true,
            auto_range_sticky_zero: true,
            default_auto_range: Range::default(),
            inverted: false,
            range_type: RangeType::Full,
            auto_tick_unit_selection: true,
            tick_unit_size: default_tick_unit_size(),
            minor_tick_count: 0,
            minor_ticks_visible: false,
            vertical_tick_labels: false,
            tick_label_font: TickLabelFont::default(),
            tick_label_insets: RectangleInsets::default(),
            tick_mark_outside_length: default_tick_mark_outside_length(),
            max_tick_count: default_max_tick_count(),
            visible: true,
        }
    }
}

impl AxisConfig {
    #[must_use]
    pub fn with_margins(mut self, lower_margin: f64, upper_margin: f64) -> Self {
        self.lower_margin = lower_margin;
        self.upper_margin = upper_margin;
        self
    }

    #[must_use]
    pub fn with_auto_range(mut self, auto_range: bool) -> Self {
        self.auto_range = auto_range;
        self
    }

    #[must_use]
    pub fn with_auto_range_minimum_size(mut self, size: f64) -> Self {
        self.auto_range_minimum_size = size;
        self
    }

    #[must_use]
    pub fn with_fixed_auto_range(mut self, width: f64) -> Self {
        self.fixed_auto_range = width;
        self
    }

    #[must_use]
    pub fn with_auto_range_includes_zero(mut self, includes_zero: bool) -> Self {
        self.auto_range_includes_zero = includes_zero;
        self
    }

    #[must_use]
    pub fn with_auto_range_sticky_zero(mut self, sticky_zero: bool) -> Self {
        self.auto_range_sticky_zero = sticky_zero;
        self
    }

    #[must_use]
    pub fn with_default_auto_range(mut self, range: Range) -> Self {
        self.default_auto_range = range;
        self
    }

    #[must_use]
    pub fn with_inverted(mut self, inverted: bool) -> Self {
        self.inverted = inverted;
        self
    }

    #[must_use]
    pub fn with_range_type(mut self, range_type: RangeType) -> Self {
        self.range_type = range_type;
        self
    }

    #[must_use]
    pub fn with_auto_tick_unit_selection(mut self, enabled: bool) -> Self {
        self.auto_tick_unit_selection = enabled;
        self
    }

    #[must_use]
    pub fn with_tick_unit_size(mut self, size: f64) -> Self {
        self.tick_unit_size = size;
        self
    }

    #[must_use]
    pub fn with_minor_ticks(mut self, count: u32, visible: bool) -> Self {
        self.minor_tick_count = count;
        self.minor_ticks_visible = visible;
        self
    }

    #[must_use]
    pub fn with_vertical_tick_labels(mut self, vertical: bool) -> Self {
        self.vertical_tick_labels = vertical;
        self
    }

    #[must_use]
    pub fn with_tick_label_font(mut self, font: TickLabelFont) -> Self {
        self.tick_label_font = font;
        self
    }

    #[must_use]
    pub fn with_tick_label_insets(mut self, insets: RectangleInsets) -> Self {
        self.tick_label_insets = insets;
        self
    }

    #[must_use]
    pub fn with_max_tick_count(mut self, max_tick_count: usize) -> Self {
        self.max_tick_count = max_tick_count;
        self
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    /// Rejects values that indicate a programming error upstream.
    pub fn validate(&self) -> AxisResult<()> {
        for (name, value) in [
            ("lower_margin", self.lower_margin),
            ("upper_margin", self.upper_margin),
            ("fixed_auto_range", self.fixed_auto_range),
            ("tick_mark_outside_length", self.tick_mark_outside_length),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AxisError::InvalidConfig(format!(
                    "`{name}` must be finite and >= 0"
                )));
            }
        }
        if !self.auto_range_minimum_size.is_finite() || self.auto_range_minimum_size <= 0.0 {
            return Err(AxisError::InvalidConfig(
                "`auto_range_minimum_size` must be finite and > 0".to_owned(),
            ));
        }
        if !self.tick_unit_size.is_finite() || self.tick_unit_size <= 0.0 {
            return Err(AxisError::InvalidConfig(
                "`tick_unit_size` must be finite and > 0".to_owned(),
            ));
        }
        if self.default_auto_range.is_degenerate()
            || !self.default_auto_range.lower().is_finite()
            || !self.default_auto_range.upper().is_finite()
        {
            return Err(AxisError::InvalidRange {
                lower: self.default_auto_range.lower(),
                upper: self.default_auto_range.upper(),
            });
        }
        if self.max_tick_count == 0 {
            return Err(AxisError::InvalidConfig(
                "`max_tick_count` must be > 0".to_owned(),
            ));
        }
        if !self.tick_label_font.size.is_finite() || self.tick_label_font.size <= 0.0 {
            return Err(AxisError::InvalidConfig(
                "tick label font size must be finite and > 0".to_owned(),
            ));
        }
        self.tick_label_insets.validate()?;
        Ok(())
    }

    #[must_use]
    pub fn auto_range_options(&self) -> AutoRangeOptions {
        AutoRangeOptions {
            lower_margin: self.lower_margin,
            upper_margin: self.upper_margin,
            minimum_size: self.auto_range_minimum_size,
            fixed_auto_range: self.fixed_auto_range,
            includes_zero: self.auto_range_includes_zero,
            sticky_zero: self.auto_range_sticky_zero,
            range_type: self.range_type,
            default_range: self.default_auto_range,
        }
    }
}

fn default_margin() -> f64 {
    0.05
}

fn default_true() -> bool {
    true
}

fn default_auto_range_minimum_size() -> f64 {
    1e-8
}

fn default_tick_unit_size() -> f64 {
    1.0
}

fn default_tick_mark_outside_length() -> f64 {
    2.0
}

fn default_max_tick_count() -> usize {
    500
}
