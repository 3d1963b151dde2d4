use serde::{Deserialize, Serialize};

use crate::error::{AxisError, AxisResult};

/// Edge of the data area an axis is attached to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum RectangleEdge {
    Top,
    #[default]
    Bottom,
    Left,
    Right,
}

impl RectangleEdge {
    #[must_use]
    pub fn is_top_or_bottom(self) -> bool {
        matches!(self, Self::Top | Self::Bottom)
    }

    #[must_use]
    pub fn is_left_or_right(self) -> bool {
        matches!(self, Self::Left | Self::Right)
    }

    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Top => Self::Bottom,
            Self::Bottom => Self::Top,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }
}

/// One-dimensional device span along an axis, `min < max`.
///
/// Horizontal edges map increasing values along increasing X. Vertical edges
/// map increasing values towards `min` (screen Y grows downwards).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DeviceInterval {
    min: f64,
    max: f64,
    edge: RectangleEdge,
}

impl DeviceInterval {
    pub fn new(min: f64, max: f64, edge: RectangleEdge) -> AxisResult<Self> {
        if !min.is_finite() || !max.is_finite() || min >= max {
            return Err(AxisError::InvalidDeviceInterval { min, max });
        }
        Ok(Self { min, max, edge })
    }

    #[must_use]
    pub fn min(self) -> f64 {
        self.min
    }

    #[must_use]
    pub fn max(self) -> f64 {
        self.max
    }

    #[must_use]
    pub fn edge(self) -> RectangleEdge {
        self.edge
    }

    #[must_use]
    pub fn length(self) -> f64 {
        self.max - self.min
    }

    /// Maps a fraction of the axis (0 = lowest value) to a device coordinate.
    #[must_use]
    pub(crate) fn fraction_to_device(self, fraction: f64, inverted: bool) -> f64 {
        let fraction = if inverted { 1.0 - fraction } else { fraction };
        if self.edge.is_top_or_bottom() {
            self.min + fraction * self.length()
        } else {
            self.max - fraction * self.length()
        }
    }

    /// Inverse of [`DeviceInterval::fraction_to_device`].
    #[must_use]
    pub(crate) fn device_to_fraction(self, device: f64, inverted: bool) -> f64 {
        let fraction = if self.edge.is_top_or_bottom() {
            (device - self.min) / self.length()
        } else {
            (self.max - device) / self.length()
        };
        if inverted { 1.0 - fraction } else { fraction }
    }
}

/// Anchor point of a text box, named the way label layouts describe it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TextAnchor {
    TopLeft,
    TopCenter,
    TopRight,
    CenterLeft,
    Center,
    CenterRight,
    BottomLeft,
    BottomCenter,
    BottomRight,
}

/// Pixel footprint of a measured label.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LabelSize {
    pub width: f64,
    pub height: f64,
}

impl LabelSize {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Extent of the label rotated by `angle` radians, measured along the axis.
    #[must_use]
    pub fn extent_along(self, edge: RectangleEdge, angle: f64) -> f64 {
        let (sin, cos) = angle.sin_cos();
        if edge.is_top_or_bottom() {
            (self.width * cos).abs() + (self.height * sin).abs()
        } else {
            (self.width * sin).abs() + (self.height * cos).abs()
        }
    }

    /// Extent of the rotated label measured perpendicular to the axis.
    #[must_use]
    pub fn extent_across(self, edge: RectangleEdge, angle: f64) -> f64 {
        let opposite = if edge.is_top_or_bottom() {
            RectangleEdge::Left
        } else {
            RectangleEdge::Bottom
        };
        self.extent_along(opposite, angle)
    }
}

/// Padding around tick labels, in device units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RectangleInsets {
    pub top: f64,
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
}

impl RectangleInsets {
    #[must_use]
    pub const fn new(top: f64, left: f64, bottom: f64, right: f64) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// Padding added along the axis direction for labels on `edge`.
    #[must_use]
    pub fn along(self, edge: RectangleEdge) -> f64 {
        if edge.is_top_or_bottom() {
            self.left + self.right
        } else {
            self.top + self.bottom
        }
    }

    /// Padding added perpendicular to the axis for labels on `edge`.
    #[must_use]
    pub fn across(self, edge: RectangleEdge) -> f64 {
        if edge.is_top_or_bottom() {
            self.top + self.bottom
        } else {
            self.left + self.right
        }
    }

    pub fn validate(self) -> AxisResult<Self> {
        for (name, value) in [
            ("top", self.top),
            ("left", self.left),
            ("bottom", self.bottom),
            ("right", self.right),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(AxisError::InvalidConfig(format!(
                    "tick label inset `{name}` must be finite and >= 0"
                )));
            }
        }
        Ok(self)
    }
}

impl Default for RectangleInsets {
    fn default() -> Self {
        Self::new(2.0, 4.0, 2.0, 4.0)
    }
}

/// Font handed to the external label measurement service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TickLabelFont {
    pub family: String,
    pub size: f64,
}

impl Default for TickLabelFont {
    fn default() -> Self {
        Self {
            family: "sans-serif".to_owned(),
            size: 10.0,
        }
    }
}
