//! chart-axis: the numeric core behind chart axes.
//!
//! Maps data values to device coordinates through linear, logarithmic, date,
//! modulo and cyclic transforms, derives auto-ranged working ranges, picks
//! non-overlapping 1-2-5 tick units and compresses calendars into trading
//! time with segmented timelines. Painting and font metrics stay with the
//! host through the [`render::Renderer`] and [`render::LabelMeasurer`]
//! contracts.

pub mod api;
pub mod core;
pub mod error;
pub mod extensions;
pub mod render;
pub mod telemetry;

pub use api::{Axis, AxisConfig};
pub use error::{AxisError, AxisResult};
