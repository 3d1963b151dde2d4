pub mod auto_range;
pub mod label_format;
pub mod range;
pub mod segment;
pub mod segmented_timeline;
pub mod tick_generator;
pub mod tick_unit;
pub mod timeline;
pub mod transform;
pub mod types;

pub use auto_range::{AutoRangeOptions, RangeType};
pub use label_format::TickLabelFormat;
pub use range::Range;
pub use segment::Segment;
pub use segmented_timeline::SegmentedTimeline;
pub use tick_generator::{Tick, TickKind, TickLayout};
pub use tick_unit::{
    DateTickUnitType, NumberTickUnitSource, TickUnit, TickUnitKind, TickUnitSource, TickUnits,
};
pub use timeline::{AxisTimeline, CalendarTimeline, Timeline};
pub use transform::{
    CyclicTransform, DateTransform, LogTransform, ModuloTransform, TransformKind, ValueTransform,
};
pub use types::{
    DeviceInterval, LabelSize, RectangleEdge, RectangleInsets, TextAnchor, TickLabelFont,
};
