mod axis;
mod axis_config;

pub use axis::Axis;
pub use axis_config::AxisConfig;
