use thiserror::Error;

pub type AxisResult<T> = Result<T, AxisError>;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum AxisError {
    #[error("invalid range: lower={lower}, upper={upper}")]
    InvalidRange { lower: f64, upper: f64 },

    #[error("invalid device interval: min={min}, max={max}")]
    InvalidDeviceInterval { min: f64, max: f64 },

    #[error("invalid axis configuration: {0}")]
    InvalidConfig(String),

    #[error("invalid timeline: {0}")]
    InvalidTimeline(String),

    #[error("invalid frame geometry: {0}")]
    InvalidFrame(String),
}
