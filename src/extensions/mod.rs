//! Optional hooks around the axis core.

pub mod listeners;

pub use listeners::{AxisChangeEvent, AxisChangeListener};
