mod frame;
mod measure;
mod null_renderer;
mod primitives;

pub use frame::AxisFrame;
pub use measure::{LabelMeasurer, MonospaceMeasurer};
pub use null_renderer::NullRenderer;
pub use primitives::{Color, LinePrimitive, TextPrimitive};

use crate::error::AxisResult;

/// Contract implemented by the host drawing surface.
///
/// Backends receive fully computed axis geometry, so painting code never sees
/// ranges, transforms or tick units.
pub trait Renderer {
    fn render(&mut self, frame: &AxisFrame) -> AxisResult<()>;
}
