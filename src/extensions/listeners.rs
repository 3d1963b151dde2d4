use serde::{Deserialize, Serialize};

use crate::core::Range;

/// Change notification emitted by an axis after a mutation settles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum AxisChangeEvent {
    RangeChanged { range: Range },
    TickUnitChanged { size: f64 },
    ConfigChanged,
}

/// Observer registered on an axis.
///
/// Listeners see events after the axis state is updated and cannot mutate the
/// axis from inside the callback.
pub trait AxisChangeListener {
    fn id(&self) -> &str;
    fn on_axis_changed(&mut self, event: AxisChangeEvent);
}
