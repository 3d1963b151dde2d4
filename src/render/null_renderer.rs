use crate::error::AxisResult;
use crate::render::{AxisFrame, Renderer};

/// No-op renderer for tests and headless layout.
///
/// Frames are still validated so invalid geometry surfaces without a real
/// backend.
#[derive(Debug, Default)]
pub struct NullRenderer {
    pub frames_rendered: usize,
    pub last_tick_mark_count: usize,
    pub last_label_count: usize,
}

impl Renderer for NullRenderer {
    fn render(&mut self, frame: &AxisFrame) -> AxisResult<()> {
        frame.validate()?;
        self.frames_rendered += 1;
        self.last_tick_mark_count = frame.tick_marks.len();
        self.last_label_count = frame.labels.len();
        Ok(())
    }
}
