use crate::core::RectangleEdge;
use crate::error::AxisResult;
use crate::render::{LinePrimitive, TextPrimitive};

/// Backend-agnostic geometry for drawing one axis.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisFrame {
    pub edge: RectangleEdge,
    pub axis_line: Option<LinePrimitive>,
    pub tick_marks: Vec<LinePrimitive>,
    pub labels: Vec<TextPrimitive>,
}

impl AxisFrame {
    #[must_use]
    pub fn new(edge: RectangleEdge) -> Self {
        Self {
            edge,
            axis_line: None,
            tick_marks: Vec::new(),
            labels: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_axis_line(mut self, line: LinePrimitive) -> Self {
        self.axis_line = Some(line);
        self
    }

    #[must_use]
    pub fn with_tick_mark(mut self, line: LinePrimitive) -> Self {
        self.tick_marks.push(line);
        self
    }

    #[must_use]
    pub fn with_label(mut self, label: TextPrimitive) -> Self {
        self.labels.push(label);
        self
    }

    pub fn validate(&self) -> AxisResult<()> {
        if let Some(line) = self.axis_line {
            line.validate()?;
        }
        for line in &self.tick_marks {
            line.validate()?;
        }
        for label in &self.labels {
            label.validate()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.axis_line.is_none() && self.tick_marks.is_empty() && self.labels.is_empty()
    }
}
