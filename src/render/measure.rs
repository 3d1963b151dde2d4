use crate::core::{LabelSize, TickLabelFont};

/// Label measurement service supplied by the host toolkit.
pub trait LabelMeasurer {
    fn measure(&self, text: &str, font: &TickLabelFont) -> LabelSize;
}

/// Fixed-advance estimate: every character is `advance_ratio * font.size`
/// wide and a line is `line_height_ratio * font.size` tall.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonospaceMeasurer {
    pub advance_ratio: f64,
    pub line_height_ratio: f64,
}

impl Default for MonospaceMeasurer {
    fn default() -> Self {
        Self {
            advance_ratio: 0.6,
            line_height_ratio: 1.2,
        }
    }
}

impl LabelMeasurer for MonospaceMeasurer {
    fn measure(&self, text: &str, font: &TickLabelFont) -> LabelSize {
        if text.is_empty() {
            return LabelSize::default();
        }
        let chars = text.chars().count() as f64;
        LabelSize::new(
            chars * self.advance_ratio * font.size,
            self.line_height_ratio * font.size,
        )
    }
}

impl<F> LabelMeasurer for F
where
    F: Fn(&str, &TickLabelFont) -> LabelSize,
{
    fn measure(&self, text: &str, font: &TickLabelFont) -> LabelSize {
        self(text, font)
    }
}
