use crate::engine::params::CardParams;

/// Vertical placement of a centered block of display lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextBlock {
    pub line_count: usize,
    pub line_height: f32,
    /// Vertical center of the first line
    pub start_y: f32,
    /// Horizontal center shared by every line
    pub center_x: f32,
}

impl TextBlock {
    /// Center `line_count` lines on a `width`×`height` canvas.
    pub fn centered(width: u32, height: u32, line_count: usize, params: &CardParams) -> Self {
        let line_height = params.line_advance();
        let total_height = line_count as f32 * line_height;
        let center_y = height as f32 / 2.0;

        Self {
            line_count,
            line_height,
            start_y: center_y - total_height / 2.0 + line_height / 2.0,
            center_x: width as f32 / 2.0,
        }
    }

    pub fn line_center_y(&self, index: usize) -> f32 {
        self.start_y + index as f32 * self.line_height
    }

    pub fn total_height(&self) -> f32 {
        self.line_count as f32 * self.line_height
    }
}

/// Widest a display line may be on a canvas of `width` pixels.
pub fn max_line_width(width: u32, params: &CardParams) -> f32 {
    width as f32 * params.max_width_ratio
}
