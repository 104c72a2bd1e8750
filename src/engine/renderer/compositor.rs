use image::RgbaImage;

use crate::engine::bridge::text::FaceSet;
use crate::engine::params::{Color, Compositing};
use crate::engine::renderer::canvas::{LuminanceMask, blend_pixel};

/// Where a line ended up on the canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinePlacement {
    /// Pen position of the first glyph
    pub left: i32,
    pub baseline: i32,
    /// Sum of the measured widths of the drawn segments
    pub width: f32,
    /// Pen position after the last glyph
    pub end: f32,
    pub drawn_segments: usize,
}

/// Draws display lines of a title onto a canvas.
///
/// With [`Compositing::LuminanceMask`] one scratch buffer is allocated on the
/// first line and cleared between lines.
pub struct Compositor<'a> {
    faces: &'a FaceSet,
    color: Color,
    strategy: Compositing,
    mask: Option<LuminanceMask>,
}

impl<'a> Compositor<'a> {
    pub fn new(faces: &'a FaceSet, color: Color, strategy: Compositing) -> Self {
        Self {
            faces,
            color,
            strategy,
            mask: None,
        }
    }

    fn scratch(&mut self, width: u32, height: u32) -> &mut LuminanceMask {
        let reusable = matches!(&self.mask, Some(m) if m.dimensions() == (width, height));
        if !reusable {
            self.mask = Some(LuminanceMask::new(width, height));
        }
        let mask = self.mask.get_or_insert_with(|| LuminanceMask::new(width, height));
        mask.clear();
        mask
    }

    /// Baseline for a line whose vertical center is `center_y`.
    ///
    /// One baseline per line: mixed-script text would otherwise stagger.
    pub fn baseline(&self, center_y: f32) -> i32 {
        let ascent = self.faces.ascent().unwrap_or(0.0);
        center_y as i32 + ascent.round() as i32 / 2
    }

    /// Draw `line` horizontally centered on `center_x` and vertically on `center_y`.
    pub fn draw_line(
        &mut self,
        canvas: &mut RgbaImage,
        line: &str,
        center_x: f32,
        center_y: f32,
    ) -> LinePlacement {
        let faces = self.faces;
        let color = self.color;
        let segments = faces.resolve_line(line);
        let width: f32 = segments.iter().map(|s| s.width).sum();

        let left = (center_x - width / 2.0) as i32;
        let baseline = self.baseline(center_y);

        let mut mask = match self.strategy {
            Compositing::LuminanceMask => Some(self.scratch(canvas.width(), canvas.height())),
            Compositing::PerGlyph => None,
        };

        let mut pen = left as f32;
        for seg in &segments {
            let end = match mask.as_mut() {
                Some(mask) => seg.face.draw(
                    &seg.segment.text,
                    pen,
                    baseline as f32,
                    &mut |x, y, c| mask.plot(x, y, c),
                ),
                None => seg.face.draw(
                    &seg.segment.text,
                    pen,
                    baseline as f32,
                    &mut |x, y, c| blend_pixel(canvas, x, y, color, c),
                ),
            };
            pen = end.round();
        }

        if let Some(mask) = mask {
            mask.composite(canvas, color);
        }

        log::debug!(
            target: "Compositor::draw_line",
            "{:?}: left={} baseline={} width={:.2} segments={}",
            line, left, baseline, width, segments.len()
        );

        LinePlacement {
            left,
            baseline,
            width,
            end: pen,
            drawn_segments: segments.len(),
        }
    }
}
