//! Share-card generation pipeline.
//!
//! ```text
//! background bytes → decode → break_title → TextBlock → Compositor → PNG
//! ```
//!
//! The generator performs no I/O: callers hand it already loaded background
//! and font bytes and take the resulting raster or PNG bytes.

use image::RgbaImage;

use crate::engine::bridge::text::{FaceSet, FaceSlot};
use crate::engine::error::CardResult;
use crate::engine::layouter::{TextBlock, break_title, max_line_width};
use crate::engine::params::CardParams;
use crate::engine::renderer::{Compositor, LinePlacement};
use crate::platform::font::{FontBackend, load_optional_face};
use crate::platform::image::{decode_background, encode_png};

/// Renders titles onto background templates.
///
/// Immutable once built; one generator may serve concurrent calls.
#[derive(Debug, Clone)]
pub struct Generator {
    faces: FaceSet,
    params: CardParams,
}

impl Generator {
    pub fn new(faces: FaceSet, params: CardParams) -> CardResult<Self> {
        params.validate()?;
        if faces.is_empty() {
            log::warn!(target: "Generator", "No font faces loaded; titles will not be drawn");
        }
        Ok(Self { faces, params })
    }

    /// Parse the primary (Latin) and secondary (CJK) fonts.
    ///
    /// A font that is missing or fails to parse leaves its slot empty.
    pub fn from_font_bytes(
        primary: Option<&[u8]>,
        secondary: Option<&[u8]>,
        params: CardParams,
        backend: FontBackend,
    ) -> CardResult<Self> {
        params.validate()?;
        let size = params.font_size;
        let faces = FaceSet::new(
            load_optional_face(FaceSlot::Primary, primary, size, backend),
            load_optional_face(FaceSlot::Secondary, secondary, size, backend),
        );
        Self::new(faces, params)
    }

    pub fn faces(&self) -> &FaceSet {
        &self.faces
    }

    pub fn params(&self) -> &CardParams {
        &self.params
    }

    /// Display lines of `title` for a canvas `width` pixels wide.
    pub fn display_lines(&self, title: &str, width: u32) -> Vec<String> {
        break_title(
            title,
            max_line_width(width, &self.params),
            &self.faces,
            self.params.preserve_blank_lines,
        )
    }

    /// Draw `title` onto an already decoded canvas.
    pub fn compose(&self, canvas: &mut RgbaImage, title: &str) -> Vec<LinePlacement> {
        let (width, height) = canvas.dimensions();
        let lines = self.display_lines(title, width);
        let block = TextBlock::centered(width, height, lines.len(), &self.params);
        let mut compositor = Compositor::new(
            &self.faces,
            self.params.text_color,
            self.params.compositing,
        );

        lines
            .iter()
            .enumerate()
            .map(|(i, line)| compositor.draw_line(canvas, line, block.center_x, block.line_center_y(i)))
            .collect()
    }

    /// Decode `background` and draw `title` on it.
    pub fn generate(&self, background: &[u8], title: &str) -> CardResult<RgbaImage> {
        let mut canvas = decode_background(background)?;
        let placements = self.compose(&mut canvas, title);
        log::debug!(
            target: "Generator",
            "Rendered {} lines on {}x{} canvas",
            placements.len(), canvas.width(), canvas.height()
        );
        Ok(canvas)
    }

    /// [`Generator::generate`] followed by PNG encoding.
    pub fn render_png(&self, background: &[u8], title: &str) -> CardResult<Vec<u8>> {
        let canvas = self.generate(background, title)?;
        encode_png(&canvas)
    }
}
