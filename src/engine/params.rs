use crate::engine::error::{CardError, CardResult};

// =========================
//          Color
// =========================

/// Straight (non-premultiplied) RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color(pub u8, pub u8, pub u8, pub u8);

impl Color {
    pub const BLACK: Color = Color(0, 0, 0, 255);
    pub const WHITE: Color = Color(255, 255, 255, 255);
    /// Dark neutral gray used for card titles
    pub const TITLE_GRAY: Color = Color(74, 75, 74, 255);

    /// `#rgb` / `#rrggbb` / `#rrggbbaa`
    pub fn from_hex(hex: &str) -> Option<Color> {
        let hex = hex.trim().trim_start_matches('#');
        if !hex.is_ascii() {
            return None;
        }
        let channel = |s: &str| u8::from_str_radix(s, 16).ok();
        match hex.len() {
            3 => Some(Color(
                channel(&hex[0..1].repeat(2))?,
                channel(&hex[1..2].repeat(2))?,
                channel(&hex[2..3].repeat(2))?,
                255,
            )),
            6 => Some(Color(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                255,
            )),
            8 => Some(Color(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
                channel(&hex[6..8])?,
            )),
            _ => None,
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::TITLE_GRAY
    }
}

// =========================
//        Parameters
// =========================

/// How glyph coverage reaches the canvas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Compositing {
    /// Blend every glyph pixel onto the canvas as it is rasterized.
    PerGlyph,
    /// Rasterize the line black-on-white into a scratch buffer and blend the
    /// inverted luminance once. Overlapping glyphs do not double-darken.
    #[default]
    LuminanceMask,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CardParams {
    /// Em size in pixels
    pub font_size: f32,
    /// Multiplier on `font_size`
    pub line_height: f32,
    /// Fraction of the canvas width a line may occupy
    pub max_width_ratio: f32,
    pub text_color: Color,
    pub compositing: Compositing,
    /// Keep an empty line for each blank chunk between explicit breaks
    pub preserve_blank_lines: bool,
}

impl Default for CardParams {
    fn default() -> Self {
        Self {
            font_size: 56.0,
            line_height: 1.5,
            max_width_ratio: 0.7,
            text_color: Color::TITLE_GRAY,
            compositing: Compositing::LuminanceMask,
            preserve_blank_lines: false,
        }
    }
}

impl CardParams {
    pub fn validate(&self) -> CardResult<()> {
        if !(self.font_size.is_finite() && self.font_size > 0.0) {
            return Err(CardError::InvalidParams("font size must be a positive number"));
        }
        if !(self.line_height.is_finite() && self.line_height > 0.0) {
            return Err(CardError::InvalidParams("line height must be a positive number"));
        }
        if !(self.max_width_ratio.is_finite() && self.max_width_ratio > 0.0) {
            return Err(CardError::InvalidParams("max width ratio must be a positive number"));
        }
        Ok(())
    }

    pub fn line_advance(&self) -> f32 {
        self.font_size * self.line_height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors() {
        assert_eq!(Color::from_hex("#4a4b4a"), Some(Color::TITLE_GRAY));
        assert_eq!(Color::from_hex("fff"), Some(Color::WHITE));
        assert_eq!(Color::from_hex("#00000080"), Some(Color(0, 0, 0, 128)));
        assert_eq!(Color::from_hex("#12345"), None);
        assert_eq!(Color::from_hex("#zzzzzz"), None);
        assert_eq!(Color::from_hex("#ああ"), None);
    }

    #[test]
    fn defaults_validate() {
        assert!(CardParams::default().validate().is_ok());
        assert!((CardParams::default().line_advance() - 84.0).abs() < 1e-6);
    }

    #[test]
    fn rejects_bad_sizes() {
        let params = CardParams {
            font_size: 0.0,
            ..CardParams::default()
        };
        assert!(matches!(params.validate(), Err(CardError::InvalidParams(_))));

        let params = CardParams {
            max_width_ratio: f32::NAN,
            ..CardParams::default()
        };
        assert!(params.validate().is_err());
    }
}
