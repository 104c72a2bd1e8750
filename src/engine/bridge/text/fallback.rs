use super::FontFace;

/// Fallback face.
///
/// This implementation does not rely on any font program.
/// Every character advances by `font_size * advance_ratio` and non-whitespace
/// characters are drawn as solid boxes from the baseline up to the ascent.
/// Intended for testing, bring-up, and environments without font data.
#[derive(Debug, Clone)]
pub struct FallbackFace {
    pub font_size: f32,
    pub advance_ratio: f32,
    /// Coverage of every box pixel
    pub coverage: f32,
}

impl Default for FallbackFace {
    fn default() -> Self {
        Self::new(16.0, 0.6)
    }
}

impl FallbackFace {
    pub fn new(font_size: f32, advance_ratio: f32) -> Self {
        Self {
            font_size: font_size.max(1.0),
            advance_ratio,
            coverage: 1.0,
        }
    }

    pub fn with_coverage(mut self, coverage: f32) -> Self {
        self.coverage = coverage.clamp(0.0, 1.0);
        self
    }

    fn advance(&self) -> f32 {
        self.font_size * self.advance_ratio
    }
}

impl FontFace for FallbackFace {
    fn measure(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.advance()
    }

    fn ascent(&self) -> f32 {
        self.font_size * 0.8
    }

    fn draw(
        &self,
        text: &str,
        x: f32,
        baseline: f32,
        plot: &mut dyn FnMut(i32, i32, f32),
    ) -> f32 {
        let bottom = baseline.round() as i32;
        let top = bottom - self.ascent().round() as i32;
        let mut pen = x;

        for ch in text.chars() {
            let left = pen.round() as i32;
            let right = (pen + self.advance()).round() as i32;
            if !ch.is_whitespace() {
                for py in top..bottom {
                    for px in left..right {
                        plot(px, py, self.coverage);
                    }
                }
            }
            pen += self.advance();
        }

        pen
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fallback_measure_simple() {
        let face = FallbackFace::new(10.0, 0.5);
        assert!((face.measure("abc") - 15.0).abs() < 1e-6, "width mismatch");
        assert!((face.ascent() - 8.0).abs() < 1e-6, "ascent mismatch");
    }

    #[test]
    fn fallback_draw_boxes_and_skips_spaces() {
        let face = FallbackFace::new(10.0, 0.5);
        let mut pixels = Vec::new();
        let end = face.draw("a b", 2.0, 20.0, &mut |x, y, c| pixels.push((x, y, c)));

        assert!((end - 17.0).abs() < 1e-6);
        // 2 boxes of 5x8
        assert_eq!(pixels.len(), 2 * 5 * 8);
        assert!(pixels.iter().all(|&(_, y, _)| (12..20).contains(&y)));
        assert_eq!(pixels.iter().map(|p| p.0).min(), Some(2));
        assert_eq!(pixels.iter().map(|p| p.0).max(), Some(16));
        assert!(!pixels.iter().any(|&(x, _, _)| (7..12).contains(&x)));
    }
}
