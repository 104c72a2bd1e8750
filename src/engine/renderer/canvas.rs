use image::{GrayImage, Luma, Rgba, RgbaImage};

use crate::engine::params::Color;

/// "over" 合成：単色 `color` を `coverage` の不透明度で `dst` に重ねる
///
/// `dst` はストレートアルファ（非乗算済み）。
pub fn blend_over(dst: &mut Rgba<u8>, color: Color, coverage: f32) {
    let sa = coverage.clamp(0.0, 1.0) * color.3 as f32 / 255.0;
    if sa <= 0.0 {
        return;
    }

    let da = dst[3] as f32 / 255.0;
    let out_a = sa + da * (1.0 - sa);
    let src = [color.0, color.1, color.2];

    for i in 0..3 {
        let c = (src[i] as f32 * sa + dst[i] as f32 * da * (1.0 - sa)) / out_a;
        dst[i] = c.round().clamp(0.0, 255.0) as u8;
    }
    dst[3] = (out_a * 255.0).round().clamp(0.0, 255.0) as u8;
}

/// 範囲外を無視して1ピクセル合成する
pub fn blend_pixel(canvas: &mut RgbaImage, x: i32, y: i32, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x as u32 >= canvas.width() || y as u32 >= canvas.height() {
        return;
    }
    blend_over(canvas.get_pixel_mut(x as u32, y as u32), color, coverage);
}

/// 白地に黒で描いた作業用バッファ
///
/// 重なったグリフは黒の上に黒を重ねるだけなので、輝度を反転したマスクは
/// 交差部分で濃くなりすぎない。
pub struct LuminanceMask {
    scratch: GrayImage,
    // 描画された範囲 (min_x, min_y, max_x, max_y)、max は含まない
    dirty: Option<(u32, u32, u32, u32)>,
}

impl LuminanceMask {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            scratch: GrayImage::from_pixel(width, height, Luma([255])),
            dirty: None,
        }
    }

    /// 黒を `coverage` で重ねる
    pub fn plot(&mut self, x: i32, y: i32, coverage: f32) {
        if x < 0 || y < 0 || x as u32 >= self.scratch.width() || y as u32 >= self.scratch.height()
        {
            return;
        }
        let (x, y) = (x as u32, y as u32);
        let c = coverage.clamp(0.0, 1.0);
        let px = self.scratch.get_pixel_mut(x, y);
        px[0] = (px[0] as f32 * (1.0 - c)).round() as u8;

        self.dirty = Some(match self.dirty {
            None => (x, y, x + 1, y + 1),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x + 1), y1.max(y + 1)),
        });
    }

    /// 反転輝度を不透明度としてキャンバスに一度だけ合成する
    pub fn composite(&self, canvas: &mut RgbaImage, color: Color) {
        let Some((x0, y0, x1, y1)) = self.dirty else {
            return;
        };
        let x1 = x1.min(canvas.width());
        let y1 = y1.min(canvas.height());

        for y in y0..y1 {
            for x in x0..x1 {
                let alpha = 255 - self.scratch.get_pixel(x, y)[0];
                if alpha == 0 {
                    continue;
                }
                blend_over(canvas.get_pixel_mut(x, y), color, alpha as f32 / 255.0);
            }
        }
    }

    /// 描画された範囲だけ白に戻す
    pub fn clear(&mut self) {
        if let Some((x0, y0, x1, y1)) = self.dirty.take() {
            for y in y0..y1 {
                for x in x0..x1 {
                    self.scratch.put_pixel(x, y, Luma([255]));
                }
            }
        }
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.scratch.dimensions()
    }

    #[cfg(test)]
    fn is_empty(&self) -> bool {
        self.dirty.is_none()
    }

    #[cfg(test)]
    fn alpha_at(&self, x: u32, y: u32) -> u8 {
        255 - self.scratch.get_pixel(x, y)[0]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_coverage_replaces_opaque_pixel() {
        let mut px = Rgba([255, 255, 255, 255]);
        blend_over(&mut px, Color::TITLE_GRAY, 1.0);
        assert_eq!(px, Rgba([74, 75, 74, 255]));
    }

    #[test]
    fn zero_coverage_is_a_no_op() {
        let mut px = Rgba([10, 20, 30, 40]);
        blend_over(&mut px, Color::BLACK, 0.0);
        assert_eq!(px, Rgba([10, 20, 30, 40]));
    }

    #[test]
    fn half_coverage_mixes() {
        let mut px = Rgba([255, 255, 255, 255]);
        blend_over(&mut px, Color::BLACK, 0.5);
        assert_eq!(px, Rgba([128, 128, 128, 255]));
    }

    #[test]
    fn blending_onto_transparent_keeps_text_color() {
        let mut px = Rgba([0, 0, 0, 0]);
        blend_over(&mut px, Color(200, 100, 50, 255), 0.5);
        assert_eq!(px, Rgba([200, 100, 50, 128]));
    }

    #[test]
    fn out_of_bounds_pixels_are_ignored() {
        let mut canvas = RgbaImage::from_pixel(2, 2, Rgba([255, 255, 255, 255]));
        blend_pixel(&mut canvas, -1, 0, Color::BLACK, 1.0);
        blend_pixel(&mut canvas, 0, 2, Color::BLACK, 1.0);
        assert!(canvas.pixels().all(|p| *p == Rgba([255, 255, 255, 255])));
    }

    #[test]
    fn mask_accumulates_overlaps_like_over() {
        let mut mask = LuminanceMask::new(4, 4);
        assert!(mask.is_empty());
        mask.plot(1, 1, 0.5);
        mask.plot(1, 1, 0.5);
        // 255 → 128 → 64
        assert_eq!(mask.alpha_at(1, 1), 191);
        assert_eq!(mask.alpha_at(0, 0), 0);

        let mut canvas = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        mask.composite(&mut canvas, Color::BLACK);
        assert_eq!(*canvas.get_pixel(1, 1), Rgba([64, 64, 64, 255]));
        assert_eq!(*canvas.get_pixel(2, 2), Rgba([255, 255, 255, 255]));
    }

    #[test]
    fn cleared_mask_is_reusable() {
        let mut mask = LuminanceMask::new(4, 4);
        mask.plot(2, 3, 1.0);
        mask.clear();
        assert!(mask.is_empty());
        assert_eq!(mask.alpha_at(2, 3), 0);

        let mut canvas = RgbaImage::from_pixel(4, 4, Rgba([255, 255, 255, 255]));
        mask.plot(0, 0, 1.0);
        mask.composite(&mut canvas, Color::BLACK);
        assert_eq!(*canvas.get_pixel(0, 0), Rgba([0, 0, 0, 255]));
        assert_eq!(*canvas.get_pixel(2, 3), Rgba([255, 255, 255, 255]));
    }
}
