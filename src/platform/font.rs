//! フォントデータからフェイスを生成する
//!
//! `fontdue` によるビットマップ化と、`ab_glyph` のアウトライン描画の2種類を持つ。
//! どちらも em サイズ（px）を基準にするので、同じサイズなら送り幅はほぼ一致する。

use std::sync::Arc;

use ab_glyph::{Font as _, FontArc, GlyphId, PxScale, ScaleFont, point};
use fontdue::{Font as FontDue, FontSettings};

use crate::engine::bridge::text::{FaceSlot, FontFace};
use crate::engine::error::{CardError, CardResult};

/// 使用するラスタライザ
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FontBackend {
    #[default]
    Fontdue,
    Outline,
}

impl FontBackend {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().as_str() {
            "fontdue" => Some(Self::Fontdue),
            "outline" | "ab_glyph" => Some(Self::Outline),
            _ => None,
        }
    }
}

/* ============================
 * fontdue
 * ============================ */

pub struct FontdueFace {
    font: FontDue,
    size: f32,
}

impl FontdueFace {
    pub fn from_bytes(bytes: &[u8], size: f32) -> Result<Self, &'static str> {
        let settings = FontSettings {
            scale: size,
            ..FontSettings::default()
        };
        let font = FontDue::from_bytes(bytes, settings)?;
        Ok(Self { font, size })
    }

    fn kern(&self, prev: Option<char>, ch: char) -> f32 {
        prev.and_then(|p| self.font.horizontal_kern(p, ch, self.size))
            .unwrap_or(0.0)
    }
}

impl FontFace for FontdueFace {
    fn measure(&self, text: &str) -> f32 {
        let mut width = 0.0;
        let mut prev = None;
        for ch in text.chars() {
            width += self.kern(prev, ch) + self.font.metrics(ch, self.size).advance_width;
            prev = Some(ch);
        }
        width
    }

    fn ascent(&self) -> f32 {
        self.font
            .horizontal_line_metrics(self.size)
            .map(|m| m.ascent)
            .unwrap_or(self.size * 0.8)
    }

    fn draw(
        &self,
        text: &str,
        x: f32,
        baseline: f32,
        plot: &mut dyn FnMut(i32, i32, f32),
    ) -> f32 {
        let baseline = baseline.round() as i32;
        let mut pen = x;
        let mut prev = None;

        for ch in text.chars() {
            pen += self.kern(prev, ch);
            prev = Some(ch);

            let (m, bitmap) = self.font.rasterize(ch, self.size);
            // ymin はベースラインからビットマップ下端までの距離（上向き正）
            let left = pen.round() as i32 + m.xmin;
            let top = baseline - (m.height as i32 + m.ymin);

            for row in 0..m.height {
                for col in 0..m.width {
                    let v = bitmap[row * m.width + col];
                    if v == 0 {
                        continue;
                    }
                    plot(left + col as i32, top + row as i32, v as f32 / 255.0);
                }
            }

            pen += m.advance_width;
        }

        pen
    }
}

/* ============================
 * ab_glyph
 * ============================ */

pub struct OutlineFace {
    font: FontArc,
    scale: PxScale,
}

impl OutlineFace {
    pub fn from_bytes(bytes: Vec<u8>, size: f32) -> Result<Self, ab_glyph::InvalidFont> {
        let font = FontArc::try_from_vec(bytes)?;
        // PxScale は ascent - descent 基準なので em 基準に換算する
        let units_per_em = font.units_per_em().unwrap_or(1000.0);
        let scale = PxScale::from(size * font.height_unscaled() / units_per_em);
        Ok(Self { font, scale })
    }
}

impl FontFace for OutlineFace {
    fn measure(&self, text: &str) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut width = 0.0;
        let mut prev: Option<GlyphId> = None;
        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(p) = prev {
                width += scaled.kern(p, id);
            }
            width += scaled.h_advance(id);
            prev = Some(id);
        }
        width
    }

    fn ascent(&self) -> f32 {
        self.font.as_scaled(self.scale).ascent()
    }

    fn draw(
        &self,
        text: &str,
        x: f32,
        baseline: f32,
        plot: &mut dyn FnMut(i32, i32, f32),
    ) -> f32 {
        let scaled = self.font.as_scaled(self.scale);
        let mut pen = x;
        let mut prev: Option<GlyphId> = None;

        for ch in text.chars() {
            let id = scaled.glyph_id(ch);
            if let Some(p) = prev {
                pen += scaled.kern(p, id);
            }
            prev = Some(id);

            let glyph = id.with_scale_and_position(self.scale, point(pen.round(), baseline));
            if let Some(outlined) = self.font.outline_glyph(glyph) {
                let bounds = outlined.px_bounds();
                let (bx, by) = (bounds.min.x as i32, bounds.min.y as i32);
                outlined.draw(|gx, gy, c| {
                    if c > 0.0 {
                        plot(bx + gx as i32, by + gy as i32, c);
                    }
                });
            }

            pen += scaled.h_advance(id);
        }

        pen
    }
}

/* ============================
 * Loaders
 * ============================ */

/// フォントデータを解析してフェイスを作る
pub fn load_face(
    slot: FaceSlot,
    bytes: &[u8],
    size: f32,
    backend: FontBackend,
) -> CardResult<Arc<dyn FontFace>> {
    let parse_error = |reason: String| CardError::FontParse { slot, reason };
    match backend {
        FontBackend::Fontdue => FontdueFace::from_bytes(bytes, size)
            .map(|f| Arc::new(f) as Arc<dyn FontFace>)
            .map_err(|e| parse_error(e.to_string())),
        FontBackend::Outline => OutlineFace::from_bytes(bytes.to_vec(), size)
            .map(|f| Arc::new(f) as Arc<dyn FontFace>)
            .map_err(|e| parse_error(e.to_string())),
    }
}

/// 空データや解析失敗は「フェイスなし」として扱う
///
/// そのフェイスに割り当たる区間は描画時にスキップされる。
pub fn load_optional_face(
    slot: FaceSlot,
    bytes: Option<&[u8]>,
    size: f32,
    backend: FontBackend,
) -> Option<Arc<dyn FontFace>> {
    let bytes = bytes.filter(|b| !b.is_empty())?;
    match load_face(slot, bytes, size, backend) {
        Ok(face) => Some(face),
        Err(e) => {
            log::warn!(target: "Font", "{e}; {slot} face treated as absent");
            None
        }
    }
}
