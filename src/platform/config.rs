//! 環境変数による設定
//!
//! | 変数 | 値 |
//! |---|---|
//! | `OGCARD_FONT_SIZE` | フォントサイズ (px) |
//! | `OGCARD_LINE_HEIGHT` | 行送りの倍率 |
//! | `OGCARD_MAX_WIDTH` | キャンバス幅に対する1行の最大幅の割合 |
//! | `OGCARD_TEXT_COLOR` | `#rrggbb` / `#rgb` |
//! | `OGCARD_COMPOSITING` | `mask` / `glyph` |
//! | `OGCARD_BLANK_LINES` | `collapse` / `preserve` |
//! | `OGCARD_FONT_BACKEND` | `fontdue` / `outline` |
//!
//! 不正な値は警告を出して既定値のままにする。

use std::env;

use crate::engine::params::{CardParams, Color, Compositing};
use crate::platform::font::FontBackend;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct CardConfig {
    pub params: CardParams,
    pub font_backend: FontBackend,
}

impl CardConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// `lookup` から設定を読む（テスト用に環境変数を差し替えられる）
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        let params = &mut config.params;

        if let Some(v) = positive(&lookup, "OGCARD_FONT_SIZE") {
            params.font_size = v;
        }
        if let Some(v) = positive(&lookup, "OGCARD_LINE_HEIGHT") {
            params.line_height = v;
        }
        if let Some(v) = positive(&lookup, "OGCARD_MAX_WIDTH") {
            params.max_width_ratio = v;
        }
        if let Some(v) = with(&lookup, "OGCARD_TEXT_COLOR", Color::from_hex) {
            params.text_color = v;
        }
        if let Some(v) = with(&lookup, "OGCARD_COMPOSITING", |s| {
            match s.trim().to_ascii_lowercase().as_str() {
                "mask" | "luminance" => Some(Compositing::LuminanceMask),
                "glyph" | "per-glyph" => Some(Compositing::PerGlyph),
                _ => None,
            }
        }) {
            params.compositing = v;
        }
        if let Some(v) = with(&lookup, "OGCARD_BLANK_LINES", |s| {
            match s.trim().to_ascii_lowercase().as_str() {
                "collapse" => Some(false),
                "preserve" => Some(true),
                _ => None,
            }
        }) {
            params.preserve_blank_lines = v;
        }
        if let Some(v) = with(&lookup, "OGCARD_FONT_BACKEND", FontBackend::from_name) {
            config.font_backend = v;
        }

        config
    }
}

fn with<F, T>(lookup: &F, key: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T>
where
    F: Fn(&str) -> Option<String>,
{
    let raw = lookup(key)?;
    let value = parse(&raw);
    if value.is_none() {
        log::warn!(target: "Config", "Ignoring invalid {key}={raw:?}");
    }
    value
}

/// 正の有限値だけを受け付ける
fn positive(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<f32> {
    with(lookup, key, |s| {
        s.trim()
            .parse::<f32>()
            .ok()
            .filter(|v| v.is_finite() && *v > 0.0)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> CardConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        CardConfig::from_lookup(|k| vars.get(k).cloned())
    }

    #[test]
    fn empty_environment_gives_defaults() {
        assert_eq!(config(&[]), CardConfig::default());
    }

    #[test]
    fn reads_every_variable() {
        let c = config(&[
            ("OGCARD_FONT_SIZE", "48"),
            ("OGCARD_LINE_HEIGHT", "1.25"),
            ("OGCARD_MAX_WIDTH", "0.8"),
            ("OGCARD_TEXT_COLOR", "#000"),
            ("OGCARD_COMPOSITING", "glyph"),
            ("OGCARD_BLANK_LINES", "preserve"),
            ("OGCARD_FONT_BACKEND", "outline"),
        ]);
        assert_eq!(c.params.font_size, 48.0);
        assert_eq!(c.params.line_height, 1.25);
        assert_eq!(c.params.max_width_ratio, 0.8);
        assert_eq!(c.params.text_color, Color::BLACK);
        assert_eq!(c.params.compositing, Compositing::PerGlyph);
        assert!(c.params.preserve_blank_lines);
        assert_eq!(c.font_backend, FontBackend::Outline);
    }

    #[test]
    fn invalid_values_keep_defaults() {
        let c = config(&[
            ("OGCARD_FONT_SIZE", "huge"),
            ("OGCARD_TEXT_COLOR", "teal"),
            ("OGCARD_COMPOSITING", "magic"),
        ]);
        assert_eq!(c, CardConfig::default());
    }

    #[test]
    fn one_bad_size_keeps_the_others() {
        let c = config(&[
            ("OGCARD_FONT_SIZE", "48"),
            ("OGCARD_LINE_HEIGHT", "NaN"),
            ("OGCARD_MAX_WIDTH", "0"),
        ]);
        assert_eq!(c.params.font_size, 48.0);
        assert_eq!(c.params.line_height, CardParams::default().line_height);
        assert_eq!(c.params.max_width_ratio, CardParams::default().max_width_ratio);
        assert!(c.params.validate().is_ok());
    }

    #[test]
    fn non_positive_sizes_are_rejected() {
        let c = config(&[("OGCARD_FONT_SIZE", "-3"), ("OGCARD_TEXT_COLOR", "#000")]);
        assert_eq!(c.params.font_size, CardParams::default().font_size);
        assert_eq!(c.params.text_color, Color::BLACK);
    }
}
