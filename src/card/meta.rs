use std::collections::HashMap;

use anyhow::{Context, Result};
use serde::Deserialize;

/// OG画像用のメタデータ（`og-meta.json` の1記事分）
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct OgMeta {
    /// OG画像用タイトル（改行含む）
    pub title: String,
    /// 表示用タイトル（`\n` で改行を指定できる）
    #[serde(default)]
    pub display_title: Option<String>,
}

impl OgMeta {
    /// カードに描くタイトル
    pub fn card_title(&self) -> String {
        display_title(&self.title, self.display_title.as_deref())
    }
}

/// 記事スラッグ → メタデータ
pub type OgMetaMap = HashMap<String, OgMeta>;

pub fn parse_og_meta(bytes: &[u8]) -> Result<OgMetaMap> {
    serde_json::from_slice(bytes).context("Failed to parse OG metadata")
}

/// "my-article.png" → "my-article"
pub fn slug_from_path(path: &str) -> &str {
    let path = path.trim_start_matches('/');
    let name = path.rsplit('/').next().unwrap_or(path);
    name.strip_suffix(".png").unwrap_or(name)
}

/// 著者が書いた `\n`（バックスラッシュ + n）を改行に変換する
pub fn expand_line_break_markers(title: &str) -> String {
    title.replace("\\n", "\n")
}

/// OG画像に使うタイトル：表示用タイトルがあればそちらを優先する
pub fn display_title(title: &str, display_title: Option<&str>) -> String {
    match display_title.filter(|t| !t.is_empty()) {
        Some(t) => expand_line_break_markers(t),
        None => title.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_meta_file() {
        let json = r#"{
            "2026-01-22_created-my-own-blog": { "title": "ブログを\nつくった" },
            "hello": { "title": "Hello World" }
        }"#;
        let meta = parse_og_meta(json.as_bytes()).expect("parse");
        assert_eq!(meta.len(), 2);
        assert_eq!(meta["2026-01-22_created-my-own-blog"].title, "ブログを\nつくった");
        assert_eq!(meta["hello"].display_title, None);
    }

    #[test]
    fn card_title_uses_display_title() {
        let json = br#"{ "a": { "title": "Long title", "display_title": "Long\\ntitle" } }"#;
        let meta = parse_og_meta(json).expect("parse");
        assert_eq!(meta["a"].card_title(), "Long\ntitle");
    }

    #[test]
    fn rejects_malformed_meta() {
        assert!(parse_og_meta(b"[1, 2").is_err());
        assert!(parse_og_meta(br#"{"a": {"name": "x"}}"#).is_err());
    }

    #[test]
    fn slugs() {
        assert_eq!(slug_from_path("my-article.png"), "my-article");
        assert_eq!(slug_from_path("/og/my-article.png"), "my-article");
        assert_eq!(slug_from_path("my-article"), "my-article");
    }

    #[test]
    fn display_title_prefers_override_and_expands_markers() {
        assert_eq!(display_title("Plain", None), "Plain");
        assert_eq!(display_title("Plain", Some("")), "Plain");
        assert_eq!(display_title("Plain", Some(r"Line One\nLine Two")), "Line One\nLine Two");
    }
}
