use anyhow::{Context, Result, anyhow};
use once_cell::sync::OnceCell;

use crate::card::meta::{parse_og_meta, slug_from_path};
use crate::engine::generator::Generator;
use crate::platform::config::CardConfig;
use crate::platform::io::AssetSource;

pub const META_KEY: &str = "og-meta.json";
pub const TEMPLATE_KEY: &str = "templates/blog-ogp-tmpl.png";
pub const PRIMARY_FONT_KEY: &str = "fonts/DMSans-Bold.ttf";
pub const SECONDARY_FONT_KEY: &str = "fonts/NotoSansJP-Bold.ttf";

/// 一度読み込んだら使い回すアセット
struct Loaded {
    template: Vec<u8>,
    generator: Generator,
}

/// 記事ごとのOG画像を生成するサービス
///
/// テンプレートとフォントは最初のリクエストで読み込み、以降は共有する。
/// `og-meta.json` は記事の追加に追従するため毎回読み直す。
pub struct CardService<A: AssetSource> {
    assets: A,
    config: CardConfig,
    loaded: OnceCell<Loaded>,
}

impl<A: AssetSource> CardService<A> {
    pub fn new(assets: A, config: CardConfig) -> Self {
        Self {
            assets,
            config,
            loaded: OnceCell::new(),
        }
    }

    /// `path`（"my-article.png" など）のカードをPNGで返す
    ///
    /// 記事が存在しなければ `Ok(None)`。
    pub fn render(&self, path: &str) -> Result<Option<Vec<u8>>> {
        let slug = slug_from_path(path);
        log::info!(target: "CardService", "Rendering card for {slug:?}");

        let Some(title) = self.title_for(slug)? else {
            log::info!(target: "CardService", "No OG metadata for {slug:?}");
            return Ok(None);
        };

        self.render_title(&title).map(Some)
    }

    /// 任意のタイトルでカードを生成する
    pub fn render_title(&self, title: &str) -> Result<Vec<u8>> {
        let loaded = self.loaded.get_or_try_init(|| self.load())?;
        let png = loaded
            .generator
            .render_png(&loaded.template, title)
            .context("Failed to generate OG image")?;
        Ok(png)
    }

    fn title_for(&self, slug: &str) -> Result<Option<String>> {
        let bytes = self
            .assets
            .fetch(META_KEY)?
            .ok_or_else(|| anyhow!("OG metadata not found"))?;
        let mut meta = parse_og_meta(&bytes)?;
        Ok(meta.remove(slug).map(|m| m.card_title()))
    }

    fn load(&self) -> Result<Loaded> {
        let template = self.require(TEMPLATE_KEY, "Template")?;
        let primary = self.require(PRIMARY_FONT_KEY, "ASCII font")?;
        let secondary = self.require(SECONDARY_FONT_KEY, "Japanese font")?;

        let generator = Generator::from_font_bytes(
            Some(primary.as_slice()),
            Some(secondary.as_slice()),
            self.config.params.clone(),
            self.config.font_backend,
        )
        .context("Failed to create OG generator")?;

        log::info!(target: "CardService", "Loaded template and fonts ({:?})", generator.faces());
        Ok(Loaded {
            template,
            generator,
        })
    }

    fn require(&self, key: &str, what: &str) -> Result<Vec<u8>> {
        self.assets
            .fetch(key)
            .with_context(|| format!("Failed to read {what}"))?
            .ok_or_else(|| anyhow!("{what} not found"))
    }
}
