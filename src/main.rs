use anyhow::{Context, Result, bail};
use ogcard::CardService;
use ogcard::card::slug_from_path;
use ogcard::platform::config::CardConfig;
use ogcard::platform::io::DirAssets;
use std::env;

const USAGE: &str = "usage: ogcard <asset-dir> <slug>[.png] [output.png]";

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        bail!(USAGE);
    }
    let asset_dir = &args[1];
    let slug = slug_from_path(&args[2]);
    let output = args
        .get(3)
        .cloned()
        .unwrap_or_else(|| format!("{slug}.png"));

    let assets = DirAssets::locate(asset_dir)
        .with_context(|| format!("asset directory not found: {asset_dir}"))?;
    let service = CardService::new(assets, CardConfig::from_env());

    let Some(png) = service.render(slug)? else {
        bail!("no OG metadata for {slug:?}");
    };

    std::fs::write(&output, &png).with_context(|| format!("failed to write {output}"))?;
    log::info!("Generated: {output} ({} bytes)", png.len());

    Ok(())
}
