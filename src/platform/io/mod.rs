use anyhow::Context;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// カード生成に使うアセットの取得元
///
/// 見つからない場合は `Ok(None)`、読み込みに失敗した場合は `Err`。
pub trait AssetSource: Send + Sync {
    fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, anyhow::Error>;
}

/// ディレクトリ配下のファイルをキー（相対パス）で読む
#[derive(Debug, Clone)]
pub struct DirAssets {
    root: PathBuf,
}

impl DirAssets {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// アセットディレクトリを探す。
    /// 順序は以下の通り：
    /// - <dir>
    /// - 実行ファイルのあるディレクトリ/<dir>
    /// - カレントディレクトリ/<dir>
    pub fn locate(dir: &str) -> Option<Self> {
        let mut candidates: Vec<PathBuf> = vec![PathBuf::from(dir)];

        if let Ok(exe) = std::env::current_exe()
            && let Some(parent) = exe.parent()
        {
            candidates.push(parent.join(dir));
        }
        if let Ok(cd) = std::env::current_dir() {
            candidates.push(cd.join(dir));
        }

        candidates.into_iter().find(|c| c.is_dir()).map(Self::new)
    }
}

impl AssetSource for DirAssets {
    fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, anyhow::Error> {
        // ルート外への参照は拒否
        if Path::new(key)
            .components()
            .any(|c| !matches!(c, std::path::Component::Normal(_)))
        {
            anyhow::bail!("Invalid asset key: {key}");
        }

        let path = self.root.join(key);
        match std::fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e).context(format!("Failed to read {}", path.display())),
        }
    }
}

/// メモリ上のアセット
impl AssetSource for HashMap<String, Vec<u8>> {
    fn fetch(&self, key: &str) -> Result<Option<Vec<u8>>, anyhow::Error> {
        Ok(self.get(key).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dir_assets_read_files_and_report_missing() {
        let root = std::env::temp_dir().join(format!("ogcard-assets-{}", std::process::id()));
        std::fs::create_dir_all(root.join("fonts")).expect("mkdir");
        std::fs::write(root.join("fonts/a.ttf"), b"font").expect("write");

        let assets = DirAssets::new(&root);
        assert_eq!(assets.fetch("fonts/a.ttf").expect("fetch"), Some(b"font".to_vec()));
        assert_eq!(assets.fetch("fonts/b.ttf").expect("fetch"), None);
        assert!(assets.fetch("../etc/passwd").is_err());
        assert!(assets.fetch("/etc/passwd").is_err());

        std::fs::remove_dir_all(&root).ok();
    }

    #[test]
    fn map_assets() {
        let mut map = HashMap::new();
        map.insert("og-meta.json".to_string(), b"{}".to_vec());
        assert_eq!(map.fetch("og-meta.json").expect("fetch"), Some(b"{}".to_vec()));
        assert_eq!(map.fetch("other").expect("fetch"), None);
    }
}
