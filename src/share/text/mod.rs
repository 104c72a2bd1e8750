//! 文字種の分類とセグメント分割
//!
//! フォント選択のためだけに使う粗い分類で、Unicode の script タグとは別物。

/// 文字種
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Script {
    /// ASCII / ラテン文字など（プライマリフォントで描画する）
    Default,
    /// ひらがな・カタカナ・漢字・CJK句読点・全角文字
    Cjk,
}

impl Script {
    pub fn of(ch: char) -> Self {
        if is_cjk(ch) { Script::Cjk } else { Script::Default }
    }
}

/// CJK 系ブロックに含まれる文字かどうか
pub fn is_cjk(ch: char) -> bool {
    matches!(
        ch as u32,
        0x3040..=0x309F // ひらがな
            | 0x30A0..=0x30FF // カタカナ
            | 0x4E00..=0x9FFF // 漢字
            | 0x3000..=0x303F // CJK句読点
            | 0xFF00..=0xFFEF // 全角文字
    )
}

/// 同じ文字種が連続する区間
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextSegment {
    pub text: String,
    pub script: Script,
}

/// テキストを文字種ごとの最大区間に分割する
///
/// 連結すると元の文字列に戻り、隣り合う区間の文字種は必ず異なる。
pub fn segment(text: &str) -> Vec<TextSegment> {
    let mut segments: Vec<TextSegment> = Vec::new();

    for ch in text.chars() {
        let script = Script::of(ch);
        match segments.last_mut() {
            Some(last) if last.script == script => last.text.push(ch),
            _ => segments.push(TextSegment {
                text: ch.to_string(),
                script,
            }),
        }
    }

    segments
}
