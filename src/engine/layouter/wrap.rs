//! 文字単位の貪欲な折り返し
//!
//! CJK には単語境界の空白がないため、単語単位ではなく1文字ずつ幅を測って折り返す。
//! ラテン文字の単語が途中で切れることはあるが、タイトル程度の長さでは許容する。

use crate::engine::bridge::text::FaceSet;

/// 1つの明示的な行を `max_width` に収まる表示行に折り返す
///
/// 1文字だけで `max_width` を超える場合、その文字は単独の行になる。
pub fn wrap_line(line: &str, max_width: f32, faces: &FaceSet) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for ch in line.chars() {
        let mut candidate = current.clone();
        candidate.push(ch);

        if faces.measure(&candidate) <= max_width {
            current = candidate;
        } else {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            current.push(ch);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

/// タイトル全体を表示行に分解する
///
/// 改行文字で明示的に区切った後、各行を [`wrap_line`] で折り返して順に連結する。
/// 空行は `preserve_blank_lines` が false なら消え、true なら空の表示行として残る。
pub fn break_title(
    title: &str,
    max_width: f32,
    faces: &FaceSet,
    preserve_blank_lines: bool,
) -> Vec<String> {
    let mut lines = Vec::new();

    for chunk in title.split('\n') {
        // CR は無視（CRLF は \n で処理）
        let chunk = chunk.strip_suffix('\r').unwrap_or(chunk);

        if chunk.is_empty() {
            if preserve_blank_lines {
                lines.push(String::new());
            }
            continue;
        }

        lines.extend(wrap_line(chunk, max_width, faces));
    }

    log::debug!(target: "Layouter::break_title", "{:?} -> {} display lines", title, lines.len());
    lines
}
