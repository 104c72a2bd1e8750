//! Font face abstraction for measuring and rasterizing title text.
//!
//! # Overview
//!
//! This module defines the interface between the card engine and
//! concrete font backends (`fontdue`, `ab_glyph`, or the fallback box face).
//!
//! The engine holds at most one face per slot. A segment of text is routed
//! to a slot by its [`Script`]; when no face can take the segment it is
//! skipped entirely, contributing no width and drawing nothing.
//!
//! # Data Flow
//!
//! ```text
//! line → segment() → resolve_slot() → FontFace::measure / FontFace::draw
//! ```

use std::fmt;
use std::sync::Arc;

use crate::share::text::{Script, TextSegment, segment};

/* ============================
 * Face
 * ============================ */

/// A loaded font program at a fixed pixel size.
///
/// Implementations must be immutable after construction so a face can be
/// shared between concurrent generations.
pub trait FontFace: Send + Sync {
    /// Advance width of `text`, including kerning inside this face.
    fn measure(&self, text: &str) -> f32;

    /// Distance from the baseline to the top of the face, in pixels.
    fn ascent(&self) -> f32;

    /// Rasterize `text` with the pen starting at `(x, baseline)`.
    ///
    /// `plot` receives absolute pixel coordinates and a coverage in `0.0..=1.0`,
    /// once per covered pixel of each glyph. Returns the pen position after the
    /// last glyph.
    fn draw(
        &self,
        text: &str,
        x: f32,
        baseline: f32,
        plot: &mut dyn FnMut(i32, i32, f32),
    ) -> f32;
}

/* ============================
 * Slots
 * ============================ */

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FaceSlot {
    /// Latin / ASCII face
    Primary,
    /// CJK face
    Secondary,
}

impl fmt::Display for FaceSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Primary => write!(f, "primary"),
            Self::Secondary => write!(f, "secondary"),
        }
    }
}

/// Which slot renders a segment of `script`, given the faces present.
pub fn resolve_slot(has_primary: bool, has_secondary: bool, script: Script) -> Option<FaceSlot> {
    match (script, has_primary, has_secondary) {
        (Script::Cjk, _, true) => Some(FaceSlot::Secondary),
        (_, true, _) => Some(FaceSlot::Primary),
        _ => None,
    }
}

/* ============================
 * Face set
 * ============================ */

/// A segment paired with the face that renders it.
pub struct ResolvedSegment<'a> {
    pub segment: TextSegment,
    pub face: &'a dyn FontFace,
    pub width: f32,
}

#[derive(Clone, Default)]
pub struct FaceSet {
    primary: Option<Arc<dyn FontFace>>,
    secondary: Option<Arc<dyn FontFace>>,
}

impl FaceSet {
    pub fn new(primary: Option<Arc<dyn FontFace>>, secondary: Option<Arc<dyn FontFace>>) -> Self {
        Self { primary, secondary }
    }

    /// Single-face engine.
    pub fn single(face: Arc<dyn FontFace>) -> Self {
        Self::new(Some(face), None)
    }

    pub fn is_empty(&self) -> bool {
        self.primary.is_none() && self.secondary.is_none()
    }

    pub fn face(&self, slot: FaceSlot) -> Option<&dyn FontFace> {
        match slot {
            FaceSlot::Primary => self.primary.as_deref(),
            FaceSlot::Secondary => self.secondary.as_deref(),
        }
    }

    pub fn slot_for(&self, script: Script) -> Option<FaceSlot> {
        resolve_slot(self.primary.is_some(), self.secondary.is_some(), script)
    }

    pub fn resolve(&self, script: Script) -> Option<&dyn FontFace> {
        self.slot_for(script).and_then(|slot| self.face(slot))
    }

    /// Segments of `line` that have a face, with their measured widths.
    ///
    /// Both measurement and drawing go through this, so a skipped segment is
    /// skipped consistently.
    pub fn resolve_line(&self, line: &str) -> Vec<ResolvedSegment<'_>> {
        segment(line)
            .into_iter()
            .filter_map(|seg| match self.resolve(seg.script) {
                Some(face) => {
                    let width = face.measure(&seg.text);
                    Some(ResolvedSegment {
                        segment: seg,
                        face,
                        width,
                    })
                }
                None => {
                    log::debug!(target: "FaceSet::resolve_line", "No face for {:?} segment {:?}, skipped", seg.script, seg.text);
                    None
                }
            })
            .collect()
    }

    /// Total width of `line` across faces.
    pub fn measure(&self, line: &str) -> f32 {
        self.resolve_line(line).iter().map(|r| r.width).sum()
    }

    /// Largest ascent among the loaded faces.
    pub fn ascent(&self) -> Option<f32> {
        [self.primary.as_deref(), self.secondary.as_deref()]
            .into_iter()
            .flatten()
            .map(|face| face.ascent())
            .reduce(f32::max)
    }
}

impl fmt::Debug for FaceSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FaceSet")
            .field("primary", &self.primary.is_some())
            .field("secondary", &self.secondary.is_some())
            .finish()
    }
}

/* ============================
 * Fallback
 * ============================ */

pub mod fallback;
pub use fallback::FallbackFace;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_table() {
        use FaceSlot::*;
        use Script::*;
        let cases = [
            (true, true, Default, Some(Primary)),
            (true, true, Cjk, Some(Secondary)),
            (true, false, Cjk, Some(Primary)),
            (false, true, Cjk, Some(Secondary)),
            (false, true, Default, None),
            (false, false, Default, None),
            (false, false, Cjk, None),
            (true, false, Default, Some(Primary)),
        ];
        for (p, s, script, expected) in cases {
            assert_eq!(resolve_slot(p, s, script), expected, "{p} {s} {script:?}");
        }
    }

    #[test]
    fn measure_sums_segments_with_their_faces() {
        let faces = FaceSet::new(
            Some(Arc::new(FallbackFace::new(10.0, 0.5))),
            Some(Arc::new(FallbackFace::new(10.0, 1.0))),
        );
        // "ab" → 2×5, "日本" → 2×10
        assert!((faces.measure("ab日本") - 30.0).abs() < 1e-4);
    }

    #[test]
    fn missing_secondary_falls_back_to_primary() {
        let faces = FaceSet::single(Arc::new(FallbackFace::new(10.0, 0.5)));
        assert!((faces.measure("日本") - 10.0).abs() < 1e-4);
    }

    #[test]
    fn unresolvable_segments_contribute_nothing() {
        let faces = FaceSet::new(None, Some(Arc::new(FallbackFace::new(10.0, 1.0))));
        assert_eq!(faces.measure("abc"), 0.0);
        assert!((faces.measure("abc日") - 10.0).abs() < 1e-4);
        assert_eq!(faces.resolve_line("abc日").len(), 1);
    }

    #[test]
    fn ascent_is_the_largest_loaded() {
        let faces = FaceSet::new(
            Some(Arc::new(FallbackFace::new(10.0, 0.5))),
            Some(Arc::new(FallbackFace::new(20.0, 1.0))),
        );
        assert_eq!(faces.ascent(), Some(16.0));
        assert_eq!(FaceSet::default().ascent(), None);
    }
}
