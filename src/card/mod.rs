//! Article-facing layer: metadata lookup, asset loading, card rendering.

pub mod meta;
pub mod service;

pub use meta::{OgMeta, OgMetaMap, display_title, expand_line_break_markers, slug_from_path};
pub use service::CardService;
