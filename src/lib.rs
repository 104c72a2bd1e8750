//! Share-card (OG image) generation: an article title composited onto a
//! background template, wrapped and centered across a Latin and a CJK face.

pub mod card;
pub mod engine;
pub mod platform;
pub mod share;

pub use card::CardService;
pub use engine::{CardError, CardParams, Color, Compositing, Generator};
