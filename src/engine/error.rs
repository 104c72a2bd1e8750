use std::fmt;

use crate::engine::bridge::text::FaceSlot;

#[derive(Debug)]
pub enum CardError {
    // Input
    BackgroundDecode(image::ImageError),
    BackgroundTooLarge(u32, u32),
    FontParse { slot: FaceSlot, reason: String },
    InvalidParams(&'static str),

    // Output
    Encode(image::ImageError),
}

impl fmt::Display for CardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use CardError::*;
        match self {
            BackgroundDecode(e) => write!(f, "failed to decode background image: {e}"),
            BackgroundTooLarge(w, h) => write!(f, "background image is too large: {w}x{h}"),
            FontParse { slot, reason } => write!(f, "failed to parse {slot} font: {reason}"),
            InvalidParams(msg) => write!(f, "invalid card parameters: {msg}"),
            Encode(e) => write!(f, "failed to encode card image: {e}"),
        }
    }
}

impl std::error::Error for CardError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CardError::BackgroundDecode(e) | CardError::Encode(e) => Some(e),
            _ => None,
        }
    }
}

pub type CardResult<T> = Result<T, CardError>;
