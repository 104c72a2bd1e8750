use std::io::Cursor;

use image::{ImageFormat, ImageReader, RgbaImage};

use crate::engine::error::{CardError, CardResult};

// sanity limit to avoid blowing memory (arbitrary, can be tuned)
const MAX_DIM: u32 = 10000;

/// 背景画像をバイト列から読み込み、RGBA8形式のキャンバスにデコードする。
pub fn decode_background(bytes: &[u8]) -> CardResult<RgbaImage> {
    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| CardError::BackgroundDecode(image::ImageError::IoError(e)))?;
    let dyn_img = reader.decode().map_err(CardError::BackgroundDecode)?;

    let (width, height) = (dyn_img.width(), dyn_img.height());
    if width > MAX_DIM || height > MAX_DIM {
        return Err(CardError::BackgroundTooLarge(width, height));
    }

    Ok(dyn_img.to_rgba8())
}

/// キャンバスをPNGとしてエンコードする。
pub fn encode_png(canvas: &RgbaImage) -> CardResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    canvas
        .write_to(&mut out, ImageFormat::Png)
        .map_err(CardError::Encode)?;
    Ok(out.into_inner())
}
