//! Sprite decoding and Kitty graphics sequences

use std::io::Cursor;

use base64::{engine::general_purpose, Engine as _};
use image::{GenericImageView, ImageFormat};
use serde::{Deserialize, Serialize};

/// Terminal cells are roughly twice as tall as they are wide.
const CELL_ASPECT: f32 = 2.0;

/// Kitty sends payloads in chunks of at most 4096 bytes.
const KITTY_CHUNK: usize = 4096;

/// Kitty `f=100`: payload is a PNG file
const KITTY_FORMAT_PNG: u32 = 100;

/// Image id used for the detail card sprite
pub const DETAIL_IMAGE_ID: u32 = 1;

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum SpriteError {
    #[error("sprite decode failed: {0}")]
    Decode(String),
    #[error("sprite encode failed: {0}")]
    Encode(String),
}

/// A decoded sprite, kept as base64 PNG ready for the terminal
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpriteImage {
    pub payload: String,
    pub width: u32,
    pub height: u32,
}

impl SpriteImage {
    /// Largest (cols, rows) box that keeps the image's aspect ratio
    pub fn fit(&self, max_cols: u16, max_rows: u16) -> (u16, u16) {
        if max_cols == 0 || max_rows == 0 || self.height == 0 {
            return (max_cols, max_rows);
        }
        let ratio = self.width as f32 / self.height as f32;
        let cols_at_max_rows = ratio * max_rows as f32 * CELL_ASPECT;
        if cols_at_max_rows <= max_cols as f32 {
            return ((cols_at_max_rows.round() as u16).max(1), max_rows);
        }
        let rows_at_max_cols = max_cols as f32 / (ratio * CELL_ASPECT);
        (max_cols, (rows_at_max_cols.round() as u16).clamp(1, max_rows))
    }

    /// Kitty graphics escape sequence that transmits and shows the sprite
    /// scaled to `cols` x `rows` cells at the cursor.
    pub fn kitty_sequence(&self, cols: u16, rows: u16, image_id: u32) -> String {
        let payload = self.payload.as_str();
        let mut out = String::with_capacity(payload.len() + 64);
        let mut start = 0;
        loop {
            // base64 is ASCII, so every byte offset is a char boundary
            let end = (start + KITTY_CHUNK).min(payload.len());
            let more = u8::from(end < payload.len());
            let chunk = &payload[start..end];
            if start == 0 {
                out.push_str(&format!(
                    "\x1b_Gf={KITTY_FORMAT_PNG},s={},v={},a=T,t=d,i={image_id},c={cols},r={rows},q=2,m={more};{chunk}\x1b\\",
                    self.width, self.height
                ));
            } else {
                out.push_str(&format!("\x1b_Gm={more};{chunk}\x1b\\"));
            }
            if end == payload.len() {
                break;
            }
            start = end;
        }
        out
    }
}

/// Decode raw image bytes into a PNG-backed sprite.
///
/// PNG input is passed through untouched; other formats are re-encoded.
pub fn decode_sprite(bytes: &[u8]) -> Result<SpriteImage, SpriteError> {
    let image = image::load_from_memory(bytes).map_err(|err| SpriteError::Decode(err.to_string()))?;
    let (width, height) = image.dimensions();

    let payload = if image::guess_format(bytes).ok() == Some(ImageFormat::Png) {
        general_purpose::STANDARD.encode(bytes)
    } else {
        let mut png = Vec::new();
        image
            .write_to(&mut Cursor::new(&mut png), ImageFormat::Png)
            .map_err(|err| SpriteError::Encode(err.to_string()))?;
        general_purpose::STANDARD.encode(&png)
    };

    Ok(SpriteImage {
        payload,
        width,
        height,
    })
}
