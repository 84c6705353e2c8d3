/// Image downloads for gallery tiles and the detail overlay
///
/// Downloads are held in memory only; nothing is written to disk.
/// Decoding and resizing run on the blocking pool.

use iced::widget::image::Handle;
use image::imageops::FilterType;
use thiserror::Error;

/// Size of generated thumbnails (square bound, aspect preserved)
pub const THUMBNAIL_SIZE: u32 = 256;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("download failed: {0}")]
    Download(String),

    #[error("could not decode image: {0}")]
    Decode(String),
}

/// Decoded RGBA pixels ready to hand to iced
#[derive(Debug, Clone)]
pub struct Decoded {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Decoded {
    pub fn into_handle(self) -> Handle {
        Handle::from_rgba(self.width, self.height, self.pixels)
    }
}

/// Download a tile thumbnail and shrink it to `THUMBNAIL_SIZE`
pub async fn load_thumbnail(http: reqwest::Client, url: String) -> Result<Handle, MediaError> {
    load(http, url, Some(THUMBNAIL_SIZE)).await
}

/// Download the full-size image for the detail overlay
pub async fn load_full_image(http: reqwest::Client, url: String) -> Result<Handle, MediaError> {
    load(http, url, None).await
}

async fn load(
    http: reqwest::Client,
    url: String,
    max_size: Option<u32>,
) -> Result<Handle, MediaError> {
    let bytes = download(&http, &url).await?;

    // Spawn blocking because decoding is CPU-intensive
    let decoded = tokio::task::spawn_blocking(move || decode(&bytes, max_size))
        .await
        .map_err(|e| MediaError::Decode(format!("task join error: {}", e)))??;

    tracing::debug!("📸 Loaded {}x{} image from {}", decoded.width, decoded.height, url);
    Ok(decoded.into_handle())
}

async fn download(http: &reqwest::Client, url: &str) -> Result<Vec<u8>, MediaError> {
    let response = http
        .get(url)
        .send()
        .await
        .and_then(|r| r.error_for_status())
        .map_err(|e| MediaError::Download(e.to_string()))?;

    let bytes = response
        .bytes()
        .await
        .map_err(|e| MediaError::Download(e.to_string()))?;

    Ok(bytes.to_vec())
}

/// Decode image bytes, optionally resizing to fit within `max_size` x `max_size`
pub fn decode(bytes: &[u8], max_size: Option<u32>) -> Result<Decoded, MediaError> {
    let img = image::load_from_memory(bytes).map_err(|e| MediaError::Decode(e.to_string()))?;

    let img = match max_size {
        Some(size) if img.width() > size || img.height() > size => {
            img.resize(size, size, FilterType::Lanczos3)
        }
        _ => img,
    };

    let rgba = img.to_rgba8();
    Ok(Decoded {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbaImage};
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, image::Rgba([10, 20, 30, 255]));
        let mut out = Cursor::new(Vec::new());
        img.write_to(&mut out, ImageFormat::Png).unwrap();
        out.into_inner()
    }

    #[test]
    fn test_thumbnail_keeps_aspect_ratio() {
        let decoded = decode(&png_bytes(512, 300), Some(THUMBNAIL_SIZE)).unwrap();
        assert_eq!(decoded.width, 256);
        assert_eq!(decoded.height, 150);
        assert_eq!(decoded.pixels.len(), 256 * 150 * 4);
    }

    #[test]
    fn test_small_image_is_not_upscaled() {
        let decoded = decode(&png_bytes(64, 32), Some(THUMBNAIL_SIZE)).unwrap();
        assert_eq!((decoded.width, decoded.height), (64, 32));
    }

    #[test]
    fn test_full_size_decode() {
        let decoded = decode(&png_bytes(640, 480), None).unwrap();
        assert_eq!((decoded.width, decoded.height), (640, 480));
    }

    #[test]
    fn test_garbage_is_decode_error() {
        assert!(matches!(
            decode(b"definitely not an image", None),
            Err(MediaError::Decode(_))
        ));
    }
}
