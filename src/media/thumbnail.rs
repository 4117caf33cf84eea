use image::imageops::FilterType;
use thiserror::Error;
use tokio::task;

use crate::api::{ApiError, CatApi};

/// Width of generated grid thumbnails
pub const THUMBNAIL_WIDTH: u32 = 320;

/// Height of generated grid thumbnails (every tile has the same height)
pub const THUMBNAIL_HEIGHT: u32 = 192;

/// A decoded thumbnail ready to hand to the renderer
#[derive(Debug, Clone, PartialEq)]
pub struct Thumbnail {
    pub width: u32,
    pub height: u32,
    /// RGBA8 pixels, row-major
    pub pixels: Vec<u8>,
}

/// Why a tile's picture could not be shown
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ThumbnailError {
    #[error("Download failed: {0}")]
    Download(#[from] ApiError),
    #[error("Decode failed: {0}")]
    Decode(String),
    #[error("Task join error: {0}")]
    Join(String),
}

/// Decode image bytes and crop them to cover a thumbnail cell
pub fn decode_thumbnail(bytes: &[u8]) -> Result<Thumbnail, ThumbnailError> {
    let img = image::load_from_memory(bytes).map_err(|e| ThumbnailError::Decode(e.to_string()))?;

    // Scale to cover the cell, cropping the overflow
    let thumbnail = img.resize_to_fill(THUMBNAIL_WIDTH, THUMBNAIL_HEIGHT, FilterType::Triangle);
    let rgba = thumbnail.to_rgba8();

    Ok(Thumbnail {
        width: rgba.width(),
        height: rgba.height(),
        pixels: rgba.into_raw(),
    })
}

/// Download the picture at `url` and turn it into a thumbnail
///
/// Decoding is CPU-bound, so it runs on the blocking pool.
pub async fn load_thumbnail(api: CatApi, url: String) -> Result<Thumbnail, ThumbnailError> {
    let bytes = api.download(&url).await?;

    task::spawn_blocking(move || decode_thumbnail(&bytes))
        .await
        .map_err(|e| ThumbnailError::Join(e.to_string()))?
}
