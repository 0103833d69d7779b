//! Rasterization: turns the staged render capture into the bitmap that gets paginated.
//!
//! The browser captures the printable layout and uploads it together with the pixel
//! density it was captured at. Captures taken below the supersampling factor are
//! upsampled so every export is paginated at the same density.

use std::path::PathBuf;

use async_trait::async_trait;
use image::imageops::FilterType;
use image::RgbaImage;
use tracing::debug;

use crate::export::ExportError;

/// Upper bound on either bitmap dimension, as decoded and after upsampling.
pub const MAX_RASTER_DIMENSION: u32 = 16_384;

/// Where the rendered resume can be read from, and at what density it was captured.
#[derive(Debug, Clone)]
pub struct RenderTarget {
    pub path: PathBuf,
    /// Device pixels per CSS pixel used for the capture.
    pub device_scale: f32,
}

#[async_trait]
pub trait Rasterizer: Send + Sync {
    async fn rasterize(&self, target: &RenderTarget) -> Result<RgbaImage, ExportError>;
}

/// Decodes an uploaded PNG/JPEG capture.
pub struct SnapshotRasterizer {
    supersample: f32,
}

impl SnapshotRasterizer {
    pub fn new(supersample: f32) -> Self {
        Self { supersample }
    }
}

#[async_trait]
impl Rasterizer for SnapshotRasterizer {
    async fn rasterize(&self, target: &RenderTarget) -> Result<RgbaImage, ExportError> {
        let path = target.path.clone();
        let factor = upsample_factor(target.device_scale, self.supersample);

        // Decoding gates the rest of the export; nothing else proceeds until it finishes.
        tokio::task::spawn_blocking(move || decode_capture(&path, factor))
            .await
            .map_err(|e| ExportError::Raster(format!("decode task failed: {e}")))?
    }
}

/// How much to enlarge a capture taken at `device_scale` to reach `supersample`.
/// Never shrinks.
pub fn upsample_factor(device_scale: f32, supersample: f32) -> f32 {
    if device_scale >= supersample {
        1.0
    } else {
        supersample / device_scale
    }
}

fn decode_capture(path: &std::path::Path, factor: f32) -> Result<RgbaImage, ExportError> {
    let decoded = image::io::Reader::open(path)
        .map_err(|e| ExportError::Raster(format!("cannot open capture: {e}")))?
        .with_guessed_format()
        .map_err(|e| ExportError::Raster(format!("cannot read capture: {e}")))?
        .decode()
        .map_err(|e| ExportError::Raster(format!("cannot decode capture: {e}")))?;

    let bitmap = decoded.to_rgba8();
    if bitmap.width() == 0 || bitmap.height() == 0 {
        return Err(ExportError::Raster("capture has no pixels".to_string()));
    }
    if bitmap.width() > MAX_RASTER_DIMENSION || bitmap.height() > MAX_RASTER_DIMENSION {
        return Err(ExportError::Raster(format!(
            "capture {}x{} exceeds {MAX_RASTER_DIMENSION}px",
            bitmap.width(),
            bitmap.height()
        )));
    }

    if factor <= 1.0 {
        return Ok(bitmap);
    }

    let width = (bitmap.width() as f32 * factor).round() as u32;
    let height = (bitmap.height() as f32 * factor).round() as u32;
    if width > MAX_RASTER_DIMENSION || height > MAX_RASTER_DIMENSION {
        return Err(ExportError::Raster(format!(
            "upsampled capture {width}x{height} exceeds {MAX_RASTER_DIMENSION}px"
        )));
    }

    debug!(
        "Upsampling capture {}x{} → {width}x{height}",
        bitmap.width(),
        bitmap.height()
    );
    Ok(image::imageops::resize(
        &bitmap,
        width,
        height,
        FilterType::Lanczos3,
    ))
}
