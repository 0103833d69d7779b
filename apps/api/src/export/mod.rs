// PDF Export: stage the uploaded capture → rasterize → paginate → assemble.
// The capture is the browser's bitmap of the rendered resume; the section list is
// only consulted for the empty-document precondition.
// Decoding and assembly are CPU-bound and run on the blocking pool.

pub mod assembler;
pub mod handlers;
pub mod pagination;
pub mod printable;
pub mod rasterizer;
pub mod staging;

use std::path::PathBuf;
use std::sync::Arc;

use thiserror::Error;
use tracing::{debug, info};

use crate::errors::AppError;
use crate::sections::ResumeSection;

pub use assembler::{DocumentAssembler, LopdfAssembler};
pub use pagination::plan_pages;
pub use rasterizer::{Rasterizer, RenderTarget, SnapshotRasterizer};
pub use staging::StagedCapture;

/// Filename offered to the browser's save dialog.
pub const EXPORT_FILENAME: &str = "resume.pdf";

/// Captures are expected at twice the CSS pixel density for sharper output.
pub const SUPERSAMPLE_FACTOR: f32 = 2.0;

/// Largest accepted upload for a render capture.
pub const MAX_CAPTURE_BYTES: usize = 25 * 1024 * 1024;

/// Output page geometry in PDF points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageFormat {
    pub width_pt: f32,
    pub height_pt: f32,
}

impl PageFormat {
    /// ISO A4, portrait.
    pub fn a4_portrait() -> Self {
        Self {
            width_pt: 595.28,
            height_pt: 841.89,
        }
    }
}

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Resume render target not ready.")]
    MissingRenderTarget,

    #[error("No resume content to export.")]
    EmptyDocument,

    #[error("Capture scale must be a positive number.")]
    InvalidScale,

    #[error("staging failed: {0}")]
    Staging(#[from] std::io::Error),

    #[error("rasterization failed: {0}")]
    Raster(String),

    #[error("pdf assembly failed: {0}")]
    Assembly(String),
}

impl From<ExportError> for AppError {
    fn from(err: ExportError) -> Self {
        match err {
            ExportError::MissingRenderTarget
            | ExportError::EmptyDocument
            | ExportError::InvalidScale => AppError::Validation(err.to_string()),
            other => AppError::Export(other.to_string()),
        }
    }
}

/// A finished export.
#[derive(Debug)]
pub struct ExportedPdf {
    pub bytes: Vec<u8>,
    pub page_count: usize,
}

/// Drives one export from capture upload to PDF bytes.
#[derive(Clone)]
pub struct PdfExporter {
    rasterizer: Arc<dyn Rasterizer>,
    assembler: Arc<dyn DocumentAssembler>,
    format: PageFormat,
    staging_dir: PathBuf,
}

impl PdfExporter {
    pub fn new(
        rasterizer: Arc<dyn Rasterizer>,
        assembler: Arc<dyn DocumentAssembler>,
        format: PageFormat,
        staging_dir: PathBuf,
    ) -> Self {
        Self {
            rasterizer,
            assembler,
            format,
            staging_dir,
        }
    }

    pub fn format(&self) -> PageFormat {
        self.format
    }

    /// Exports `capture` as a paginated PDF.
    ///
    /// Preconditions are checked before anything is written. The staged capture is
    /// removed on every exit path once staging has happened.
    pub async fn export(
        &self,
        sections: &[ResumeSection],
        capture: &[u8],
        scale: f32,
    ) -> Result<ExportedPdf, ExportError> {
        if capture.is_empty() {
            return Err(ExportError::MissingRenderTarget);
        }
        if sections.is_empty() {
            return Err(ExportError::EmptyDocument);
        }
        if !scale.is_finite() || scale <= 0.0 {
            return Err(ExportError::InvalidScale);
        }

        let staged = StagedCapture::stage(&self.staging_dir, capture)?;
        debug!("Staged {} byte capture at {:?}", capture.len(), staged.path());

        let target = RenderTarget {
            path: staged.path().to_path_buf(),
            device_scale: scale,
        };
        let bitmap = self.rasterizer.rasterize(&target).await?;
        let plan = plan_pages(bitmap.width(), bitmap.height(), &self.format)?;

        let assembler = Arc::clone(&self.assembler);
        let format = self.format;
        let page_count = plan.slices.len();
        let bytes = tokio::task::spawn_blocking(move || assembler.assemble(&bitmap, &plan, &format))
            .await
            .map_err(|e| ExportError::Assembly(format!("assembly task failed: {e}")))??;

        info!(
            "Exported {} section(s) to a {page_count} page PDF ({} bytes)",
            sections.len(),
            bytes.len()
        );

        drop(staged);
        Ok(ExportedPdf { bytes, page_count })
    }
}
