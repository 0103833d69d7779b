//! Axum route handlers for the Export API.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
};
use bytes::Bytes;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::export::printable::render_printable;
use crate::export::{EXPORT_FILENAME, SUPERSAMPLE_FACTOR};
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ExportQuery {
    /// Device pixels per CSS pixel of the uploaded capture.
    pub scale: Option<f32>,
}

/// GET /api/v1/sessions/:id/printable
///
/// The chrome-free layout the browser renders off-screen and captures for export.
pub async fn handle_printable(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Html<String>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let sections = session.state.lock().await.sections.clone();
    Ok(Html(render_printable(&sections)))
}

/// POST /api/v1/sessions/:id/export
///
/// Body: the PNG or JPEG capture of the rendered resume.
/// Returns the paginated PDF as an attachment.
pub async fn handle_export(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Query(query): Query<ExportQuery>,
    capture: Bytes,
) -> Result<Response, AppError> {
    let session = state.sessions.get(session_id).await?;
    let sections = session.state.lock().await.sections.clone();

    let pdf = state
        .exporter
        .export(
            &sections,
            &capture,
            query.scale.unwrap_or(SUPERSAMPLE_FACTOR),
        )
        .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{EXPORT_FILENAME}\""),
            ),
        ],
        pdf.bytes,
    )
        .into_response())
}
