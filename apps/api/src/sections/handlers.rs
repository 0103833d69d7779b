//! Axum route handlers for sessions, the section list, and drag gestures.
//!
//! Every list mutation returns the full new list. Unknown section ids and invalid
//! reorder indices are silent no-ops, not errors.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::errors::AppError;
use crate::sections::drag::{DragGesture, HoverOutcome, HoverSample};
use crate::sections::store::{self, ResumeSection};
use crate::session::SessionView;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct SectionListResponse {
    pub sections: Vec<ResumeSection>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateSectionRequest {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Deserialize)]
pub struct ReorderRequest {
    pub from_index: usize,
    pub to_index: usize,
}

#[derive(Debug, Deserialize)]
pub struct DragStartRequest {
    pub index: usize,
}

#[derive(Debug, Serialize)]
pub struct DragResponse {
    pub moved: bool,
    pub dragging: Option<DragGesture>,
    pub sections: Vec<ResumeSection>,
}

// ────────────────────────────────────────────────────────────────────────────
// Sessions
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let session = state.sessions.create().await;
    Ok((StatusCode::CREATED, Json(session.view().await)))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state.sessions.get(session_id).await?;
    Ok(Json(session.view().await))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    state.sessions.remove(session_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ────────────────────────────────────────────────────────────────────────────
// Section list
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/sections
pub async fn handle_add_section(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<(StatusCode, Json<SectionListResponse>), AppError> {
    let session = state.sessions.get(session_id).await?;
    let mut guard = session.state.lock().await;
    let next = store::add(&guard.sections);
    guard.replace_sections(next);
    debug!("Session {session_id}: added section, {} total", guard.sections.len());
    Ok((
        StatusCode::CREATED,
        Json(SectionListResponse {
            sections: guard.sections.clone(),
        }),
    ))
}

/// PUT /api/v1/sessions/:id/sections/:section_id
pub async fn handle_update_section(
    State(state): State<AppState>,
    Path((session_id, section_id)): Path<(Uuid, String)>,
    Json(request): Json<UpdateSectionRequest>,
) -> Result<Json<SectionListResponse>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let mut guard = session.state.lock().await;
    let next = store::update(&guard.sections, &section_id, &request.title, &request.content);
    guard.replace_sections(next);
    Ok(Json(SectionListResponse {
        sections: guard.sections.clone(),
    }))
}

/// DELETE /api/v1/sessions/:id/sections/:section_id
pub async fn handle_delete_section(
    State(state): State<AppState>,
    Path((session_id, section_id)): Path<(Uuid, String)>,
) -> Result<Json<SectionListResponse>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let mut guard = session.state.lock().await;
    let next = store::delete(&guard.sections, &section_id);
    guard.replace_sections(next);
    Ok(Json(SectionListResponse {
        sections: guard.sections.clone(),
    }))
}

/// POST /api/v1/sessions/:id/sections/reorder
pub async fn handle_reorder_sections(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<ReorderRequest>,
) -> Result<Json<SectionListResponse>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let mut guard = session.state.lock().await;
    let next = store::reorder(&guard.sections, request.from_index, request.to_index);
    guard.replace_sections(next);
    Ok(Json(SectionListResponse {
        sections: guard.sections.clone(),
    }))
}

// ────────────────────────────────────────────────────────────────────────────
// Drag gestures
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/drag/start
pub async fn handle_drag_start(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<DragStartRequest>,
) -> Result<Json<DragResponse>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let mut guard = session.state.lock().await;
    let gesture = DragGesture::start(&guard.sections, request.index).ok_or_else(|| {
        AppError::Validation(format!("No section at index {}", request.index))
    })?;
    debug!("Session {session_id}: drag started on '{}'", gesture.section_id);
    guard.drag = Some(gesture);
    Ok(Json(DragResponse {
        moved: false,
        dragging: guard.drag.clone(),
        sections: guard.sections.clone(),
    }))
}

/// POST /api/v1/sessions/:id/drag/hover
pub async fn handle_drag_hover(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(sample): Json<HoverSample>,
) -> Result<Json<DragResponse>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let mut guard = session.state.lock().await;

    let mut gesture = guard
        .drag
        .clone()
        .ok_or_else(|| AppError::Validation("No drag in progress".to_string()))?;

    let moved = match gesture.hover(&guard.sections, &sample) {
        HoverOutcome::Hold => false,
        HoverOutcome::Moved { from, to, sections } => {
            debug!("Session {session_id}: drag moved {from} → {to}");
            guard.replace_sections(sections);
            true
        }
    };
    guard.drag = Some(gesture);

    Ok(Json(DragResponse {
        moved,
        dragging: guard.drag.clone(),
        sections: guard.sections.clone(),
    }))
}

/// POST /api/v1/sessions/:id/drag/end
///
/// The list already reflects every move made during the gesture; nothing to commit.
pub async fn handle_drag_end(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<DragResponse>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let mut guard = session.state.lock().await;
    guard.drag = None;
    Ok(Json(DragResponse {
        moved: false,
        dragging: None,
        sections: guard.sections.clone(),
    }))
}
