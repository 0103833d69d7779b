//! Axum route handlers for the Tailoring API.

use axum::{
    extract::{Path, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::sections::store::{self, ResumeSection};
use crate::state::AppState;
use crate::tailoring::{PendingSuggestion, TailorRequest};

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct TailorSectionRequest {
    pub job_description: String,
    pub section_id: String,
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub suggestion: PendingSuggestion,
}

#[derive(Debug, Serialize)]
pub struct ApplyResponse {
    pub applied: bool,
    pub sections: Vec<ResumeSection>,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions/:id/tailor
///
/// Validates input, then makes exactly one tailoring call. The result is held as the
/// session's pending suggestion; the section list is not touched.
pub async fn handle_tailor(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<TailorSectionRequest>,
) -> Result<Json<SuggestionResponse>, AppError> {
    if request.job_description.trim().is_empty() {
        return Err(AppError::Validation(
            "Please paste the job description.".to_string(),
        ));
    }
    if request.section_id.is_empty() {
        return Err(AppError::Validation(
            "Please select a resume section to tailor.".to_string(),
        ));
    }

    let session = state.sessions.get(session_id).await?;

    let section = {
        let guard = session.state.lock().await;
        store::find(&guard.sections, &request.section_id)
            .cloned()
            .ok_or_else(|| AppError::Validation("Selected section not found.".to_string()))?
    };

    let _busy = session.try_begin_tailoring().ok_or_else(|| {
        AppError::Conflict("A tailoring request is already in progress.".to_string())
    })?;

    let tailor_request = TailorRequest {
        job_description: request.job_description,
        resume_section: section.title.clone(),
        current_content: section.content.clone(),
    };

    // The session lock is not held here; edits may land while the call is in flight.
    let result = state
        .tailor
        .tailor(&tailor_request)
        .await
        .map_err(|e| AppError::Tailor(e.to_string()))?;

    let suggestion = PendingSuggestion {
        section_id: section.id,
        original_content: section.content,
        tailored_content: result.tailored_content,
    };

    session.state.lock().await.pending = Some(suggestion.clone());
    info!(
        "Session {session_id}: suggestion ready for section '{}'",
        suggestion.section_id
    );

    Ok(Json(SuggestionResponse { suggestion }))
}

/// POST /api/v1/sessions/:id/tailor/apply
///
/// Merges the pending suggestion into the list: only the content of the targeted
/// section changes. No pending suggestion, or a section deleted meanwhile, is a no-op.
pub async fn handle_apply_suggestion(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ApplyResponse>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let mut guard = session.state.lock().await;

    let applied = match guard.pending.take() {
        Some(suggestion) => {
            let present = store::find(&guard.sections, &suggestion.section_id).is_some();
            let next = store::apply_tailored(
                &guard.sections,
                &suggestion.section_id,
                &suggestion.tailored_content,
            );
            guard.replace_sections(next);
            if present {
                info!(
                    "Session {session_id}: applied suggestion to '{}'",
                    suggestion.section_id
                );
            }
            present
        }
        None => false,
    };

    Ok(Json(ApplyResponse {
        applied,
        sections: guard.sections.clone(),
    }))
}

/// POST /api/v1/sessions/:id/tailor/dismiss
pub async fn handle_dismiss_suggestion(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<ApplyResponse>, AppError> {
    let session = state.sessions.get(session_id).await?;
    let mut guard = session.state.lock().await;
    guard.pending = None;
    Ok(Json(ApplyResponse {
        applied: false,
        sections: guard.sections.clone(),
    }))
}
