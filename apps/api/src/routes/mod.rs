pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post, put},
    Router,
};

use crate::export::handlers as export;
use crate::export::MAX_CAPTURE_BYTES;
use crate::sections::handlers as sections;
use crate::state::AppState;
use crate::tailoring::handlers as tailoring;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Sessions
        .route("/api/v1/sessions", post(sections::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(sections::handle_get_session).delete(sections::handle_delete_session),
        )
        // Section list
        .route(
            "/api/v1/sessions/:id/sections",
            post(sections::handle_add_section),
        )
        .route(
            "/api/v1/sessions/:id/sections/reorder",
            post(sections::handle_reorder_sections),
        )
        .route(
            "/api/v1/sessions/:id/sections/:section_id",
            put(sections::handle_update_section).delete(sections::handle_delete_section),
        )
        // Drag gestures
        .route(
            "/api/v1/sessions/:id/drag/start",
            post(sections::handle_drag_start),
        )
        .route(
            "/api/v1/sessions/:id/drag/hover",
            post(sections::handle_drag_hover),
        )
        .route("/api/v1/sessions/:id/drag/end", post(sections::handle_drag_end))
        // Tailoring
        .route("/api/v1/sessions/:id/tailor", post(tailoring::handle_tailor))
        .route(
            "/api/v1/sessions/:id/tailor/apply",
            post(tailoring::handle_apply_suggestion),
        )
        .route(
            "/api/v1/sessions/:id/tailor/dismiss",
            post(tailoring::handle_dismiss_suggestion),
        )
        // Export
        .route(
            "/api/v1/sessions/:id/printable",
            get(export::handle_printable),
        )
        .route(
            "/api/v1/sessions/:id/export",
            post(export::handle_export).layer(DefaultBodyLimit::max(MAX_CAPTURE_BYTES)),
        )
        .with_state(state)
}
