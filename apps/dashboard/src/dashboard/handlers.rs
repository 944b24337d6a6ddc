//! Axum route handlers for dashboard sessions.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::dashboard::render::DashboardView;
use crate::dashboard::session::{ClickOutcome, SelectionState, SessionHandle};
use crate::errors::AppError;
use crate::state::AppState;
use crate::timeline::selection::ClickEvent;

// ────────────────────────────────────────────────────────────────────────────
// Request / Response types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct CreateSessionResponse {
    pub session_id: Uuid,
    pub state: SelectionState,
    pub view: DashboardView,
}

#[derive(Debug, Deserialize)]
pub struct SelectRequest {
    pub job_id: String,
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /api/v1/sessions
///
/// Starts a session on the first job and returns its initial render.
pub async fn handle_create_session(
    State(state): State<AppState>,
) -> Result<(StatusCode, Json<CreateSessionResponse>), AppError> {
    let (session_id, handle) = state
        .sessions
        .create(SelectionState::new(&state.catalog.store))
        .await;

    let mut selection = handle.lock().await;
    let view = selection.render(&state.catalog);

    Ok((
        StatusCode::CREATED,
        Json(CreateSessionResponse {
            session_id,
            state: selection.clone(),
            view,
        }),
    ))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SelectionState>, AppError> {
    let handle = checkout(&state, id).await?;
    let selection = handle.lock().await.clone();
    Ok(Json(selection))
}

/// POST /api/v1/sessions/:id/click
///
/// Body is the front end's raw click payload. Anything that does not resolve
/// to a job marker, including an empty or malformed body, is answered with
/// `ignored` and leaves the session as it was.
pub async fn handle_click(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    body: Bytes,
) -> Result<Json<ClickOutcome>, AppError> {
    let handle = checkout(&state, id).await?;
    let event = serde_json::from_slice(&body)
        .ok()
        .and_then(ClickEvent::from_json);

    let outcome = handle.lock().await.handle_click(&state.catalog, event.as_ref());
    if let ClickOutcome::Selected { view } = &outcome {
        info!("Session {id} selected job {}", view.job_id);
    }
    Ok(Json(outcome))
}

/// POST /api/v1/sessions/:id/select
///
/// Direct selection by job id, for keyboard or deep-link navigation.
pub async fn handle_select(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(request): Json<SelectRequest>,
) -> Result<Json<DashboardView>, AppError> {
    let job_id = request.job_id.trim();
    if job_id.is_empty() {
        return Err(AppError::Validation("job_id cannot be empty".to_string()));
    }
    if state.catalog.store.find(job_id).is_none() {
        return Err(AppError::NotFound(format!("Job {job_id} not found")));
    }

    let handle = checkout(&state, id).await?;
    let mut selection = handle.lock().await;
    selection.selected_job_id = job_id.to_string();
    Ok(Json(selection.render(&state.catalog)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_end_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if !state.sessions.remove(id).await {
        return Err(AppError::NotFound(format!("Session {id} not found")));
    }
    info!("Ended session {id}");
    Ok(StatusCode::NO_CONTENT)
}

async fn checkout(state: &AppState, id: Uuid) -> Result<SessionHandle, AppError> {
    state
        .sessions
        .checkout(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))
}
