//! Axum route handlers for the static side of the dashboard.

use axum::{
    extract::{Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use serde::Serialize;

use crate::errors::AppError;
use crate::models::profile::{Education, Profile};
use crate::profile::assets::{content_type_for, ProfileAssets};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct ProfileCardResponse {
    pub profile: Profile,
    pub education: Option<Education>,
    pub assets: ProfileAssets,
}

#[derive(Debug, Serialize)]
pub struct JobSummary {
    pub index: usize,
    pub id: String,
    pub company: String,
    pub role: String,
    pub period: String,
    pub start_label: String,
    pub x: f64,
}

#[derive(Debug, Serialize)]
pub struct JobsResponse {
    /// Display order; `index` is what a marker click carries.
    pub jobs: Vec<JobSummary>,
    /// Job ids earliest first.
    pub chronological: Vec<String>,
    pub now_x: f64,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(State(state): State<AppState>) -> Json<ProfileCardResponse> {
    Json(ProfileCardResponse {
        profile: state.catalog.profile.clone(),
        education: state.catalog.education.clone(),
        assets: state.assets.as_ref().clone(),
    })
}

/// GET /api/v1/jobs
pub async fn handle_list_jobs(State(state): State<AppState>) -> Json<JobsResponse> {
    let catalog = &state.catalog;
    let jobs = catalog
        .store
        .jobs()
        .iter()
        .zip(&catalog.chronology.xs)
        .enumerate()
        .map(|(index, (job, &x))| JobSummary {
            index,
            id: job.id.clone(),
            company: job.company.clone(),
            role: job.role.clone(),
            period: job.period.clone(),
            start_label: job.start_label.clone(),
            x,
        })
        .collect();
    let chronological = catalog
        .store
        .chronological_order()
        .iter()
        .map(|&i| catalog.store.jobs()[i].id.clone())
        .collect();

    Json(JobsResponse {
        jobs,
        chronological,
        now_x: catalog.chronology.now,
    })
}

/// GET /assets/:file
///
/// Serves the resolved photo or QR image. Unresolved names are 404.
pub async fn handle_get_asset(
    State(state): State<AppState>,
    Path(file): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let path = state
        .assets
        .lookup(&file)
        .ok_or_else(|| AppError::NotFound(format!("Asset {file} not found")))?;

    let data = tokio::fs::read(path)
        .await
        .map_err(|e| anyhow::anyhow!("failed to read asset {}: {e}", path.display()))?;

    Ok((
        [(header::CONTENT_TYPE, content_type_for(&file))],
        Bytes::from(data),
    ))
}
