pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::dashboard::handlers as dashboard;
use crate::profile::handlers as profile;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Static profile side
        .route("/api/v1/profile", get(profile::handle_get_profile))
        .route("/api/v1/jobs", get(profile::handle_list_jobs))
        .route("/assets/:file", get(profile::handle_get_asset))
        // Timeline sessions
        .route("/api/v1/sessions", post(dashboard::handle_create_session))
        .route(
            "/api/v1/sessions/:id",
            get(dashboard::handle_get_session).delete(dashboard::handle_end_session),
        )
        .route("/api/v1/sessions/:id/click", post(dashboard::handle_click))
        .route("/api/v1/sessions/:id/select", post(dashboard::handle_select))
        .with_state(state)
}
