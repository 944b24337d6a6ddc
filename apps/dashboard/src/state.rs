use std::sync::Arc;

use crate::config::Config;
use crate::dashboard::session::SessionStore;
use crate::profile::assets::ProfileAssets;
use crate::profile::loader::Catalog;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    /// Loaded once at startup; read-only for every session.
    pub catalog: Arc<Catalog>,
    pub assets: Arc<ProfileAssets>,
    /// Per-session selection state. Default: InMemorySessionStore.
    pub sessions: Arc<dyn SessionStore>,
}
