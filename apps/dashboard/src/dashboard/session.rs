//! Per-session selection state and its store.
//!
//! One `SelectionState` per session. The selection resolver writes
//! `selected_job_id`; rendering replaces `previous_skill_snapshot`. Nothing
//! else mutates either field.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::time::Instant;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::dashboard::render::{render_job, DashboardView};
use crate::dashboard::skills::SkillSnapshot;
use crate::profile::loader::Catalog;
use crate::profile::store::ExperienceStore;
use crate::timeline::selection::{resolve_click, ClickEvent, ClickResolution, IgnoreReason};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SelectionState {
    pub selected_job_id: String,
    pub previous_skill_snapshot: SkillSnapshot,
}

impl SelectionState {
    /// Session defaults: first job selected, nothing rendered yet.
    pub fn new(store: &ExperienceStore) -> Self {
        Self {
            selected_job_id: store.first().id.clone(),
            previous_skill_snapshot: SkillSnapshot::default(),
        }
    }

    /// Renders the current selection and records its skills as the new baseline.
    pub fn render(&mut self, catalog: &Catalog) -> DashboardView {
        let rendered = render_job(catalog, &self.selected_job_id, &self.previous_skill_snapshot);
        self.previous_skill_snapshot = rendered.snapshot;
        rendered.view
    }

    /// Resolve-then-render. Ignored clicks leave the state untouched.
    pub fn handle_click(&mut self, catalog: &Catalog, event: Option<&ClickEvent>) -> ClickOutcome {
        match resolve_click(&catalog.store, event) {
            ClickResolution::Select { index, job_id } => {
                debug!("Click on marker {index} selects job {job_id}");
                self.selected_job_id = job_id;
                ClickOutcome::Selected {
                    view: Box::new(self.render(catalog)),
                }
            }
            ClickResolution::Ignore(reason) => ClickOutcome::Ignored { reason },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ClickOutcome {
    Selected { view: Box<DashboardView> },
    Ignored { reason: IgnoreReason },
}

/// A session's state behind its own lock: interactions on one session run one at a time.
pub type SessionHandle = Arc<Mutex<SelectionState>>;

/// Session storage seam. The in-memory store is the only implementation.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn create(&self, state: SelectionState) -> (Uuid, SessionHandle);
    async fn checkout(&self, id: Uuid) -> Option<SessionHandle>;
    async fn remove(&self, id: Uuid) -> bool;
    async fn len(&self) -> usize;
}

pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

struct SessionEntry {
    handle: SessionHandle,
    last_used: Instant,
}

/// Bounded in-memory store. At capacity, creating a session evicts the
/// least recently used one.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Uuid, SessionEntry>>,
    max_sessions: usize,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_SESSIONS)
    }
}

impl InMemorySessionStore {
    /// `max_sessions` is floored at 1.
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions: max_sessions.max(1),
        }
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn create(&self, state: SelectionState) -> (Uuid, SessionHandle) {
        let id = Uuid::new_v4();
        let handle = Arc::new(Mutex::new(state));

        let mut sessions = self.sessions.write().await;
        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(id, _)| *id);
            let Some(oldest) = oldest else { break };
            sessions.remove(&oldest);
            warn!("Session limit {} reached, evicted session {oldest}", self.max_sessions);
        }
        sessions.insert(
            id,
            SessionEntry {
                handle: handle.clone(),
                last_used: Instant::now(),
            },
        );
        drop(sessions);

        info!("Created session {id}");
        (id, handle)
    }

    async fn checkout(&self, id: Uuid) -> Option<SessionHandle> {
        let mut sessions = self.sessions.write().await;
        match sessions.get_mut(&id) {
            Some(entry) => {
                entry.last_used = Instant::now();
                Some(entry.handle.clone())
            }
            None => {
                debug!("Session {id} not found");
                None
            }
        }
    }

    async fn remove(&self, id: Uuid) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::skills::SkillRow;
    use crate::profile::loader::tests::scenario_catalog;
    use crate::timeline::figure::CLICKABLE_TRACE;
    use crate::timeline::selection::ClickPoint;

    fn click(point: i64) -> ClickEvent {
        ClickEvent {
            points: vec![ClickPoint {
                curve_number: Some(CLICKABLE_TRACE as i64),
                point_number: Some(point),
            }],
        }
    }

    fn row<'a>(view: &'a DashboardView, name: &str) -> &'a SkillRow {
        view.skills.rows.iter().find(|r| r.name == name).unwrap()
    }

    fn selected_view(outcome: ClickOutcome) -> DashboardView {
        match outcome {
            ClickOutcome::Selected { view } => *view,
            ClickOutcome::Ignored { reason } => panic!("click ignored: {reason:?}"),
        }
    }

    #[test]
    fn test_defaults_to_first_job_with_empty_snapshot() {
        let catalog = scenario_catalog();
        let state = SelectionState::new(&catalog.store);
        assert_eq!(state.selected_job_id, "a");
        assert!(state.previous_skill_snapshot.0.is_empty());
    }

    #[test]
    fn test_two_job_scenario_growth() {
        let catalog = scenario_catalog();
        let mut state = SelectionState::new(&catalog.store);

        let first = selected_view(state.handle_click(&catalog, Some(&click(0))));
        let sql = row(&first, "SQL");
        assert_eq!(sql.lit_segments(), 5);
        assert!(sql.grew);

        let second = selected_view(state.handle_click(&catalog, Some(&click(1))));
        assert_eq!(state.selected_job_id, "b");
        let sql = row(&second, "SQL");
        assert_eq!(sql.lit_segments(), 8);
        assert!(sql.grew, "8 > 5 counts as growth");
        let excel = row(&second, "Excel");
        assert_eq!(excel.lit_segments(), 2);
        assert!(excel.grew, "absent in previous counts as 0");
    }

    #[test]
    fn test_reselecting_same_job_flags_nothing() {
        let catalog = scenario_catalog();
        let mut state = SelectionState::new(&catalog.store);
        selected_view(state.handle_click(&catalog, Some(&click(1))));
        let again = selected_view(state.handle_click(&catalog, Some(&click(1))));
        assert!(again.skills.rows.iter().all(|r| !r.grew));
    }

    #[test]
    fn test_ignored_clicks_leave_state_unchanged() {
        let catalog = scenario_catalog();
        let mut state = SelectionState::new(&catalog.store);
        state.render(&catalog);
        let before = state.clone();

        let wrong_series = ClickEvent {
            points: vec![ClickPoint {
                curve_number: Some(0),
                point_number: Some(1),
            }],
        };
        for event in [
            None,
            Some(ClickEvent::default()),
            Some(click(2)),
            Some(click(-1)),
            Some(wrong_series),
        ] {
            let outcome = state.handle_click(&catalog, event.as_ref());
            assert!(matches!(outcome, ClickOutcome::Ignored { .. }));
            assert_eq!(state, before);
        }
    }

    #[test]
    fn test_render_replaces_snapshot_instead_of_merging() {
        let catalog = scenario_catalog();
        let mut state = SelectionState::new(&catalog.store);
        state.selected_job_id = "b".to_string();
        state.render(&catalog);
        state.selected_job_id = "a".to_string();
        state.render(&catalog);
        assert_eq!(state.previous_skill_snapshot.level("Excel"), 0);
        assert_eq!(state.previous_skill_snapshot.0.len(), 1);
    }

    #[tokio::test]
    async fn test_sessions_are_isolated() {
        let catalog = scenario_catalog();
        let store = InMemorySessionStore::default();
        let (id_a, _) = store.create(SelectionState::new(&catalog.store)).await;
        let (id_b, _) = store.create(SelectionState::new(&catalog.store)).await;
        assert_ne!(id_a, id_b);
        assert_eq!(store.len().await, 2);

        {
            let handle = store.checkout(id_a).await.unwrap();
            let mut state = handle.lock().await;
            state.handle_click(&catalog, Some(&click(1)));
        }

        let a = store.checkout(id_a).await.unwrap();
        let b = store.checkout(id_b).await.unwrap();
        assert_eq!(a.lock().await.selected_job_id, "b");
        assert_eq!(b.lock().await.selected_job_id, "a");
        assert!(b.lock().await.previous_skill_snapshot.0.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_capacity_evicts_least_recently_used() {
        let catalog = scenario_catalog();
        let store = InMemorySessionStore::new(2);
        let (first, _) = store.create(SelectionState::new(&catalog.store)).await;
        tokio::time::advance(std::time::Duration::from_secs(1)).await;
        let (second, _) = store.create(SelectionState::new(&catalog.store)).await;
        tokio::time::advance(std::time::Duration::from_secs(1)).await;

        // touching the first session makes the second one the eviction candidate
        assert!(store.checkout(first).await.is_some());
        tokio::time::advance(std::time::Duration::from_secs(1)).await;

        let (third, _) = store.create(SelectionState::new(&catalog.store)).await;
        assert_eq!(store.len().await, 2);
        assert!(store.checkout(first).await.is_some());
        assert!(store.checkout(second).await.is_none());
        assert!(store.checkout(third).await.is_some());
    }

    #[tokio::test]
    async fn test_session_count_never_exceeds_limit() {
        let catalog = scenario_catalog();
        let store = InMemorySessionStore::new(16);
        for _ in 0..200 {
            store.create(SelectionState::new(&catalog.store)).await;
        }
        assert_eq!(store.len().await, 16);
    }

    #[tokio::test]
    async fn test_unknown_and_removed_sessions() {
        let catalog = scenario_catalog();
        let store = InMemorySessionStore::default();
        assert!(store.checkout(Uuid::new_v4()).await.is_none());
        let (id, _) = store.create(SelectionState::new(&catalog.store)).await;
        assert!(store.remove(id).await);
        assert!(!store.remove(id).await);
        assert!(store.checkout(id).await.is_none());
    }
}
