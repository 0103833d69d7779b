//! In-memory editing sessions.
//!
//! A session owns one section list, at most one drag gesture, at most one pending
//! tailoring suggestion, and the tailoring busy flag. Nothing here is persisted.
//! All mutation of a session goes through its async mutex; the mutex is never held
//! across the AI call.
//!
//! Sessions that see no requests for the configured idle TTL are evicted by a
//! background sweep. A session with a tailoring call in flight is never evicted.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

use crate::errors::AppError;
use crate::sections::drag::DragGesture;
use crate::sections::{default_sections, ResumeSection};
use crate::tailoring::PendingSuggestion;

/// Mutable state of one editing session.
#[derive(Debug, Clone)]
pub struct SessionState {
    pub sections: Vec<ResumeSection>,
    pub drag: Option<DragGesture>,
    pub pending: Option<PendingSuggestion>,
    pub updated_at: DateTime<Utc>,
}

impl SessionState {
    /// Swaps in the next section list.
    ///
    /// An in-flight drag gesture follows its item to the new position, or ends if the
    /// item is gone.
    pub fn replace_sections(&mut self, next: Vec<ResumeSection>) {
        self.sections = next;
        self.updated_at = Utc::now();

        if let Some(gesture) = self.drag.as_mut() {
            match self.sections.iter().position(|s| s.id == gesture.section_id) {
                Some(index) => gesture.index = index,
                None => self.drag = None,
            }
        }
    }
}

/// A single editing session.
#[derive(Debug)]
pub struct Session {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub state: Mutex<SessionState>,
    tailoring: AtomicBool,
    last_active: Mutex<Instant>,
}

impl Session {
    fn new() -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            created_at: now,
            state: Mutex::new(SessionState {
                sections: default_sections(),
                drag: None,
                pending: None,
                updated_at: now,
            }),
            tailoring: AtomicBool::new(false),
            last_active: Mutex::new(Instant::now()),
        }
    }

    async fn touch(&self) {
        *self.last_active.lock().await = Instant::now();
    }

    async fn idle_for(&self, now: Instant) -> Duration {
        now.saturating_duration_since(*self.last_active.lock().await)
    }

    /// Whether a tailoring request is outstanding.
    pub fn is_tailoring(&self) -> bool {
        self.tailoring.load(Ordering::Acquire)
    }

    /// Claims the busy flag. Returns `None` if a tailoring request is already running.
    ///
    /// The flag is released when the returned guard drops, including when the
    /// handler future is dropped mid-request.
    pub fn try_begin_tailoring(self: &Arc<Self>) -> Option<TailoringGuard> {
        self.tailoring
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| TailoringGuard {
                session: Arc::clone(self),
            })
    }

    /// Serializable snapshot of the session.
    pub async fn view(&self) -> SessionView {
        let state = self.state.lock().await;
        SessionView {
            session_id: self.id,
            sections: state.sections.clone(),
            tailoring: self.is_tailoring(),
            pending_suggestion: state.pending.clone(),
            dragging: state.drag.clone(),
            created_at: self.created_at,
            updated_at: state.updated_at,
        }
    }
}

/// Holds a session's tailoring busy flag.
#[derive(Debug)]
pub struct TailoringGuard {
    session: Arc<Session>,
}

impl Drop for TailoringGuard {
    fn drop(&mut self) {
        self.session.tailoring.store(false, Ordering::Release);
        debug!("Tailoring flag released for session {}", self.session.id);
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SessionView {
    pub session_id: Uuid,
    pub sections: Vec<ResumeSection>,
    pub tailoring: bool,
    pub pending_suggestion: Option<PendingSuggestion>,
    pub dragging: Option<DragGesture>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// All live sessions, keyed by id.
#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Arc<Session>>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a session seeded with the default sections.
    pub async fn create(&self) -> Arc<Session> {
        let session = Arc::new(Session::new());
        self.sessions
            .write()
            .await
            .insert(session.id, Arc::clone(&session));
        info!("Created editing session {}", session.id);
        session
    }

    /// Looks up a session and marks it active.
    pub async fn get(&self, id: Uuid) -> Result<Arc<Session>, AppError> {
        let session = self
            .sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
        session.touch().await;
        Ok(session)
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        match self.sessions.write().await.remove(&id) {
            Some(_) => {
                info!("Ended editing session {id}");
                Ok(())
            }
            None => Err(AppError::NotFound(format!("Session {id} not found"))),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drops every session idle for at least `max_idle`. Returns how many were removed.
    pub async fn evict_idle(&self, max_idle: Duration) -> usize {
        let now = Instant::now();
        let mut sessions = self.sessions.write().await;

        let mut idle = Vec::new();
        for (id, session) in sessions.iter() {
            if !session.is_tailoring() && session.idle_for(now).await >= max_idle {
                idle.push(*id);
            }
        }
        for id in &idle {
            sessions.remove(id);
            debug!("Evicted idle session {id}");
        }
        idle.len()
    }

    /// Runs `evict_idle` periodically for the life of the process.
    pub fn spawn_idle_sweeper(&self, max_idle: Duration) -> JoinHandle<()> {
        let store = self.clone();
        let period = max_idle.min(SWEEP_INTERVAL);
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let evicted = store.evict_idle(max_idle).await;
                if evicted > 0 {
                    info!(
                        "Evicted {evicted} idle session(s), {} remaining",
                        store.len().await
                    );
                }
            }
        })
    }
}

/// Upper bound on the time between idle sweeps.
const SWEEP_INTERVAL: Duration = Duration::from_secs(60);

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_create_seeds_default_sections() {
        let store = SessionStore::new();
        let session = store.create().await;
        let view = session.view().await;
        assert_eq!(view.sections.len(), 5);
        assert!(!view.tailoring);
        assert!(view.pending_suggestion.is_none());
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_get_unknown_session_is_not_found() {
        let store = SessionStore::new();
        let err = store.get(Uuid::new_v4()).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_remove_session() {
        let store = SessionStore::new();
        let session = store.create().await;
        store.remove(session.id).await.unwrap();
        assert!(store.get(session.id).await.is_err());
        assert!(store.remove(session.id).await.is_err());
    }

    #[tokio::test]
    async fn test_replace_sections_tracks_drag_gesture() {
        let store = SessionStore::new();
        let session = store.create().await;
        let mut state = session.state.lock().await;

        state.drag = DragGesture::start(&state.sections, 2);
        let next = crate::sections::store::delete(&state.sections, "personal-info");
        state.replace_sections(next);
        assert_eq!(state.drag.as_ref().map(|g| g.index), Some(1));

        let next = crate::sections::store::delete(&state.sections, "experience");
        state.replace_sections(next);
        assert!(state.drag.is_none());
    }

    #[tokio::test]
    async fn test_evict_idle_removes_only_stale_sessions() {
        tokio::time::pause();
        let store = SessionStore::new();
        let stale = store.create().await;
        let revisited = store.create().await;

        tokio::time::advance(Duration::from_secs(20 * 60)).await;
        store.get(revisited.id).await.unwrap();
        let fresh = store.create().await;
        tokio::time::advance(Duration::from_secs(11 * 60)).await;

        let evicted = store.evict_idle(Duration::from_secs(30 * 60)).await;
        assert_eq!(evicted, 1);
        assert_eq!(store.len().await, 2);
        assert!(store.get(stale.id).await.is_err());
        assert!(store.get(revisited.id).await.is_ok());
        assert!(store.get(fresh.id).await.is_ok());
    }

    #[tokio::test]
    async fn test_evict_idle_spares_session_while_tailoring() {
        tokio::time::pause();
        let store = SessionStore::new();
        let session = store.create().await;
        let busy = session.try_begin_tailoring().unwrap();

        tokio::time::advance(Duration::from_secs(3600)).await;
        assert_eq!(store.evict_idle(Duration::from_secs(60)).await, 0);

        drop(busy);
        assert_eq!(store.evict_idle(Duration::from_secs(60)).await, 1);
        assert_eq!(store.len().await, 0);
    }

    #[tokio::test]
    async fn test_idle_sweeper_evicts_in_background() {
        tokio::time::pause();
        let store = SessionStore::new();
        let session = store.create().await;
        let sweeper = store.spawn_idle_sweeper(Duration::from_secs(120));

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(store.len().await, 1);

        tokio::time::sleep(Duration::from_secs(121)).await;
        assert_eq!(store.len().await, 0);
        assert!(store.get(session.id).await.is_err());
        sweeper.abort();
    }

    #[tokio::test]
    async fn test_tailoring_flag_is_exclusive_and_released_on_drop() {
        let store = SessionStore::new();
        let session = store.create().await;

        let guard = session.try_begin_tailoring().expect("first claim succeeds");
        assert!(session.is_tailoring());
        assert!(session.try_begin_tailoring().is_none());

        drop(guard);
        assert!(!session.is_tailoring());
        assert!(session.try_begin_tailoring().is_some());
    }
}
