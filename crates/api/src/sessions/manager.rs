use std::collections::HashMap;
use std::sync::Arc;

use chrono::Utc;
use dressup_core::error::CoreError;
use dressup_core::types::{ItemId, SessionId, Timestamp};
use dressup_core::{AvatarState, DressUpSettings};
use indexmap::IndexSet;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};

/// One user's styling session.
#[derive(Debug, Clone)]
pub struct Session {
    pub id: SessionId,
    pub avatar: AvatarState,
    pub settings: DressUpSettings,
    /// Favourited catalog items, in the order they were starred.
    pub favorites: IndexSet<ItemId>,
    pub created_at: Timestamp,
    /// Last successful mutation.
    pub updated_at: Timestamp,
    /// Last read or write; drives idle reaping.
    pub last_accessed_at: Timestamp,
}

impl Session {
    fn new(avatar: AvatarState) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4(),
            avatar,
            settings: DressUpSettings::default(),
            favorites: IndexSet::new(),
            created_at: now,
            updated_at: now,
            last_accessed_at: now,
        }
    }

    /// Star or unstar an item. Returns the new favourite state.
    pub fn toggle_favorite(&mut self, item_id: &str) -> bool {
        if self.favorites.shift_remove(item_id) {
            false
        } else {
            self.favorites.insert(item_id.to_string());
            true
        }
    }
}

/// Handle to a session; its mutex serializes every operation on it.
pub type SharedSession = Arc<Mutex<Session>>;

/// Registry of all open styling sessions.
///
/// Thread-safe via interior `RwLock` over the map and a `Mutex` per session,
/// so operations on one session run one at a time while different sessions
/// proceed independently. Designed to be wrapped in `Arc` and shared across
/// the application.
pub struct SessionManager {
    sessions: RwLock<HashMap<SessionId, SharedSession>>,
    max_sessions: usize,
}

impl SessionManager {
    /// Create an empty registry holding at most `max_sessions` sessions.
    pub fn new(max_sessions: usize) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            max_sessions,
        }
    }

    /// Open a new session around `avatar` and return a snapshot of it.
    pub async fn create(&self, avatar: AvatarState) -> Result<Session, CoreError> {
        let mut sessions = self.sessions.write().await;
        if sessions.len() >= self.max_sessions {
            return Err(CoreError::Conflict(format!(
                "Session limit of {} reached",
                self.max_sessions
            )));
        }

        let session = Session::new(avatar);
        let snapshot = session.clone();
        sessions.insert(session.id, Arc::new(Mutex::new(session)));
        Ok(snapshot)
    }

    /// Look up a session handle.
    pub async fn get(&self, id: SessionId) -> Result<SharedSession, CoreError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or_else(|| CoreError::NotFound {
                entity: "Session",
                id: id.to_string(),
            })
    }

    /// Copy of the session's current contents.
    pub async fn snapshot(&self, id: SessionId) -> Result<Session, CoreError> {
        let mut guard = self.lock(id).await?;
        guard.last_accessed_at = Utc::now();
        Ok(guard.clone())
    }

    /// Run `f` against the session while holding its lock.
    ///
    /// Returns `f`'s output together with a copy of the session as `f` left
    /// it. `updated_at` is bumped only when `f` succeeds, and `f` must leave
    /// the session untouched when it returns an error.
    pub async fn update<F, R>(&self, id: SessionId, f: F) -> Result<(R, Session), CoreError>
    where
        F: FnOnce(&mut Session) -> Result<R, CoreError>,
    {
        let mut guard = self.lock(id).await?;
        let now = Utc::now();
        guard.last_accessed_at = now;
        let out = f(&mut *guard)?;
        guard.updated_at = now;
        Ok((out, guard.clone()))
    }

    /// Lock a session, keeping the map read-locked until the session lock is
    /// held so a concurrent removal cannot orphan the handle.
    async fn lock(&self, id: SessionId) -> Result<OwnedMutexGuard<Session>, CoreError> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(&id).cloned().ok_or_else(|| CoreError::NotFound {
            entity: "Session",
            id: id.to_string(),
        })?;
        Ok(session.lock_owned().await)
    }

    /// Close a session. Returns `false` if it did not exist.
    pub async fn remove(&self, id: SessionId) -> bool {
        self.sessions.write().await.remove(&id).is_some()
    }

    /// Close a session only if it is still idle since `cutoff`.
    ///
    /// Checked under the map write lock, so an access that landed after the
    /// session was found idle keeps it alive.
    pub async fn remove_if_idle(&self, id: SessionId, cutoff: Timestamp) -> bool {
        let mut sessions = self.sessions.write().await;
        let idle = match sessions.get(&id).map(|s| s.try_lock()) {
            Some(Ok(guard)) => guard.last_accessed_at < cutoff,
            _ => false,
        };
        idle && sessions.remove(&id).is_some()
    }

    /// Number of open sessions.
    pub async fn count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Sessions not accessed since `cutoff`.
    ///
    /// Sessions whose lock is currently held are in use and never reported.
    pub async fn idle_since(&self, cutoff: Timestamp) -> Vec<SessionId> {
        let sessions = self.sessions.read().await;
        sessions
            .iter()
            .filter_map(|(id, session)| {
                let guard = session.try_lock().ok()?;
                (guard.last_accessed_at < cutoff).then_some(*id)
            })
            .collect()
    }
}

impl Default for SessionManager {
    fn default() -> Self {
        Self::new(usize::MAX)
    }
}
