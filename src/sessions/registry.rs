use std::{
    collections::HashMap,
    sync::Arc,
    time::{Duration, Instant},
};

use log::info;
use tokio::sync::Mutex;
use uuid::Uuid;

use super::SmoothingWindow;
use crate::error::{Result, ServiceError};

struct SessionEntry {
    window: Arc<Mutex<SmoothingWindow>>,
    last_seen: Instant,
}

/// Live-display sessions, each owning exactly one smoothing window.
///
/// Windows sit behind their own lock so concurrent sessions never contend;
/// the map lock is only held for lookups.
#[derive(Clone)]
pub struct SessionRegistry {
    sessions: Arc<Mutex<HashMap<Uuid, SessionEntry>>>,
    window_capacity: usize,
    idle_ttl: Duration,
}

impl SessionRegistry {
    pub fn new(window_capacity: usize, idle_ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(Mutex::new(HashMap::new())),
            window_capacity: window_capacity.max(1),
            idle_ttl,
        }
    }

    pub fn window_capacity(&self) -> usize {
        self.window_capacity
    }

    pub async fn create(&self) -> Uuid {
        let mut sessions = self.sessions.lock().await;

        let before = sessions.len();
        let ttl = self.idle_ttl;
        sessions.retain(|_, entry| entry.last_seen.elapsed() < ttl);
        let pruned = before - sessions.len();
        if pruned > 0 {
            info!("Pruned {pruned} idle smoothing sessions");
        }

        let id = Uuid::new_v4();
        sessions.insert(
            id,
            SessionEntry {
                window: Arc::new(Mutex::new(SmoothingWindow::new(self.window_capacity))),
                last_seen: Instant::now(),
            },
        );
        id
    }

    /// Handle to a session's window; refreshes its idle timer.
    pub async fn window(&self, id: Uuid) -> Result<Arc<Mutex<SmoothingWindow>>> {
        let mut sessions = self.sessions.lock().await;
        let entry = sessions
            .get_mut(&id)
            .ok_or_else(|| ServiceError::session_not_found(id))?;
        entry.last_seen = Instant::now();
        Ok(entry.window.clone())
    }

    pub async fn reset(&self, id: Uuid) -> Result<()> {
        let window = self.window(id).await?;
        window.lock().await.reset();
        Ok(())
    }

    pub async fn remove(&self, id: Uuid) -> Result<()> {
        self.sessions
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| ServiceError::session_not_found(id))
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.len()
    }
}
