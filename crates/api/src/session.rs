//! Per-user session state.
//!
//! A session is opened when a phone number passes OTP verification and
//! carries the notification list shown to that user. Sessions live in
//! memory, expire after a fixed lifetime, and are dropped on logout or
//! restart.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Notifications kept per session; older ones are dropped first.
pub const MAX_NOTIFICATIONS: usize = 50;

pub fn default_session_ttl() -> Duration {
    Duration::hours(24)
}

#[derive(Debug, Clone, PartialEq)]
pub struct Session {
    pub token: Uuid,
    pub phone: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub notifications: Vec<String>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, Session>>>,
    ttl: Duration,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::with_ttl(default_session_ttl())
    }
}

/// Looks up a session, evicting it if it has expired.
fn live(
    sessions: &mut HashMap<Uuid, Session>,
    token: Uuid,
    now: DateTime<Utc>,
) -> Option<&mut Session> {
    if sessions.get(&token).is_some_and(|s| s.is_expired(now)) {
        sessions.remove(&token);
        return None;
    }
    sessions.get_mut(&token)
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Opens a session and sweeps out every expired one.
    pub async fn open(&self, phone: &str) -> Session {
        let now = Utc::now();
        let session = Session {
            token: Uuid::new_v4(),
            phone: phone.to_string(),
            created_at: now,
            expires_at: now + self.ttl,
            notifications: Vec::new(),
        };

        let mut sessions = self.sessions.write().await;
        sessions.retain(|_, s| !s.is_expired(now));
        sessions.insert(session.token, session.clone());
        session
    }

    pub async fn get(&self, token: Uuid) -> Option<Session> {
        let mut sessions = self.sessions.write().await;
        live(&mut sessions, token, Utc::now()).map(|s| s.clone())
    }

    pub async fn close(&self, token: Uuid) -> bool {
        self.sessions.write().await.remove(&token).is_some()
    }

    /// Returns `false` if the session no longer exists.
    pub async fn push_notification(&self, token: Uuid, message: impl Into<String>) -> bool {
        let mut sessions = self.sessions.write().await;
        match live(&mut sessions, token, Utc::now()) {
            Some(session) => {
                session.notifications.push(message.into());
                let overflow = session.notifications.len().saturating_sub(MAX_NOTIFICATIONS);
                session.notifications.drain(..overflow);
                true
            }
            None => false,
        }
    }

    pub async fn notifications(&self, token: Uuid) -> Option<Vec<String>> {
        let mut sessions = self.sessions.write().await;
        live(&mut sessions, token, Utc::now()).map(|s| s.notifications.clone())
    }

    /// Removes one notification by position, returning it.
    pub async fn clear_notification(&self, token: Uuid, index: usize) -> Option<String> {
        let mut sessions = self.sessions.write().await;
        let session = live(&mut sessions, token, Utc::now())?;
        (index < session.notifications.len()).then(|| session.notifications.remove(index))
    }
}
