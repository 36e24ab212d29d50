use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ConversationMessage;

/// Idle time after which a session's transcript is dropped.
pub const DEFAULT_TTL: Duration = Duration::from_secs(30 * 60);
pub const DEFAULT_MAX_SESSIONS: usize = 1000;

/// Transcript as returned to the browser.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcript {
    pub messages: Vec<ConversationMessage>,
    pub count: usize,
}

impl Transcript {
    fn new(messages: Vec<ConversationMessage>) -> Self {
        let count = messages.len();
        Self { messages, count }
    }
}

struct Session {
    messages: Vec<ConversationMessage>,
    last_active: Instant,
}

/// In-memory transcripts keyed by the session cookie. Idle sessions expire
/// after `ttl`; when `max_sessions` is reached the least recently active one
/// is evicted to make room.
pub struct SessionStore {
    sessions: Mutex<HashMap<Uuid, Session>>,
    ttl: Duration,
    max_sessions: usize,
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(DEFAULT_TTL, DEFAULT_MAX_SESSIONS)
    }
}

impl SessionStore {
    pub fn new(ttl: Duration, max_sessions: usize) -> Self {
        Self {
            sessions: Mutex::new(HashMap::new()),
            ttl,
            max_sessions: max_sessions.max(1),
        }
    }

    pub fn transcript(&self, id: Uuid) -> Transcript {
        let now = Instant::now();
        let mut sessions = self.lock();
        match sessions.get(&id) {
            Some(session) if !self.expired(session, now) => {
                Transcript::new(session.messages.clone())
            }
            Some(_) => {
                sessions.remove(&id);
                Transcript::default()
            }
            None => Transcript::default(),
        }
    }

    pub fn push(&self, id: Uuid, message: ConversationMessage) {
        let now = Instant::now();
        let mut sessions = self.lock();

        let live = sessions
            .get(&id)
            .is_some_and(|session| !self.expired(session, now));
        if !live {
            sessions.remove(&id);
            self.make_room(&mut sessions, now);
        }

        let session = sessions.entry(id).or_insert_with(|| Session {
            messages: Vec::new(),
            last_active: now,
        });
        session.messages.push(message);
        session.last_active = now;
    }

    pub fn clear(&self, id: Uuid) {
        self.lock().remove(&id);
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn expired(&self, session: &Session, now: Instant) -> bool {
        now.duration_since(session.last_active) >= self.ttl
    }

    fn make_room(&self, sessions: &mut HashMap<Uuid, Session>, now: Instant) {
        let before = sessions.len();
        sessions.retain(|_, session| !self.expired(session, now));

        while sessions.len() >= self.max_sessions {
            let oldest = sessions
                .iter()
                .min_by_key(|(_, session)| session.last_active)
                .map(|(id, _)| *id);
            match oldest {
                Some(id) => {
                    sessions.remove(&id);
                }
                None => break,
            }
        }

        let dropped = before - sessions.len();
        if dropped > 0 {
            tracing::debug!(dropped, remaining = sessions.len(), "evicted chat sessions");
        }
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<Uuid, Session>> {
        self.sessions.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
