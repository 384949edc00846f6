//! In-progress reservation drafts, keyed by user id
//!
//! Sessions live only in process memory: no expiry, no capacity bound, no
//! persistence. A restart drops every in-flight draft.

use crate::wizard::Session;
use std::collections::HashMap;
use std::sync::Mutex;

/// Store for per-user wizard sessions.
///
/// Injectable so tests can observe it directly and production could swap in
/// a shared store without touching the dispatcher.
pub trait SessionStore: Send + Sync {
    fn get(&self, user_id: i64) -> Option<Session>;
    fn put(&self, user_id: i64, session: Session);
    /// Deleting an absent key is a no-op.
    fn delete(&self, user_id: i64);
}

/// Process-local session map.
#[derive(Default)]
pub struct InMemorySessions {
    inner: Mutex<HashMap<i64, Session>>,
}

impl InMemorySessions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions.
    #[allow(dead_code)] // Used in tests
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().len()
    }
}

impl SessionStore for InMemorySessions {
    fn get(&self, user_id: i64) -> Option<Session> {
        self.inner.lock().unwrap().get(&user_id).cloned()
    }

    fn put(&self, user_id: i64, session: Session) {
        self.inner.lock().unwrap().insert(user_id, session);
    }

    fn delete(&self, user_id: i64) {
        self.inner.lock().unwrap().remove(&user_id);
    }
}

impl<T: SessionStore + ?Sized> SessionStore for std::sync::Arc<T> {
    fn get(&self, user_id: i64) -> Option<Session> {
        (**self).get(user_id)
    }

    fn put(&self, user_id: i64, session: Session) {
        (**self).put(user_id, session);
    }

    fn delete(&self, user_id: i64) {
        (**self).delete(user_id);
    }
}
