use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::models::session::Session;

type SessionSlot = Arc<Mutex<Session>>;

/// What to do with a session after a `with_session` transition.
pub enum SessionFate {
    Keep,
    Discard,
}

/// Process-wide map from user id to session. Cloneable handle; tests build
/// their own isolated instance. Sessions live until explicitly discarded by
/// the orchestrator, there is no eviction.
#[derive(Clone, Default)]
pub struct SessionService {
    sessions: Arc<Mutex<HashMap<String, SessionSlot>>>,
}

impl SessionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, user_id: &str) -> Option<SessionSlot> {
        self.sessions
            .lock()
            .expect("session map mutex poisoned")
            .get(user_id)
            .cloned()
    }

    pub fn get_or_create(&self, user_id: &str) -> SessionSlot {
        self.sessions
            .lock()
            .expect("session map mutex poisoned")
            .entry(user_id.to_string())
            .or_insert_with(|| Arc::new(Mutex::new(Session::new(user_id))))
            .clone()
    }

    pub fn delete(&self, user_id: &str) {
        self.sessions
            .lock()
            .expect("session map mutex poisoned")
            .remove(user_id);
    }

    /// Runs one read-modify-write transition under the per-user lock.
    /// Messages from the same user are serialized here; different users
    /// proceed in parallel on their own slots.
    ///
    /// After taking the slot lock the map is re-checked: if a concurrent
    /// transition completed the session and discarded the slot, the stale
    /// slot is abandoned and the lookup starts over on a fresh session.
    pub fn with_session<R>(
        &self,
        user_id: &str,
        mut f: impl FnMut(&mut Session) -> (R, SessionFate),
    ) -> R {
        loop {
            let slot = self.get_or_create(user_id);
            let mut session = slot.lock().expect("session mutex poisoned");

            let still_live = {
                let map = self.sessions.lock().expect("session map mutex poisoned");
                map.get(user_id).is_some_and(|live| Arc::ptr_eq(live, &slot))
            };
            if !still_live {
                continue;
            }

            let (result, fate) = f(&mut session);
            if matches!(fate, SessionFate::Discard) {
                self.sessions
                    .lock()
                    .expect("session map mutex poisoned")
                    .remove(user_id);
            }
            return result;
        }
    }
}
