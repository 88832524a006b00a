use std::collections::HashMap;

use uuid::Uuid;

use crate::{
    clients::Services,
    session::{
        state::SessionState,
        store::{SessionSettings, SessionStore},
    },
};

/// Owns one [`SessionStore`] per session id. Stores share only the
/// read-only client bundle; their states never alias.
pub struct SessionRegistry {
    services: Services,
    settings: SessionSettings,
    sessions: HashMap<Uuid, SessionStore>,
}

impl SessionRegistry {
    pub fn new(services: Services, settings: SessionSettings) -> Self {
        Self {
            services,
            settings,
            sessions: HashMap::new(),
        }
    }

    /// Start a fresh, empty session and return its id
    pub fn open(&mut self) -> Uuid {
        let state = SessionState::new();
        let id = state.session_id();
        self.sessions.insert(
            id,
            SessionStore::with_state(state, self.services.clone(), self.settings.clone()),
        );
        id
    }

    pub fn get(&self, id: &Uuid) -> Option<&SessionStore> {
        self.sessions.get(id)
    }

    pub fn get_mut(&mut self, id: &Uuid) -> Option<&mut SessionStore> {
        self.sessions.get_mut(id)
    }

    /// End a session, discarding its state
    pub fn close(&mut self, id: &Uuid) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}
