//! Visitor sessions.
//!
//! Authentication itself is out of scope; sessions exist to carry the
//! negotiated locale across requests (and the authenticated flag the
//! secured-site gate checks). Backed by an in-process map.

use dashmap::DashMap;
use uuid::Uuid;
use vitrine_shared::Locale;

/// Session cookie name.
pub const SESSION_COOKIE: &str = "vitrine_sid";

/// Per-visitor session data.
#[derive(Debug, Clone, Default)]
pub struct SessionData {
    /// Locale persisted by the negotiator.
    pub locale: Option<Locale>,
    /// Set by the (out-of-scope) authentication layer.
    pub authenticated: bool,
}

/// In-process session store.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, SessionData>,
}

impl SessionStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fresh session and returns its id.
    #[must_use]
    pub fn create(&self) -> String {
        let id = Uuid::new_v4().to_string();
        self.sessions.insert(id.clone(), SessionData::default());
        id
    }

    /// Returns a copy of the session data, if the id is known.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<SessionData> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    /// Writes the negotiated locale into the session.
    pub fn set_locale(&self, id: &str, locale: Locale) {
        self.sessions.entry(id.to_string()).or_default().locale = Some(locale);
    }

    /// Flags the session as authenticated.
    pub fn set_authenticated(&self, id: &str, authenticated: bool) {
        self.sessions
            .entry(id.to_string())
            .or_default()
            .authenticated = authenticated;
    }
}
