use std::time::SystemTime;

use indexmap::IndexMap;

use crate::auth;
use crate::config::config;

struct Session {
    username: String,
    expires_at: SystemTime,
}

/// Maps opaque session tokens to authenticated usernames.
///
/// Tokens are created on successful login only. There is no logout;
/// sessions end by expiry, purged lazily on the next accepted
/// connection. One username may hold several live tokens at once.
pub struct SessionStore {
    sessions: IndexMap<String, Session>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: IndexMap::new(),
        }
    }

    /// Creates a session for `username` with the configured TTL.
    /// Returns the new token and its expiry instant.
    pub fn create(&mut self, username: &str) -> (String, SystemTime) {
        let expires_at = SystemTime::now() + config().session_ttl;
        let token = self.create_at(username, expires_at);
        (token, expires_at)
    }

    /// Creates a session expiring at an explicit instant.
    pub fn create_at(&mut self, username: &str, expires_at: SystemTime) -> String {
        let token = auth::new_token();
        self.sessions.insert(
            token.clone(),
            Session {
                username: username.to_string(),
                expires_at,
            },
        );
        token
    }

    /// Looks up the username behind `token`. Expired sessions resolve
    /// to `None` even before they are purged.
    pub fn resolve(&self, token: &str) -> Option<&str> {
        let session = self.sessions.get(token)?;
        if session.expires_at <= SystemTime::now() {
            return None;
        }
        Some(&session.username)
    }

    /// Drops every expired session.
    pub fn purge_expired(&mut self) {
        let now = SystemTime::now();
        self.sessions.retain(|_, s| s.expires_at > now);
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn create_and_resolve() {
        let mut store = SessionStore::new();
        let (token, _) = store.create("crashoverride");
        assert_eq!(store.resolve(&token), Some("crashoverride"));
        assert_eq!(store.resolve("no-such-token"), None);
    }

    #[test]
    fn one_user_may_hold_several_tokens() {
        let mut store = SessionStore::new();
        let (a, _) = store.create("crashoverride");
        let (b, _) = store.create("crashoverride");
        assert_ne!(a, b);
        assert_eq!(store.resolve(&a), Some("crashoverride"));
        assert_eq!(store.resolve(&b), Some("crashoverride"));
    }

    #[test]
    fn expired_sessions_do_not_resolve_and_get_purged() {
        let mut store = SessionStore::new();
        let past = SystemTime::now() - Duration::from_secs(1);
        let stale = store.create_at("cerealkiller", past);
        let (live, _) = store.create("crashoverride");

        assert_eq!(store.resolve(&stale), None);
        assert_eq!(store.resolve(&live), Some("crashoverride"));

        store.purge_expired();
        assert_eq!(store.len(), 1);
        assert_eq!(store.resolve(&live), Some("crashoverride"));
    }
}
