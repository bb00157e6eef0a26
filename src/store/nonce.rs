use indexmap::IndexMap;

use crate::auth;

/// Maps a username to its single currently-valid CSRF nonce.
///
/// A fresh nonce is issued on every authenticated guestbook render and
/// replaces the previous one, so at most one submission per rendered
/// page can succeed.
pub struct NonceStore {
    nonces: IndexMap<String, String>,
}

impl NonceStore {
    pub fn new() -> Self {
        Self {
            nonces: IndexMap::new(),
        }
    }

    /// Issues and stores a fresh nonce for `username`, replacing any
    /// previous one.
    pub fn issue(&mut self, username: &str) -> String {
        let nonce = auth::new_nonce();
        self.nonces.insert(username.to_string(), nonce.clone());
        nonce
    }

    /// Whether `submitted` equals the current nonce for `username`.
    /// Compared in constant time; no stored nonce means no match.
    pub fn matches(&self, username: &str, submitted: &str) -> bool {
        match self.nonces.get(username) {
            Some(current) => auth::constant_time_eq(current.as_bytes(), submitted.as_bytes()),
            None => false,
        }
    }

    /// The nonce currently stored for `username`, if any.
    pub fn current(&self, username: &str) -> Option<&str> {
        self.nonces.get(username).map(String::as_str)
    }
}

impl Default for NonceStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issue_overwrites_the_previous_nonce() {
        let mut store = NonceStore::new();
        let first = store.issue("crashoverride");
        assert!(store.matches("crashoverride", &first));

        let second = store.issue("crashoverride");
        assert_ne!(first, second);
        assert!(!store.matches("crashoverride", &first));
        assert!(store.matches("crashoverride", &second));
        assert_eq!(store.current("crashoverride"), Some(second.as_str()));
    }

    #[test]
    fn unknown_user_never_matches() {
        let store = NonceStore::new();
        assert!(!store.matches("cerealkiller", "anything"));
        assert_eq!(store.current("cerealkiller"), None);
    }

    #[test]
    fn nonces_are_per_user() {
        let mut store = NonceStore::new();
        let a = store.issue("crashoverride");
        let b = store.issue("cerealkiller");
        assert!(store.matches("crashoverride", &a));
        assert!(!store.matches("crashoverride", &b));
        assert!(store.matches("cerealkiller", &b));
    }
}
