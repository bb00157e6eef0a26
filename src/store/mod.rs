//! Process-wide application state.
//!
//! The three stores are owned by the server and passed by reference
//! into the handler path rather than living in globals. They are only
//! ever touched from the single serving control flow, so no locking is
//! needed; concurrent connection handling would require wrapping each
//! store in its own synchronization.

pub mod guestbook;
pub mod nonce;
pub mod session;

pub use guestbook::{GuestbookEntry, GuestbookStore};
pub use nonce::NonceStore;
pub use session::SessionStore;

pub struct AppState {
    pub sessions: SessionStore,
    pub nonces: NonceStore,
    pub guestbook: GuestbookStore,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            sessions: SessionStore::new(),
            nonces: NonceStore::new(),
            guestbook: GuestbookStore::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
