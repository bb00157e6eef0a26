//! guestbookd — a minimal HTTP/1.0 guestbook server.
//!
//! A single-threaded, strictly sequential request/response server with
//! an in-memory authentication and content store:
//! - `http`: wire parsing, validation, and response building
//! - `net`: the sequential accept loop
//! - `handler`: routing, page handlers, static assets, gzip middleware
//! - `store`: session, CSRF-nonce, and guestbook state
//! - `auth`: credential checking and token/nonce generation
//! - `view`: typed HTML view-models with escaping by construction

pub mod auth;
pub mod config;
pub mod handler;
pub mod http;
pub mod net;
pub mod store;
pub mod view;
