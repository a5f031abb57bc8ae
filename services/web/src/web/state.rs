//! services/web/src/web/state.rs
//!
//! Defines the application's shared state.

use std::sync::Arc;

use axum::extract::FromRef;
use axum_extra::extract::cookie::Key;
use miniblog_core::ports::EntryStore;

use crate::config::Config;

/// The shared application state, created once at startup and passed to all
/// handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn EntryStore>,
    pub config: Arc<Config>,
    cookie_key: Key,
}

impl AppState {
    /// Builds the state, deriving the cookie signing key from the configured
    /// secret. `Config::from_env` guarantees the secret is long enough for
    /// the derivation.
    pub fn new(store: Arc<dyn EntryStore>, config: Arc<Config>) -> Self {
        let cookie_key = Key::derive_from(config.secret_key.as_bytes());
        Self {
            store,
            config,
            cookie_key,
        }
    }
}

// Lets `SignedCookieJar` pull the signing key straight out of the router
// state.
impl FromRef<AppState> for Key {
    fn from_ref(state: &AppState) -> Key {
        state.cookie_key.clone()
    }
}
