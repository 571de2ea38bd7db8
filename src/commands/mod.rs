/*!
Command handlers for the CLI

This module provides command handlers invoked by the CLI entrypoint.

It exposes three handler modules:

- `auth`      — Registration, login, logout, and session display
- `recommend` — Recommendation queries with optional save and rate
- `builds`    — Saved-build listing, rating, and deletion

These handlers are intentionally small and wire the library components
together: token store, session manager, API client, and workflow.
*/

use crate::api::ApiClient;
use crate::config::Config;
use crate::error::Result;
use crate::notify::{Notifier, TerminalNotifier};
use crate::session::SessionManager;
use crate::token::KeyringTokenStore;
use std::sync::Arc;

pub mod auth;
pub mod builds;
pub mod recommend;

/// Construct the shared notifier for a command invocation
pub(crate) fn notifier() -> Arc<dyn Notifier> {
    Arc::new(TerminalNotifier::new())
}

/// Construct the session manager over the configured keyring cell
pub(crate) fn session_manager(config: &Config, notifier: Arc<dyn Notifier>) -> SessionManager {
    let store = Arc::new(KeyringTokenStore::new(
        &config.session.keyring_service,
        &config.session.keyring_account,
    ));
    SessionManager::new(store, notifier)
}

/// Construct the API client from configuration
pub(crate) fn api_client(config: &Config) -> Result<ApiClient> {
    ApiClient::new(&config.api)
}
