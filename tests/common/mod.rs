//! Shared helpers for integration tests

#![allow(dead_code)]

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use chrono::Utc;
use pcforge::notify::{MemoryNotifier, NoticeLevel};
use pcforge::token::MemoryTokenStore;
use pcforge::SessionManager;
use std::sync::Arc;

/// Build a JWT-shaped token with the given subject and absolute expiry
///
/// The signature segment is a fixed placeholder; the client never
/// verifies it.
pub fn make_token(sub: &str, exp: i64) -> String {
    let header = URL_SAFE_NO_PAD.encode(b"{\"alg\":\"HS256\",\"typ\":\"JWT\"}");
    let payload = URL_SAFE_NO_PAD.encode(
        serde_json::json!({ "sub": sub, "exp": exp })
            .to_string()
            .as_bytes(),
    );
    format!("{}.{}.sig", header, payload)
}

/// Token for `sub` expiring `secs` seconds from now
pub fn token_expiring_in(sub: &str, secs: i64) -> String {
    make_token(sub, Utc::now().timestamp() + secs)
}

/// Session manager over fresh in-memory store and notifier
pub fn test_session() -> (SessionManager, Arc<MemoryTokenStore>, Arc<MemoryNotifier>) {
    let store = Arc::new(MemoryTokenStore::new());
    let notifier = Arc::new(MemoryNotifier::new());
    let manager = SessionManager::new(store.clone(), notifier.clone());
    (manager, store, notifier)
}

/// Number of recorded notices containing `needle`
pub fn notice_count(notifier: &MemoryNotifier, needle: &str) -> usize {
    notifier
        .notices()
        .iter()
        .filter(|(_, m)| m.contains(needle))
        .count()
}

/// Number of recorded notices at the given level
pub fn level_count(notifier: &MemoryNotifier, level: NoticeLevel) -> usize {
    notifier
        .notices()
        .iter()
        .filter(|(l, _)| *l == level)
        .count()
}
